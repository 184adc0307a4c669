pub mod homogeneous;
pub mod plan;
pub mod single;

mod error;

pub use error::{Error, Result};
pub use homogeneous::{HomogeneousReport, QuerySummary, ReturnedResult};
pub use plan::{CategorySelection, PlannedQuery, RecommendRequest};
pub use single::{QueryFailure, QueryOutcome, SingleReport};

use std::{future::Future, pin::Pin, sync::Arc};

use reqwest::Client;
use tokio::sync::OnceCell;

use vocrec_config::{Config, Endpoint, PrefixRegistry};
use vocrec_domain::PrefixTable;
use vocrec_providers::{Fetched, lov};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait CandidateSource
where
	Self: Send + Sync,
{
	fn fetch<'a>(
		&'a self,
		endpoint: &'a Endpoint,
		query: &'a str,
	) -> BoxFuture<'a, vocrec_providers::Result<Fetched>>;
}

pub trait PrefixSource
where
	Self: Send + Sync,
{
	/// Returns `(namespace, prefix)` pairs.
	fn prefixes<'a>(
		&'a self,
		registry: &'a PrefixRegistry,
	) -> BoxFuture<'a, vocrec_providers::Result<Vec<(String, String)>>>;
}

#[derive(Clone)]
pub struct Sources {
	pub candidates: Arc<dyn CandidateSource>,
	pub prefixes: Arc<dyn PrefixSource>,
}
impl Sources {
	pub fn new(candidates: Arc<dyn CandidateSource>, prefixes: Arc<dyn PrefixSource>) -> Self {
		Self { candidates, prefixes }
	}

	/// Both sources backed by one HTTP client with the configured timeout.
	pub fn http(cfg: &Config) -> Result<Self> {
		let client = vocrec_providers::http_client(cfg.http.timeout_ms)?;
		let source = Arc::new(HttpSources { client });

		Ok(Self { candidates: source.clone(), prefixes: source })
	}
}

struct HttpSources {
	client: Client,
}

impl CandidateSource for HttpSources {
	fn fetch<'a>(
		&'a self,
		endpoint: &'a Endpoint,
		query: &'a str,
	) -> BoxFuture<'a, vocrec_providers::Result<Fetched>> {
		Box::pin(vocrec_providers::fetch(&self.client, endpoint.kind, &endpoint.url, query))
	}
}

impl PrefixSource for HttpSources {
	fn prefixes<'a>(
		&'a self,
		registry: &'a PrefixRegistry,
	) -> BoxFuture<'a, vocrec_providers::Result<Vec<(String, String)>>> {
		Box::pin(lov::fetch_prefixes(&self.client, &registry.url))
	}
}

pub struct RecommenderService {
	pub cfg: Config,
	pub sources: Sources,
	prefix_table: OnceCell<PrefixTable>,
}
impl RecommenderService {
	pub fn new(cfg: Config) -> Result<Self> {
		let sources = Sources::http(&cfg)?;

		Ok(Self::with_sources(cfg, sources))
	}

	pub fn with_sources(cfg: Config, sources: Sources) -> Self {
		Self { cfg, sources, prefix_table: OnceCell::new() }
	}

	/// The registry's prefixes, fetched on first use.
	///
	/// A disabled or unreachable registry yields an empty table, so every vocabulary is
	/// identified by its namespace.
	pub async fn prefix_table(&self) -> &PrefixTable {
		self.prefix_table
			.get_or_init(|| async {
				if !self.cfg.prefix_registry.enabled {
					return PrefixTable::new();
				}

				match self.sources.prefixes.prefixes(&self.cfg.prefix_registry).await {
					Ok(pairs) => {
						tracing::info!(
							registry = %self.cfg.prefix_registry.url,
							prefixes = pairs.len(),
							"Loaded vocabulary prefixes."
						);

						PrefixTable::from_pairs(pairs)
					},
					Err(err) => {
						tracing::warn!(
							error = %err,
							registry = %self.cfg.prefix_registry.url,
							"Prefix registry fetch failed. Falling back to namespaces."
						);

						PrefixTable::new()
					},
				}
			})
			.await
	}
}
