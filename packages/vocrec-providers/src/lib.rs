pub mod lov;
pub mod search;
pub mod sparql;

mod error;

pub use error::{Error, Result};

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use vocrec_config::EndpointKind;

/// One result translated out of an endpoint payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RawHit {
	pub iri: String,
	pub label: Option<String>,
	pub description: Option<String>,
	pub raw_score: Option<f64>,
	/// Position of the row or hit in the payload it came from.
	pub source_index: usize,
}

/// The untouched endpoint payload, tagged with the shape it was parsed as.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResponse {
	Sparql(Value),
	Search(Value),
}
impl RawResponse {
	pub fn payload(&self) -> &Value {
		match self {
			Self::Sparql(value) | Self::Search(value) => value,
		}
	}

	pub fn into_payload(self) -> Value {
		match self {
			Self::Sparql(value) | Self::Search(value) => value,
		}
	}

	/// Writes each hit's normalized score back into the row or hit it was read from.
	///
	/// `scores` is aligned with `hits`. Rows that no longer exist are skipped.
	pub fn annotate_scores(&mut self, hits: &[RawHit], scores: &[f64]) {
		match self {
			Self::Sparql(payload) => sparql::annotate_scores(payload, hits, scores),
			Self::Search(payload) => search::annotate_scores(payload, hits, scores),
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
	pub hits: Vec<RawHit>,
	pub response: RawResponse,
}

pub fn http_client(timeout_ms: u64) -> Result<Client> {
	let client = Client::builder()
		.timeout(Duration::from_millis(timeout_ms))
		.user_agent(concat!("vocrec/", env!("CARGO_PKG_VERSION")))
		.build()?;

	Ok(client)
}

/// Sends one substituted query to an endpoint of the given kind.
pub async fn fetch(client: &Client, kind: EndpointKind, url: &str, query: &str) -> Result<Fetched> {
	match kind {
		EndpointKind::Sparql => sparql::fetch(client, url, query).await,
		EndpointKind::Search => search::fetch(client, url, query).await,
	}
}

fn string_at<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
	value.get(key).and_then(Value::as_str)
}

/// Numbers may arrive as JSON numbers or as numeric strings.
fn number(value: &Value) -> Option<f64> {
	match value {
		Value::Number(number) => number.as_f64(),
		Value::String(raw) => raw.trim().parse().ok(),
		_ => None,
	}
	.filter(|number: &f64| number.is_finite())
}
