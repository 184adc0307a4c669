use serde::Serialize;
use serde_json::Value;

use crate::{PlannedQuery, RecommendRequest, RecommenderService, Result, plan};
use vocrec_config::Endpoint;
use vocrec_domain::{Attributor, Candidate, Category, PrefixTable, normalize};
use vocrec_providers::Fetched;

/// Candidates of one successful query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryOutcome {
	pub search_term: String,
	pub category: Category,
	pub endpoint: Endpoint,
	pub query: String,
	pub candidates: Vec<Candidate>,
	/// The endpoint payload with normalized scores written back.
	pub payload: Value,
	/// Set when the raw scores carried no weight and every candidate got an equal share.
	pub even_split: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryFailure {
	pub search_term: String,
	pub category: Category,
	pub endpoint: String,
	pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleReport {
	pub queries: Vec<QueryOutcome>,
	pub failures: Vec<QueryFailure>,
}

impl RecommenderService {
	/// Runs every planned query and returns the scored candidates per query.
	///
	/// A failing query is logged and recorded; the remaining queries still run.
	pub async fn single_recommendation(&self, req: &RecommendRequest) -> Result<SingleReport> {
		let planned = plan::plan(&self.cfg, req)?;
		let table = self.prefix_table().await;

		Ok(self.run_queries(planned, table).await)
	}

	pub async fn run_queries(
		&self,
		planned: Vec<PlannedQuery>,
		table: &PrefixTable,
	) -> SingleReport {
		let mut attributor = Attributor::new(table);
		let mut report = SingleReport::default();

		for query in planned {
			tracing::debug!(
				search_term = %query.search_term,
				category = %query.category,
				endpoint = %query.endpoint.name,
				"Querying endpoint."
			);

			match self.sources.candidates.fetch(&query.endpoint, &query.query).await {
				Ok(fetched) => report.queries.push(score_query(query, fetched, &mut attributor)),
				Err(err) => {
					tracing::warn!(
						error = %err,
						search_term = %query.search_term,
						category = %query.category,
						endpoint = %query.endpoint.name,
						"Query failed. Skipping it."
					);

					report.failures.push(QueryFailure {
						search_term: query.search_term,
						category: query.category,
						endpoint: query.endpoint.name,
						message: err.to_string(),
					});
				},
			}
		}

		report
	}
}

/// Attributes and normalizes the hits of one query, then writes the scores into its payload.
fn score_query(
	query: PlannedQuery,
	fetched: Fetched,
	attributor: &mut Attributor<'_>,
) -> QueryOutcome {
	let Fetched { hits, mut response } = fetched;
	let raw: Vec<Option<f64>> = hits.iter().map(|hit| hit.raw_score).collect();
	let normalized = normalize::normalize_scores(&raw);

	if normalized.even_split {
		tracing::warn!(
			search_term = %query.search_term,
			endpoint = %query.endpoint.name,
			hits = hits.len(),
			"Raw scores sum to zero. Splitting evenly."
		);
	}

	response.annotate_scores(&hits, &normalized.scores);

	let candidates = hits
		.into_iter()
		.zip(&normalized.scores)
		.map(|(hit, score)| {
			let attribution = attributor.attribute(&hit.iri);
			let mut candidate = Candidate::new(hit.iri, query.category, attribution);

			candidate.label = hit.label;
			candidate.description = hit.description;
			candidate.raw_score = hit.raw_score;
			candidate.score = Some(*score);

			candidate
		})
		.collect();

	QueryOutcome {
		search_term: query.search_term,
		category: query.category,
		endpoint: query.endpoint,
		query: query.query,
		candidates,
		payload: response.into_payload(),
		even_split: normalized.even_split,
	}
}
