use serde::Serialize;
use serde_json::Value;

use crate::{QueryFailure, QueryOutcome, RecommendRequest, RecommenderService, Result};
use vocrec_domain::{
	Candidate, Category, Recommendation, Selection, TermCandidates, VocabularyScores, homogeneous,
};

/// Everything found for one search term.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnedResult {
	pub search_term: String,
	pub vocabs: Vec<String>,
	pub homogeneous: Vec<Candidate>,
	/// Raw payloads of the term's queries, in query order.
	pub single: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuerySummary {
	pub search_term: String,
	pub category: Category,
	pub endpoint: String,
	pub hits: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomogeneousReport {
	pub results: Vec<ReturnedResult>,
	pub vocabulary_scores: VocabularyScores,
	pub selection: Selection,
	pub instance_recommendations: Vec<Recommendation>,
	pub vocabulary_recommendations: Vec<Recommendation>,
	pub queries: Vec<QuerySummary>,
	pub failures: Vec<QueryFailure>,
}

impl RecommenderService {
	/// Picks one candidate per search term so that the batch as a whole draws on as few
	/// vocabularies as possible.
	pub async fn homogeneous_recommendation(
		&self,
		req: &RecommendRequest,
	) -> Result<HomogeneousReport> {
		let report = self.single_recommendation(req).await?;
		let queries = report
			.queries
			.iter()
			.map(|outcome| QuerySummary {
				search_term: outcome.search_term.clone(),
				category: outcome.category,
				endpoint: outcome.endpoint.name.clone(),
				hits: outcome.candidates.len(),
			})
			.collect();
		let (terms, payloads) = group_by_term(&req.distinct_terms(), report.queries);
		let recommendations =
			homogeneous::recommend(&terms, &self.cfg.vocabulary_preferences);

		tracing::info!(
			terms = terms.len(),
			vocabularies = recommendations.vocabulary_scores.len(),
			selected = recommendations.selection.vocabularies.len(),
			"Selected vocabularies."
		);

		let results = terms
			.into_iter()
			.zip(payloads)
			.map(|(term, single)| ReturnedResult {
				search_term: term.search_term,
				vocabs: term.vocabs,
				homogeneous: term.homogeneous,
				single,
			})
			.collect();

		Ok(HomogeneousReport {
			results,
			vocabulary_scores: recommendations.vocabulary_scores,
			selection: recommendations.selection,
			instance_recommendations: recommendations.instance,
			vocabulary_recommendations: recommendations.vocabulary,
			queries,
			failures: report.failures,
		})
	}
}

/// Merges query outcomes into one entry per search term, in `search_terms` order.
pub fn group_by_term(
	search_terms: &[&str],
	outcomes: Vec<QueryOutcome>,
) -> (Vec<TermCandidates>, Vec<Vec<Value>>) {
	let mut terms: Vec<TermCandidates> =
		search_terms.iter().map(|term| TermCandidates::new(*term)).collect();
	let mut payloads: Vec<Vec<Value>> = vec![Vec::new(); terms.len()];

	for outcome in outcomes {
		let Some(position) = terms.iter().position(|term| term.search_term == outcome.search_term)
		else {
			continue;
		};

		terms[position].extend(outcome.candidates);
		payloads[position].push(outcome.payload);
	}

	(terms, payloads)
}
