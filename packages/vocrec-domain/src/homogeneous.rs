use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
	Candidate, TermCandidates,
	combi::{self, Selection},
	vocabulary_score::{self, VocabularyScores},
};

/// The winning candidate for one term, or an explicit empty pick.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
	pub search_term: String,
	pub vocabulary: Option<String>,
	pub candidate: Option<Candidate>,
}
impl Recommendation {
	fn empty(search_term: &str) -> Self {
		Self { search_term: search_term.to_string(), vocabulary: None, candidate: None }
	}

	fn of(search_term: &str, candidate: &Candidate) -> Self {
		Self {
			search_term: search_term.to_string(),
			vocabulary: Some(candidate.vocabulary.clone()),
			candidate: Some(candidate.clone()),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.candidate.is_none()
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomogeneousRecommendations {
	pub vocabulary_scores: VocabularyScores,
	pub selection: Selection,
	/// Per term, the best scoring candidate of a selected vocabulary.
	pub instance: Vec<Recommendation>,
	/// Per term, a candidate of the best scoring selected vocabulary that covers it.
	pub vocabulary: Vec<Recommendation>,
}

/// Candidates from best to worst score; unscored candidates last, ties in input order.
pub fn ranked_candidates(term: &TermCandidates) -> Vec<&Candidate> {
	let mut ranked: Vec<&Candidate> = term.homogeneous.iter().collect();

	ranked.sort_by(|lhs, rhs| rhs.rank_score().total_cmp(&lhs.rank_score()));

	ranked
}

/// Selected vocabularies from best to worst aggregate score.
pub fn ranked_selection(selection: &Selection, scores: &VocabularyScores) -> Vec<String> {
	let mut ranked = selection.vocabularies.clone();

	ranked.sort_by(|lhs, rhs| {
		let lhs = scores.get(lhs).unwrap_or(f64::NEG_INFINITY);
		let rhs = scores.get(rhs).unwrap_or(f64::NEG_INFINITY);

		rhs.total_cmp(&lhs)
	});

	ranked
}

pub fn instance_recommendation(term: &TermCandidates, selection: &Selection) -> Recommendation {
	ranked_candidates(term)
		.into_iter()
		.find(|candidate| selection.contains(&candidate.vocabulary))
		.map(|candidate| Recommendation::of(&term.search_term, candidate))
		.unwrap_or_else(|| Recommendation::empty(&term.search_term))
}

/// `ranked_selection` must come from [`ranked_selection`].
pub fn vocabulary_recommendation(
	term: &TermCandidates,
	ranked_selection: &[String],
) -> Recommendation {
	let ranked = ranked_candidates(term);

	for vocabulary in ranked_selection {
		if let Some(candidate) = ranked.iter().find(|candidate| &candidate.vocabulary == vocabulary) {
			return Recommendation::of(&term.search_term, candidate);
		}
	}

	Recommendation::empty(&term.search_term)
}

/// Scores, selects and picks one candidate per term in both flavours.
pub fn recommend(
	terms: &[TermCandidates],
	preferences: &BTreeMap<String, f64>,
) -> HomogeneousRecommendations {
	let vocabulary_scores = vocabulary_score::score_vocabularies(terms, preferences);
	let selection =
		combi::select_vocabularies(&vocabulary_scores.ascending_sequence(), terms);
	let by_vocabulary = ranked_selection(&selection, &vocabulary_scores);
	let instance = terms.iter().map(|term| instance_recommendation(term, &selection)).collect();
	let vocabulary =
		terms.iter().map(|term| vocabulary_recommendation(term, &by_vocabulary)).collect();

	HomogeneousRecommendations { vocabulary_scores, selection, instance, vocabulary }
}
