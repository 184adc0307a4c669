use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::TermCandidates;

/// Contribution of a candidate that carries no positive score.
pub const MISSING_SCORE_PLACEHOLDER: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyScore {
	pub vocabulary: String,
	/// Mean candidate score plus any preference boost.
	pub score: f64,
	pub candidate_count: usize,
}

/// Aggregate score per vocabulary, in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VocabularyScores {
	entries: Vec<VocabularyScore>,
	#[serde(skip)]
	index: HashMap<String, usize>,
}
impl VocabularyScores {
	pub fn get(&self, vocabulary: &str) -> Option<f64> {
		self.index.get(vocabulary).map(|position| self.entries[*position].score)
	}

	pub fn entries(&self) -> &[VocabularyScore] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Vocabularies from lowest to highest score; equal scores keep first-appearance order.
	pub fn ascending_sequence(&self) -> Vec<String> {
		let mut ordered: Vec<&VocabularyScore> = self.entries.iter().collect();

		ordered.sort_by(|lhs, rhs| lhs.score.total_cmp(&rhs.score));

		ordered.into_iter().map(|entry| entry.vocabulary.clone()).collect()
	}

	fn accumulate(&mut self, vocabulary: &str, score: f64) {
		match self.index.get(vocabulary) {
			Some(position) => {
				let entry = &mut self.entries[*position];

				entry.score += score;
				entry.candidate_count += 1;
			},
			None => {
				self.index.insert(vocabulary.to_string(), self.entries.len());
				self.entries.push(VocabularyScore {
					vocabulary: vocabulary.to_string(),
					score,
					candidate_count: 1,
				});
			},
		}
	}
}

/// Averages candidate scores per vocabulary over the whole batch, then adds preference boosts.
///
/// Every candidate counts once regardless of its term, so the mean is not weighted by term.
/// Preferences only touch vocabularies that occur in the batch.
pub fn score_vocabularies(
	terms: &[TermCandidates],
	preferences: &BTreeMap<String, f64>,
) -> VocabularyScores {
	let mut scores = VocabularyScores::default();

	for term in terms {
		for candidate in &term.homogeneous {
			let score = candidate
				.score
				.filter(|score| score.is_finite() && *score > 0.0)
				.unwrap_or(MISSING_SCORE_PLACEHOLDER);

			scores.accumulate(&candidate.vocabulary, score);
		}
	}

	for entry in &mut scores.entries {
		entry.score /= entry.candidate_count as f64;

		if let Some(boost) = preferences.get(&entry.vocabulary) {
			entry.score += boost;
		}
	}

	scores
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{Attribution, Candidate, Category};

	fn scored(vocabulary: &str, score: Option<f64>) -> Candidate {
		let mut candidate = Candidate::new(
			format!("http://example.org/{vocabulary}/x"),
			Category::Class,
			Attribution { prefix: Some(vocabulary.to_string()), namespace: String::new() },
		);

		candidate.score = score;

		candidate
	}

	fn term(name: &str, candidates: Vec<Candidate>) -> TermCandidates {
		let mut term = TermCandidates::new(name);

		term.extend(candidates);

		term
	}

	#[test]
	fn averages_across_terms() {
		let terms = vec![
			term("Person", vec![scored("foaf", Some(0.75)), scored("foaf", Some(0.25))]),
			term("knows", vec![scored("foaf", Some(1.0)), scored("sdo", Some(0.4))]),
		];
		let scores = score_vocabularies(&terms, &BTreeMap::new());

		assert_eq!(scores.get("foaf"), Some(2.0 / 3.0));
		assert_eq!(scores.get("sdo"), Some(0.4));
		assert_eq!(scores.entries()[0].candidate_count, 3);
	}

	#[test]
	fn missing_scores_use_placeholder() {
		let terms = vec![term("Person", vec![scored("dc", None), scored("dc", Some(0.0))])];
		let scores = score_vocabularies(&terms, &BTreeMap::new());

		assert_eq!(scores.get("dc"), Some(MISSING_SCORE_PLACEHOLDER));
	}

	#[test]
	fn preferences_are_additive_and_never_add_vocabularies() {
		let terms = vec![term("Person", vec![scored("foaf", Some(0.5)), scored("sdo", Some(0.5))])];
		let preferences = BTreeMap::from([("sdo".to_string(), 0.25), ("dcat".to_string(), 1.0)]);
		let scores = score_vocabularies(&terms, &preferences);

		assert_eq!(scores.get("sdo"), Some(0.75));
		assert_eq!(scores.get("foaf"), Some(0.5));
		assert_eq!(scores.get("dcat"), None);
	}

	#[test]
	fn ascending_sequence_is_stable_for_ties() {
		let terms = vec![term(
			"Person",
			vec![scored("b", Some(0.3)), scored("a", Some(0.3)), scored("c", Some(0.1))],
		)];
		let scores = score_vocabularies(&terms, &BTreeMap::new());

		assert_eq!(scores.ascending_sequence(), vec!["c", "b", "a"]);
	}
}
