pub mod attribution;
pub mod combi;
pub mod homogeneous;
pub mod normalize;
pub mod vocabulary_score;

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

pub use attribution::{Attribution, Attributor, PrefixTable};
pub use combi::{Selection, SelectionStep};
pub use homogeneous::{HomogeneousRecommendations, Recommendation};
pub use vocabulary_score::{VocabularyScore, VocabularyScores};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
	Class,
	Property,
}
impl Category {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Class => "class",
			Self::Property => "property",
		}
	}
}
impl Display for Category {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One search result, attributed to a vocabulary and scored within its own query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
	pub iri: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	pub raw_score: Option<f64>,
	/// Share of the query's total raw score. Set once by normalization.
	pub score: Option<f64>,
	/// Prefix when the namespace is registered, otherwise the namespace.
	pub vocabulary: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub vocabulary_prefix: Option<String>,
	pub vocabulary_namespace: String,
	pub category: Category,
}
impl Candidate {
	pub fn new(iri: impl Into<String>, category: Category, attribution: Attribution) -> Self {
		let vocabulary = attribution.vocabulary().to_string();

		Self {
			iri: iri.into(),
			label: None,
			description: None,
			raw_score: None,
			score: None,
			vocabulary,
			vocabulary_prefix: attribution.prefix,
			vocabulary_namespace: attribution.namespace,
			category,
		}
	}

	/// Ranking key; candidates without a usable score sort after every scored one.
	pub fn rank_score(&self) -> f64 {
		self.score.filter(|score| score.is_finite()).unwrap_or(-1.0)
	}
}

/// Every candidate found for one search term, across categories and endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TermCandidates {
	pub search_term: String,
	/// Distinct vocabularies in first-appearance order.
	pub vocabs: Vec<String>,
	pub homogeneous: Vec<Candidate>,
}
impl TermCandidates {
	pub fn new(search_term: impl Into<String>) -> Self {
		Self { search_term: search_term.into(), vocabs: Vec::new(), homogeneous: Vec::new() }
	}

	pub fn push(&mut self, candidate: Candidate) {
		if !self.vocabs.iter().any(|vocab| vocab == &candidate.vocabulary) {
			self.vocabs.push(candidate.vocabulary.clone());
		}

		self.homogeneous.push(candidate);
	}

	pub fn is_empty(&self) -> bool {
		self.homogeneous.is_empty()
	}
}
impl Extend<Candidate> for TermCandidates {
	fn extend<I: IntoIterator<Item = Candidate>>(&mut self, iter: I) {
		for candidate in iter {
			self.push(candidate);
		}
	}
}
