//! Greedy reduction of the observed vocabularies to the ones each term cannot do without.

use serde::Serialize;

use crate::TermCandidates;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "lowercase")]
pub enum SelectionStep {
	Kept {
		vocabulary: String,
		/// Terms left without any vocabulary had this one been dropped.
		#[serde(rename = "requiredBy")]
		required_by: Vec<String>,
	},
	Dropped {
		vocabulary: String,
	},
}
impl SelectionStep {
	pub fn vocabulary(&self) -> &str {
		match self {
			Self::Kept { vocabulary, .. } | Self::Dropped { vocabulary } => vocabulary,
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
	/// Selected vocabularies in the order they were evaluated.
	pub vocabularies: Vec<String>,
	pub trace: Vec<SelectionStep>,
}
impl Selection {
	pub fn contains(&self, vocabulary: &str) -> bool {
		self.vocabularies.iter().any(|selected| selected == vocabulary)
	}

	pub fn is_empty(&self) -> bool {
		self.vocabularies.is_empty()
	}
}

struct Remaining<'a> {
	search_term: &'a str,
	vocabs: Vec<&'a str>,
}

/// Walks `sequence` from the weakest vocabulary up and drops every vocabulary whose removal
/// leaves each term with at least one other vocabulary.
///
/// `sequence` is expected to list every vocabulary found in `terms`. Terms without candidates
/// never constrain the selection.
pub fn select_vocabularies(sequence: &[String], terms: &[TermCandidates]) -> Selection {
	let mut remaining: Vec<Remaining<'_>> = terms
		.iter()
		.filter(|term| !term.vocabs.is_empty())
		.map(|term| Remaining {
			search_term: &term.search_term,
			vocabs: term.vocabs.iter().map(String::as_str).collect(),
		})
		.collect();
	let mut selection = Selection::default();

	for vocabulary in sequence {
		let required_by: Vec<String> = remaining
			.iter()
			.filter(|term| term.vocabs.iter().all(|vocab| vocab == vocabulary))
			.filter(|term| !term.vocabs.is_empty())
			.map(|term| term.search_term.to_string())
			.collect();

		if required_by.is_empty() {
			for term in &mut remaining {
				term.vocabs.retain(|vocab| vocab != vocabulary);
			}

			selection.trace.push(SelectionStep::Dropped { vocabulary: vocabulary.clone() });

			continue;
		}
		if !selection.contains(vocabulary) {
			selection.vocabularies.push(vocabulary.clone());
		}

		selection.trace.push(SelectionStep::Kept { vocabulary: vocabulary.clone(), required_by });
	}

	selection
}

#[cfg(test)]
mod tests {
	use super::*;

	fn term(name: &str, vocabs: &[&str]) -> TermCandidates {
		let mut term = TermCandidates::new(name);

		term.vocabs = vocabs.iter().map(|vocab| vocab.to_string()).collect();

		term
	}

	fn sequence(vocabs: &[&str]) -> Vec<String> {
		vocabs.iter().map(|vocab| vocab.to_string()).collect()
	}

	#[test]
	fn keeps_the_only_vocabulary() {
		let selection = select_vocabularies(&sequence(&["foaf"]), &[term("Person", &["foaf"])]);

		assert_eq!(selection.vocabularies, vec!["foaf"]);
		assert_eq!(
			selection.trace,
			vec![SelectionStep::Kept {
				vocabulary: "foaf".to_string(),
				required_by: vec!["Person".to_string()],
			}]
		);
	}

	#[test]
	fn drops_weaker_overlapping_vocabulary() {
		let selection =
			select_vocabularies(&sequence(&["foaf", "sdo"]), &[term("Person", &["foaf", "sdo"])]);

		assert_eq!(selection.vocabularies, vec!["sdo"]);
		assert_eq!(selection.trace[0], SelectionStep::Dropped { vocabulary: "foaf".to_string() });
	}

	#[test]
	fn empty_terms_never_force_a_vocabulary() {
		let selection = select_vocabularies(
			&sequence(&["foaf", "sdo"]),
			&[term("Person", &["foaf", "sdo"]), term("Unicorn", &[])],
		);

		assert_eq!(selection.vocabularies, vec!["sdo"]);
	}

	#[test]
	fn empty_sequence_selects_nothing() {
		let selection = select_vocabularies(&[], &[term("Person", &[])]);

		assert!(selection.is_empty());
		assert!(selection.trace.is_empty());
	}

	#[test]
	fn duplicates_in_sequence_are_selected_once() {
		let selection =
			select_vocabularies(&sequence(&["foaf", "foaf"]), &[term("Person", &["foaf"])]);

		assert_eq!(selection.vocabularies, vec!["foaf"]);
		assert_eq!(selection.trace.len(), 2);
	}

	#[test]
	fn reports_every_term_that_requires_a_vocabulary() {
		let selection = select_vocabularies(
			&sequence(&["dc", "sdo"]),
			&[term("name", &["dc", "sdo"]), term("Horse", &["sdo"]), term("Person", &["sdo"])],
		);

		assert_eq!(selection.vocabularies, vec!["sdo"]);
		assert_eq!(
			selection.trace[1],
			SelectionStep::Kept {
				vocabulary: "sdo".to_string(),
				required_by: vec!["name".to_string(), "Horse".to_string(), "Person".to_string()],
			}
		);
	}

	#[test]
	fn trace_follows_sequence_order() {
		let selection = select_vocabularies(
			&sequence(&["dc", "foaf", "sdo"]),
			&[term("Person", &["foaf", "sdo"]), term("title", &["dc"])],
		);
		let order: Vec<&str> = selection.trace.iter().map(SelectionStep::vocabulary).collect();

		assert_eq!(order, vec!["dc", "foaf", "sdo"]);
	}

	#[test]
	fn trace_serializes_with_decision_tag() {
		let selection = select_vocabularies(
			&sequence(&["foaf", "sdo"]),
			&[term("Person", &["foaf", "sdo"])],
		);
		let value = serde_json::to_value(&selection).expect("Selection must serialize.");

		assert_eq!(
			value,
			serde_json::json!({
				"vocabularies": ["sdo"],
				"trace": [
					{ "decision": "dropped", "vocabulary": "foaf" },
					{ "decision": "kept", "vocabulary": "sdo", "requiredBy": ["Person"] },
				],
			})
		);
	}
}
