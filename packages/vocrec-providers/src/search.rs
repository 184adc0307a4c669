//! Elasticsearch-style document search over HTTP POST.

use reqwest::Client;
use serde_json::{Map, Value};

use crate::{Error, Fetched, RawHit, RawResponse, Result};

/// Description fields in priority order. Indexes store predicate IRIs with `.` replaced by ` `.
const DESCRIPTION_KEYS: [&str; 4] = [
	"http://www w3 org/2000/01/rdf-schema#comment",
	"http://www.w3.org/2000/01/rdf-schema#comment",
	"http://www w3 org/2004/02/skos/core#definition",
	"http://www.w3.org/2004/02/skos/core#definition",
];
const LABEL_KEYS: [&str; 2] =
	["http://www w3 org/2000/01/rdf-schema#label", "http://www.w3.org/2000/01/rdf-schema#label"];

pub async fn fetch(client: &Client, url: &str, query: &str) -> Result<Fetched> {
	let body: Value = serde_json::from_str(query).map_err(|err| Error::InvalidQuery {
		message: format!("Search query is not valid JSON: {err}."),
	})?;
	let res = client.post(url).json(&body).send().await?;
	let json: Value = res.error_for_status()?.json().await?;
	let hits = parse_response(&json)?;

	Ok(Fetched { hits, response: RawResponse::Search(json) })
}

/// Reads `_id`, `_score` and the label and description fields of every `hits.hits` entry.
pub fn parse_response(json: &Value) -> Result<Vec<RawHit>> {
	let entries = json.pointer("/hits/hits").and_then(Value::as_array).ok_or_else(|| {
		Error::InvalidResponse { message: "Search response is missing hits.hits array.".to_string() }
	})?;
	let mut hits = Vec::with_capacity(entries.len());

	for (source_index, entry) in entries.iter().enumerate() {
		let Some(iri) = crate::string_at(entry, "_id").filter(|iri| !iri.is_empty()) else {
			continue;
		};
		let source = entry.get("_source").and_then(Value::as_object);

		hits.push(RawHit {
			iri: iri.to_string(),
			label: source.and_then(|source| first_text(source, &LABEL_KEYS)),
			description: source.and_then(|source| first_text(source, &DESCRIPTION_KEYS)),
			raw_score: entry.get("_score").and_then(crate::number),
			source_index,
		});
	}

	Ok(hits)
}

pub(crate) fn annotate_scores(payload: &mut Value, hits: &[RawHit], scores: &[f64]) {
	let Some(entries) = payload.pointer_mut("/hits/hits").and_then(Value::as_array_mut) else {
		return;
	};

	for (hit, score) in hits.iter().zip(scores) {
		if let Some(entry) = entries.get_mut(hit.source_index).and_then(Value::as_object_mut) {
			entry.insert("_score".to_string(), serde_json::json!(score));
		}
	}
}

/// The first key present wins, even when its value holds no text.
fn first_text(source: &Map<String, Value>, keys: &[&str]) -> Option<String> {
	let value = keys.iter().find_map(|key| source.get(*key))?;

	match value {
		Value::String(text) => Some(text.clone()),
		Value::Array(values) => values.iter().find_map(Value::as_str).map(str::to_string),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn comment_wins_over_definition() {
		let json = serde_json::json!({
			"hits": {
				"hits": [
					{
						"_id": "http://xmlns.com/foaf/0.1/Person",
						"_score": 7.5,
						"_source": {
							"http://www w3 org/2004/02/skos/core#definition": ["A definition."],
							"http://www w3 org/2000/01/rdf-schema#comment": ["A person."],
							"http://www w3 org/2000/01/rdf-schema#label": ["Person"]
						}
					},
					{
						"_id": "https://schema.org/Person",
						"_score": 2.5,
						"_source": {
							"http://www.w3.org/2004/02/skos/core#definition": "Dotted definition."
						}
					}
				]
			}
		});
		let hits = parse_response(&json).expect("Hits must parse.");

		assert_eq!(hits[0].description.as_deref(), Some("A person."));
		assert_eq!(hits[0].label.as_deref(), Some("Person"));
		assert_eq!(hits[0].raw_score, Some(7.5));
		assert_eq!(hits[1].description.as_deref(), Some("Dotted definition."));
	}

	#[test]
	fn skips_hits_without_id() {
		let json = serde_json::json!({
			"hits": { "hits": [{ "_score": 1.0 }, { "_id": "http://a/x", "_score": null }] }
		});
		let hits = parse_response(&json).expect("Hits must parse.");

		assert_eq!(hits.len(), 1);
		assert_eq!(hits[0].source_index, 1);
		assert_eq!(hits[0].raw_score, None);
	}

	#[test]
	fn rejects_missing_hits() {
		let err = parse_response(&serde_json::json!({ "error": "index_not_found" }))
			.expect_err("Missing hits must fail.");

		assert!(matches!(err, Error::InvalidResponse { .. }));
	}

	#[test]
	fn writes_normalized_scores_back() {
		let mut json = serde_json::json!({
			"hits": {
				"hits": [
					{ "_id": "http://a/x", "_score": 3.0 },
					{ "_id": "http://a/y", "_score": 1.0 }
				]
			}
		});
		let hits = parse_response(&json).expect("Hits must parse.");

		annotate_scores(&mut json, &hits, &[0.75, 0.25]);

		assert_eq!(json["hits"]["hits"][0]["_score"], 0.75);
		assert_eq!(json["hits"]["hits"][1]["_score"], 0.25);
	}
}
