//! SPARQL SELECT over HTTP GET.

use reqwest::{Client, header::ACCEPT};
use serde_json::{Map, Value};

use crate::{Error, Fetched, RawHit, RawResponse, Result};

pub const ACCEPT_RESULTS: &str =
	"application/sparql-results+json;q=0.9,application/json;q=0.8,*/*;q=0.7";

const XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";

pub async fn fetch(client: &Client, url: &str, query: &str) -> Result<Fetched> {
	let res =
		client.get(url).query(&[("query", query)]).header(ACCEPT, ACCEPT_RESULTS).send().await?;
	let json: Value = res.error_for_status()?.json().await?;
	let hits = parse_response(&json)?;

	Ok(Fetched { hits, response: RawResponse::Sparql(json) })
}

/// Reads `iri`, `label`, `description` and `score` variables from a results document or a flat
/// row array.
///
/// Rows without an `iri` are skipped. When no row carries a score, row order becomes a descending
/// rank score so that earlier rows weigh more.
pub fn parse_response(json: &Value) -> Result<Vec<RawHit>> {
	let rows = rows(json).ok_or_else(|| Error::InvalidResponse {
		message: "SPARQL response has neither results.bindings nor a row array.".to_string(),
	})?;
	let mut hits = Vec::with_capacity(rows.len());

	for (source_index, row) in rows.iter().enumerate() {
		let Some(row) = row.as_object() else {
			continue;
		};
		let Some(iri) = cell_text(row, "iri").filter(|iri| !iri.is_empty()) else {
			continue;
		};

		hits.push(RawHit {
			iri,
			label: cell_text(row, "label"),
			description: cell_text(row, "description"),
			raw_score: row.get("score").and_then(cell_number),
			source_index,
		});
	}

	if hits.iter().all(|hit| hit.raw_score.is_none()) {
		let total = hits.len();

		for (rank, hit) in hits.iter_mut().enumerate() {
			hit.raw_score = Some((total - rank) as f64);
		}
	}

	Ok(hits)
}

pub(crate) fn annotate_scores(payload: &mut Value, hits: &[RawHit], scores: &[f64]) {
	let bindings = payload.get("results").is_some();
	let rows = if bindings {
		payload.pointer_mut("/results/bindings").and_then(Value::as_array_mut)
	} else {
		payload.as_array_mut()
	};
	let Some(rows) = rows else {
		return;
	};

	for (hit, score) in hits.iter().zip(scores) {
		let Some(row) = rows.get_mut(hit.source_index).and_then(Value::as_object_mut) else {
			continue;
		};
		let value = if bindings {
			serde_json::json!({
				"type": "literal",
				"datatype": XSD_DOUBLE,
				"value": score.to_string(),
			})
		} else {
			serde_json::json!(score)
		};

		row.insert("score".to_string(), value);
	}
}

fn rows(json: &Value) -> Option<&Vec<Value>> {
	match json {
		Value::Array(rows) => Some(rows),
		_ => json.pointer("/results/bindings").and_then(Value::as_array),
	}
}

/// A binding cell is `{ "type", "value" }` in results documents and a bare value in row arrays.
fn cell(row: &Map<String, Value>, key: &str) -> Option<Value> {
	let cell = row.get(key)?;

	match cell {
		Value::Object(binding) => binding.get("value").cloned(),
		Value::Null => None,
		other => Some(other.clone()),
	}
}

fn cell_text(row: &Map<String, Value>, key: &str) -> Option<String> {
	match cell(row, key)? {
		Value::String(text) => Some(text),
		Value::Number(number) => Some(number.to_string()),
		_ => None,
	}
}

fn cell_number(cell: &Value) -> Option<f64> {
	match cell {
		Value::Object(binding) => binding.get("value").and_then(crate::number),
		other => crate::number(other),
	}
}
