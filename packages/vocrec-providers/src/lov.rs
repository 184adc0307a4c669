//! Vocabulary prefixes from the Linked Open Vocabularies registry.

use reqwest::{Client, header::ACCEPT};
use serde_json::Value;

use crate::{Error, Result};

pub const PREFIX_QUERY: &str = "\
PREFIX vann: <http://purl.org/vocab/vann/>
PREFIX voaf: <http://purl.org/vocommons/voaf#>
SELECT DISTINCT ?vocabPrefix ?vocabURI {
	GRAPH <https://lov.linkeddata.es/dataset/lov> {
		?vocabURI a voaf:Vocabulary .
		?vocabURI vann:preferredNamespacePrefix ?vocabPrefix .
	}
}";

/// Returns `(namespace, prefix)` pairs.
pub async fn fetch_prefixes(client: &Client, url: &str) -> Result<Vec<(String, String)>> {
	let res = client
		.get(url)
		.query(&[("query", PREFIX_QUERY)])
		.header(ACCEPT, crate::sparql::ACCEPT_RESULTS)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_prefixes(&json)
}

pub fn parse_prefixes(json: &Value) -> Result<Vec<(String, String)>> {
	let bindings = json.pointer("/results/bindings").and_then(Value::as_array).ok_or_else(|| {
		Error::InvalidResponse { message: "Prefix response is missing results.bindings.".to_string() }
	})?;
	let pairs = bindings
		.iter()
		.filter_map(|binding| {
			let namespace = binding.pointer("/vocabURI/value").and_then(Value::as_str)?;
			let prefix = binding.pointer("/vocabPrefix/value").and_then(Value::as_str)?;

			Some((namespace.to_string(), prefix.to_string()))
		})
		.collect();

	Ok(pairs)
}
