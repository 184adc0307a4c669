mod error;

pub use error::{Error, Result};

use std::{
	env, fs,
	path::{Path, PathBuf},
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use serde_json::{Map, Value};

pub const RDFS_COMMENT_KEY: &str = "http://www w3 org/2000/01/rdf-schema#comment";
pub const RDFS_LABEL_KEY: &str = "http://www w3 org/2000/01/rdf-schema#label";
pub const SKOS_DEFINITION_KEY: &str = "http://www w3 org/2004/02/skos/core#definition";

/// A scratch directory under the system temp dir, removed on drop.
pub struct TempDir {
	path: PathBuf,
}
impl TempDir {
	pub fn new(prefix: &str) -> Result<Self> {
		static COUNTER: AtomicU64 = AtomicU64::new(0);

		let nanos = SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map_err(|err| Error::Message(format!("System time must be valid: {err}.")))?
			.as_nanos();
		let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
		let pid = std::process::id();
		let path = env::temp_dir().join(format!("{prefix}_{nanos}_{pid}_{ordinal}"));

		fs::create_dir_all(&path)?;

		Ok(Self { path })
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn write(&self, name: &str, payload: &str) -> Result<PathBuf> {
		let path = self.path.join(name);

		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent)?;
		}

		fs::write(&path, payload)?;

		Ok(path)
	}
}
impl Drop for TempDir {
	fn drop(&mut self) {
		let _ = fs::remove_dir_all(&self.path);
	}
}

/// One SPARQL result row: `(iri, label, description, score)`.
pub type SparqlRow<'a> = (&'a str, Option<&'a str>, Option<&'a str>, Option<f64>);

/// One search hit: `(id, score, rdfs comment, skos definition)`.
pub type SearchHit<'a> = (&'a str, Option<f64>, Option<&'a str>, Option<&'a str>);

/// A JSON config with the given endpoints; the first one is the default.
pub fn config_json(endpoints: &[(&str, &str, &str)]) -> String {
	let default_endpoint = endpoints.first().map(|(name, _, _)| *name).unwrap_or_default();
	let mut map = Map::new();

	for (name, kind, url) in endpoints {
		map.insert(name.to_string(), serde_json::json!({ "type": kind, "url": url }));
	}

	let value = serde_json::json!({
		"defaultEndpoint": default_endpoint,
		"endpoints": map,
	});

	serde_json::to_string_pretty(&value).unwrap_or_default()
}

/// A SPARQL 1.1 JSON results document (`head`/`results.bindings`).
pub fn sparql_bindings(rows: &[SparqlRow<'_>]) -> Value {
	let bindings: Vec<Value> = rows
		.iter()
		.map(|(iri, label, description, score)| {
			let mut binding = Map::new();

			binding.insert("iri".to_string(), serde_json::json!({ "type": "uri", "value": iri }));

			if let Some(label) = label {
				binding.insert(
					"label".to_string(),
					serde_json::json!({ "type": "literal", "value": label }),
				);
			}
			if let Some(description) = description {
				binding.insert(
					"description".to_string(),
					serde_json::json!({ "type": "literal", "value": description }),
				);
			}
			if let Some(score) = score {
				binding.insert(
					"score".to_string(),
					serde_json::json!({ "type": "literal", "value": score.to_string() }),
				);
			}

			Value::Object(binding)
		})
		.collect();

	serde_json::json!({
		"head": { "vars": ["iri", "label", "description", "score"] },
		"results": { "bindings": bindings },
	})
}

/// A flat row array, the shape TriplyDB returns for `application/json`.
pub fn sparql_rows(rows: &[SparqlRow<'_>]) -> Value {
	let rows: Vec<Value> = rows
		.iter()
		.map(|(iri, label, description, score)| {
			let mut row = Map::new();

			row.insert("iri".to_string(), Value::String(iri.to_string()));

			if let Some(label) = label {
				row.insert("label".to_string(), Value::String(label.to_string()));
			}
			if let Some(description) = description {
				row.insert("description".to_string(), Value::String(description.to_string()));
			}
			if let Some(score) = score {
				row.insert("score".to_string(), serde_json::json!(score));
			}

			Value::Object(row)
		})
		.collect();

	Value::Array(rows)
}

/// An Elasticsearch-style `hits.hits` response.
pub fn search_hits(hits: &[SearchHit<'_>]) -> Value {
	let hits: Vec<Value> = hits
		.iter()
		.map(|(id, score, comment, definition)| {
			let mut source = Map::new();

			if let Some(comment) = comment {
				source.insert(RDFS_COMMENT_KEY.to_string(), serde_json::json!([comment]));
			}
			if let Some(definition) = definition {
				source.insert(SKOS_DEFINITION_KEY.to_string(), serde_json::json!([definition]));
			}

			serde_json::json!({ "_id": id, "_score": score, "_source": source })
		})
		.collect();

	serde_json::json!({ "timed_out": false, "hits": { "hits": hits } })
}

/// A LOV prefix listing: `(namespace, prefix)` pairs as SPARQL bindings.
pub fn lov_prefixes(pairs: &[(&str, &str)]) -> Value {
	let bindings: Vec<Value> = pairs
		.iter()
		.map(|(namespace, prefix)| {
			serde_json::json!({
				"vocabPrefix": { "type": "literal", "value": prefix },
				"vocabURI": { "type": "uri", "value": namespace },
			})
		})
		.collect();

	serde_json::json!({
		"head": { "vars": ["vocabPrefix", "vocabURI"] },
		"results": { "bindings": bindings },
	})
}

pub fn common_prefixes() -> Vec<(&'static str, &'static str)> {
	vec![
		("http://xmlns.com/foaf/0.1/", "foaf"),
		("http://schema.org/", "schema"),
		("https://schema.org/", "sdo"),
		("http://www.w3.org/ns/person#", "person"),
		("http://purl.org/dc/terms/", "dcterms"),
	]
}
