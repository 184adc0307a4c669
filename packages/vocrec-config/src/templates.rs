//! Built-in query templates and `${term}` substitution.

use crate::EndpointKind;

pub const TERM_PLACEHOLDER: &str = "${term}";

pub const SPARQL_CLASS_QUERY: &str = r#"prefix owl: <http://www.w3.org/2002/07/owl#>
prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#>
select distinct ?iri ?label ?description {
  {
    { ?iri a owl:Class. } union { ?iri a rdfs:Class. }
    ?iri
      rdfs:comment ?description;
      rdfs:label ?label.
    filter(
      regex(str(?description), "${term}", "i") ||
      regex(str(?iri), "${term}", "i") ||
      regex(str(?label), "${term}", "i"))
  } union {
    { ?iri a owl:Class. } union { ?iri a rdfs:Class. }
    ?iri
      rdfs:comment ?description;
      rdfs:label ?label.
  }
}
limit 10"#;

pub const SPARQL_PROPERTY_QUERY: &str = r#"prefix owl: <http://www.w3.org/2002/07/owl#>
prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#>
select distinct ?iri ?label ?description {
  {
    { ?iri a owl:DatatypeProperty. } union { ?iri a owl:ObjectProperty. } union { ?iri a rdf:Property. }
    ?iri
      rdfs:comment ?description;
      rdfs:label ?label.
    filter(
      regex(str(?description), "${term}", "i") ||
      regex(str(?iri), "${term}", "i") ||
      regex(str(?label), "${term}", "i"))
  } union {
    { ?iri a rdf:Property. } union { ?iri a owl:DatatypeProperty. } union { ?iri a owl:ObjectProperty. }
    ?iri
      rdfs:comment ?description;
      rdfs:label ?label.
  }
}
limit 10"#;

pub const SEARCH_CLASS_QUERY: &str = r#"{
  "query": {
    "bool": {
      "must": {
        "simple_query_string": {
          "query": "http://www.w3.org/2002/07/owl#Class | http://www.w3.org/2000/01/rdf-schema#Class",
          "fields": ["http://www w3 org/1999/02/22-rdf-syntax-ns#type"]
        }
      },
      "should": [
        { "simple_query_string": { "query": "${term}", "fields": ["http://www w3 org/2000/01/rdf-schema#comment"] } },
        { "wildcard": { "http://www w3 org/2000/01/rdf-schema#label": "${term}*" } },
        { "fuzzy": { "http://www w3 org/2000/01/rdf-schema#label": "${term}" } },
        { "match": { "@id": "${term}" } }
      ],
      "minimum_should_match": 1
    }
  }
}"#;

pub const SEARCH_PROPERTY_QUERY: &str = r#"{
  "query": {
    "bool": {
      "must": {
        "simple_query_string": {
          "query": "http://www.w3.org/2002/07/owl#DatatypeProperty | http://www.w3.org/2002/07/owl#ObjectProperty | http://www.w3.org/1999/02/22-rdf-syntax-ns#Property",
          "fields": ["http://www w3 org/1999/02/22-rdf-syntax-ns#type"]
        }
      },
      "should": [
        { "simple_query_string": { "query": "${term}", "fields": ["http://www w3 org/2000/01/rdf-schema#comment"] } },
        { "wildcard": { "http://www w3 org/2000/01/rdf-schema#label": "${term}*" } },
        { "fuzzy": { "http://www w3 org/2000/01/rdf-schema#label": "${term}" } },
        { "match": { "@id": "${term}" } }
      ],
      "minimum_should_match": 1
    }
  }
}"#;

pub fn builtin_class_query(kind: EndpointKind) -> &'static str {
	match kind {
		EndpointKind::Sparql => SPARQL_CLASS_QUERY,
		EndpointKind::Search => SEARCH_CLASS_QUERY,
	}
}

pub fn builtin_property_query(kind: EndpointKind) -> &'static str {
	match kind {
		EndpointKind::Sparql => SPARQL_PROPERTY_QUERY,
		EndpointKind::Search => SEARCH_PROPERTY_QUERY,
	}
}

/// Substitutes every `${term}` in `template`, escaping the term for the endpoint's syntax:
/// a SPARQL string literal body for `sparql`, a JSON string body for `search`.
pub fn render(template: &str, kind: EndpointKind, term: &str) -> String {
	let escaped = match kind {
		EndpointKind::Sparql => escape_sparql(term),
		EndpointKind::Search => escape_json(term),
	};

	template.replace(TERM_PLACEHOLDER, &escaped)
}

fn escape_json(term: &str) -> String {
	let quoted = serde_json::Value::String(term.to_string()).to_string();

	quoted[1..quoted.len() - 1].to_string()
}

fn escape_sparql(term: &str) -> String {
	let mut out = String::with_capacity(term.len());

	for ch in term.chars() {
		match ch {
			'\\' => out.push_str("\\\\"),
			'"' => out.push_str("\\\""),
			'\n' => out.push_str("\\n"),
			'\r' => out.push_str("\\r"),
			'\t' => out.push_str("\\t"),
			_ => out.push(ch),
		}
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn substitutes_every_placeholder() {
		let rendered = render(SEARCH_CLASS_QUERY, EndpointKind::Search, "Person");

		assert!(!rendered.contains(TERM_PLACEHOLDER));
		assert!(rendered.contains("\"Person*\""));
		serde_json::from_str::<serde_json::Value>(&rendered).expect("Rendered query must be JSON.");
	}

	#[test]
	fn escapes_quotes_for_search_bodies() {
		let rendered = render(SEARCH_PROPERTY_QUERY, EndpointKind::Search, "say \"hi\"");

		serde_json::from_str::<serde_json::Value>(&rendered).expect("Rendered query must be JSON.");
	}

	#[test]
	fn escapes_sparql_literals() {
		let rendered = render("regex(?x, \"${term}\")", EndpointKind::Sparql, "a\"b\\c");

		assert_eq!(rendered, "regex(?x, \"a\\\"b\\\\c\")");
	}
}
