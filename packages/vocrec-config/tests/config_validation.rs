use std::fs;

use serde_json::Value;

use vocrec_config::{Config, EndpointKind, Error};
use vocrec_testkit::TempDir;

fn sample_json() -> String {
	vocrec_testkit::config_json(&[
		("nde", "sparql", "https://api.data.netwerkdigitaalerfgoed.nl/datasets/ld-wizard/sdo/services/sparql/sparql"),
		("druid", "elasticsearch", "https://api.druid.datalegend.net/datasets/a/b/services/c/search"),
	])
}

fn edit(raw: &str, apply: impl FnOnce(&mut Value)) -> String {
	let mut value: Value = serde_json::from_str(raw).expect("Failed to parse sample config.");

	apply(&mut value);

	serde_json::to_string(&value).expect("Failed to render sample config.")
}

fn load_json(payload: &str) -> (TempDir, vocrec_config::Result<Config>) {
	let dir = TempDir::new("vocrec_config_test").expect("Failed to create temp dir.");
	let path = dir.write("vocabulary-recommender.json", payload).expect("Failed to write config.");
	let result = vocrec_config::load(&path);

	(dir, result)
}

fn expect_validation(payload: &str, needle: &str) {
	let (_dir, result) = load_json(payload);
	let err = result.expect_err("Expected validation error.");
	let message = err.to_string();

	assert!(matches!(err, Error::Validation { .. }), "Unexpected error: {err:?}");
	assert!(message.contains(needle), "Unexpected error message: {message}");
}

#[test]
fn loads_sample_with_defaults() {
	let (_dir, result) = load_json(&sample_json());
	let cfg = result.expect("Sample config must load.");

	assert_eq!(cfg.default_endpoint, "nde");
	assert_eq!(cfg.endpoints["druid"].kind, EndpointKind::Search);
	assert!(cfg.prefix_registry.enabled);
	assert_eq!(cfg.prefix_registry.url, vocrec_config::DEFAULT_PREFIX_REGISTRY_URL);
	assert_eq!(cfg.http.timeout_ms, vocrec_config::DEFAULT_TIMEOUT_MS);
	assert_eq!(cfg.log_level, "warn");
	assert!(cfg.vocabulary_preferences.is_empty());
}

#[test]
fn empty_default_endpoint_lists_alternatives() {
	let payload = edit(&sample_json(), |value| value["defaultEndpoint"] = Value::from(""));

	expect_validation(&payload, "Choose one of: druid, nde.");
}

#[test]
fn unknown_default_endpoint_is_rejected() {
	let payload = edit(&sample_json(), |value| value["defaultEndpoint"] = Value::from("missing"));

	expect_validation(&payload, "defaultEndpoint `missing` is not a configured endpoint.");
}

#[test]
fn endpoint_url_must_be_http() {
	let payload =
		edit(&sample_json(), |value| value["endpoints"]["nde"]["url"] = Value::from("ftp://x"));

	expect_validation(&payload, "endpoints.nde.url must be an http(s) URL.");
}

#[test]
fn timeout_must_be_positive() {
	let payload = edit(&sample_json(), |value| {
		value["http"] = serde_json::json!({ "timeoutMs": 0 });
	});

	expect_validation(&payload, "http.timeoutMs must be greater than zero.");
}

#[test]
fn unknown_endpoint_kind_fails_to_parse() {
	let payload =
		edit(&sample_json(), |value| value["endpoints"]["nde"]["type"] = Value::from("graphql"));
	let (_dir, result) = load_json(&payload);

	assert!(matches!(result, Err(Error::ParseJson { .. })));
}

#[test]
fn resolves_builtin_templates() {
	let (_dir, result) = load_json(&sample_json());
	let cfg = result.expect("Sample config must load.");
	let endpoint = cfg.resolve_endpoint("druid").expect("Endpoint must resolve.");

	assert_eq!(endpoint.kind, EndpointKind::Search);
	assert_eq!(endpoint.query_class, vocrec_config::templates::SEARCH_CLASS_QUERY);
	assert_eq!(endpoint.query_property, vocrec_config::templates::SEARCH_PROPERTY_QUERY);
}

#[test]
fn resolves_template_files_relative_to_config() {
	let dir = TempDir::new("vocrec_config_test").expect("Failed to create temp dir.");

	dir.write("queries/class.rq", "select ?iri { ?iri a <${term}> }")
		.expect("Failed to write template.");

	let payload = edit(&sample_json(), |value| {
		value["endpoints"]["nde"]["queryClass"] = Value::from("queries/class.rq");
	});
	let path = dir.write("vocabulary-recommender.json", &payload).expect("Failed to write config.");
	let cfg = vocrec_config::load(&path).expect("Config must load.");
	let endpoint = cfg.resolve_endpoint("nde").expect("Endpoint must resolve.");

	assert_eq!(endpoint.query_class, "select ?iri { ?iri a <${term}> }");
	assert_eq!(endpoint.query_property, vocrec_config::templates::SPARQL_PROPERTY_QUERY);
}

#[test]
fn missing_template_file_is_reported() {
	let payload = edit(&sample_json(), |value| {
		value["endpoints"]["nde"]["queryProperty"] = Value::from("queries/missing.rq");
	});
	let (_dir, result) = load_json(&payload);
	let cfg = result.expect("Config must load.");

	assert!(matches!(cfg.resolve_endpoint("nde"), Err(Error::ReadTemplate { .. })));
}

#[test]
fn unknown_endpoint_lists_available_names() {
	let (_dir, result) = load_json(&sample_json());
	let cfg = result.expect("Sample config must load.");
	let err = cfg.resolve_endpoint("wikidata").expect_err("Expected unknown endpoint.");

	assert_eq!(
		err.to_string(),
		"Endpoint `wikidata` is not configured. Available endpoints: druid, nde."
	);
}

#[test]
fn bootstrap_writes_default_once() {
	let dir = TempDir::new("vocrec_config_test").expect("Failed to create temp dir.");
	let path = dir.path().join("vocabulary_recommender").join("vocabulary-recommender.json");

	assert!(vocrec_config::bootstrap(&path).expect("Bootstrap must succeed."));
	assert!(!vocrec_config::bootstrap(&path).expect("Bootstrap must succeed."));

	let cfg = vocrec_config::load(&path).expect("Bootstrapped config must load.");

	assert_eq!(cfg.default_endpoint, "druid-recommend");
	assert_eq!(cfg.endpoint_names(), vec!["druid-recommend", "lov", "nde"]);

	let raw = fs::read_to_string(&path).expect("Failed to read bootstrapped config.");

	assert!(raw.contains("\"defaultEndpoint\""));
}

#[test]
fn loads_toml_configs() {
	let dir = TempDir::new("vocrec_config_test").expect("Failed to create temp dir.");
	let payload = r#"
defaultEndpoint = "nde"
logLevel = "debug"

[endpoints.nde]
type = "sparql"
url = "https://example.org/sparql"

[vocabularyPreferences]
foaf = 0.25
"#;
	let path = dir.write("recommender.toml", payload).expect("Failed to write config.");
	let cfg = vocrec_config::load(&path).expect("TOML config must load.");

	assert_eq!(cfg.log_level, "debug");
	assert_eq!(cfg.vocabulary_preferences["foaf"], 0.25);
}
