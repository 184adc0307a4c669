use std::{
	collections::BTreeMap,
	fmt::{self, Display, Formatter},
	path::PathBuf,
};

use serde::{Deserialize, Serialize};

pub const DEFAULT_PREFIX_REGISTRY_URL: &str = "https://lov.linkeddata.es/dataset/lov/sparql";
pub const DEFAULT_TIMEOUT_MS: u64 = 20_000;
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
	pub default_endpoint: String,
	pub endpoints: BTreeMap<String, EndpointConfig>,
	#[serde(default)]
	pub prefix_registry: PrefixRegistry,
	#[serde(default)]
	pub http: Http,
	/// Additive boosts keyed by vocabulary identifier (prefix or namespace).
	#[serde(default)]
	pub vocabulary_preferences: BTreeMap<String, f64>,
	#[serde(default = "default_log_level")]
	pub log_level: String,
	/// Directory that relative template paths resolve against. Set by [`crate::load`].
	#[serde(skip)]
	pub base_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointConfig {
	#[serde(rename = "type")]
	pub kind: EndpointKind,
	pub url: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub query_class: Option<PathBuf>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub query_property: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointKind {
	Sparql,
	#[serde(alias = "elasticsearch")]
	Search,
}
impl EndpointKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Sparql => "sparql",
			Self::Search => "search",
		}
	}
}
impl Display for EndpointKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefixRegistry {
	#[serde(default = "default_true")]
	pub enabled: bool,
	#[serde(default = "default_prefix_registry_url")]
	pub url: String,
}
impl Default for PrefixRegistry {
	fn default() -> Self {
		Self { enabled: true, url: default_prefix_registry_url() }
	}
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Http {
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
}
impl Default for Http {
	fn default() -> Self {
		Self { timeout_ms: DEFAULT_TIMEOUT_MS }
	}
}

/// An endpoint with both query templates loaded, ready for substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
	pub name: String,
	#[serde(rename = "type")]
	pub kind: EndpointKind,
	pub url: String,
	#[serde(skip)]
	pub query_class: String,
	#[serde(skip)]
	pub query_property: String,
}

fn default_true() -> bool {
	true
}

fn default_prefix_registry_url() -> String {
	DEFAULT_PREFIX_REGISTRY_URL.to_string()
}

fn default_timeout_ms() -> u64 {
	DEFAULT_TIMEOUT_MS
}

fn default_log_level() -> String {
	DEFAULT_LOG_LEVEL.to_string()
}
