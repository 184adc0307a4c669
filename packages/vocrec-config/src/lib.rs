mod error;
mod types;

pub mod templates;
pub mod triply;

pub use error::{Error, Result};
pub use types::{
	Config, DEFAULT_LOG_LEVEL, DEFAULT_PREFIX_REGISTRY_URL, DEFAULT_TIMEOUT_MS, Endpoint,
	EndpointConfig, EndpointKind, Http, PrefixRegistry,
};

use std::{
	collections::BTreeMap,
	fs,
	path::{Path, PathBuf},
};

pub const DEFAULT_CONFIG_DIR: &str = "vocabulary_recommender";
pub const DEFAULT_CONFIG_FILE: &str = "vocabulary-recommender.json";

pub fn default_config_path() -> PathBuf {
	Path::new(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILE)
}

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;
	let mut cfg = parse(path, &raw)?;

	cfg.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

	normalize(&mut cfg);
	validate(&cfg)?;

	Ok(cfg)
}

/// Writes the default configuration to `path` unless a file already exists there.
///
/// Returns `true` when a file was created.
pub fn bootstrap(path: &Path) -> Result<bool> {
	if path.exists() {
		return Ok(false);
	}
	if let Some(dir) = path.parent()
		&& !dir.as_os_str().is_empty()
	{
		fs::create_dir_all(dir)
			.map_err(|err| Error::WriteConfig { path: path.to_path_buf(), source: err })?;
	}

	let payload = render(path, &default_config())?;

	fs::write(path, payload)
		.map_err(|err| Error::WriteConfig { path: path.to_path_buf(), source: err })?;

	Ok(true)
}

pub fn default_config() -> Config {
	let mut endpoints = BTreeMap::new();

	endpoints.insert(
		"druid-recommend".to_string(),
		EndpointConfig {
			kind: EndpointKind::Search,
			url: "https://api.druid.datalegend.net/datasets/VocabularyRecommender/RecommendedVocabularies/services/RecommendedVocabularies/search".to_string(),
			query_class: None,
			query_property: None,
		},
	);
	endpoints.insert(
		"nde".to_string(),
		EndpointConfig {
			kind: EndpointKind::Sparql,
			url: "https://api.data.netwerkdigitaalerfgoed.nl/datasets/ld-wizard/sdo/services/sparql/sparql".to_string(),
			query_class: None,
			query_property: None,
		},
	);
	endpoints.insert(
		"lov".to_string(),
		EndpointConfig {
			kind: EndpointKind::Sparql,
			url: "https://api.triplydb.com/datasets/okfn/lov/services/lov/sparql".to_string(),
			query_class: None,
			query_property: None,
		},
	);

	Config {
		default_endpoint: "druid-recommend".to_string(),
		endpoints,
		prefix_registry: PrefixRegistry::default(),
		http: Http::default(),
		vocabulary_preferences: BTreeMap::new(),
		log_level: DEFAULT_LOG_LEVEL.to_string(),
		base_dir: PathBuf::new(),
	}
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.endpoints.is_empty() {
		return Err(Error::Validation {
			message: "endpoints must contain at least one endpoint.".to_string(),
		});
	}
	if cfg.default_endpoint.is_empty() {
		return Err(Error::Validation {
			message: format!(
				"defaultEndpoint must be non-empty. Choose one of: {}.",
				cfg.endpoint_names().join(", ")
			),
		});
	}
	if !cfg.endpoints.contains_key(&cfg.default_endpoint) {
		return Err(Error::Validation {
			message: format!(
				"defaultEndpoint `{}` is not a configured endpoint. Choose one of: {}.",
				cfg.default_endpoint,
				cfg.endpoint_names().join(", ")
			),
		});
	}

	for (name, endpoint) in &cfg.endpoints {
		if name.is_empty() {
			return Err(Error::Validation {
				message: "endpoints must not contain an empty name.".to_string(),
			});
		}
		if !is_http_url(&endpoint.url) {
			return Err(Error::Validation {
				message: format!("endpoints.{name}.url must be an http(s) URL."),
			});
		}

		for (field, template) in
			[("queryClass", &endpoint.query_class), ("queryProperty", &endpoint.query_property)]
		{
			if template.as_ref().is_some_and(|path| path.as_os_str().is_empty()) {
				return Err(Error::Validation {
					message: format!("endpoints.{name}.{field} must be a non-empty path."),
				});
			}
		}
	}

	if cfg.http.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "http.timeoutMs must be greater than zero.".to_string(),
		});
	}
	if cfg.prefix_registry.enabled && !is_http_url(&cfg.prefix_registry.url) {
		return Err(Error::Validation {
			message: "prefixRegistry.url must be an http(s) URL when the registry is enabled."
				.to_string(),
		});
	}

	for (vocabulary, weight) in &cfg.vocabulary_preferences {
		if !weight.is_finite() {
			return Err(Error::Validation {
				message: format!("vocabularyPreferences.{vocabulary} must be a finite number."),
			});
		}
	}

	Ok(())
}

impl Config {
	pub fn endpoint_names(&self) -> Vec<&str> {
		self.endpoints.keys().map(String::as_str).collect()
	}

	/// Loads the query templates of `name`, falling back to the built-in ones.
	pub fn resolve_endpoint(&self, name: &str) -> Result<Endpoint> {
		let Some(endpoint) = self.endpoints.get(name) else {
			return Err(Error::UnknownEndpoint {
				name: name.to_string(),
				available: self.endpoint_names().join(", "),
			});
		};
		let query_class = match &endpoint.query_class {
			Some(path) => self.read_template(name, "queryClass", path)?,
			None => templates::builtin_class_query(endpoint.kind).to_string(),
		};
		let query_property = match &endpoint.query_property {
			Some(path) => self.read_template(name, "queryProperty", path)?,
			None => templates::builtin_property_query(endpoint.kind).to_string(),
		};

		Ok(Endpoint {
			name: name.to_string(),
			kind: endpoint.kind,
			url: endpoint.url.clone(),
			query_class,
			query_property,
		})
	}

	pub fn resolve_default_endpoint(&self) -> Result<Endpoint> {
		self.resolve_endpoint(&self.default_endpoint)
	}

	fn read_template(&self, endpoint: &str, field: &str, path: &Path) -> Result<String> {
		let full = if path.is_absolute() { path.to_path_buf() } else { self.base_dir.join(path) };
		let raw = fs::read_to_string(&full)
			.map_err(|err| Error::ReadTemplate { path: full.clone(), source: err })?;

		if raw.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("endpoints.{endpoint}.{field} template at {full:?} is empty."),
			});
		}

		Ok(raw)
	}
}

fn parse(path: &Path, raw: &str) -> Result<Config> {
	if is_toml(path) {
		toml::from_str(raw).map_err(|err| Error::ParseToml { path: path.to_path_buf(), source: err })
	} else {
		serde_json::from_str(raw)
			.map_err(|err| Error::ParseJson { path: path.to_path_buf(), source: err })
	}
}

fn render(path: &Path, cfg: &Config) -> Result<String> {
	if is_toml(path) {
		return toml::to_string_pretty(cfg).map_err(|err| Error::Validation {
			message: format!("Failed to render default config: {err}."),
		});
	}

	serde_json::to_string_pretty(cfg)
		.map_err(|err| Error::Validation { message: format!("Failed to render default config: {err}.") })
}

fn is_toml(path: &Path) -> bool {
	path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

fn is_http_url(url: &str) -> bool {
	let url = url.trim();

	(url.starts_with("http://") && url.len() > "http://".len())
		|| (url.starts_with("https://") && url.len() > "https://".len())
}

fn normalize(cfg: &mut Config) {
	cfg.default_endpoint = cfg.default_endpoint.trim().to_string();
	cfg.log_level = cfg.log_level.trim().to_string();
	cfg.prefix_registry.url = cfg.prefix_registry.url.trim().to_string();

	if cfg.log_level.is_empty() {
		cfg.log_level = DEFAULT_LOG_LEVEL.to_string();
	}

	cfg.endpoints = std::mem::take(&mut cfg.endpoints)
		.into_iter()
		.map(|(name, mut endpoint)| {
			endpoint.url = endpoint.url.trim().to_string();

			(name.trim().to_string(), endpoint)
		})
		.collect();
}
