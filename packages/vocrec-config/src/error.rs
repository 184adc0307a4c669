pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to read config file at {path:?}.")]
	ReadConfig { path: std::path::PathBuf, source: std::io::Error },
	#[error("Failed to parse config file at {path:?}: {source}")]
	ParseJson { path: std::path::PathBuf, source: serde_json::Error },
	#[error("Failed to parse config file at {path:?}: {source}")]
	ParseToml { path: std::path::PathBuf, source: toml::de::Error },
	#[error("Failed to write config file at {path:?}.")]
	WriteConfig { path: std::path::PathBuf, source: std::io::Error },
	#[error("Failed to read query template at {path:?}.")]
	ReadTemplate { path: std::path::PathBuf, source: std::io::Error },
	#[error("{message}")]
	Validation { message: String },
	#[error("Endpoint `{name}` is not configured. Available endpoints: {available}.")]
	UnknownEndpoint { name: String, available: String },
}
