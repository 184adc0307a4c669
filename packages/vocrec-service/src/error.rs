pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error(transparent)]
	Config(#[from] vocrec_config::Error),
	#[error("Provider error: {message}")]
	Provider { message: String },
}
impl From<vocrec_providers::Error> for Error {
	fn from(err: vocrec_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}
