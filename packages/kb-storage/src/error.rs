#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
	#[error("Search backend unavailable: {0}")]
	BackendUnavailable(String),
	#[error("Search backend returned status {status}: {message}")]
	Backend { status: u16, message: String },
	#[error("Malformed backend response: {0}")]
	MalformedResponse(String),
	#[error("Unknown dataset version {0:?}.")]
	UnknownDatasetVersion(String),
	#[error("Bulk write failed after {committed} committed documents: {message}")]
	BulkWritePartialFailure { committed: usize, message: String },
}
impl From<reqwest::Error> for Error {
	fn from(err: reqwest::Error) -> Self {
		if err.is_decode() {
			return Self::MalformedResponse(err.to_string());
		}
		if let Some(status) = err.status() {
			return Self::Backend { status: status.as_u16(), message: err.to_string() };
		}

		Self::BackendUnavailable(err.to_string())
	}
}
impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::MalformedResponse(err.to_string())
	}
}
