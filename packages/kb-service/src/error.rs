pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Unknown dataset version {dataset:?}.")]
	UnknownDatasetVersion { dataset: String },
	#[error("Search backend unavailable: {message}")]
	BackendUnavailable { message: String },
	#[error("Search backend error: {message}")]
	Backend { message: String },
	#[error("Bulk write failed after {committed} committed documents: {message}")]
	BulkWritePartialFailure { committed: usize, message: String },
}
impl From<kb_storage::Error> for Error {
	fn from(err: kb_storage::Error) -> Self {
		match err {
			kb_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			kb_storage::Error::BackendUnavailable(message) => Self::BackendUnavailable { message },
			kb_storage::Error::Backend { status, message } =>
				Self::Backend { message: format!("status {status}: {message}") },
			kb_storage::Error::MalformedResponse(message) => Self::Backend { message },
			kb_storage::Error::UnknownDatasetVersion(dataset) =>
				Self::UnknownDatasetVersion { dataset },
			kb_storage::Error::BulkWritePartialFailure { committed, message } =>
				Self::BulkWritePartialFailure { committed, message },
		}
	}
}
