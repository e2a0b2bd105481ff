use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to read {path:?}.")]
	ReadInput {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("Failed to read line {line}.")]
	ReadLine {
		line: usize,
		#[source]
		source: std::io::Error,
	},
	#[error("Invalid record at line {line}: {source}")]
	ParseRecord {
		line: usize,
		#[source]
		source: serde_json::Error,
	},
	#[error(transparent)]
	Service(#[from] kb_service::Error),
}
