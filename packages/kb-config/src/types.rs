use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub backend: Backend,
	pub lookup: Lookup,
	pub indexing: Indexing,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Backend {
	pub url: String,
	/// Dataset version label, e.g. "FB_2M". Selects the name and fact indices.
	pub dataset: String,
	pub timeout_ms: u64,
	/// Optional. Overrides the name index picked by `dataset`.
	pub names_index: Option<String>,
	/// Optional. Overrides the fact index picked by `dataset`.
	pub facts_index: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Lookup {
	#[serde(default = "default_num_results")]
	pub default_num_results: u32,
	#[serde(default = "default_num_results_per_topic")]
	pub default_num_results_per_topic: u32,
	#[serde(default = "default_max_num_results")]
	pub max_num_results: u32,
}

#[derive(Debug, Deserialize)]
pub struct Indexing {
	pub name_chunk_size: u32,
	pub fact_chunk_size: u32,
	#[serde(default = "default_flush_cadence")]
	pub flush_cadence: String,
}

fn default_num_results() -> u32 {
	10
}

fn default_num_results_per_topic() -> u32 {
	10
}

fn default_max_num_results() -> u32 {
	10_000
}

fn default_flush_cadence() -> String {
	"boundary".to_string()
}
