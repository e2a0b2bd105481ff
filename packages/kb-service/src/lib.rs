pub mod admin;
pub mod facts;
pub mod names;

mod error;

pub use admin::IndexReport;
pub use error::{Error, Result};
pub use facts::{FactItem, FactLookupRequest, FactLookupResponse, FactMatches, FactRetrieval};
pub use names::{CandidateSet, NameItem, NameLookupRequest, NameLookupResponse};

use std::sync::Arc;

use kb_config::Config;
use kb_domain::{FrequencyRanking, RankingPolicy};
use kb_storage::{backend::SearchBackend, elastic::ElasticStore, indices::IndexNames};

/// Lookup and ingestion entry points over one search backend.
///
/// Holds no per-request state, so one instance is shared across concurrent requests.
pub struct KbService {
	pub cfg: Config,
	pub backend: Arc<dyn SearchBackend>,
	pub indices: IndexNames,
	pub ranking: Arc<dyn RankingPolicy>,
}
impl KbService {
	pub fn new(cfg: Config, backend: Arc<dyn SearchBackend>) -> Result<Self> {
		Self::with_ranking(cfg, backend, Arc::new(FrequencyRanking))
	}

	pub fn with_ranking(
		cfg: Config,
		backend: Arc<dyn SearchBackend>,
		ranking: Arc<dyn RankingPolicy>,
	) -> Result<Self> {
		let indices = IndexNames::resolve(&cfg.backend)?;

		Ok(Self { cfg, backend, indices, ranking })
	}

	/// Builds a service backed by Elasticsearch at `cfg.backend.url`.
	pub fn connect(cfg: Config) -> Result<Self> {
		let store = ElasticStore::new(&cfg.backend)?;

		Self::new(cfg, Arc::new(store))
	}

	pub(crate) fn check_num_results(&self, field: &str, value: u32) -> Result<()> {
		let max = self.cfg.lookup.max_num_results;

		if value == 0 {
			return Err(Error::InvalidRequest {
				message: format!("{field} must be greater than zero."),
			});
		}
		if value > max {
			return Err(Error::InvalidRequest {
				message: format!("{field} must be at most {max}."),
			});
		}

		Ok(())
	}
}

pub(crate) fn check_topic_ids(topic_ids: &[String]) -> Result<()> {
	if topic_ids.is_empty() {
		return Err(Error::InvalidRequest { message: "topic_ids must not be empty.".to_string() });
	}
	if topic_ids.iter().any(|id| id.trim().is_empty()) {
		return Err(Error::InvalidRequest {
			message: "topic_ids must not contain blank ids.".to_string(),
		});
	}

	Ok(())
}
