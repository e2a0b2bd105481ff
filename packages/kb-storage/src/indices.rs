use crate::{Error, Result};

pub const FREEBASE_2M: &str = "FB_2M";
pub const FREEBASE_5M: &str = "FB_5M";

/// Name and fact index names for one dataset version. Resolved once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexNames {
	pub names: String,
	pub facts: String,
}
impl IndexNames {
	pub fn new(names: impl Into<String>, facts: impl Into<String>) -> Self {
		Self { names: names.into(), facts: facts.into() }
	}

	pub fn for_dataset(dataset: &str) -> Result<Self> {
		match dataset {
			FREEBASE_2M => Ok(Self::new("names_v3", "facts_v3")),
			FREEBASE_5M => Ok(Self::new("fb_5m_names_v1", "fb_5m_facts_v1")),
			other => Err(Error::UnknownDatasetVersion(other.to_string())),
		}
	}

	/// Explicit index overrides win over the dataset version.
	pub fn resolve(cfg: &kb_config::Backend) -> Result<Self> {
		match (cfg.names_index.as_deref(), cfg.facts_index.as_deref()) {
			(Some(names), Some(facts)) => Ok(Self::new(names, facts)),
			_ => Self::for_dataset(&cfg.dataset),
		}
	}
}
