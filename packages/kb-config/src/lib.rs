mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Backend, Config, Indexing, Lookup, Service};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.backend.url.trim().is_empty() {
		return Err(Error::Validation { message: "backend.url must be non-empty.".to_string() });
	}
	if cfg.backend.dataset.trim().is_empty() {
		return Err(Error::Validation {
			message: "backend.dataset must be non-empty.".to_string(),
		});
	}
	if cfg.backend.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "backend.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.backend.names_index.is_some() != cfg.backend.facts_index.is_some() {
		return Err(Error::Validation {
			message: "backend.names_index and backend.facts_index must be set together."
				.to_string(),
		});
	}
	if cfg.lookup.max_num_results == 0 {
		return Err(Error::Validation {
			message: "lookup.max_num_results must be greater than zero.".to_string(),
		});
	}

	for (label, value) in [
		("lookup.default_num_results", cfg.lookup.default_num_results),
		("lookup.default_num_results_per_topic", cfg.lookup.default_num_results_per_topic),
	] {
		if value == 0 {
			return Err(Error::Validation {
				message: format!("{label} must be greater than zero."),
			});
		}
		if value > cfg.lookup.max_num_results {
			return Err(Error::Validation {
				message: format!("{label} must not exceed lookup.max_num_results."),
			});
		}
	}

	if cfg.indexing.name_chunk_size == 0 {
		return Err(Error::Validation {
			message: "indexing.name_chunk_size must be greater than zero.".to_string(),
		});
	}
	if cfg.indexing.fact_chunk_size == 0 {
		return Err(Error::Validation {
			message: "indexing.fact_chunk_size must be greater than zero.".to_string(),
		});
	}
	if !matches!(cfg.indexing.flush_cadence.as_str(), "boundary" | "legacy") {
		return Err(Error::Validation {
			message: "indexing.flush_cadence must be one of boundary or legacy.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let trimmed = cfg.backend.url.trim().trim_end_matches('/').to_string();

	cfg.backend.url = trimmed;

	if cfg.backend.names_index.as_deref().map(|name| name.trim().is_empty()).unwrap_or(false) {
		cfg.backend.names_index = None;
	}
	if cfg.backend.facts_index.as_deref().map(|name| name.trim().is_empty()).unwrap_or(false) {
		cfg.backend.facts_index = None;
	}
}
