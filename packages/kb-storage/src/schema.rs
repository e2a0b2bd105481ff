use serde_json::{Value, json};

use crate::{Result, backend::SearchBackend, indices::IndexNames};

const SHINGLE_ANALYZER: &str = "shingle_analyzer";

/// Names are matched with the default analyzer; only facts carry shingles.
pub fn names_index_body() -> Value {
	json!({
		"mappings": {
			"properties": {
				"freebase_id": { "type": "keyword" },
				"name": { "type": "text" },
				"description": { "type": "text" },
				"aliases": { "type": "text" },
			}
		}
	})
}

pub fn facts_index_body() -> Value {
	json!({
		"settings": analysis_settings(),
		"mappings": {
			"properties": {
				"src_freebase_name": { "type": "keyword" },
				"src_freebase_name_analyzed": { "type": "text", "analyzer": SHINGLE_ANALYZER },
				"src_freebase_id": { "type": "keyword" },
				"tgt_freebase_id": { "type": "keyword" },
				"predicate": { "type": "keyword" },
				"tgt_freebase_name": { "type": "text" },
			}
		}
	})
}

/// Creates both indices when missing. With `recreate`, existing indices are dropped first.
pub async fn ensure_indices(
	backend: &dyn SearchBackend,
	indices: &IndexNames,
	recreate: bool,
) -> Result<()> {
	for (index, body) in
		[(indices.names.as_str(), names_index_body()), (indices.facts.as_str(), facts_index_body())]
	{
		if recreate {
			delete_index_if_exists(backend, index).await?;
		}
		if backend.index_exists(index).await? {
			tracing::info!(index, "Index already exists.");

			continue;
		}

		tracing::info!(index, "Creating index.");

		backend.create_index(index, &body).await?;
	}

	Ok(())
}

/// Returns whether an index was deleted.
pub async fn delete_index_if_exists(backend: &dyn SearchBackend, index: &str) -> Result<bool> {
	if !backend.index_exists(index).await? {
		tracing::info!(index, "Index does not exist; nothing to delete.");

		return Ok(false);
	}

	tracing::info!(index, "Deleting index.");

	backend.delete_index(index).await?;

	Ok(true)
}

fn analysis_settings() -> Value {
	json!({
		"analysis": {
			"analyzer": {
				SHINGLE_ANALYZER: {
					"tokenizer": "standard",
					"filter": ["lowercase", "custom_shingle"],
				}
			},
			"filter": {
				"custom_shingle": {
					"type": "shingle",
					"min_shingle_size": 2,
					"max_shingle_size": 5,
					"output_unigrams": true,
				}
			}
		}
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn exact_match_fields_are_keywords() {
		let names = names_index_body();
		let facts = facts_index_body();

		assert_eq!(names["mappings"]["properties"]["freebase_id"]["type"], "keyword");

		for field in ["src_freebase_id", "src_freebase_name", "tgt_freebase_id", "predicate"] {
			assert_eq!(facts["mappings"]["properties"][field]["type"], "keyword", "{field}");
		}
	}

	#[test]
	fn analyzed_fields_use_shingle_analyzer() {
		let facts = facts_index_body();

		assert_eq!(
			facts["mappings"]["properties"]["src_freebase_name_analyzed"]["analyzer"],
			SHINGLE_ANALYZER
		);
		assert_eq!(
			facts["settings"]["analysis"]["analyzer"][SHINGLE_ANALYZER]["filter"],
			json!(["lowercase", "custom_shingle"])
		);
	}

	#[test]
	fn names_use_the_default_analyzer() {
		let names = names_index_body();

		assert_eq!(names["mappings"]["properties"]["name"], json!({ "type": "text" }));
		assert!(names.get("settings").is_none());
	}
}
