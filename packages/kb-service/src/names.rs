use serde::{Deserialize, Serialize};

use crate::{Error, KbService, Result, check_topic_ids};
use kb_domain::{Entity, collapse_substrings, literal_mentions, text};
use kb_storage::{
	Error as StorageError, Result as StorageResult, backend::SearchHit, documents::NameDocument,
	query,
};

/// Candidate entities in backend relevance order, with the backend's total match count.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CandidateSet {
	pub candidates: Vec<Entity>,
	pub total: u64,
}
impl CandidateSet {
	pub fn display_names(&self) -> Vec<String> {
		self.candidates.iter().map(|entity| entity.display_name.clone()).collect()
	}
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NameLookupRequest {
	pub query: String,
	/// Defaults to true.
	pub remove_stopwords: Option<bool>,
	/// Defaults to `lookup.default_num_results`.
	pub num_results: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameItem {
	pub freebase_name: String,
	pub freebase_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NameLookupResponse {
	/// Candidates whose names survived mention filtering, in candidate order.
	pub result: Vec<NameItem>,
	/// Candidate names that literally occur in the query.
	pub cleaned_names: Vec<String>,
	/// Every candidate name returned by the backend.
	pub raw_names: Vec<String>,
	/// Total matches reported by the backend for the candidate query.
	pub num_items: u64,
}

impl KbService {
	/// Relevance search over entity names and descriptions.
	pub async fn find_candidate_names(&self, query_text: &str, limit: u32) -> Result<CandidateSet> {
		self.check_num_results("num_results", limit)?;

		let body = query::candidate_names(query_text, limit);
		let res = self.backend.search(&self.indices.names, &body).await?;
		let candidates =
			res.hits.into_iter().map(name_hit_to_entity).collect::<StorageResult<Vec<_>>>()?;

		Ok(CandidateSet { candidates, total: res.total })
	}

	/// Resolves the entities mentioned in free text.
	pub async fn lookup_names(&self, req: NameLookupRequest) -> Result<NameLookupResponse> {
		if req.query.trim().is_empty() {
			return Err(Error::InvalidRequest {
				message: "query must not be empty.".to_string(),
			});
		}

		let limit = req.num_results.unwrap_or(self.cfg.lookup.default_num_results);
		let folded = text::fold_accents(&req.query.replace('\'', " "));
		let normalized = text::normalize(&folded);
		let retrieval_text = if req.remove_stopwords.unwrap_or(true) {
			text::remove_stopwords(&normalized)
		} else {
			normalized
		};

		tracing::debug!(query = %req.query, retrieval_text = %retrieval_text, "Looking up names.");

		let candidates = self.find_candidate_names(&retrieval_text, limit).await?;
		let candidates_total = candidates.total;
		let raw_names = candidates.display_names();
		let cleaned_names = literal_mentions(&raw_names, &folded);
		let kept = collapse_substrings(&cleaned_names);
		let result = candidates
			.candidates
			.into_iter()
			.filter(|entity| kept.contains(&entity.display_name))
			.map(|entity| NameItem {
				freebase_name: entity.display_name,
				freebase_id: entity.external_id,
			})
			.collect::<Vec<_>>();

		Ok(NameLookupResponse { num_items: candidates_total, result, cleaned_names, raw_names })
	}

	/// Name documents for exact entity ids.
	pub async fn names_by_ids(&self, topic_ids: &[String]) -> Result<CandidateSet> {
		check_topic_ids(topic_ids)?;

		let body =
			query::terms_any("freebase_id", topic_ids, Some(self.cfg.lookup.max_num_results));
		let res = self.backend.search(&self.indices.names, &body).await?;
		let candidates =
			res.hits.into_iter().map(name_hit_to_entity).collect::<StorageResult<Vec<_>>>()?;

		Ok(CandidateSet { candidates, total: res.total })
	}
}

/// A hit that does not have the name document shape fails the whole call.
fn name_hit_to_entity(hit: SearchHit) -> StorageResult<Entity> {
	let doc = serde_json::from_value::<NameDocument>(hit.source).map_err(|err| {
		StorageError::MalformedResponse(format!("Name hit {:?} is malformed: {err}", hit.id))
	})?;

	Ok(doc.into_entity())
}
