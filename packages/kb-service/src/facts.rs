use serde::{Deserialize, Serialize};

use crate::{Error, KbService, Result, check_topic_ids};
use kb_domain::{Fact, NameFrequencyTable, rank_and_filter, tally_facts};
use kb_storage::{
	Error as StorageError, Result as StorageResult, backend::SearchHit, documents::FactDocument,
	query,
};

const SUBJECT_ID_FIELD: &str = "src_freebase_id";
const SUBJECT_NAME_FIELD: &str = "src_freebase_name_analyzed";

/// Facts for a set of topics after dropping repeated `(subject id, predicate)` keys.
///
/// `deduped_facts` equals `all_facts`; the per-topic cap is applied by the ranking policy.
#[derive(Clone, Debug, Default)]
pub struct FactRetrieval {
	pub all_facts: Vec<Fact>,
	pub deduped_facts: Vec<Fact>,
	pub name_frequencies: NameFrequencyTable,
	pub max_per_topic: usize,
	/// Backend match count before dedup.
	pub total: u64,
}

/// Facts matched by subject name, without dedup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FactMatches {
	pub facts: Vec<Fact>,
	pub total: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FactLookupRequest {
	pub topic_ids: Vec<String>,
	/// Defaults to `lookup.default_num_results`.
	pub num_results: Option<u32>,
	/// Defaults to `lookup.default_num_results_per_topic`.
	pub num_results_per_topic: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactItem {
	pub src_freebase_name: String,
	pub src_freebase_id: String,
	pub pred_freebase_name: String,
	pub pred_freebase_id: String,
	pub tgt_freebase_name: String,
	pub tgt_freebase_id: String,
}
impl From<&Fact> for FactItem {
	fn from(fact: &Fact) -> Self {
		Self {
			src_freebase_name: fact.subject.display_name.clone(),
			src_freebase_id: fact.subject.external_id.clone(),
			pred_freebase_name: fact.predicate.display_name.clone(),
			pred_freebase_id: fact.predicate.external_id.clone(),
			tgt_freebase_name: fact.object.display_name.clone(),
			tgt_freebase_id: fact.object.external_id.clone(),
		}
	}
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FactLookupResponse {
	/// Facts whose subject survived per-topic ranking.
	pub result: Vec<FactItem>,
	/// Every fact after dedup, before ranking.
	pub raw_facts: Vec<FactItem>,
	/// Total matches reported by the backend for the fact query, before dedup.
	pub num_items: u64,
	pub num_results_per_topic: u32,
}

impl KbService {
	pub async fn fetch_facts(
		&self,
		topic_ids: &[String],
		max_total: u32,
		max_per_topic: u32,
	) -> Result<FactRetrieval> {
		check_topic_ids(topic_ids)?;
		self.check_num_results("num_results", max_total)?;
		self.check_num_results("num_results_per_topic", max_per_topic)?;

		let body = query::terms_any(SUBJECT_ID_FIELD, topic_ids, Some(max_total));
		let res = self.backend.search(&self.indices.facts, &body).await?;
		let hits = res.hits.len();
		let facts =
			res.hits.into_iter().map(fact_hit_to_fact).collect::<StorageResult<Vec<_>>>()?;
		let tally = tally_facts(facts);

		tracing::debug!(
			topics = topic_ids.len(),
			hits,
			kept = tally.facts.len(),
			names = tally.name_frequencies.len(),
			"Fetched facts."
		);

		Ok(FactRetrieval {
			deduped_facts: tally.facts.clone(),
			all_facts: tally.facts,
			name_frequencies: tally.name_frequencies,
			max_per_topic: max_per_topic as usize,
			total: res.total,
		})
	}

	/// Applies the service's ranking policy to a retrieval.
	pub fn rank_facts(&self, retrieval: &FactRetrieval) -> Vec<Fact> {
		rank_and_filter(
			self.ranking.as_ref(),
			&retrieval.all_facts,
			&retrieval.name_frequencies,
			retrieval.max_per_topic,
		)
	}

	pub async fn lookup_facts(&self, req: FactLookupRequest) -> Result<FactLookupResponse> {
		let max_total = req.num_results.unwrap_or(self.cfg.lookup.default_num_results);
		let per_topic =
			req.num_results_per_topic.unwrap_or(self.cfg.lookup.default_num_results_per_topic);
		let retrieval = self.fetch_facts(&req.topic_ids, max_total, per_topic).await?;
		let result = self.rank_facts(&retrieval).iter().map(FactItem::from).collect::<Vec<_>>();
		let raw_facts = retrieval.all_facts.iter().map(FactItem::from).collect();

		Ok(FactLookupResponse {
			num_items: retrieval.total,
			result,
			raw_facts,
			num_results_per_topic: per_topic,
		})
	}

	/// Full-text match on the analyzed subject name.
	pub async fn facts_by_name(&self, topic_name: &str, limit: u32) -> Result<FactMatches> {
		if topic_name.trim().is_empty() {
			return Err(Error::InvalidRequest {
				message: "topic_name must not be empty.".to_string(),
			});
		}

		self.check_num_results("num_results", limit)?;

		let body = query::match_field(SUBJECT_NAME_FIELD, topic_name, limit);
		let res = self.backend.search(&self.indices.facts, &body).await?;
		let facts =
			res.hits.into_iter().map(fact_hit_to_fact).collect::<StorageResult<Vec<_>>>()?;

		Ok(FactMatches { facts, total: res.total })
	}
}

/// A hit that does not have the fact document shape fails the whole call.
fn fact_hit_to_fact(hit: SearchHit) -> StorageResult<Fact> {
	let doc = serde_json::from_value::<FactDocument>(hit.source).map_err(|err| {
		StorageError::MalformedResponse(format!("Fact hit {:?} is malformed: {err}", hit.id))
	})?;

	Ok(doc.into_fact())
}
