use std::time::Duration;

use reqwest::{
	Client, Response, StatusCode,
	header::{CONTENT_TYPE, HeaderValue},
};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
	Error, Result,
	backend::{BoxFuture, BulkOperation, SearchBackend, SearchHit, SearchResponse},
};

const NDJSON: &str = "application/x-ndjson";
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Elasticsearch over its REST API.
pub struct ElasticStore {
	pub client: Client,
	pub base_url: String,
}
impl ElasticStore {
	pub fn new(cfg: &kb_config::Backend) -> Result<Self> {
		let client = Client::builder()
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.build()
			.map_err(|err| Error::InvalidArgument(format!("Failed to build HTTP client: {err}")))?;

		Ok(Self { client, base_url: cfg.url.trim_end_matches('/').to_string() })
	}

	fn url(&self, index: &str, path: &str) -> String {
		format!("{}/{index}{path}", self.base_url)
	}

	async fn run_search(&self, index: &str, body: &Value) -> Result<SearchResponse> {
		tracing::debug!(index, size = ?body.get("size"), "Searching backend.");

		let res = self.client.post(self.url(index, "/_search")).json(body).send().await?;
		let raw: RawSearchResponse = read_json(res).await?;

		Ok(raw.into_response())
	}

	async fn run_bulk(
		&self,
		index: &str,
		operations: &[BulkOperation],
		refresh: bool,
	) -> Result<usize> {
		if operations.is_empty() {
			return Ok(0);
		}

		let payload = bulk_payload(index, operations)?;
		let res = self
			.client
			.post(self.url(index, "/_bulk"))
			.query(&[("refresh", if refresh { "true" } else { "false" })])
			.header(CONTENT_TYPE, HeaderValue::from_static(NDJSON))
			.body(payload)
			.send()
			.await?;
		let raw: RawBulkResponse = read_json(res).await?;

		if raw.errors {
			return Err(Error::Backend {
				status: StatusCode::OK.as_u16(),
				message: raw.first_error().unwrap_or_else(|| "Bulk item failed.".to_string()),
			});
		}

		Ok(operations.len())
	}

	async fn run_index_exists(&self, index: &str) -> Result<bool> {
		let res = self.client.head(self.url(index, "")).send().await?;

		match res.status() {
			StatusCode::NOT_FOUND => Ok(false),
			status if status.is_success() => Ok(true),
			status => Err(Error::Backend {
				status: status.as_u16(),
				message: format!("Unexpected status checking index {index:?}."),
			}),
		}
	}

	async fn run_create_index(&self, index: &str, body: &Value) -> Result<()> {
		let res = self.client.put(self.url(index, "")).json(body).send().await?;
		let _: Value = read_json(res).await?;

		Ok(())
	}

	async fn run_delete_index(&self, index: &str) -> Result<()> {
		let res = self.client.delete(self.url(index, "")).send().await?;
		let _: Value = read_json(res).await?;

		Ok(())
	}
}
impl SearchBackend for ElasticStore {
	fn search<'a>(
		&'a self,
		index: &'a str,
		body: &'a Value,
	) -> BoxFuture<'a, Result<SearchResponse>> {
		Box::pin(self.run_search(index, body))
	}

	fn bulk<'a>(
		&'a self,
		index: &'a str,
		operations: &'a [BulkOperation],
		refresh: bool,
	) -> BoxFuture<'a, Result<usize>> {
		Box::pin(self.run_bulk(index, operations, refresh))
	}

	fn index_exists<'a>(&'a self, index: &'a str) -> BoxFuture<'a, Result<bool>> {
		Box::pin(self.run_index_exists(index))
	}

	fn create_index<'a>(&'a self, index: &'a str, body: &'a Value) -> BoxFuture<'a, Result<()>> {
		Box::pin(self.run_create_index(index, body))
	}

	fn delete_index<'a>(&'a self, index: &'a str) -> BoxFuture<'a, Result<()>> {
		Box::pin(self.run_delete_index(index))
	}
}

#[derive(Debug, Deserialize)]
struct RawSearchResponse {
	hits: RawHits,
}
impl RawSearchResponse {
	fn into_response(self) -> SearchResponse {
		let hits = self
			.hits
			.hits
			.into_iter()
			.map(|hit| SearchHit { id: hit.id, score: hit.score, source: hit.source })
			.collect::<Vec<_>>();
		let total = match self.hits.total {
			Some(RawTotal::Count(count)) => count,
			Some(RawTotal::Object { value }) => value,
			None => hits.len() as u64,
		};

		SearchResponse { total, hits }
	}
}

#[derive(Debug, Deserialize)]
struct RawHits {
	#[serde(default)]
	total: Option<RawTotal>,
	#[serde(default)]
	hits: Vec<RawHit>,
}

/// Older servers report a bare count; newer ones wrap it in an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTotal {
	Count(u64),
	Object { value: u64 },
}

#[derive(Debug, Deserialize)]
struct RawHit {
	#[serde(rename = "_id", default)]
	id: Option<String>,
	#[serde(rename = "_score", default)]
	score: Option<f64>,
	#[serde(rename = "_source")]
	source: Value,
}

#[derive(Debug, Deserialize)]
struct RawBulkResponse {
	#[serde(default)]
	errors: bool,
	#[serde(default)]
	items: Vec<Value>,
}
impl RawBulkResponse {
	fn first_error(&self) -> Option<String> {
		self.items
			.iter()
			.filter_map(|item| item.as_object().and_then(|actions| actions.values().next()))
			.find_map(|action| action.get("error"))
			.map(|error| {
				error
					.get("reason")
					.and_then(Value::as_str)
					.map(str::to_string)
					.unwrap_or_else(|| error.to_string())
			})
	}
}

fn bulk_payload(index: &str, operations: &[BulkOperation]) -> Result<String> {
	let mut payload = String::new();

	for operation in operations {
		let action = serde_json::json!({
			"index": { "_index": index, "_id": operation.id.to_string() }
		});

		payload.push_str(&serde_json::to_string(&action)?);
		payload.push('\n');
		payload.push_str(&serde_json::to_string(&operation.source)?);
		payload.push('\n');
	}

	Ok(payload)
}

async fn read_json<T>(res: Response) -> Result<T>
where
	T: DeserializeOwned,
{
	let status = res.status();
	let body = res.text().await?;

	if !status.is_success() {
		return Err(Error::Backend {
			status: status.as_u16(),
			message: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
		});
	}

	Ok(serde_json::from_str(&body)?)
}
