use std::{future::Future, pin::Pin};

use serde_json::Value;

use crate::Result;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Clone, Debug, PartialEq)]
pub struct SearchHit {
	pub id: Option<String>,
	pub score: Option<f64>,
	pub source: Value,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchResponse {
	/// Total matches reported by the backend, which may exceed `hits.len()`.
	pub total: u64,
	pub hits: Vec<SearchHit>,
}

/// One document in a bulk write. `id` becomes the backend document id.
#[derive(Clone, Debug, PartialEq)]
pub struct BulkOperation {
	pub id: i64,
	pub source: Value,
}

/// The operations the engine needs from the search backend.
pub trait SearchBackend
where
	Self: Send + Sync,
{
	/// Runs a search request body against `index`. Hits come back in backend order.
	fn search<'a>(
		&'a self,
		index: &'a str,
		body: &'a Value,
	) -> BoxFuture<'a, Result<SearchResponse>>;

	/// Writes `operations` in a single request and returns how many documents were written.
	/// With `refresh`, the documents are visible to searches once this resolves.
	fn bulk<'a>(
		&'a self,
		index: &'a str,
		operations: &'a [BulkOperation],
		refresh: bool,
	) -> BoxFuture<'a, Result<usize>>;

	fn index_exists<'a>(&'a self, index: &'a str) -> BoxFuture<'a, Result<bool>>;

	fn create_index<'a>(&'a self, index: &'a str, body: &'a Value) -> BoxFuture<'a, Result<()>>;

	fn delete_index<'a>(&'a self, index: &'a str) -> BoxFuture<'a, Result<()>>;
}
