mod error;

pub use error::{Error, Result};

use std::{env, future::Future, thread};

use tokio::runtime::Builder;
use uuid::Uuid;

use kb_storage::{elastic::ElasticStore, indices::IndexNames, schema};

const TEST_TIMEOUT_MS: u64 = 30_000;

/// A uniquely named pair of name and fact indices on a live backend, dropped on cleanup.
pub struct TestIndices {
	base_url: String,
	indices: IndexNames,
	cleaned: bool,
}
impl TestIndices {
	pub async fn new(base_url: &str) -> Result<Self> {
		let suffix = Uuid::new_v4().simple().to_string();
		let indices =
			IndexNames::new(format!("kb_test_names_{suffix}"), format!("kb_test_facts_{suffix}"));
		let this = Self { base_url: base_url.to_string(), indices, cleaned: false };
		let store = ElasticStore::new(&this.backend_config())?;

		schema::ensure_indices(&store, &this.indices, true)
			.await
			.map_err(|err| Error::Message(format!("Failed to create test indices: {err}.")))?;

		Ok(this)
	}

	pub fn indices(&self) -> &IndexNames {
		&self.indices
	}

	/// Backend settings pointing at this pair of indices.
	pub fn backend_config(&self) -> kb_config::Backend {
		kb_config::Backend {
			url: self.base_url.clone(),
			dataset: "FB_2M".to_string(),
			timeout_ms: TEST_TIMEOUT_MS,
			names_index: Some(self.indices.names.clone()),
			facts_index: Some(self.indices.facts.clone()),
		}
	}

	pub async fn cleanup(mut self) -> Result<()> {
		self.cleanup_inner().await
	}

	async fn cleanup_inner(&mut self) -> Result<()> {
		if self.cleaned {
			return Ok(());
		}

		cleanup_indices(&self.backend_config(), &self.indices).await?;

		self.cleaned = true;

		Ok(())
	}
}
impl Drop for TestIndices {
	fn drop(&mut self) {
		if self.cleaned {
			return;
		}

		let cfg = self.backend_config();
		let indices = self.indices.clone();
		let cleanup_thread = thread::spawn(move || {
			let runtime = match Builder::new_current_thread().enable_all().build() {
				Ok(runtime) => runtime,
				Err(err) => {
					eprintln!("Test index cleanup failed: {err}.");

					return;
				},
			};

			if let Err(err) = runtime.block_on(cleanup_indices(&cfg, &indices)) {
				eprintln!("Test index cleanup failed: {err}.");
			}
		});
		let _ = cleanup_thread.join();
	}
}

pub fn env_es_url() -> Option<String> {
	env::var("KB_ES_URL").ok()
}

/// Runs `f` against fresh indices and removes them afterwards, even when `f` fails.
pub async fn with_test_indices<F, Fut, T>(base_url: &str, f: F) -> Result<T>
where
	F: FnOnce(&TestIndices) -> Fut,
	Fut: Future<Output = Result<T>>,
{
	let indices = TestIndices::new(base_url).await?;
	let result = f(&indices).await;
	let mut indices = indices;

	if let Err(err) = indices.cleanup_inner().await {
		eprintln!("Test index cleanup warning: {err}.");

		if result.is_ok() {
			return Err(err);
		}
	}

	result
}

async fn cleanup_indices(cfg: &kb_config::Backend, indices: &IndexNames) -> Result<()> {
	let store = ElasticStore::new(cfg)?;

	for index in [&indices.names, &indices.facts] {
		schema::delete_index_if_exists(&store, index).await.map_err(|err| {
			Error::Message(format!("Failed to delete test index {index:?}: {err}."))
		})?;
	}

	Ok(())
}
