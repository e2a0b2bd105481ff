use serde::Serialize;

use crate::{KbService, Result};
use kb_domain::{Entity, Fact};
use kb_storage::{
	bulk::{BulkIndexer, FlushCadence},
	documents, schema,
};

/// Outcome of one bulk ingestion run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IndexReport {
	pub index: String,
	pub submitted: usize,
	pub flushes: usize,
}

impl KbService {
	pub async fn ensure_indices(&self, recreate: bool) -> Result<()> {
		schema::ensure_indices(self.backend.as_ref(), &self.indices, recreate).await?;

		Ok(())
	}

	/// Writes name documents keyed by each entity's local id.
	pub async fn index_names(&self, entities: &[Entity]) -> Result<IndexReport> {
		let operations = documents::name_operations(entities)?;

		self.run_bulk(&self.indices.names, self.cfg.indexing.name_chunk_size, operations).await
	}

	/// Writes fact documents keyed by the paired fact id.
	pub async fn index_facts(&self, facts: &[(i64, Fact)]) -> Result<IndexReport> {
		let operations = documents::fact_operations(facts)?;

		self.run_bulk(&self.indices.facts, self.cfg.indexing.fact_chunk_size, operations).await
	}

	async fn run_bulk(
		&self,
		index: &str,
		chunk_size: u32,
		operations: Vec<kb_storage::backend::BulkOperation>,
	) -> Result<IndexReport> {
		let cadence = FlushCadence::from_label(&self.cfg.indexing.flush_cadence)?;
		let mut indexer =
			BulkIndexer::new(self.backend.as_ref(), index, chunk_size as usize, cadence)?;
		let submitted = indexer.index_documents(operations).await?;

		tracing::info!(index, submitted, flushes = indexer.flushes(), "Bulk ingestion finished.");

		Ok(IndexReport { index: index.to_string(), submitted, flushes: indexer.flushes() })
	}
}
