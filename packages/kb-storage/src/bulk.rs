use crate::{
	Error, Result,
	backend::{BulkOperation, SearchBackend},
};

/// When a buffered batch is written out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlushCadence {
	/// Flush as soon as the buffer holds `chunk_size` documents.
	#[default]
	Boundary,
	/// Flush before buffering the document at zero-based position `i` when
	/// `i % chunk_size == 1`, so each batch runs one document past the boundary.
	Legacy,
}
impl FlushCadence {
	pub fn from_label(label: &str) -> Result<Self> {
		match label {
			"boundary" => Ok(Self::Boundary),
			"legacy" => Ok(Self::Legacy),
			other => Err(Error::InvalidArgument(format!("Unknown flush cadence {other:?}."))),
		}
	}
}

/// Buffers documents for one index and writes them in chunked bulk requests, refreshing after
/// every batch.
///
/// A failed batch stops the run. Batches written before it stay committed.
pub struct BulkIndexer<'a> {
	backend: &'a dyn SearchBackend,
	index: &'a str,
	chunk_size: usize,
	cadence: FlushCadence,
	buffer: Vec<BulkOperation>,
	committed: usize,
	flushes: usize,
}
impl<'a> BulkIndexer<'a> {
	pub fn new(
		backend: &'a dyn SearchBackend,
		index: &'a str,
		chunk_size: usize,
		cadence: FlushCadence,
	) -> Result<Self> {
		if chunk_size == 0 {
			return Err(Error::InvalidArgument("chunk_size must be greater than zero.".to_string()));
		}

		Ok(Self {
			backend,
			index,
			chunk_size,
			cadence,
			buffer: Vec::new(),
			committed: 0,
			flushes: 0,
		})
	}

	/// Writes every document and returns how many were submitted by this call.
	pub async fn index_documents<I>(&mut self, documents: I) -> Result<usize>
	where
		I: IntoIterator<Item = BulkOperation>,
	{
		let start = self.committed;

		for (position, document) in documents.into_iter().enumerate() {
			if self.cadence == FlushCadence::Legacy && position % self.chunk_size == 1 {
				self.flush().await?;
			}

			self.buffer.push(document);

			if self.cadence == FlushCadence::Boundary && self.buffer.len() >= self.chunk_size {
				self.flush().await?;
			}
		}

		self.flush().await?;

		Ok(self.committed - start)
	}

	/// Documents committed so far across all calls.
	pub fn committed(&self) -> usize {
		self.committed
	}

	/// Bulk requests sent so far.
	pub fn flushes(&self) -> usize {
		self.flushes
	}

	async fn flush(&mut self) -> Result<()> {
		if self.buffer.is_empty() {
			return Ok(());
		}

		let batch = std::mem::take(&mut self.buffer);
		let written = self.backend.bulk(self.index, &batch, true).await.map_err(|err| {
			Error::BulkWritePartialFailure { committed: self.committed, message: err.to_string() }
		})?;

		self.committed += written;
		self.flushes += 1;

		tracing::info!(
			index = self.index,
			batch = batch.len(),
			committed = self.committed,
			"Flushed bulk batch."
		);

		Ok(())
	}
}
