/// Sentinel alias list entry for entities indexed without aliases.
pub const NO_ALIAS: &str = "NOALIAS";
/// Sentinel description for entities indexed without a description.
pub const NO_DESCRIPTION: &str = "NODESCRIPTION";
/// Local id carried by entities that were built from a backend response.
pub const UNASSIGNED_ID: i64 = -1;

/// A knowledge-base node.
///
/// `local_id` is only meaningful during ingestion, where it becomes the backend document id.
/// `external_id` is the stable identifier shared by the name and fact indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
	pub local_id: i64,
	pub external_id: String,
	pub display_name: String,
	pub aliases: Vec<String>,
	pub description: String,
}
impl Entity {
	pub fn new(
		local_id: i64,
		external_id: impl Into<String>,
		display_name: impl Into<String>,
	) -> Self {
		Self {
			local_id,
			external_id: external_id.into(),
			display_name: display_name.into(),
			aliases: vec![NO_ALIAS.to_string()],
			description: NO_DESCRIPTION.to_string(),
		}
	}

	pub fn unassigned(external_id: impl Into<String>, display_name: impl Into<String>) -> Self {
		Self::new(UNASSIGNED_ID, external_id, display_name)
	}

	/// Replaces the alias list. An empty list keeps the sentinel.
	pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
		if !aliases.is_empty() {
			self.aliases = aliases;
		}

		self
	}

	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = description.into();

		self
	}

	pub fn has_local_id(&self) -> bool {
		self.local_id >= 0
	}
}

/// A `(subject, predicate, object)` triple. The predicate's id and name are both the predicate
/// text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fact {
	pub subject: Entity,
	pub predicate: Entity,
	pub object: Entity,
}
impl Fact {
	pub fn new(subject: Entity, predicate: &str, object: Entity) -> Self {
		Self { subject, predicate: Entity::unassigned(predicate, predicate), object }
	}

	/// Two facts with the same subject id and predicate text are duplicates, whatever their
	/// objects.
	pub fn dedup_key(&self) -> (&str, &str) {
		(self.subject.external_id.as_str(), self.predicate.display_name.as_str())
	}
}
