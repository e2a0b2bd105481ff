//! Document shapes stored in the name and fact indices.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, backend::BulkOperation};
use kb_domain::{Entity, Fact, NO_DESCRIPTION};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameDocument {
	pub freebase_id: String,
	pub name: String,
	#[serde(default = "default_description")]
	pub description: String,
	/// Aliases joined by single spaces.
	#[serde(default)]
	pub aliases: String,
}
impl NameDocument {
	pub fn from_entity(entity: &Entity) -> Self {
		Self {
			freebase_id: entity.external_id.clone(),
			name: entity.display_name.clone(),
			description: entity.description.clone(),
			aliases: entity.aliases.join(" "),
		}
	}

	/// Candidates carry no local id and keep the alias sentinel.
	pub fn into_entity(self) -> Entity {
		Entity::unassigned(self.freebase_id, self.name).with_description(self.description)
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactDocument {
	pub src_freebase_id: String,
	pub src_freebase_name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub src_freebase_name_analyzed: Option<String>,
	pub predicate: String,
	pub tgt_freebase_id: String,
	pub tgt_freebase_name: String,
}
impl FactDocument {
	pub fn from_fact(fact: &Fact) -> Self {
		Self {
			src_freebase_id: fact.subject.external_id.clone(),
			src_freebase_name: fact.subject.display_name.clone(),
			src_freebase_name_analyzed: Some(fact.subject.display_name.clone()),
			predicate: fact.predicate.display_name.clone(),
			tgt_freebase_id: fact.object.external_id.clone(),
			tgt_freebase_name: fact.object.display_name.clone(),
		}
	}

	pub fn into_fact(self) -> Fact {
		Fact::new(
			Entity::unassigned(self.src_freebase_id, self.src_freebase_name),
			&self.predicate,
			Entity::unassigned(self.tgt_freebase_id, self.tgt_freebase_name),
		)
	}
}

/// Bulk operations for name documents, keyed by each entity's local id.
///
/// Fails before anything is built when an entity has no local id.
pub fn name_operations(entities: &[Entity]) -> Result<Vec<BulkOperation>> {
	entities
		.iter()
		.map(|entity| {
			if !entity.has_local_id() {
				return Err(Error::InvalidArgument(format!(
					"Entity {:?} has no local id; assign ids before indexing.",
					entity.external_id
				)));
			}

			Ok(BulkOperation {
				id: entity.local_id,
				source: serde_json::to_value(NameDocument::from_entity(entity))?,
			})
		})
		.collect()
}

/// Bulk operations for `(fact id, fact)` pairs.
pub fn fact_operations(facts: &[(i64, Fact)]) -> Result<Vec<BulkOperation>> {
	facts
		.iter()
		.map(|(id, fact)| {
			if *id < 0 {
				return Err(Error::InvalidArgument(format!(
					"Fact id {id} is negative; assign ids before indexing."
				)));
			}

			Ok(BulkOperation {
				id: *id,
				source: serde_json::to_value(FactDocument::from_fact(fact))?,
			})
		})
		.collect()
}

fn default_description() -> String {
	NO_DESCRIPTION.to_string()
}

#[cfg(test)]
mod tests {
	use super::*;
	use kb_domain::NO_ALIAS;

	#[test]
	fn name_document_joins_aliases() {
		let entity = Entity::new(3, "/m/02mjmr", "Barack Obama")
			.with_aliases(vec!["Obama".to_string(), "Barack".to_string()])
			.with_description("44th U.S. president");
		let doc = NameDocument::from_entity(&entity);

		assert_eq!(doc.aliases, "Obama Barack");
		assert_eq!(doc.description, "44th U.S. president");
	}

	#[test]
	fn hit_without_description_gets_sentinel() {
		let doc: NameDocument =
			serde_json::from_value(serde_json::json!({ "freebase_id": "/m/1", "name": "Paris" }))
				.expect("Name document must parse.");
		let entity = doc.into_entity();

		assert_eq!(entity.description, NO_DESCRIPTION);
		assert_eq!(entity.aliases, vec![NO_ALIAS.to_string()]);
		assert!(!entity.has_local_id());
	}

	#[test]
	fn unassigned_entities_are_rejected() {
		let entities = vec![Entity::new(0, "/m/1", "Paris"), Entity::unassigned("/m/2", "Lyon")];
		let err = name_operations(&entities).unwrap_err();

		assert!(matches!(err, Error::InvalidArgument(_)));
	}

	#[test]
	fn fact_document_round_trips_predicate() {
		let fact = Fact::new(
			Entity::unassigned("/m/0f8l9c", "France"),
			"location.country.capital",
			Entity::unassigned("/m/05qtj", "Paris"),
		);
		let operations = fact_operations(&[(9, fact.clone())]).expect("Fact must convert.");

		assert_eq!(operations[0].id, 9);
		assert_eq!(operations[0].source["src_freebase_name_analyzed"], "France");
		assert_eq!(operations[0].source["predicate"], "location.country.capital");

		let parsed: FactDocument =
			serde_json::from_value(operations[0].source.clone()).expect("Fact must parse.");

		assert_eq!(parsed.into_fact(), fact);
	}
}
