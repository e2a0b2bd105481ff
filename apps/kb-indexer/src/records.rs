//! JSON Lines input records. Blank lines are skipped; ids count records from zero.

use std::io::BufRead;

use serde::Deserialize;

use crate::{Error, Result};
use kb_domain::{Entity, Fact};

#[derive(Debug, Deserialize)]
pub struct EntityRecord {
	pub freebase_id: String,
	pub name: String,
	#[serde(default)]
	pub aliases: Vec<String>,
	pub description: Option<String>,
}
impl EntityRecord {
	fn into_entity(self, local_id: i64) -> Entity {
		let entity = Entity::new(local_id, self.freebase_id, self.name).with_aliases(self.aliases);

		match self.description {
			Some(description) => entity.with_description(description),
			None => entity,
		}
	}
}

#[derive(Debug, Deserialize)]
pub struct FactRecord {
	pub src: EntityRecord,
	pub predicate: String,
	pub tgt: EntityRecord,
}

pub fn read_names<R>(reader: R) -> Result<Vec<Entity>>
where
	R: BufRead,
{
	read_records(reader, |record: EntityRecord, id| record.into_entity(id))
}

/// Subject and object entities stay unassigned; the id belongs to the fact.
pub fn read_facts<R>(reader: R) -> Result<Vec<(i64, Fact)>>
where
	R: BufRead,
{
	read_records(reader, |record: FactRecord, id| {
		let subject = record.src.into_entity(kb_domain::UNASSIGNED_ID);
		let object = record.tgt.into_entity(kb_domain::UNASSIGNED_ID);

		(id, Fact::new(subject, &record.predicate, object))
	})
}

fn read_records<R, T, U, F>(reader: R, build: F) -> Result<Vec<U>>
where
	R: BufRead,
	T: for<'de> Deserialize<'de>,
	F: Fn(T, i64) -> U,
{
	let mut out = Vec::new();

	for (index, line) in reader.lines().enumerate() {
		let line = line.map_err(|source| Error::ReadLine { line: index + 1, source })?;

		if line.trim().is_empty() {
			continue;
		}

		let record = serde_json::from_str::<T>(&line)
			.map_err(|source| Error::ParseRecord { line: index + 1, source })?;

		out.push(build(record, out.len() as i64));
	}

	Ok(out)
}

#[cfg(test)]
mod tests {
	use super::*;
	use kb_domain::{NO_ALIAS, NO_DESCRIPTION};

	#[test]
	fn names_get_sequential_ids_and_sentinels() {
		let input = concat!(
			r#"{"freebase_id":"/m/1","name":"Paris","aliases":["City of Light"]}"#,
			"\n\n",
			r#"{"freebase_id":"/m/2","name":"Lyon","description":"French city"}"#,
			"\n",
		);
		let entities = read_names(input.as_bytes()).expect("Records must parse.");

		assert_eq!(entities.len(), 2);
		assert_eq!(entities[0].local_id, 0);
		assert_eq!(entities[0].aliases, vec!["City of Light".to_string()]);
		assert_eq!(entities[0].description, NO_DESCRIPTION);
		assert_eq!(entities[1].local_id, 1);
		assert_eq!(entities[1].aliases, vec![NO_ALIAS.to_string()]);
		assert_eq!(entities[1].description, "French city");
	}

	#[test]
	fn facts_carry_their_own_ids() {
		let input = concat!(
			r#"{"src":{"freebase_id":"/m/fr","name":"France"},"#,
			r#""predicate":"location.country.capital","#,
			r#""tgt":{"freebase_id":"/m/paris","name":"Paris"}}"#,
		);
		let facts = read_facts(input.as_bytes()).expect("Records must parse.");

		assert_eq!(facts.len(), 1);
		assert_eq!(facts[0].0, 0);
		assert_eq!(facts[0].1.predicate.external_id, "location.country.capital");
		assert!(!facts[0].1.subject.has_local_id());
	}

	#[test]
	fn bad_lines_report_their_position() {
		let input = "{\"freebase_id\":\"/m/1\",\"name\":\"Paris\"}\n{\"name\":\"No id\"}\n";
		let err = read_names(input.as_bytes()).unwrap_err();

		assert!(matches!(err, Error::ParseRecord { line: 2, .. }), "Unexpected error: {err:?}");
	}
}
