use std::collections::{HashMap, HashSet};

use crate::entity::Fact;

/// Per display name, how many distinct facts each subject id contributed during one retrieval.
///
/// Names and ids keep their first-seen order, which is the tie-break order for ranking.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameFrequencyTable {
	entries: Vec<NameCounts>,
	positions: HashMap<String, usize>,
}
impl NameFrequencyTable {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn record(&mut self, display_name: &str, external_id: &str) {
		let position = match self.positions.get(display_name) {
			Some(position) => *position,
			None => {
				self.entries.push(NameCounts::new(display_name));
				self.positions.insert(display_name.to_string(), self.entries.len() - 1);

				self.entries.len() - 1
			},
		};

		self.entries[position].bump(external_id);
	}

	pub fn count(&self, display_name: &str, external_id: &str) -> u32 {
		self.positions
			.get(display_name)
			.map(|position| self.entries[*position].count(external_id))
			.unwrap_or(0)
	}

	/// `(external_id, count)` pairs for a name in first-seen order.
	pub fn counts_for(&self, display_name: &str) -> &[(String, u32)] {
		self.positions
			.get(display_name)
			.map(|position| self.entries[*position].counts.as_slice())
			.unwrap_or_default()
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|entry| entry.display_name.as_str())
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &[(String, u32)])> {
		self.entries.iter().map(|entry| (entry.display_name.as_str(), entry.counts.as_slice()))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct NameCounts {
	display_name: String,
	counts: Vec<(String, u32)>,
	id_positions: HashMap<String, usize>,
}
impl NameCounts {
	fn new(display_name: &str) -> Self {
		Self {
			display_name: display_name.to_string(),
			counts: Vec::new(),
			id_positions: HashMap::new(),
		}
	}

	fn bump(&mut self, external_id: &str) {
		match self.id_positions.get(external_id) {
			Some(position) => self.counts[*position].1 += 1,
			None => {
				self.id_positions.insert(external_id.to_string(), self.counts.len());
				self.counts.push((external_id.to_string(), 1));
			},
		}
	}

	fn count(&self, external_id: &str) -> u32 {
		self.id_positions.get(external_id).map(|position| self.counts[*position].1).unwrap_or(0)
	}
}

/// Facts left after dropping repeated `(subject id, predicate)` keys, with their name tally.
#[derive(Clone, Debug, Default)]
pub struct FactTally {
	pub facts: Vec<Fact>,
	pub name_frequencies: NameFrequencyTable,
}

/// Keeps the first fact seen for each dedup key and counts it under the subject's display name.
/// Later facts with a known key are skipped without touching the counters.
pub fn tally_facts<I>(facts: I) -> FactTally
where
	I: IntoIterator<Item = Fact>,
{
	let mut tally = FactTally::default();
	let mut seen = HashSet::new();

	for fact in facts {
		let key = (fact.subject.external_id.clone(), fact.predicate.display_name.clone());

		if !seen.insert(key) {
			continue;
		}

		tally.name_frequencies.record(&fact.subject.display_name, &fact.subject.external_id);
		tally.facts.push(fact);
	}

	tally
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::entity::Entity;

	fn fact(subject_id: &str, subject_name: &str, predicate: &str, object: &str) -> Fact {
		Fact::new(
			Entity::unassigned(subject_id, subject_name),
			predicate,
			Entity::unassigned(format!("/m/{object}"), object),
		)
	}

	#[test]
	fn duplicate_keys_collapse_to_first_fact() {
		let tally = tally_facts(vec![
			fact("/m/1", "Paris", "location.location.containedby", "France"),
			fact("/m/1", "Paris", "location.location.containedby", "Europe"),
		]);

		assert_eq!(tally.facts.len(), 1);
		assert_eq!(tally.facts[0].object.display_name, "France");
		assert_eq!(tally.name_frequencies.count("Paris", "/m/1"), 1);
	}

	#[test]
	fn counts_distinct_predicates_per_subject() {
		let tally = tally_facts(vec![
			fact("/m/1", "Paris", "a", "x"),
			fact("/m/2", "Paris", "a", "x"),
			fact("/m/1", "Paris", "b", "x"),
		]);

		assert_eq!(tally.facts.len(), 3);
		assert_eq!(tally.name_frequencies.counts_for("Paris"), &[
			("/m/1".to_string(), 2),
			("/m/2".to_string(), 1)
		]);
	}

	#[test]
	fn every_counted_id_has_a_fact() {
		let tally = tally_facts(vec![
			fact("/m/1", "Paris", "a", "x"),
			fact("/m/3", "Lyon", "a", "x"),
			fact("/m/1", "Paris", "a", "y"),
		]);

		for (_, counts) in tally.name_frequencies.iter() {
			for (id, _) in counts {
				assert!(tally.facts.iter().any(|fact| &fact.subject.external_id == id));
			}
		}
	}

	#[test]
	fn many_ids_under_one_name_keep_first_seen_order() {
		let mut table = NameFrequencyTable::new();

		for round in 0..3 {
			for i in 0..500 {
				if round == 0 || i % (round + 1) == 0 {
					table.record("Springfield", &format!("/m/{i}"));
				}
			}
		}

		let counts = table.counts_for("Springfield");

		assert_eq!(counts.len(), 500);
		assert_eq!(counts[0], ("/m/0".to_string(), 3));
		assert_eq!(counts[499].0, "/m/499");
		assert_eq!(table.count("Springfield", "/m/6"), 3);
		assert_eq!(table.count("Springfield", "/m/2"), 2);
		assert_eq!(table.count("Springfield", "/m/1"), 1);
		assert_eq!(table.count("Springfield", "/m/500"), 0);
		assert_eq!(table.len(), 1);
	}

	#[test]
	fn unknown_name_has_no_counts() {
		let table = NameFrequencyTable::new();

		assert!(table.counts_for("missing").is_empty());
		assert_eq!(table.count("missing", "/m/1"), 0);
		assert!(table.is_empty());
	}
}
