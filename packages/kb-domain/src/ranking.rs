use std::collections::HashSet;

use crate::{entity::Fact, fact_set::NameFrequencyTable};

/// Decides which subject ids survive when one display name resolves to several ids.
pub trait RankingPolicy
where
	Self: Send + Sync,
{
	fn select_subjects(&self, table: &NameFrequencyTable, max_per_topic: usize) -> HashSet<String>;
}

/// Keeps, per display name, the ids that contributed the most facts. Ties go to the id seen
/// first.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrequencyRanking;
impl RankingPolicy for FrequencyRanking {
	fn select_subjects(&self, table: &NameFrequencyTable, max_per_topic: usize) -> HashSet<String> {
		let mut keep = HashSet::new();

		for (_, counts) in table.iter() {
			keep.extend(most_common(counts, max_per_topic).into_iter().map(str::to_string));
		}

		keep
	}
}

/// Filters `facts` down to subjects picked by `policy`, preserving order.
pub fn rank_and_filter(
	policy: &dyn RankingPolicy,
	facts: &[Fact],
	table: &NameFrequencyTable,
	max_per_topic: usize,
) -> Vec<Fact> {
	let keep = policy.select_subjects(table, max_per_topic);

	facts.iter().filter(|fact| keep.contains(&fact.subject.external_id)).cloned().collect()
}

fn most_common(counts: &[(String, u32)], limit: usize) -> Vec<&str> {
	let mut ranked = counts.iter().collect::<Vec<_>>();

	// Stable sort keeps first-seen order among equal counts.
	ranked.sort_by(|a, b| b.1.cmp(&a.1));

	ranked.into_iter().take(limit).map(|(id, _)| id.as_str()).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn most_common_breaks_ties_by_first_seen() {
		let counts = vec![
			("/m/a".to_string(), 3),
			("/m/b".to_string(), 8),
			("/m/c".to_string(), 8),
			("/m/d".to_string(), 10),
		];

		assert_eq!(most_common(&counts, 2), vec!["/m/d", "/m/b"]);
		assert_eq!(most_common(&counts, 3), vec!["/m/d", "/m/b", "/m/c"]);
	}

	#[test]
	fn zero_limit_keeps_nothing() {
		let mut table = NameFrequencyTable::new();

		table.record("Paris", "/m/1");

		assert!(FrequencyRanking.select_subjects(&table, 0).is_empty());
	}

	#[test]
	fn selection_is_per_name() {
		let mut table = NameFrequencyTable::new();

		table.record("Paris", "/m/1");
		table.record("Paris", "/m/2");
		table.record("Paris", "/m/2");
		table.record("Lyon", "/m/3");

		let keep = FrequencyRanking.select_subjects(&table, 1);

		assert_eq!(keep, HashSet::from(["/m/2".to_string(), "/m/3".to_string()]));
	}
}
