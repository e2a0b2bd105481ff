pub mod entity;
pub mod fact_set;
pub mod mention;
pub mod ranking;
pub mod text;

pub use entity::{Entity, Fact, NO_ALIAS, NO_DESCRIPTION, UNASSIGNED_ID};
pub use fact_set::{FactTally, NameFrequencyTable, tally_facts};
pub use mention::{collapse_substrings, filter_mentions, literal_mentions};
pub use ranking::{FrequencyRanking, RankingPolicy, rank_and_filter};
