/// Keeps the candidate names that are mentioned in `query`, then drops any name contained in a
/// longer kept name.
pub fn filter_mentions<S>(candidate_names: &[S], query: &str) -> Vec<String>
where
	S: AsRef<str>,
{
	collapse_substrings(&literal_mentions(candidate_names, query))
}

/// Keeps names that occur in `query` followed by a space, ignoring case.
///
/// A trailing space is appended to the query so a name at the very end still matches. Besides
/// the plain query, three variants are tried: escaped quotes (`\"`) removed, `?` removed, and
/// both `"` and `?` removed.
pub fn literal_mentions<S>(candidate_names: &[S], query: &str) -> Vec<String>
where
	S: AsRef<str>,
{
	let variants = query_variants(query);

	candidate_names
		.iter()
		.map(|name| name.as_ref())
		.filter(|name| {
			let needle = format!("{} ", name.to_lowercase());

			variants.iter().any(|variant| variant.contains(needle.as_str()))
		})
		.map(str::to_string)
		.collect()
}

/// Drops every name that is a strict substring of another name in the list. Matching is
/// case-sensitive and equal names never remove each other.
pub fn collapse_substrings<S>(names: &[S]) -> Vec<String>
where
	S: AsRef<str>,
{
	names
		.iter()
		.map(|name| name.as_ref())
		.filter(|name| {
			!names
				.iter()
				.map(|other| other.as_ref())
				.any(|other| other != *name && other.contains(*name))
		})
		.map(str::to_string)
		.collect()
}

fn query_variants(query: &str) -> [String; 4] {
	let base = format!("{query} ").to_lowercase();
	let escaped_quotes_removed = base.replace("\\\"", "");
	let questions_removed = base.replace('?', "");
	let quotes_and_questions_removed = base.replace('"', "").replace('?', "");

	[base, escaped_quotes_removed, questions_removed, quotes_and_questions_removed]
}
