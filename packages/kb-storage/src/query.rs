//! Request bodies for the search backend.

use serde_json::{Value, json};

/// Fields searched for candidate names. Description matches weigh twice as much as name
/// matches.
pub const NAME_SEARCH_FIELDS: [&str; 2] = ["name", "description^2"];

pub fn candidate_names(query: &str, size: u32) -> Value {
	json!({
		"query": {
			"multi_match": {
				"query": query,
				"fields": NAME_SEARCH_FIELDS,
			}
		},
		"size": size,
	})
}

/// Matches documents whose exact-match `field` equals any of `values`.
pub fn terms_any<S>(field: &str, values: &[S], size: Option<u32>) -> Value
where
	S: AsRef<str>,
{
	let should = values
		.iter()
		.map(|value| json!({ "term": { field: value.as_ref() } }))
		.collect::<Vec<_>>();
	let mut body = json!({
		"query": {
			"bool": {
				"should": should,
				"minimum_should_match": 1,
			}
		}
	});

	if let Some(size) = size {
		body["size"] = json!(size);
	}

	body
}

pub fn match_field(field: &str, text: &str, size: u32) -> Value {
	json!({
		"query": {
			"match": { field: text }
		},
		"size": size,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn candidate_query_weights_description() {
		let body = candidate_names("Obama born", 5);

		assert_eq!(body["query"]["multi_match"]["query"], "Obama born");
		assert_eq!(body["query"]["multi_match"]["fields"], json!(["name", "description^2"]));
		assert_eq!(body["size"], 5);
	}

	#[test]
	fn terms_any_requires_one_match() {
		let body = terms_any("src_freebase_id", &["/m/1", "/m/2"], Some(20));

		assert_eq!(
			body["query"]["bool"]["should"],
			json!([
				{ "term": { "src_freebase_id": "/m/1" } },
				{ "term": { "src_freebase_id": "/m/2" } }
			])
		);
		assert_eq!(body["query"]["bool"]["minimum_should_match"], 1);
		assert_eq!(body["size"], 20);
	}

	#[test]
	fn terms_any_without_size_leaves_backend_default() {
		let body = terms_any("freebase_id", &["/m/1"], None);

		assert!(body.get("size").is_none());
	}
}
