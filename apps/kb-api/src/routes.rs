use axum::{
	Json, Router,
	extract::{Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use kb_service::{
	Error, FactLookupRequest, FactLookupResponse, NameLookupRequest, NameLookupResponse,
};

/// `(method, path)` for every registered route.
pub const ROUTES: [(&str, &str); 4] = [
	("GET", "/health"),
	("GET", "/routes"),
	("GET", "/api/v1/freebase/name"),
	("GET", "/api/v1/freebase/fact"),
];

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/routes", get(routes))
		.route("/api/v1/freebase/name", get(lookup_names))
		.route("/api/v1/freebase/fact", get(lookup_facts))
		.with_state(state)
}

/// Query parameters arrive as raw strings so that bad values map to the JSON error body.
#[derive(Debug, Default, Deserialize)]
pub struct NameParams {
	query: Option<String>,
	remove_stopwords: Option<String>,
	num_results: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FactParams {
	topic_ids: Option<String>,
	num_results: Option<String>,
	num_results_per_topic: Option<String>,
}

#[derive(Debug, Serialize)]
struct RouteItem {
	method: &'static str,
	path: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}

	fn invalid(message: impl Into<String>) -> Self {
		Self::new(StatusCode::BAD_REQUEST, "invalid_request", message)
	}
}
impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		let message = err.to_string();

		match err {
			Error::InvalidRequest { .. } => Self::invalid(message),
			Error::UnknownDatasetVersion { .. } =>
				Self::new(StatusCode::BAD_REQUEST, "unknown_dataset_version", message),
			Error::BackendUnavailable { .. } =>
				Self::new(StatusCode::SERVICE_UNAVAILABLE, "backend_unavailable", message),
			Error::Backend { .. } => Self::new(StatusCode::BAD_GATEWAY, "backend_error", message),
			Error::BulkWritePartialFailure { .. } =>
				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "bulk_write_failed", message),
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		if self.status.is_server_error() {
			tracing::error!(
				error_code = %self.error_code,
				message = %self.message,
				"Request failed."
			);
		}

		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn routes() -> Json<Vec<RouteItem>> {
	Json(ROUTES.into_iter().map(|(method, path)| RouteItem { method, path }).collect())
}

async fn lookup_names(
	State(state): State<AppState>,
	Query(params): Query<NameParams>,
) -> Result<Json<NameLookupResponse>, ApiError> {
	let query = params.query.ok_or_else(|| ApiError::invalid("query is required."))?;
	let req = NameLookupRequest {
		query,
		remove_stopwords: parse_opt(
			params.remove_stopwords.as_deref(),
			"remove_stopwords",
			parse_bool,
		)?,
		num_results: parse_opt(params.num_results.as_deref(), "num_results", parse_count)?,
	};
	let response = state.service.lookup_names(req).await?;

	Ok(Json(response))
}

async fn lookup_facts(
	State(state): State<AppState>,
	Query(params): Query<FactParams>,
) -> Result<Json<FactLookupResponse>, ApiError> {
	let topic_ids = params.topic_ids.ok_or_else(|| ApiError::invalid("topic_ids is required."))?;
	let req = FactLookupRequest {
		topic_ids: topic_ids.split(',').map(|id| id.trim().to_string()).collect(),
		num_results: parse_opt(params.num_results.as_deref(), "num_results", parse_count)?,
		num_results_per_topic: parse_opt(
			params.num_results_per_topic.as_deref(),
			"num_results_per_topic",
			parse_count,
		)?,
	};
	let response = state.service.lookup_facts(req).await?;

	Ok(Json(response))
}

fn parse_opt<T>(
	raw: Option<&str>,
	field: &str,
	parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, ApiError> {
	match raw {
		None => Ok(None),
		Some(value) => parse(value.trim())
			.map(Some)
			.ok_or_else(|| ApiError::invalid(format!("{field} has an invalid value {value:?}."))),
	}
}

fn parse_count(value: &str) -> Option<u32> {
	value.parse().ok()
}

fn parse_bool(value: &str) -> Option<bool> {
	match value.to_ascii_lowercase().as_str() {
		"true" | "1" => Some(true),
		"false" | "0" => Some(false),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_boolean_flags() {
		assert_eq!(parse_bool("True"), Some(true));
		assert_eq!(parse_bool("0"), Some(false));
		assert_eq!(parse_bool("yes"), None);
	}

	#[test]
	fn rejects_non_integer_counts() {
		assert!(parse_opt(Some("ten"), "num_results", parse_count).is_err());
		assert!(parse_opt(Some("-1"), "num_results", parse_count).is_err());
		assert_eq!(parse_opt(Some(" 5 "), "num_results", parse_count).unwrap(), Some(5));
		assert_eq!(parse_opt(None, "num_results", parse_count).unwrap(), None);
	}
}
