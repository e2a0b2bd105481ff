use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use kb_config::{Config, Error};

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

fn sample_toml_with(section: &str, key: &str, value: Value) -> String {
	let mut root: Value = toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");
	let table = root
		.as_table_mut()
		.and_then(|root| root.get_mut(section))
		.and_then(Value::as_table_mut)
		.unwrap_or_else(|| panic!("Sample config must include [{section}]."));

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render sample config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("kb_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> kb_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = kb_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

fn base_config() -> Config {
	toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse test config.")
}

#[test]
fn sample_config_is_valid() {
	let cfg = load_payload(SAMPLE_CONFIG_TOML.to_string()).expect("Sample config must load.");

	assert_eq!(cfg.backend.dataset, "FB_2M");
	assert_eq!(cfg.indexing.name_chunk_size, 50_000);
	assert_eq!(cfg.indexing.fact_chunk_size, 5_000);
	assert_eq!(cfg.lookup.default_num_results_per_topic, 10);
}

#[test]
fn load_trims_trailing_slash_from_backend_url() {
	let cfg = load_payload(SAMPLE_CONFIG_TOML.to_string()).expect("Sample config must load.");

	assert_eq!(cfg.backend.url, "http://127.0.0.1:9200");
}

#[test]
fn lookup_defaults_apply_when_omitted() {
	let mut root: Value = toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse config.");

	root.as_table_mut()
		.expect("Sample config must be a table.")
		.insert("lookup".to_string(), Value::Table(Default::default()));

	let cfg = load_payload(toml::to_string(&root).expect("Failed to render config."))
		.expect("Config without lookup values must load.");

	assert_eq!(cfg.lookup.default_num_results, 10);
	assert_eq!(cfg.lookup.default_num_results_per_topic, 10);
	assert_eq!(cfg.lookup.max_num_results, 10_000);
}

#[test]
fn missing_file_reports_read_error() {
	let path = env::temp_dir().join("kb_config_test_missing_file.toml");
	let err = kb_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }), "Unexpected error: {err:?}");
}

#[test]
fn malformed_toml_reports_parse_error() {
	let err = load_payload("[service\nhttp_bind = ".to_string()).expect_err("Expected parse error.");

	assert!(matches!(err, Error::ParseConfig { .. }), "Unexpected error: {err:?}");
}

#[test]
fn timeout_must_be_positive() {
	let err = load_payload(sample_toml_with("backend", "timeout_ms", Value::Integer(0)))
		.expect_err("Expected timeout validation error.");

	assert!(
		err.to_string().contains("backend.timeout_ms must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn chunk_sizes_must_be_positive() {
	let err = load_payload(sample_toml_with("indexing", "fact_chunk_size", Value::Integer(0)))
		.expect_err("Expected chunk size validation error.");

	assert!(
		err.to_string().contains("indexing.fact_chunk_size must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn flush_cadence_must_be_known() {
	let err = load_payload(sample_toml_with(
		"indexing",
		"flush_cadence",
		Value::String("eager".to_string()),
	))
	.expect_err("Expected flush cadence validation error.");

	assert!(
		err.to_string().contains("indexing.flush_cadence must be one of boundary or legacy."),
		"Unexpected error: {err}"
	);
}

#[test]
fn default_limits_cannot_exceed_max() {
	let mut cfg = base_config();

	cfg.lookup.max_num_results = 5;

	let err = kb_config::validate(&cfg).expect_err("Expected limit validation error.");

	assert!(
		err.to_string().contains("lookup.default_num_results must not exceed lookup.max_num_results."),
		"Unexpected error: {err}"
	);
}

#[test]
fn index_overrides_must_be_paired() {
	let mut cfg = base_config();

	cfg.backend.names_index = Some("names_test".to_string());

	let err = kb_config::validate(&cfg).expect_err("Expected index override validation error.");

	assert!(
		err.to_string()
			.contains("backend.names_index and backend.facts_index must be set together."),
		"Unexpected error: {err}"
	);
}

#[test]
fn blank_index_overrides_are_ignored() {
	let mut root: Value = toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse config.");
	let backend = root
		.as_table_mut()
		.and_then(|root| root.get_mut("backend"))
		.and_then(Value::as_table_mut)
		.expect("Sample config must include [backend].");

	backend.insert("names_index".to_string(), Value::String("  ".to_string()));
	backend.insert("facts_index".to_string(), Value::String(String::new()));

	let cfg = load_payload(toml::to_string(&root).expect("Failed to render config."))
		.expect("Blank overrides must be dropped before validation.");

	assert!(cfg.backend.names_index.is_none());
	assert!(cfg.backend.facts_index.is_none());
}
