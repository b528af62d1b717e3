//! Behavioural tests for CLI configuration loading.

use marquee::{MarqueeConfig, OperationMode};
use ortho_config::MergeComposer;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use serde_json::{Value, json};

/// State for CLI configuration scenarios.
///
/// Uses JSON values to represent configuration layers since `MergeComposer`
/// doesn't implement Clone. The composer is built fresh in `build_config`.
#[derive(ScenarioState, Default)]
struct ConfigState {
    env_layer: Slot<Value>,
    cli_layer: Slot<Value>,
    config: Slot<MarqueeConfig>,
}

#[fixture]
fn config_state() -> ConfigState {
    ConfigState::default()
}

/// Builds and stores the configuration from the accumulated layers.
fn build_config(state: &ConfigState) {
    let mut composer = MergeComposer::new();

    let defaults = serde_json::to_value(MarqueeConfig::default())
        .unwrap_or_else(|error| panic!("failed to serialise defaults: {error}"));
    composer.push_defaults(defaults);

    if let Some(env) = state.env_layer.get() {
        composer.push_environment(env);
    }

    if let Some(cli) = state.cli_layer.get() {
        composer.push_cli(cli);
    }

    match MarqueeConfig::merge_from_layers(composer.layers()) {
        Ok(config) => {
            state.config.set(config);
        }
        Err(error) => {
            panic!("failed to merge configuration: {error}");
        }
    }
}

fn built_config(state: &ConfigState) -> MarqueeConfig {
    state
        .config
        .get()
        .unwrap_or_else(|| panic!("configuration not built"))
}

/// Parses a step value as JSON, falling back to a plain string.
fn step_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') {
        return json!(trimmed.trim_matches('"'));
    }
    serde_json::from_str(trimmed).unwrap_or_else(|_| json!(trimmed))
}

// --- Given steps ---

#[given("a configuration with defaults only")]
fn defaults_only(config_state: &ConfigState) {
    let _ = config_state;
}

#[given("a configuration with environment {field} {value}")]
fn env_field_set(config_state: &ConfigState, field: String, value: String) {
    config_state
        .env_layer
        .set(json!({ field.as_str(): step_value(&value) }));
}

// --- When steps ---

#[when("the CLI is run without flags")]
fn cli_receives_nothing(config_state: &ConfigState) {
    build_config(config_state);
}

#[when("the CLI receives {field} {value}")]
fn cli_receives_field(config_state: &ConfigState, field: String, value: String) {
    config_state
        .cli_layer
        .set(json!({ field.as_str(): step_value(&value) }));
    build_config(config_state);
}

// --- Then steps ---

#[then("the carousel window size is {expected}")]
fn assert_window_size(config_state: &ConfigState, expected: usize) {
    let settings = built_config(config_state)
        .carousel_settings()
        .unwrap_or_else(|error| panic!("settings rejected: {error}"));

    assert_eq!(settings.window_size.get(), expected, "window size mismatch");
}

#[then("the API base URL is {expected}")]
fn assert_api_base_url(config_state: &ConfigState, expected: String) {
    let config = built_config(config_state);

    assert_eq!(
        config.api_base_url,
        expected.trim_matches('"'),
        "api_base_url mismatch"
    );
}

#[then("the operation mode is search")]
fn assert_search_mode(config_state: &ConfigState) {
    let config = built_config(config_state);

    assert_eq!(config.operation_mode(), OperationMode::Search);
    assert_eq!(config.require_search().ok(), Some("Arrival"));
}

#[then("the operation mode is movie detail")]
fn assert_movie_detail_mode(config_state: &ConfigState) {
    let config = built_config(config_state);

    assert_eq!(config.operation_mode(), OperationMode::MovieDetail);
    assert_eq!(config.movie_id, Some(42));
}

#[then("validating the configuration returns an error")]
fn assert_validation_error(config_state: &ConfigState) {
    let result = built_config(config_state).validate();

    assert!(result.is_err(), "expected validation to fail");
}

// --- Scenario bindings ---

#[scenario(path = "tests/features/cli_config.feature", index = 0)]
fn cli_window_size_overrides_env(config_state: ConfigState) {
    let _ = config_state;
}

#[scenario(path = "tests/features/cli_config.feature", index = 1)]
fn env_api_base_url_used_when_cli_omits_it(config_state: ConfigState) {
    let _ = config_state;
}

#[scenario(path = "tests/features/cli_config.feature", index = 2)]
fn search_title_selects_search_mode(config_state: ConfigState) {
    let _ = config_state;
}

#[scenario(path = "tests/features/cli_config.feature", index = 3)]
fn movie_id_wins_over_search(config_state: ConfigState) {
    let _ = config_state;
}

#[scenario(path = "tests/features/cli_config.feature", index = 4)]
fn zero_page_size_is_rejected(config_state: ConfigState) {
    let _ = config_state;
}
