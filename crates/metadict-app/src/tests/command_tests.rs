//! Command handlers against the bundled static dictionary

use std::time::Duration;

use metadict_config::Config;
use metadict_config::dictionary::DictionaryConfig;
use metadict_core::PlanningError;
use serde_json::Value;
use tokio::time::timeout;

use crate::commands::{QueryOptions, handle_engines, handle_query, handle_self_test};
use crate::controller::{AppController, build_registry};

fn controller() -> AppController {
    let mut config = Config::default();
    config.execution.sequential = true;
    AppController::new(config).unwrap()
}

async fn query_json(controller: &AppController, dictionaries: &str, query: &str, options: QueryOptions) -> Value {
    let mut out = Vec::new();
    timeout(
        Duration::from_secs(5),
        handle_query(controller.core(), dictionaries, query, options, &mut out),
    )
    .await
    .unwrap()
    .unwrap();
    serde_json::from_slice(&out).unwrap()
}

/// Test 1: Query prints the merged response as JSON
#[tokio::test]
async fn test_query_prints_json() {
    let controller = controller();

    let json = query_json(&controller, "de-en", "Haus", QueryOptions::default()).await;

    assert_eq!(json["query"], "Haus");
    let outputs: Vec<&str> = json["bilingual_entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["output"]["general_form"].as_str().unwrap())
        .collect();
    assert_eq!(outputs, vec!["house", "home"]);
    assert_eq!(json["grouped_bilingual_entries"].as_array().unwrap().len(), 1);
    assert!(json.get("diagnostics").is_none());
}

/// Test 2: Diagnostics are only printed on request
#[tokio::test]
async fn test_query_with_diagnostics() {
    let controller = controller();
    let options = QueryOptions {
        diagnostics: true,
        compact: true,
    };

    let json = query_json(&controller, "de>en", "Haus", options).await;

    let diagnostics = json["diagnostics"].as_array().unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0]["engine_name"], "static");
    assert_eq!(diagnostics[0]["target"], "de>en");
    assert!(diagnostics[0]["duration_ms"].is_u64());
}

/// Test 3: Compact output is a single line
#[tokio::test]
async fn test_compact_query_is_one_line() {
    let controller = controller();
    let mut out = Vec::new();
    let options = QueryOptions {
        diagnostics: false,
        compact: true,
    };

    handle_query(controller.core(), "de", "Baum", options, &mut out)
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 1);
}

/// Test 4: Malformed dictionaries are reported as errors
#[tokio::test]
async fn test_invalid_dictionary_is_an_error() {
    let controller = controller();
    let mut out = Vec::new();

    let error = handle_query(controller.core(), "german-english", "Haus", QueryOptions::default(), &mut out)
        .await
        .unwrap_err();

    assert!(matches!(
        error.downcast_ref::<PlanningError>(),
        Some(PlanningError::InvalidDictionary(_))
    ));
    assert!(out.is_empty());
}

/// Test 5: The embedded self-tests pass
#[tokio::test]
async fn test_self_test_passes() {
    let controller = controller();
    let mut out = Vec::new();

    let passed = timeout(
        Duration::from_secs(5),
        handle_self_test(controller.core(), None, &mut out),
    )
    .await
    .unwrap()
    .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(passed, "{text}");
    assert!(text.starts_with("static: 4 passed, 0 failed, 0 errored"), "{text}");
    assert!(text.contains("[PASSED] #0 'Haus' de>en"), "{text}");
}

/// Test 6: Self-testing an unknown engine fails
#[tokio::test]
async fn test_self_test_unknown_engine() {
    let controller = controller();
    let mut out = Vec::new();

    let error = handle_self_test(controller.core(), Some("leo"), &mut out)
        .await
        .unwrap_err();

    assert!(matches!(
        error.downcast_ref::<PlanningError>(),
        Some(PlanningError::UnknownEngine(name)) if name == "leo"
    ));
}

/// Test 7: Engines lists names and capabilities
#[test]
fn test_engines_listing() {
    let controller = controller();
    let mut out = Vec::new();

    handle_engines(controller.core(), &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("static (Embedded word list)"), "{text}");
    assert!(text.contains("de-en"), "{text}");
    assert!(text.contains("monolingual: de"), "{text}");
    assert!(text.contains("self-test: yes"), "{text}");
}

/// Test 8: Without engines every query is answered empty
#[tokio::test]
async fn test_disabled_dictionary_answers_empty() {
    let dictionary = DictionaryConfig {
        enabled: false,
        additional_paths: vec![],
    };
    let registry = build_registry(&dictionary).unwrap();
    let controller = AppController::with_registry(Config::default(), registry);

    let json = query_json(&controller, "de-en", "Haus", QueryOptions::default()).await;
    assert!(json["bilingual_entries"].as_array().unwrap().is_empty());

    let mut out = Vec::new();
    handle_engines(controller.core(), &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "No engines registered\n");
}

/// Test 9: Startup self-test runs when enabled
#[tokio::test]
async fn test_startup_self_test_is_optional() {
    let mut config = Config::default();
    config.self_test_on_startup = true;
    let controller = AppController::new(config).unwrap();

    timeout(Duration::from_secs(5), controller.startup_self_test())
        .await
        .unwrap();
    assert!(controller.config().self_test_on_startup);
}
