use std::sync::Arc;
use std::time::Duration;

use metadict_types::{
    BilingualQueryResult, DictionaryObject, EngineQueryResult, EntryType, ExternalContent,
    MonolingualEntry, MonolingualQueryResult, StepStatus, SynonymEntry, SynonymGroup,
};

use super::support::*;
use crate::aggregator::ResultAggregator;
use crate::execution::QueryStepResult;
use crate::plan::{QueryPlan, QueryStep};
use crate::planner::QueryPlanner;

/// Plan with one `de>en` step per engine name plus, when requested, a `de>fr` step
fn steps(engines: &[&str], dictionaries: &str) -> Vec<QueryStep> {
    let providers = engines
        .iter()
        .map(|name| {
            MockProvider::new(
                name,
                bilingual_features(&["de-en", "de-fr", "en-fr"]),
                MockEngine::new(Behavior::Echo),
            )
        })
        .collect();
    let plan: QueryPlan = QueryPlanner::new(Arc::new(registry(providers)))
        .plan("test", dictionaries)
        .unwrap();
    plan.into_steps()
}

fn success(step: &QueryStep, result: BilingualQueryResult) -> QueryStepResult {
    QueryStepResult::success(
        step.clone(),
        EngineQueryResult::Bilingual(result),
        Duration::from_millis(5),
    )
}

fn synonyms(base: &str, meaning: &str, synonym: &str) -> SynonymEntry {
    SynonymEntry::new(
        obj("en", base),
        vec![SynonymGroup::new(obj("en", meaning), vec![obj("en", synonym)])],
    )
}

fn with_synonyms(entries: Vec<SynonymEntry>) -> BilingualQueryResult {
    BilingualQueryResult {
        synonym_entries: entries,
        ..Default::default()
    }
}

#[test]
fn test_distinct_synonym_bases_stay_separate() {
    let steps = steps(&["first", "second"], "en>fr");
    let results = vec![
        success(
            &steps[0],
            with_synonyms(vec![synonyms("TEST_WORD_1", "BASE_MEANING_1", "SYNONYM_1")]),
        ),
        success(
            &steps[1],
            with_synonyms(vec![synonyms("TEST_WORD_2", "BASE_MEANING_2", "SYNONYM_2")]),
        ),
    ];

    let response = ResultAggregator.aggregate("test", results);

    assert_eq!(
        response.synonym_entries,
        vec![
            synonyms("TEST_WORD_1", "BASE_MEANING_1", "SYNONYM_1"),
            synonyms("TEST_WORD_2", "BASE_MEANING_2", "SYNONYM_2"),
        ]
    );
}

#[test]
fn test_same_synonym_base_is_merged() {
    let steps = steps(&["first", "second"], "en>fr");
    let results = vec![
        success(
            &steps[0],
            with_synonyms(vec![synonyms("TEST_WORD_1", "BASE_MEANING_1", "SYNONYM_1")]),
        ),
        success(
            &steps[1],
            with_synonyms(vec![
                synonyms("TEST_WORD_1", "BASE_MEANING_2", "SYNONYM_2")
                    .with_entry_type(EntryType::Noun),
            ]),
        ),
    ];

    let response = ResultAggregator.aggregate("test", results);

    assert_eq!(response.synonym_entries.len(), 1);
    let merged = &response.synonym_entries[0];
    assert_eq!(merged.base_object.general_form(), "TEST_WORD_1");
    assert_eq!(merged.base_entry_type, Some(EntryType::Noun));
    let meanings: Vec<&str> = merged
        .synonym_groups
        .iter()
        .map(|group| group.base_meaning.general_form())
        .collect();
    assert_eq!(meanings, vec!["BASE_MEANING_1", "BASE_MEANING_2"]);
}

#[test]
fn test_merged_base_keeps_first_scalar_fields() {
    let steps = steps(&["first", "second"], "en>fr");
    let first = DictionaryObject::builder()
        .language(lang("en"))
        .general_form("run")
        .description("to move fast")
        .meanings(vec!["move".to_string()])
        .build()
        .unwrap();
    let second = DictionaryObject::builder()
        .language(lang("en"))
        .general_form("run")
        .description("to operate")
        .domain("sports")
        .meanings(vec!["move".to_string(), "operate".to_string()])
        .build()
        .unwrap();

    let results = vec![
        success(&steps[0], with_synonyms(vec![SynonymEntry::new(first, vec![])])),
        success(&steps[1], with_synonyms(vec![SynonymEntry::new(second, vec![])])),
    ];

    let response = ResultAggregator.aggregate("test", results);
    let base = &response.synonym_entries[0].base_object;

    assert_eq!(base.description(), Some("to move fast"));
    assert_eq!(base.domain(), Some("sports"));
    assert_eq!(
        base.meanings(),
        Some(&["move".to_string(), "operate".to_string()][..])
    );
}

#[test]
fn test_bilingual_entries_follow_step_order() {
    let steps = steps(&["first", "second"], "de>en");
    let first = BilingualQueryResult {
        bilingual_entries: vec![entry(("de", "Haus"), ("en", "house")), entry(("de", "Haus"), ("en", "home"))],
        ..Default::default()
    };
    let second = BilingualQueryResult {
        bilingual_entries: vec![entry(("de", "Haus"), ("en", "house"))],
        ..Default::default()
    };

    // Handed over out of order
    let results = vec![success(&steps[1], second), success(&steps[0], first)];
    let response = ResultAggregator.aggregate("Haus", results);

    let outputs: Vec<&str> = response
        .bilingual_entries
        .iter()
        .map(|entry| entry.output.general_form())
        .collect();
    assert_eq!(outputs, vec!["house", "home", "house"]);

    let engines: Vec<&str> = response
        .diagnostics
        .iter()
        .map(|diagnostic| diagnostic.engine_name.as_str())
        .collect();
    assert_eq!(engines, vec!["first", "second"]);
}

#[test]
fn test_entries_are_grouped_by_requested_dictionary() {
    // first: de>en, en>de, de>fr, fr>de
    let steps = steps(&["first"], "de-en,de-fr");
    let results = vec![
        success(
            &steps[0],
            BilingualQueryResult {
                bilingual_entries: vec![entry(("de", "Haus"), ("en", "house"))],
                ..Default::default()
            },
        ),
        success(&steps[1], BilingualQueryResult::default()),
        success(
            &steps[2],
            BilingualQueryResult {
                bilingual_entries: vec![entry(("de", "Haus"), ("fr", "maison"))],
                ..Default::default()
            },
        ),
        success(
            &steps[3],
            BilingualQueryResult {
                bilingual_entries: vec![entry(("fr", "Haus"), ("de", "Haus"))],
                ..Default::default()
            },
        ),
    ];

    let response = ResultAggregator.aggregate("Haus", results);

    assert_eq!(response.grouped_bilingual_entries.len(), 2);
    assert_eq!(response.grouped_bilingual_entries[0].dictionary, dict("de-en"));
    assert_eq!(response.grouped_bilingual_entries[0].entries.len(), 1);
    assert_eq!(response.grouped_bilingual_entries[1].dictionary, dict("de-fr"));
    assert_eq!(response.grouped_bilingual_entries[1].entries.len(), 2);
    assert_eq!(response.bilingual_entries.len(), 3);
}

#[test]
fn test_failed_steps_only_leave_diagnostics() {
    let steps = steps(&["broken", "slow", "working"], "de>en");
    let results = vec![
        QueryStepResult::engine_error(steps[0].clone(), "backend returned 500", Duration::from_millis(3)),
        QueryStepResult::timeout(steps[1].clone(), "no answer within 50 ms", Duration::from_millis(50)),
        success(
            &steps[2],
            BilingualQueryResult {
                bilingual_entries: vec![entry(("de", "Haus"), ("en", "house"))],
                ..Default::default()
            },
        ),
    ];

    let response = ResultAggregator.aggregate("Haus", results);

    assert_eq!(response.bilingual_entries.len(), 1);
    assert_eq!(response.diagnostics.len(), 3);
    assert_eq!(response.failed_steps().count(), 2);
    assert_eq!(response.diagnostics[0].status, StepStatus::EngineError);
    assert_eq!(response.diagnostics[0].error.as_deref(), Some("backend returned 500"));
    assert_eq!(response.diagnostics[1].status, StepStatus::Timeout);
    assert_eq!(response.diagnostics[1].target, "de>en");
    assert_eq!(response.diagnostics[2].status, StepStatus::Success);
    assert_eq!(response.diagnostics[2].error, None);
}

#[test]
fn test_recommendations_are_deduplicated() {
    let steps = steps(&["first", "second"], "de>en");
    let recommend = |forms: &[&str]| BilingualQueryResult {
        similar_recommendations: forms.iter().map(|form| obj("de", form)).collect(),
        ..Default::default()
    };

    let results = vec![
        success(&steps[0], recommend(&["Hausen", "Haut"])),
        success(&steps[1], recommend(&["Haut", "Hauch"])),
    ];
    let response = ResultAggregator.aggregate("Haus", results);

    let forms: Vec<&str> = response
        .similar_recommendations
        .iter()
        .map(DictionaryObject::general_form)
        .collect();
    assert_eq!(forms, vec!["Hausen", "Haut", "Hauch"]);
}

#[test]
fn test_monolingual_and_external_content_are_concatenated() {
    let steps = steps(&["first", "second"], "de>en");
    let link = |path: &str| {
        ExternalContent::new("Wiki", None, &format!("https://example.org/{path}")).unwrap()
    };

    let results = vec![
        QueryStepResult::success(
            steps[0].clone(),
            EngineQueryResult::Monolingual(MonolingualQueryResult {
                monolingual_entries: vec![MonolingualEntry::new(obj("de", "Haus"), EntryType::Noun)],
                external_contents: vec![link("a")],
                ..Default::default()
            }),
            Duration::ZERO,
        ),
        success(
            &steps[1],
            BilingualQueryResult {
                external_contents: vec![link("b")],
                ..Default::default()
            },
        ),
    ];
    let response = ResultAggregator.aggregate("Haus", results);

    assert_eq!(response.monolingual_entries.len(), 1);
    let links: Vec<&str> = response
        .external_contents
        .iter()
        .map(|content| content.link().as_str())
        .collect();
    assert_eq!(links, vec!["https://example.org/a", "https://example.org/b"]);
}

#[test]
fn test_no_results_yield_empty_response() {
    let response = ResultAggregator.aggregate("Haus", Vec::new());

    assert_eq!(response.query, "Haus");
    assert!(response.is_empty());
    assert!(response.diagnostics.is_empty());
    assert!(response.grouped_bilingual_entries.is_empty());
}

#[test]
fn test_aggregation_is_deterministic() {
    let steps = steps(&["first", "second"], "en>fr");
    let results = || {
        vec![
            success(
                &steps[0],
                with_synonyms(vec![synonyms("TEST_WORD_1", "BASE_MEANING_1", "SYNONYM_1")]),
            ),
            success(
                &steps[1],
                with_synonyms(vec![
                    synonyms("TEST_WORD_1", "BASE_MEANING_2", "SYNONYM_2"),
                    synonyms("TEST_WORD_2", "BASE_MEANING_2", "SYNONYM_2"),
                ]),
            ),
        ]
    };

    let first = ResultAggregator.aggregate("test", results());
    let second = ResultAggregator.aggregate("test", results());

    assert_eq!(
        serde_json::to_string(&first.content()).unwrap(),
        serde_json::to_string(&second.content()).unwrap()
    );
}
