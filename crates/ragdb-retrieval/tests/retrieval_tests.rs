use std::collections::HashMap;

use ragdb_core::types::{EvidenceRecord, Intent, Modality, Retrieved};
use ragdb_embed::{get_default_producer, TokenHashingEmbedder};
use ragdb_retrieval::report::{build_context, render_report};
use ragdb_retrieval::{
    classify_intent, confidence_score, detect_conflicts, document_coverage, uncertainty_message,
    Retriever,
};

fn record(content: &str, source: &str, modality: Modality) -> EvidenceRecord {
    EvidenceRecord::new(content, source, modality)
}

fn results(n: usize) -> Vec<Retrieved> {
    (0..n)
        .map(|i| Retrieved {
            record: record(&format!("chunk {}", i), "doc.txt", Modality::Text),
            distance: i as f32 * 0.1,
        })
        .collect()
}

// ---- intent ----

#[test]
fn intent_defaults_to_qa() {
    assert_eq!(classify_intent("how do I purify water?"), Intent::Qa);
    assert_eq!(classify_intent(""), Intent::Qa);
}

#[test]
fn intent_detects_summarization_keywords() {
    assert_eq!(classify_intent("Summarize the uploaded manual"), Intent::Summarization);
    assert_eq!(classify_intent("give me a summary"), Intent::Summarization);
    assert_eq!(classify_intent("quick OVERVIEW please"), Intent::Summarization);
}

#[test]
fn intent_detects_comparison_keywords() {
    assert_eq!(classify_intent("compare diesel vs petrol generators"), Intent::Comparison);
    assert_eq!(classify_intent("what's the difference between them"), Intent::Comparison);
}

// ---- confidence ----

#[test]
fn confidence_empty_results_is_zero_for_any_intent() {
    for intent in [Intent::Qa, Intent::Summarization, Intent::Comparison] {
        assert_eq!(confidence_score(&[], intent), 0.0);
    }
}

#[test]
fn confidence_summarization_is_fixed_for_any_nonempty_count() {
    for n in 1..=8 {
        assert_eq!(confidence_score(&results(n), Intent::Summarization), 0.85);
    }
}

#[test]
fn confidence_qa_step_values_at_boundaries() {
    let expected = [(1usize, 0.35f32), (2, 0.55), (3, 0.75), (4, 0.75), (5, 0.9), (6, 0.9)];
    for (n, want) in expected {
        assert_eq!(confidence_score(&results(n), Intent::Qa), want, "n={}", n);
    }
}

#[test]
fn confidence_qa_is_monotonic_in_result_count() {
    let mut prev = 0.0f32;
    for n in 0..=8 {
        let c = confidence_score(&results(n), Intent::Qa);
        assert!(c >= prev, "confidence must not decrease: n={} {} < {}", n, c, prev);
        prev = c;
    }
}

#[test]
fn confidence_comparison_follows_count_path() {
    assert_eq!(confidence_score(&results(5), Intent::Comparison), 0.9);
    assert_eq!(confidence_score(&results(1), Intent::Comparison), 0.35);
}

#[test]
fn uncertainty_bands_match_scorer_outputs() {
    assert_eq!(uncertainty_message(0.9), None);
    assert_eq!(uncertainty_message(0.85), None);
    assert_eq!(uncertainty_message(0.8), None);
    assert!(uncertainty_message(0.75).unwrap().contains("limited evidence"));
    assert!(uncertainty_message(0.55).unwrap().contains("limited evidence"));
    assert!(uncertainty_message(0.35).unwrap().contains("High uncertainty"));
    assert!(uncertainty_message(0.0).unwrap().contains("High uncertainty"));
}

// ---- coverage ----

#[test]
fn coverage_two_thirds_one_third() {
    let evidence = vec![
        record("x", "a.pdf", Modality::Text),
        record("y", "a.pdf", Modality::Text),
        record("z", "b.pdf", Modality::Text),
    ];
    let coverage = document_coverage(&evidence);
    assert_eq!(coverage.get("a.pdf"), Some(&66.67));
    assert_eq!(coverage.get("b.pdf"), Some(&33.33));
}

#[test]
fn coverage_single_source_is_100() {
    let evidence = vec![record("x", "only.txt", Modality::Text)];
    let coverage = document_coverage(&evidence);
    assert_eq!(coverage.get("only.txt"), Some(&100.0));
}

#[test]
fn coverage_empty_input_is_empty_map() {
    assert_eq!(document_coverage(&[]), HashMap::new());
}

// ---- conflicts ----

#[test]
fn conflict_flags_not_against_is() {
    let evidence = vec![
        record("the sky is not blue", "a.txt", Modality::Text),
        record("the sky is blue", "b.txt", Modality::Text),
    ];
    let (has_conflict, pairs) = detect_conflicts(&evidence);
    assert!(has_conflict);
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].0.source, "a.txt");
    assert_eq!(pairs[0].1.source, "b.txt");
}

#[test]
fn conflict_flags_false_against_true() {
    let evidence = vec![
        record("the claim was false", "a.txt", Modality::Text),
        record("the claim was true", "b.txt", Modality::Text),
    ];
    let (has_conflict, pairs) = detect_conflicts(&evidence);
    assert!(has_conflict);
    assert_eq!(pairs.len(), 1);
}

#[test]
fn conflict_heuristic_is_order_sensitive() {
    // "is" in the first chunk and "not" in the second does not match the
    // rule; the heuristic checks "not" on the earlier element only.
    let evidence = vec![
        record("the valve opens fully", "a.txt", Modality::Text),
        record("the valve does not open", "b.txt", Modality::Text),
    ];
    let (has_conflict, pairs) = detect_conflicts(&evidence);
    assert!(!has_conflict);
    assert!(pairs.is_empty());
}

#[test]
fn conflict_fewer_than_two_records_never_conflicts() {
    assert_eq!(detect_conflicts(&[]).0, false);
    let one = vec![record("this is not fine", "a.txt", Modality::Text)];
    let (has_conflict, pairs) = detect_conflicts(&one);
    assert!(!has_conflict);
    assert!(pairs.is_empty());
}

#[test]
fn conflict_neutral_texts_do_not_conflict() {
    let evidence = vec![
        record("wheat grows in spring", "a.txt", Modality::Text),
        record("barley prefers cooler weather", "b.txt", Modality::Text),
    ];
    assert!(!detect_conflicts(&evidence).0);
}

// ---- end-to-end retriever ----

#[test]
fn scenario_text_and_image_coverage_60_40() {
    let mut retriever = Retriever::new(get_default_producer(32), 5);

    // 3 text chunks from one document, 2 image captions from another. The
    // producer embeds content for us via ingest_records.
    let mut records = Vec::new();
    for i in 0..3 {
        records.push(record(&format!("manual section {}", i), "manual.pdf", Modality::Text));
    }
    for i in 0..2 {
        records.push(record(&format!("diagram caption {}", i), "figures.png", Modality::Image));
    }
    let stored = retriever.ingest_records(records).expect("ingest");
    assert_eq!(stored, 5);

    let session = retriever.ask("how do I assemble the pump?").expect("ask");
    assert_eq!(session.results.len(), 5, "k=5 over a 5-entry corpus returns all");
    assert_eq!(session.coverage.get("manual.pdf"), Some(&60.0));
    assert_eq!(session.coverage.get("figures.png"), Some(&40.0));
    assert_eq!(session.confidence, 0.9);
    assert_eq!(session.uncertainty, None);
}

#[test]
fn ask_on_empty_corpus_yields_zero_confidence() {
    let retriever = Retriever::new(get_default_producer(32), 5);
    let session = retriever.ask("anything").expect("ask");
    assert!(session.results.is_empty());
    assert_eq!(session.confidence, 0.0);
    assert!(session.uncertainty.unwrap().contains("High uncertainty"));
    assert!(session.coverage.is_empty());
    assert!(!session.has_conflict);
}

#[test]
fn rebuild_replaces_corpus_wholesale() {
    let mut retriever = Retriever::new(get_default_producer(32), 5);
    retriever
        .ingest_records(vec![record("old corpus", "old.txt", Modality::Text)])
        .expect("first ingest");
    assert_eq!(retriever.corpus_len(), 1);

    retriever
        .ingest_records(vec![
            record("new corpus a", "new.txt", Modality::Text),
            record("new corpus b", "new.txt", Modality::Text),
        ])
        .expect("re-ingest");
    assert_eq!(retriever.corpus_len(), 2, "re-ingestion discards the prior index");

    let session = retriever.ask("corpus").expect("ask");
    assert!(session.evidence().iter().all(|e| e.source == "new.txt"));
}

#[test]
fn retriever_works_with_token_level_producer() {
    // Rank-2 producer output goes through the mean-pooling path.
    let mut retriever = Retriever::new(Box::new(TokenHashingEmbedder::new(32)), 3);
    retriever
        .ingest_records(vec![
            record("solar charge controller wiring", "power.txt", Modality::Text),
            record("rainwater catchment filters", "water.txt", Modality::Text),
        ])
        .expect("ingest");

    let session = retriever.ask("solar charge controller wiring").expect("ask");
    assert_eq!(session.results.len(), 2);
    assert_eq!(session.results[0].record.source, "power.txt");
    assert!(session.results[0].distance <= session.results[1].distance);
}

#[test]
fn summarization_query_gets_fixed_confidence_through_facade() {
    let mut retriever = Retriever::new(get_default_producer(32), 5);
    retriever
        .ingest_records(vec![record("chapter one", "book.txt", Modality::Text)])
        .expect("ingest");
    let session = retriever.ask("summarize the book").expect("ask");
    assert_eq!(session.intent, Intent::Summarization);
    assert_eq!(session.confidence, 0.85);
}

// ---- report rendering ----

#[test]
fn build_context_numbers_evidence_blocks() {
    let a = record("first chunk", "a.txt", Modality::Text);
    let b = record("second chunk", "b.txt", Modality::Audio);
    let context = build_context(&[&a, &b]);
    assert!(context.starts_with("[1] first chunk"));
    assert!(context.contains("[2] second chunk"));
}

#[test]
fn render_report_includes_answer_confidence_and_sources() {
    let mut retriever = Retriever::new(get_default_producer(32), 5);
    retriever
        .ingest_records(vec![
            record("the pump needs priming", "manual.pdf", Modality::Text),
            record("prime before first use", "manual.pdf", Modality::Text),
        ])
        .expect("ingest");
    let session = retriever.ask("how to prime the pump").expect("ask");

    let report = render_report(&session, Some("Prime the pump before first use."));
    assert!(report.contains("=== MULTIMODAL RAG REPORT ==="));
    assert!(report.contains("how to prime the pump"));
    assert!(report.contains("Prime the pump before first use."));
    assert!(report.contains("Confidence: 55%"));
    assert!(report.contains("manual.pdf | modality=text"));
}

#[test]
fn render_report_truncates_long_content() {
    let long = "x".repeat(1000);
    let mut retriever = Retriever::new(get_default_producer(32), 5);
    retriever
        .ingest_records(vec![record(&long, "big.txt", Modality::Text)])
        .expect("ingest");
    let session = retriever.ask("x").expect("ask");
    let report = render_report(&session, None);
    assert!(report.contains(&"x".repeat(300)));
    assert!(!report.contains(&"x".repeat(301)));
}

#[test]
fn session_serializes_to_json() {
    let mut retriever = Retriever::new(get_default_producer(32), 5);
    retriever
        .ingest_records(vec![record("serializable evidence", "a.txt", Modality::Text)])
        .expect("ingest");
    let session = retriever.ask("evidence").expect("ask");
    let json = serde_json::to_string(&session).expect("serialize");
    assert!(json.contains("\"intent\":\"qa\""));
    assert!(json.contains("serializable evidence"));
}
