use ingest_compress::Compressor;
use ingest_core::{Compress, DetectSignature, IngestConfig, Normalize, Segment, SelectPolicy};
use ingest_detect::{Normalizer, SignatureDetector};
use ingest_pipeline::{IngestPipeline, Policy, StructuralMode};
use ingest_policy::PolicySelector;
use ingest_segment::Segmenter;
use serde_json::json;

const DUP: &str = "2024-01-15 10:00:03 ERROR connection refused by upstream db-1 retrying";

/// 10 lines, 8 timestamped, 3 sharing one 40-character prefix.
fn scenario_a() -> String {
    [
        "2024-01-15 10:00:01 INFO service started on port 8080",
        "2024-01-15 10:00:02 INFO loaded 42 routes",
        DUP,
        "  at pool.rs:118",
        DUP,
        "2024-01-15 10:00:04 WARN slow handshake",
        DUP,
        "  at retry.rs:42",
        "2024-01-15 10:00:05 INFO pool recovered",
        "2024-01-15 10:00:06 INFO ready",
    ]
    .join("\n")
}

const SCENARIO_B: &str = "Step 1: Open valve.\n\nStep 2: Close valve.\n\nStep 3: Inspect seal.";

fn mixed_document() -> String {
    let mut parts = vec!["Overview of the intake line.".to_string()];
    for i in 0..30 {
        parts.push(format!("Paragraph {} describes a section of the plant in some detail, with notes.", i));
    }
    parts.push("| id | value |\n| 1 | 2 |".into());
    parts.join("\n\n")
}

fn per_line_log_pipeline() -> IngestPipeline {
    let mut config = IngestConfig::default();
    config.segmenter.log_window_lines = 1;
    IngestPipeline::new(config).unwrap()
}

// ========== Scenarios ==========

#[test]
fn test_scenario_a_log_stream() {
    let out = IngestPipeline::with_defaults().unwrap().ingest(&scenario_a(), None);
    assert_eq!(out.signature.mode(), StructuralMode::LinearLogLike);
    assert_eq!(out.policy, Policy::LogStream);
    // All ten lines fit one default window.
    assert_eq!(out.chunks.len(), 1);
    assert_eq!(out.chunks[0].metadata["compression_provenance"], json!([0]));
}

#[test]
fn test_scenario_a_duplicates_merged() {
    let out = per_line_log_pipeline().ingest(&scenario_a(), None);
    assert_eq!(out.policy, Policy::LogStream);
    assert_eq!(out.chunks.len(), 8);

    let root = out.chunks.iter().find(|c| c.content == DUP).unwrap();
    assert_eq!(root.metadata["compression_provenance"], json!([2, 4, 6]));
    assert_eq!(out.chunks.iter().filter(|c| c.content == DUP).count(), 1);

    let compress = out.audit("compress").unwrap();
    assert_eq!(compress.action, "pattern_dedup");
    assert_eq!(compress.trace["original_count"], 10);
    assert_eq!(compress.trace["compressed_count"], 8);
    assert_eq!(compress.trace["ratio"], 0.8);
}

#[test]
fn test_blank_led_log_windows_are_not_merged() {
    let text = (0..150)
        .map(|i| match i {
            50 | 100 => String::new(),
            _ => format!("2024-01-15 10:{:02}:{:02} INFO event {}", i / 60, i % 60, i),
        })
        .collect::<Vec<_>>()
        .join("\n");
    let out = IngestPipeline::with_defaults().unwrap().ingest(&text, None);
    assert_eq!(out.policy, Policy::LogStream);
    assert_eq!(out.chunks.len(), 3);
    for (i, c) in out.chunks.iter().enumerate() {
        assert_eq!(c.metadata["compression_provenance"], json!([i]));
        assert!(!c.first_line().trim().is_empty());
    }
    assert!(out.chunks[1].content.starts_with("2024-01-15 10:00:51 INFO event 51"));
    assert!(out.chunks[2].content.starts_with("2024-01-15 10:01:41 INFO event 101"));
    assert_eq!(out.audit("compress").unwrap().trace["ratio"], 1.0);
}

#[test]
fn test_scenario_b_procedure() {
    let out = IngestPipeline::with_defaults().unwrap().ingest(SCENARIO_B, None);
    assert!(out.signature.structure.list_markers as f64 / out.signature.structure.line_count as f64 >= 0.3);
    assert_eq!(out.signature.mode(), StructuralMode::ListProcedureLike);
    assert_eq!(out.policy, Policy::ProcedureDoc);
    assert!(!out.chunks.is_empty());
    assert!(out.chunks.iter().all(|c| c.metadata["type"] == "procedural_step"));
    assert_eq!(out.audit("compress").unwrap().trace["reason"], "policy_not_eligible");
}

#[test]
fn test_scenario_c_empty() {
    let out = IngestPipeline::with_defaults().unwrap().ingest("", None);
    assert_eq!(out.signature.mode(), StructuralMode::Empty);
    assert!(out.chunks.is_empty());
    assert_eq!(out.audit_trail.len(), 5);
}

// ========== Properties ==========

#[test]
fn test_normalizer_idempotent() {
    let n = Normalizer::new();
    let log = scenario_a();
    for raw in ["a\r\nb", "\r\r\n\0x", log.as_str(), SCENARIO_B] {
        let (once, _) = n.normalize(raw, None);
        let (twice, _) = n.normalize(&once, None);
        assert_eq!(once, twice);
    }
}

#[test]
fn test_deterministic_output() {
    let p = IngestPipeline::with_defaults().unwrap();
    for text in [scenario_a(), SCENARIO_B.to_string(), mixed_document()] {
        let a = serde_json::to_string(&p.ingest(&text, None)).unwrap();
        let b = serde_json::to_string(&p.ingest(&text, None)).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_lossless_before_compression() {
    let config = IngestConfig::default();
    let detector = SignatureDetector::new(config.detector.clone());
    let selector = PolicySelector::new(config.policy.clone());
    let segmenter = Segmenter::new(config.segmenter.clone()).unwrap();

    for raw in [scenario_a(), SCENARIO_B.to_string(), mixed_document(), "  lead\r\n\r\ntrail  ".to_string()] {
        let (text, _) = Normalizer::new().normalize(&raw, None);
        let (sig, _) = detector.detect(&text);
        let (policy, _) = selector.select(&sig);
        let (chunks, _) = segmenter.segment(&text, policy, &sig);

        let mut cursor = 0;
        for c in &chunks {
            assert!(text[cursor..c.offset].trim().is_empty());
            assert_eq!(&text[c.offset..c.offset + c.length], c.content);
            cursor = c.offset + c.length;
        }
        assert!(text[cursor..].trim().is_empty());

        let squeeze = |s: &str| s.chars().filter(|ch| !ch.is_whitespace()).collect::<String>();
        let rebuilt: String = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(squeeze(&rebuilt), squeeze(&text));
    }
}

#[test]
fn test_compress_idempotent_on_deduplicated() {
    let out = per_line_log_pipeline().ingest(&scenario_a(), None);
    let again = Compressor::default().compress(out.chunks.clone(), Policy::LogStream);
    assert_eq!(again.chunks, out.chunks);
    assert_eq!(again.audit.trace["ratio"], 1.0);
}

#[test]
fn test_conflicting_log_is_mixed_safe() {
    let text = (0..60)
        .map(|i| {
            let words: Vec<String> = (0..8).map(|w| format!("evt{}w{}", i, w)).collect();
            format!("2024-01-15 10:00:{:02} {}", i, words.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n");
    let out = IngestPipeline::with_defaults().unwrap().ingest(&text, None);
    assert_eq!(out.signature.mode(), StructuralMode::LinearLogLike);
    assert!(out.signature.stab.conflict);
    assert_eq!(out.policy, Policy::MixedSafe);
    assert_eq!(out.audit("policy").unwrap().trace["rule"], "conflict");
    assert!(out.chunks.iter().all(|c| c.metadata["type"] == "mixed_safe_block"));
}

#[test]
fn test_every_chunk_carries_pipeline_metadata() {
    let out = IngestPipeline::with_defaults().unwrap().ingest(&mixed_document(), None);
    assert!(out.chunks.len() > 1);
    for (i, c) in out.chunks.iter().enumerate() {
        assert_eq!(c.metadata["policy"], out.policy.as_str());
        assert_eq!(c.metadata["ingest_version"], ingest_pipeline::INGEST_VERSION);
        assert_eq!(c.metadata["compression_provenance"], json!([i]));
        assert_eq!(c.metadata["signature"], out.signature.to_metadata());
    }
}

#[test]
fn test_hostile_input_does_not_panic() {
    let p = IngestPipeline::with_defaults().unwrap();
    let inputs = [
        "\0\0\0".to_string(),
        "\r\r\r\r".to_string(),
        "|".repeat(5000),
        "\u{feff}\u{200b}🙂🙂🙂\n\n\u{0301}".to_string(),
        "Step 9999999999999999999999: overflow?".to_string(),
        " \n".repeat(1000),
    ];
    for raw in &inputs {
        let out = p.ingest(raw, None);
        assert_eq!(out.audit_trail.len(), 5);
    }
}
