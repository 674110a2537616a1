use ingest_pipeline::{IngestPipeline, Policy};
use std::sync::Arc;

fn inputs() -> Vec<String> {
    let log = (0..200)
        .map(|i| format!("2024-01-15 10:{:02}:{:02} INFO worker heartbeat ok", i / 60, i % 60))
        .collect::<Vec<_>>()
        .join("\n");
    let steps = (1..=40).map(|i| format!("Step {}: tighten bolt {}.", i, i)).collect::<Vec<_>>().join("\n\n");
    let prose = "A calm paragraph about nothing in particular.\n\n".repeat(80);
    vec![log, steps, prose]
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_pipeline_across_tasks() {
    let pipeline = Arc::new(IngestPipeline::with_defaults().unwrap());
    let inputs = inputs();
    let expected: Vec<_> = inputs.iter().map(|t| pipeline.ingest(t, None)).collect();

    let mut handles = Vec::new();
    for round in 0..24 {
        let pipeline = Arc::clone(&pipeline);
        let idx = round % inputs.len();
        let text = inputs[idx].clone();
        handles.push(tokio::task::spawn_blocking(move || (idx, pipeline.ingest(&text, None))));
    }

    for handle in handles {
        let (idx, out) = handle.await.unwrap();
        assert_eq!(out, expected[idx]);
    }
    assert_eq!(expected[0].policy, Policy::LogStream);
    assert_eq!(expected[1].policy, Policy::ProcedureDoc);
    assert_eq!(expected[2].policy, Policy::ProseText);
}

#[test]
fn test_shared_pipeline_across_threads() {
    let pipeline = IngestPipeline::with_defaults().unwrap();
    let inputs = inputs();
    let expected: Vec<_> = inputs.iter().map(|t| pipeline.ingest(t, None)).collect();

    std::thread::scope(|scope| {
        for (text, want) in inputs.iter().zip(&expected) {
            let pipeline = &pipeline;
            scope.spawn(move || assert_eq!(&pipeline.ingest(text, None), want));
        }
    });
}
