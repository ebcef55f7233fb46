//! Prediction latency benchmarks
//!
//! Measures vectorize + predict for each model against the demo artifacts
//! shipped in `models/`.
//!
//! Run with: cargo bench -p spamham-classifiers

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use spamham_classifiers::{
    load_from_config, ArtifactsConfig, PredictionHandler, StoreConfig, TextVectorizer,
};
use spamham_core::ModelName;
use std::path::PathBuf;
use tokio::runtime::Runtime;

fn demo_config() -> ArtifactsConfig {
    ArtifactsConfig {
        store: StoreConfig::Filesystem {
            root: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../models"),
            artifact_file: "model.json".to_string(),
        },
        ..ArtifactsConfig::default()
    }
}

fn demo_handler() -> PredictionHandler {
    let rt = Runtime::new().unwrap();
    rt.block_on(load_from_config(&demo_config()))
        .expect("Failed to load demo artifacts")
        .into_handler()
}

const MESSAGES: &[(&str, &str)] = &[
    ("short_ham", "Ok see you at lunch"),
    ("short_spam", "WIN a FREE prize now"),
    (
        "medium_spam",
        "URGENT! You have won a cash prize. Claim your free money now, txt WIN to 80082 or reply STOP",
    ),
    (
        "long_ham",
        "Hey, are we still on for lunch tomorrow? I can meet you at the usual place around noon. \
         Call me later if plans change, otherwise see you there. Thanks again for the help with \
         the move last weekend, it would have taken forever without you.",
    ),
];

fn benchmark_models(c: &mut Criterion) {
    let handler = demo_handler();

    for model in ModelName::ALL {
        let mut group = c.benchmark_group(format!("predict/{}", model.display_name()));
        group.sample_size(200);

        for (name, text) in MESSAGES {
            group.bench_with_input(BenchmarkId::from_parameter(name), text, |b, text| {
                b.iter(|| handler.predict_with(black_box(text), model).unwrap())
            });
        }

        group.finish();
    }
}

fn benchmark_vectorizer(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let loaded = rt.block_on(load_from_config(&demo_config())).unwrap();

    let mut group = c.benchmark_group("vectorize");
    for (name, text) in MESSAGES {
        group.bench_with_input(BenchmarkId::from_parameter(name), text, |b, text| {
            b.iter(|| loaded.vectorizer.transform(black_box(text)))
        });
    }
    group.finish();
}

/// Throughput when many request tasks share one handler
fn benchmark_concurrent(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let handler = demo_handler();

    c.bench_function("concurrent_100_predictions", |b| {
        b.iter(|| {
            rt.block_on(async {
                let tasks: Vec<_> = (0..100)
                    .map(|i| {
                        let handler = handler.clone();
                        let model = ModelName::ALL[i % ModelName::ALL.len()];
                        tokio::spawn(async move {
                            handler.predict_with(MESSAGES[i % MESSAGES.len()].1, model)
                        })
                    })
                    .collect();
                for task in tasks {
                    black_box(task.await.unwrap().unwrap());
                }
            })
        });
    });
}

criterion_group!(
    benches,
    benchmark_models,
    benchmark_vectorizer,
    benchmark_concurrent
);
criterion_main!(benches);
