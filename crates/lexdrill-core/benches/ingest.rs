use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};

use lexdrill_core::index::BankIndex;
use lexdrill_core::normalize::normalize_record;

fn canonical(no: u32) -> Value {
    json!({
        "question_id": format!("108-1301-{no:03}"),
        "year": 108,
        "subject_code": "1301",
        "question_no": no,
        "stem": "Which statement is correct?",
        "choices": [
            {"choice_id": "c1", "text": "first"},
            {"choice_id": "c2", "text": "second"},
            {"choice_id": "c3", "text": "third"},
            {"choice_id": "c4", "text": "fourth"}
        ],
        "correct_choice_ids": ["c3"],
        "explanation": "Third is right."
    })
}

fn legacy(no: u32) -> Value {
    json!({
        "id": format!("108-1301-{no:03}"),
        "year": "108",
        "subject_code": " 1301 ",
        "question_no": format!("{no}"),
        "content": "Which statement is correct?",
        "presented_choices": [
            {"id": "c1", "content": "first"},
            {"id": "c2", "content": "second"},
            {"id": "c3", "content": "third"},
            {"id": "c4", "content": "fourth"}
        ],
        "correct_choice_ids": ["c3"]
    })
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let canonical = canonical(1);
    let legacy = legacy(1);

    group.bench_function("canonical", |b| {
        b.iter(|| normalize_record(black_box(&canonical)))
    });

    group.bench_function("legacy_aliases", |b| {
        b.iter(|| normalize_record(black_box(&legacy)))
    });

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_index");

    for size in [100u32, 1_000, 5_000] {
        let records: Vec<Value> = (1..=size).map(canonical).collect();
        group.bench_function(format!("records={size}"), |b| {
            b.iter(|| BankIndex::build(black_box(&records)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_build);
criterion_main!(benches);
