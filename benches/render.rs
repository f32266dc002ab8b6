use criterion::{black_box, criterion_group, criterion_main, Criterion};
use peeper_exporter::{render, Labels, MetricSample};

fn client_samples() -> Vec<MetricSample> {
    let labels = Labels::new()
        .with("host", "client")
        .unwrap()
        .with("app", "my-first-app")
        .unwrap();
    vec![
        MetricSample::counter(
            "student_counter_total",
            "A counter that always goes up.",
            labels.clone(),
            1_700_000_000i64,
        )
        .unwrap(),
        MetricSample::gauge(
            "student_gauge_random",
            "A gauge with a random value.",
            labels,
            42u8,
        )
        .unwrap(),
    ]
}

fn bench_render(c: &mut Criterion) {
    let samples = client_samples();
    c.bench_function("render_client_document", |b| {
        b.iter(|| render(black_box(&samples)))
    });

    let escaped = vec![MetricSample::gauge(
        "escaped_labels",
        "Help with \\ and\nnewline.",
        Labels::new()
            .with("path", "C:\\dir \"quoted\"\nline")
            .unwrap(),
        0.125,
    )
    .unwrap()];
    c.bench_function("render_escaped_labels", |b| {
        b.iter(|| render(black_box(&escaped)))
    });
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
