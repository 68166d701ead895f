use criterion::{criterion_group, criterion_main, Criterion};
use std::path::Path;

use emlmetrics::analysis::classify::classify_mime;
use emlmetrics::EmailAnalyzer;

fn bench_analyze_single(c: &mut Criterion) {
    let fixture_path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("two_attachments.eml");
    let analyzer = EmailAnalyzer::default();

    c.bench_function("analyze_two_attachments", |b| {
        b.iter(|| analyzer.analyze(&fixture_path).unwrap())
    });
}

fn bench_analyze_directory(c: &mut Criterion) {
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures");
    let analyzer = EmailAnalyzer::default();

    c.bench_function("analyze_fixture_directory", |b| {
        b.iter(|| analyzer.analyze(&fixtures).unwrap())
    });
}

fn bench_classify_mime(c: &mut Criterion) {
    let mimes = [
        "text/plain",
        "application/pdf",
        "image/png",
        "application/zip",
        "application/x-foobar",
    ];
    c.bench_function("classify_mime", |b| {
        b.iter(|| mimes.iter().map(|m| classify_mime(m)).count())
    });
}

criterion_group!(
    benches,
    bench_analyze_single,
    bench_analyze_directory,
    bench_classify_mime
);
criterion_main!(benches);
