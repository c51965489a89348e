use criterion::{criterion_group, criterion_main, Criterion};
use graphql_normalizer::normalization::{config::NormalizerConfig, normalize_with_config};
use graphql_normalizer::parser::parse_query;
use graphql_normalizer::printer::{canonical_print, canonical_print_str};
use graphql_normalizer::schema::SchemaIndex;
use std::hint::black_box;

fn load_fixture(name: &str) -> String {
    let path = format!("./fixture/{}", name);
    std::fs::read_to_string(&path).unwrap_or_else(|_| panic!("failed to read file {}", path))
}

fn bench_normalize(c: &mut Criterion) {
    let schema = SchemaIndex::from_sdl(&load_fixture("social.graphql")).expect("schema to parse");
    let source = load_fixture("operations/kitchen-sink.graphql");
    let document = parse_query(&source).expect("failed to parse query");
    let config = NormalizerConfig::default();

    c.bench_function("normalize", |b| {
        b.iter(|| {
            normalize_with_config(black_box(&document), black_box(&schema), &config)
                .expect("failed to normalize")
        })
    });
}

fn bench_printers(c: &mut Criterion) {
    let mut group = c.benchmark_group("printers");
    let source = load_fixture("operations/kitchen-sink.graphql");
    let document = parse_query(&source).expect("failed to parse query");

    group.bench_function("canonical_print", |b| {
        b.iter(|| canonical_print(black_box(&document)))
    });

    group.bench_function("canonical_print_str", |b| {
        b.iter(|| canonical_print_str(black_box(source.as_str())).expect("failed to print"))
    });

    group.bench_function("parse_query", |b| {
        b.iter(|| parse_query(black_box(source.as_str())).expect("failed to parse query"))
    });

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_printers);
criterion_main!(benches);
