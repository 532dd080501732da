//! Performance benchmarks for default generation.
//!
//! - Whole runs over growing numbers of targets, sequential and parallel
//! - Reference resolution against a large scope
//! - Companion discovery and candidate selection

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use defaultgen::core::{ReferenceKind, normalize};
use defaultgen::engine::{discovery, resolve};
use defaultgen::prelude::*;

const MEMBERS: usize = 500;

/// One scope with `MEMBERS` constants and factories.
fn registry() -> SymbolRegistry {
    let mut registry = SymbolRegistry::new();
    let members = (0..MEMBERS).flat_map(|i| {
        [
            MemberInfo::constant(format!("DEFAULT_VALUE_{i}"), PrimitiveKind::Int32.into()),
            MemberInfo::static_method(format!("defaultLabel{i}"), 0, SemanticType::String),
        ]
    });
    registry
        .register(ScopeInfo::new("bench.Config", ScopeKind::Class), members)
        .unwrap_or_else(|err| panic!("benchmark registry: {err}"));
    registry
}

fn callable(i: usize, mode: GenerationMode) -> CallableDecl {
    CallableDecl::method(
        "bench.Config",
        format!("op{i}"),
        SemanticType::Void,
        vec![
            ParameterDecl::new("id", PrimitiveKind::Int64),
            ParameterDecl::new("value", PrimitiveKind::Int32)
                .with_default(DefaultSource::field(format!("DEFAULT_VALUE_{}", i % MEMBERS))),
            ParameterDecl::new("label", SemanticType::String)
                .with_default(DefaultSource::factory(format!("defaultLabel{}", i % MEMBERS))),
            ParameterDecl::new("ratio", PrimitiveKind::Float64)
                .with_default(DefaultSource::literal("0.5")),
        ],
    )
    .with_mode(mode)
}

fn request(targets: usize) -> GenerationRequest {
    (0..targets).fold(GenerationRequest::new(), |request, i| {
        let mode = if i % 2 == 0 { GenerationMode::Overloaded } else { GenerationMode::Named };
        request.with_callable(callable(i, mode))
    })
}

/// Whole generation runs.
fn run_benchmarks(c: &mut Criterion) {
    let registry = registry();
    let mut group = c.benchmark_group("generator/run");

    for targets in [10, 100, 1000] {
        let request = request(targets);
        group.throughput(Throughput::Elements(targets as u64));
        group.bench_with_input(BenchmarkId::new("sequential", targets), &request, |b, request| {
            let generator = Generator::new(&registry, GeneratorConfig::default());
            b.iter(|| black_box(generator.run(black_box(request)).outcomes.len()));
        });
        group.bench_with_input(BenchmarkId::new("parallel", targets), &request, |b, request| {
            let config = GeneratorConfig::default().with_parallel(true);
            let generator = Generator::new(&registry, config);
            b.iter(|| black_box(generator.run(black_box(request)).outcomes.len()));
        });
    }
    group.finish();
}

/// Reference resolution, hits and misses.
fn resolve_benchmarks(c: &mut Criterion) {
    let registry = registry();
    let owner = QualifiedName::parse("bench.Config");
    let int = SemanticType::Primitive(PrimitiveKind::Int32);
    let mut group = c.benchmark_group("resolve");

    group.bench_function("field_hit", |b| {
        b.iter(|| {
            resolve::resolve_reference(
                black_box("DEFAULT_VALUE_250"),
                ReferenceKind::Field,
                &int,
                &owner,
                &registry,
            )
        });
    });

    // misses compute a suggestion over every candidate
    group.bench_function("field_miss_with_suggestion", |b| {
        b.iter(|| {
            resolve::resolve_reference(
                black_box("DEFUALT_VALUE_250"),
                ReferenceKind::Field,
                &int,
                &owner,
                &registry,
            )
        });
    });
    group.finish();
}

/// Companion discovery and selection.
fn discovery_benchmarks(c: &mut Criterion) {
    let registry = registry();
    let companion = QualifiedName::parse("bench.Config");
    let candidates: Vec<CallableSpec> = (1..=8)
        .map(|n| {
            CallableSpec::constructor(
                "bench.Target",
                (0..n)
                    .map(|i| {
                        ParameterSpec::new(format!("value_{}", i * 7), PrimitiveKind::Int32, None)
                    })
                    .collect(),
            )
        })
        .collect();
    let mut group = c.benchmark_group("discovery");

    group.bench_function("discover", |b| {
        b.iter(|| black_box(discovery::discover(black_box(&companion), &registry).len()));
    });

    let discovered = discovery::discover(&companion, &registry);
    group.bench_function("select_best", |b| {
        b.iter(|| black_box(discovery::select_best(black_box(&candidates), &discovered).is_some()));
    });

    group.bench_function("normalize", |b| {
        b.iter(|| normalize(black_box("DEFAULT_CONNECTION_POOL_SIZE")));
    });
    group.finish();
}

criterion_group!(benches, run_benchmarks, resolve_benchmarks, discovery_benchmarks);
criterion_main!(benches);
