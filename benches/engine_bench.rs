// ABOUTME: Criterion benchmarks for the z-score evaluation engine
// ABOUTME: Measures single-evaluation latency, batch throughput, and curve rendering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AnthroHPK

//! Criterion benchmarks for the evaluation engine.
//!
//! Covers the startup cost of loading the embedded dataset, single composite
//! evaluations under both standards, batch throughput over a screening-sized
//! cohort, and growth-chart curve rendering.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rayon::prelude::*;

use anthro_engine::curves::reference_curves;
use anthro_engine::reference::ReferenceStore;
use anthro_engine::{
    AgeAtMeasurement, Engine, MeasurementInput, Sex, Standard, TableKind, STANDARD_ZLINES,
};

fn full_input(months: f64) -> MeasurementInput {
    MeasurementInput::new(Sex::Male, AgeAtMeasurement::from_months(months).unwrap())
        .with_weight(4.0 + months * 0.2)
        .with_length(52.0 + months * 0.9)
        .with_head_circumference(36.0 + months * 0.2)
}

fn bench_dataset_load(c: &mut Criterion) {
    c.bench_function("reference_store_embedded_load", |b| {
        b.iter(|| black_box(ReferenceStore::embedded().unwrap()));
    });
}

fn bench_single_evaluation(c: &mut Criterion) {
    let engine = Engine::new(Arc::new(ReferenceStore::embedded().unwrap()));
    let input = full_input(17.3);

    let mut group = c.benchmark_group("evaluate_single");
    for standard in [Standard::Who, Standard::Permenkes] {
        group.bench_with_input(
            BenchmarkId::from_parameter(standard),
            &standard,
            |b, &standard| {
                b.iter(|| black_box(engine.evaluate(black_box(&input), standard).unwrap()));
            },
        );
    }
    group.finish();
}

fn bench_batch_throughput(c: &mut Criterion) {
    let engine = Engine::new(Arc::new(ReferenceStore::embedded().unwrap()));
    let cohort: Vec<MeasurementInput> = (0..1_000)
        .map(|i| full_input(f64::from(i % 59) + 0.4))
        .collect();

    let mut group = c.benchmark_group("evaluate_batch_1000");
    group.throughput(Throughput::Elements(cohort.len() as u64));
    group.bench_function("sequential", |b| {
        b.iter(|| {
            for input in &cohort {
                black_box(engine.evaluate(input, Standard::Who).unwrap());
            }
        });
    });
    group.bench_function("rayon", |b| {
        b.iter(|| {
            cohort.par_iter().for_each(|input| {
                black_box(engine.evaluate(input, Standard::Who).unwrap());
            });
        });
    });
    group.finish();
}

fn bench_curve_rendering(c: &mut Criterion) {
    let store = Arc::new(ReferenceStore::embedded().unwrap());
    c.bench_function("reference_curves_weight_for_age", |b| {
        b.iter(|| {
            black_box(
                reference_curves(
                    &store,
                    Standard::Who,
                    TableKind::WeightForAge,
                    Sex::Female,
                    &STANDARD_ZLINES,
                )
                .unwrap(),
            )
        });
    });
}

criterion_group!(
    benches,
    bench_dataset_load,
    bench_single_evaluation,
    bench_batch_throughput,
    bench_curve_rendering
);
criterion_main!(benches);
