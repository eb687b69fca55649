// ABOUTME: Integration tests for growth-chart reference curve rendering
// ABOUTME: Checks curve shape and consistency with the evaluation transform
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AnthroHPK

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use anthro_engine::curves::reference_curves;
use anthro_engine::reference::ReferenceStore;
use anthro_engine::{
    AgeAtMeasurement, Engine, Indicator, MeasurementInput, Sex, Standard, TableKind,
    STANDARD_ZLINES,
};

fn store() -> Arc<ReferenceStore> {
    common::init_test_logging();
    Arc::new(ReferenceStore::embedded().unwrap())
}

#[test]
fn test_curves_render_for_every_table_and_standard() {
    let store = store();
    for standard in [Standard::Who, Standard::Permenkes] {
        for table in TableKind::ALL {
            for sex in [Sex::Male, Sex::Female] {
                let curves =
                    reference_curves(&store, standard, table, sex, &STANDARD_ZLINES).unwrap();
                assert_eq!(curves.len(), 7, "{standard}/{table}");
                assert!(curves.iter().all(|c| !c.points.is_empty()));
            }
        }
    }
}

#[test]
fn test_a_child_on_a_curve_scores_that_curves_zline() {
    // Reading a weight off the -2 curve and evaluating it must give z = -2.
    let store = store();
    let curves = reference_curves(
        &store,
        Standard::Who,
        TableKind::WeightForAge,
        Sex::Male,
        &[-2.0],
    )
    .unwrap();
    let point = curves[0]
        .points
        .iter()
        .find(|p| p.key == 24.0)
        .expect("24 months is tabulated");

    let engine = Engine::new(store);
    let input = MeasurementInput::new(Sex::Male, AgeAtMeasurement::from_months(24.0).unwrap())
        .with_weight(point.value);
    let result = engine.evaluate(&input, Standard::Who).unwrap();
    let z = result.zscore(Indicator::WeightForAge).unwrap();
    assert!((z - -2.0).abs() < 1e-9, "z = {z}");
}

#[test]
fn test_permenkes_curves_reproduce_the_published_columns() {
    // For the SD-band model the ±1 curves are exactly median ± half-width.
    let store = store();
    let curves = reference_curves(
        &store,
        Standard::Permenkes,
        TableKind::WeightForAge,
        Sex::Female,
        &[-1.0, 0.0, 1.0],
    )
    .unwrap();
    let rows = store
        .points(Standard::Permenkes, TableKind::WeightForAge, Sex::Female)
        .unwrap();
    for (i, row) in rows.iter().enumerate() {
        let median = row.params.median();
        assert!((curves[1].points[i].value - median).abs() < 1e-9);
        assert!(curves[0].points[i].value < median);
        assert!(curves[2].points[i].value > median);
    }
}
