// ABOUTME: Nutritional-status classifier over standard-specific z-score bands
// ABOUTME: Ordered half-open cut-off bands, total over the real line by construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AnthroHPK

//! Mapping z-scores to nutritional-status categories.
//!
//! Each (standard, indicator) pair owns an ordered list of cut-off bands
//! plus a catch-all for everything above the last cut. Bands are data, not
//! logic: the WHO bands follow the published growth-standards interpretation
//! (±2/±3 SD), the Permenkes bands follow the status-gizi tables of
//! Permenkes 2/2020 (weight-based "normal" ends at +1 SD; six bands for
//! weight-for-height and BMI).
//!
//! Boundary convention, applied uniformly: a z-score equal to a negative
//! cut belongs to the band above it, a z-score equal to a positive cut to
//! the band below it. −3.0 is "underweight", not "severely underweight";
//! +2.0 is still "normal" under WHO weight-for-age. This matches the
//! boundary handling of the published tables and keeps every value in
//! exactly one band.

use anthro_core::models::{Indicator, NutritionalStatus, Standard};

/// One classification band: everything below `upper` (or up to and
/// including it, when `upper_inclusive`) that no earlier band claimed
#[derive(Debug, Clone, Copy)]
struct Band {
    upper: f64,
    upper_inclusive: bool,
    status: NutritionalStatus,
}

const fn below(upper: f64, status: NutritionalStatus) -> Band {
    Band {
        upper,
        upper_inclusive: false,
        status,
    }
}

const fn through(upper: f64, status: NutritionalStatus) -> Band {
    Band {
        upper,
        upper_inclusive: true,
        status,
    }
}

const WHO_WEIGHT_FOR_AGE: &[Band] = &[
    below(-3.0, NutritionalStatus::SeverelyUnderweight),
    below(-2.0, NutritionalStatus::Underweight),
    through(2.0, NutritionalStatus::Normal),
];

const PERMENKES_WEIGHT_FOR_AGE: &[Band] = &[
    below(-3.0, NutritionalStatus::SeverelyUnderweight),
    below(-2.0, NutritionalStatus::Underweight),
    through(1.0, NutritionalStatus::Normal),
];

const HEIGHT_FOR_AGE: &[Band] = &[
    below(-3.0, NutritionalStatus::SeverelyStunted),
    below(-2.0, NutritionalStatus::Stunted),
    through(3.0, NutritionalStatus::Normal),
];

const WHO_WEIGHT_FOR_HEIGHT: &[Band] = &[
    below(-3.0, NutritionalStatus::SevereWasting),
    below(-2.0, NutritionalStatus::Wasting),
    through(2.0, NutritionalStatus::Normal),
    through(3.0, NutritionalStatus::Overweight),
];

const WHO_BMI_FOR_AGE: &[Band] = &[
    below(-3.0, NutritionalStatus::SevereThinness),
    below(-2.0, NutritionalStatus::Thinness),
    through(2.0, NutritionalStatus::Normal),
    through(3.0, NutritionalStatus::Overweight),
];

// Permenkes classifies BB/PB-TB and IMT/U with the same six bands.
const PERMENKES_WEIGHT_FOR_HEIGHT: &[Band] = &[
    below(-3.0, NutritionalStatus::SevereWasting),
    below(-2.0, NutritionalStatus::Wasting),
    through(1.0, NutritionalStatus::Normal),
    through(2.0, NutritionalStatus::RiskOfOverweight),
    through(3.0, NutritionalStatus::Overweight),
];

const HEAD_CIRCUMFERENCE_FOR_AGE: &[Band] = &[
    below(-3.0, NutritionalStatus::SevereMicrocephaly),
    below(-2.0, NutritionalStatus::Microcephaly),
    through(2.0, NutritionalStatus::Normal),
    through(3.0, NutritionalStatus::Macrocephaly),
];

/// Bands for a (standard, indicator) pair, plus the catch-all category
/// covering everything above the last cut
const fn bands(standard: Standard, indicator: Indicator) -> (&'static [Band], NutritionalStatus) {
    match (standard, indicator) {
        (Standard::Who, Indicator::WeightForAge) => {
            (WHO_WEIGHT_FOR_AGE, NutritionalStatus::RiskOfOverweight)
        }
        (Standard::Permenkes, Indicator::WeightForAge) => {
            (PERMENKES_WEIGHT_FOR_AGE, NutritionalStatus::RiskOfOverweight)
        }
        (_, Indicator::HeightForAge) => (HEIGHT_FOR_AGE, NutritionalStatus::Tall),
        (Standard::Who, Indicator::WeightForHeight) => {
            (WHO_WEIGHT_FOR_HEIGHT, NutritionalStatus::Obesity)
        }
        (Standard::Who, Indicator::BmiForAge) => (WHO_BMI_FOR_AGE, NutritionalStatus::Obesity),
        (Standard::Permenkes, Indicator::WeightForHeight | Indicator::BmiForAge) => {
            (PERMENKES_WEIGHT_FOR_HEIGHT, NutritionalStatus::Obesity)
        }
        (_, Indicator::HeadCircumferenceForAge) => {
            (HEAD_CIRCUMFERENCE_FOR_AGE, NutritionalStatus::SevereMacrocephaly)
        }
    }
}

/// Classify a z-score under a standard's cut-offs for an indicator
///
/// Total over all finite z-scores: every value lands in exactly one band.
#[must_use]
pub fn classify(standard: Standard, indicator: Indicator, zscore: f64) -> NutritionalStatus {
    let (bands, catch_all) = bands(standard, indicator);
    for band in bands {
        if zscore < band.upper || (band.upper_inclusive && zscore == band.upper) {
            return band.status;
        }
    }
    catch_all
}
