// ABOUTME: Plausibility constants for anthropometric measurements and z-scores
// ABOUTME: WHO biologically-implausible-value (BIV) audit bounds and raw input ranges
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AnthroHPK

//! Plausibility bounds used by the audit step.
//!
//! The raw-measurement ranges follow WHO survey data-cleaning practice for
//! under-fives; the z-score audit bounds are the flagging limits used when
//! screening field data (wider for the age-keyed weight/height indicators,
//! tighter for the derived ones).

/// Raw measurement plausibility ranges
pub mod measurement {
    /// Plausible body weight for a child under five (kg)
    pub const WEIGHT_KG: (f64, f64) = (1.0, 30.0);
    /// Plausible recumbent length / standing height (cm)
    pub const LENGTH_CM: (f64, f64) = (35.0, 130.0);
    /// Plausible head circumference (cm)
    pub const HEAD_CIRCUMFERENCE_CM: (f64, f64) = (20.0, 60.0);
}

/// |z| audit bounds per indicator family
pub mod audit {
    /// WAZ/HAZ: |z| beyond this is biologically implausible
    pub const AGE_KEYED_IMPLAUSIBLE: f64 = 6.0;
    /// WAZ/HAZ: |z| beyond this warrants re-measurement
    pub const AGE_KEYED_QUESTIONABLE: f64 = 5.0;
    /// WHZ/BAZ/HCZ: |z| beyond this is biologically implausible
    pub const DERIVED_IMPLAUSIBLE: f64 = 5.0;
    /// WHZ/BAZ/HCZ: |z| beyond this warrants re-measurement
    pub const DERIVED_QUESTIONABLE: f64 = 4.0;
}

/// Age ceiling of the under-five growth standards (months)
pub const MAX_AGE_MONTHS: f64 = 60.0;

/// Age at which the length convention switches from recumbent to standing
pub const STANDING_AGE_MONTHS: f64 = 24.0;

/// Correction applied when the measured posture disagrees with the age
/// convention (recumbent length runs 0.7 cm longer than standing height)
pub const RECUMBENT_STANDING_OFFSET_CM: f64 = 0.7;
