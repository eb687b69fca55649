// ABOUTME: Engine configuration with environment-variable overrides
// ABOUTME: Audit thresholds for z-scores and plausibility ranges for raw inputs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AnthroHPK

//! Tunable audit configuration.
//!
//! The defaults come from WHO survey data-cleaning practice and fit most
//! deployments; screening programs that want stricter or looser flagging can
//! override any threshold through `ANTHRO_AUDIT_*` / `ANTHRO_RANGE_*`
//! environment variables without recompiling.

use std::env;

use tracing::warn;

use anthro_core::constants::{audit, measurement};
use anthro_core::models::{Indicator, MeasurementInput, Plausibility};

/// Audit thresholds and raw-measurement plausibility ranges
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// |z| flagged as questionable for the age-keyed indicators (WAZ, HAZ)
    pub age_keyed_questionable: f64,
    /// |z| flagged as implausible for the age-keyed indicators
    pub age_keyed_implausible: f64,
    /// |z| flagged as questionable for WHZ, BAZ, and HCZ
    pub derived_questionable: f64,
    /// |z| flagged as implausible for WHZ, BAZ, and HCZ
    pub derived_implausible: f64,
    /// Plausible body-weight range (kg)
    pub weight_range_kg: (f64, f64),
    /// Plausible length/height range (cm)
    pub length_range_cm: (f64, f64),
    /// Plausible head-circumference range (cm)
    pub head_circumference_range_cm: (f64, f64),
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            age_keyed_questionable: audit::AGE_KEYED_QUESTIONABLE,
            age_keyed_implausible: audit::AGE_KEYED_IMPLAUSIBLE,
            derived_questionable: audit::DERIVED_QUESTIONABLE,
            derived_implausible: audit::DERIVED_IMPLAUSIBLE,
            weight_range_kg: measurement::WEIGHT_KG,
            length_range_cm: measurement::LENGTH_CM,
            head_circumference_range_cm: measurement::HEAD_CIRCUMFERENCE_CM,
        }
    }
}

impl EngineConfig {
    /// Defaults with `ANTHRO_*` environment overrides applied
    ///
    /// Unset variables keep their default; unparsable values are logged and
    /// ignored rather than failing startup.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.age_keyed_questionable =
            env_f64("ANTHRO_AUDIT_AGE_KEYED_QUESTIONABLE", config.age_keyed_questionable);
        config.age_keyed_implausible =
            env_f64("ANTHRO_AUDIT_AGE_KEYED_IMPLAUSIBLE", config.age_keyed_implausible);
        config.derived_questionable =
            env_f64("ANTHRO_AUDIT_DERIVED_QUESTIONABLE", config.derived_questionable);
        config.derived_implausible =
            env_f64("ANTHRO_AUDIT_DERIVED_IMPLAUSIBLE", config.derived_implausible);
        config.weight_range_kg = (
            env_f64("ANTHRO_RANGE_WEIGHT_MIN_KG", config.weight_range_kg.0),
            env_f64("ANTHRO_RANGE_WEIGHT_MAX_KG", config.weight_range_kg.1),
        );
        config.length_range_cm = (
            env_f64("ANTHRO_RANGE_LENGTH_MIN_CM", config.length_range_cm.0),
            env_f64("ANTHRO_RANGE_LENGTH_MAX_CM", config.length_range_cm.1),
        );
        config.head_circumference_range_cm = (
            env_f64("ANTHRO_RANGE_HEAD_MIN_CM", config.head_circumference_range_cm.0),
            env_f64("ANTHRO_RANGE_HEAD_MAX_CM", config.head_circumference_range_cm.1),
        );
        config
    }

    /// Audit a computed z-score against the indicator family's bounds
    #[must_use]
    pub fn audit(&self, indicator: Indicator, zscore: f64) -> Plausibility {
        let (questionable, implausible) = match indicator {
            Indicator::WeightForAge | Indicator::HeightForAge => {
                (self.age_keyed_questionable, self.age_keyed_implausible)
            }
            Indicator::WeightForHeight
            | Indicator::BmiForAge
            | Indicator::HeadCircumferenceForAge => {
                (self.derived_questionable, self.derived_implausible)
            }
        };
        let magnitude = zscore.abs();
        if magnitude > implausible {
            Plausibility::Implausible
        } else if magnitude > questionable {
            Plausibility::Questionable
        } else {
            Plausibility::Plausible
        }
    }

    /// Screen the raw inputs against the plausibility ranges
    ///
    /// Produces one warning per out-of-range field; the evaluation still runs
    /// and the z-score audit carries the final verdict.
    #[must_use]
    pub fn measurement_warnings(&self, input: &MeasurementInput) -> Vec<String> {
        let mut warnings = Vec::new();
        let mut check = |name: &str, value: Option<f64>, (min, max): (f64, f64), unit: &str| {
            if let Some(v) = value {
                if !v.is_finite() || v < min || v > max {
                    warnings.push(format!(
                        "{name} {v} {unit} outside plausible range [{min}, {max}]"
                    ));
                }
            }
        };
        check("weight", input.weight_kg, self.weight_range_kg, "kg");
        check("length/height", input.length_cm, self.length_range_cm, "cm");
        check(
            "head circumference",
            input.head_circumference_cm,
            self.head_circumference_range_cm,
            "cm",
        );
        warnings
    }
}

fn env_f64(name: &str, default: f64) -> f64 {
    match env::var(name) {
        Ok(raw) => match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            _ => {
                warn!(variable = name, value = %raw, "ignoring unparsable override");
                default
            }
        },
        Err(_) => default,
    }
}
