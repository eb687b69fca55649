// ABOUTME: Composite evaluation engine orchestrating all five indicators
// ABOUTME: Applicability checks, posture correction, per-indicator failure isolation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AnthroHPK

//! The evaluation engine.
//!
//! One call to [`Engine::evaluate`] runs every indicator the supplied
//! measurements support and reports the five of them in canonical order
//! (WAZ, HAZ, WHZ, BAZ, HCZ). Indicators are isolated from each other: a
//! missing measurement skips its indicators, an out-of-range key fails its
//! indicator, and neither touches the rest. The call itself errs only when
//! not a single indicator could be computed.
//!
//! Length/height posture: the growth standards tabulate recumbent length
//! under 24 months and standing height from 24 months on. When the recorded
//! measurement posture disagrees with the age convention the standard 0.7 cm
//! correction is applied before any table is consulted; when no posture is
//! recorded the measurement is taken to follow the convention.

use std::sync::Arc;

use tracing::{debug, warn};

use anthro_core::constants::{MAX_AGE_MONTHS, RECUMBENT_STANDING_OFFSET_CM, STANDING_AGE_MONTHS};
use anthro_core::errors::{EngineError, EngineResult};
use anthro_core::models::{
    CompositeResult, Indicator, IndicatorEntry, IndicatorOutcome, IndicatorResult,
    MeasurementInput, MeasurementMethod, Plausibility, Sex, SkipReason, Standard, TableKind,
};
use anthro_reference::ReferenceStore;

use crate::classifier::classify;
use crate::config::EngineConfig;
use crate::resolver::resolve;
use crate::stats::z_to_percentile;
use crate::transform::to_zscore;

/// The z-score computation engine
///
/// Cheap to clone; the reference store is shared behind an `Arc` and all
/// state is read-only, so one engine serves concurrent evaluations freely.
#[derive(Debug, Clone)]
pub struct Engine {
    store: Arc<ReferenceStore>,
    config: EngineConfig,
}

impl Engine {
    /// Engine over a loaded reference store, default audit configuration
    #[must_use]
    pub fn new(store: Arc<ReferenceStore>) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    /// Engine with explicit audit configuration
    #[must_use]
    pub const fn with_config(store: Arc<ReferenceStore>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// The audit configuration in effect
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate one measurement set under one standard
    ///
    /// Always reports all five indicators in canonical order; individual
    /// indicators come back `Skipped` (required measurement absent, or the
    /// indicator does not apply at this age) or `Failed` (key outside the
    /// tabulated domain, degenerate parameters) without disturbing the
    /// others.
    ///
    /// # Errors
    ///
    /// [`EngineError::NoComputableIndicator`] when every indicator was
    /// skipped or failed — the caller supplied nothing the engine could
    /// evaluate.
    pub fn evaluate(
        &self,
        input: &MeasurementInput,
        standard: Standard,
    ) -> EngineResult<CompositeResult> {
        let age_months = input.age.months;
        let warnings = self.config.measurement_warnings(input);
        for warning in &warnings {
            warn!(standard = standard.code(), "{warning}");
        }

        let entries: Vec<IndicatorEntry> = Indicator::ALL
            .into_iter()
            .map(|indicator| IndicatorEntry {
                indicator,
                outcome: self.run_indicator(input, standard, indicator),
            })
            .collect();

        let result = CompositeResult {
            standard,
            sex: input.sex,
            age_months,
            entries,
            warnings,
        };
        debug!(
            standard = standard.code(),
            age_months,
            computed = result.computed_count(),
            "evaluation finished"
        );
        if result.computed_count() == 0 {
            return Err(EngineError::NoComputableIndicator);
        }
        Ok(result)
    }

    /// Expected median value for an age-keyed indicator at a given age
    ///
    /// Reports the reference median a healthy child of this sex and age is
    /// expected to sit at, e.g. for "ideal weight" displays.
    ///
    /// # Errors
    ///
    /// [`EngineError::OutOfRange`] outside the tabulated ages, or
    /// [`EngineError::InvalidParameters`] for the length-keyed
    /// weight-for-length/height indicator, which has no single age-keyed
    /// median.
    pub fn expected_median(
        &self,
        standard: Standard,
        indicator: Indicator,
        sex: Sex,
        age_months: f64,
    ) -> EngineResult<f64> {
        let table = match indicator {
            Indicator::WeightForAge => TableKind::WeightForAge,
            Indicator::HeightForAge => TableKind::LengthHeightForAge,
            Indicator::BmiForAge => TableKind::BmiForAge,
            Indicator::HeadCircumferenceForAge => TableKind::HeadCircumferenceForAge,
            Indicator::WeightForHeight => {
                return Err(EngineError::InvalidParameters {
                    indicator,
                    reason: "weight-for-length/height is keyed by length, not age",
                })
            }
        };
        let params = resolve(&self.store, standard, table, sex, indicator, age_months)?;
        Ok(params.median())
    }

    fn run_indicator(
        &self,
        input: &MeasurementInput,
        standard: Standard,
        indicator: Indicator,
    ) -> IndicatorOutcome {
        let attempt = match indicator {
            Indicator::WeightForAge => self.weight_for_age(input, standard),
            Indicator::HeightForAge => self.height_for_age(input, standard),
            Indicator::WeightForHeight => self.weight_for_height(input, standard),
            Indicator::BmiForAge => self.bmi_for_age(input, standard),
            Indicator::HeadCircumferenceForAge => {
                self.head_circumference_for_age(input, standard)
            }
        };
        match attempt {
            Ok(outcome) => outcome,
            Err(err) => {
                debug!(
                    indicator = indicator.code(),
                    standard = standard.code(),
                    error = %err,
                    "indicator failed"
                );
                IndicatorOutcome::Failed {
                    error: err.to_string(),
                }
            }
        }
    }

    fn weight_for_age(
        &self,
        input: &MeasurementInput,
        standard: Standard,
    ) -> EngineResult<IndicatorOutcome> {
        let Some(weight) = input.weight_kg else {
            return Ok(skip_missing("weight_kg"));
        };
        self.score(
            standard,
            Indicator::WeightForAge,
            TableKind::WeightForAge,
            input.sex,
            input.age.months,
            weight,
        )
    }

    fn height_for_age(
        &self,
        input: &MeasurementInput,
        standard: Standard,
    ) -> EngineResult<IndicatorOutcome> {
        let Some(length) = conventional_length(input) else {
            return Ok(skip_missing("length_cm"));
        };
        self.score(
            standard,
            Indicator::HeightForAge,
            TableKind::LengthHeightForAge,
            input.sex,
            input.age.months,
            length,
        )
    }

    fn weight_for_height(
        &self,
        input: &MeasurementInput,
        standard: Standard,
    ) -> EngineResult<IndicatorOutcome> {
        let Some(weight) = input.weight_kg else {
            return Ok(skip_missing("weight_kg"));
        };
        let Some(length) = conventional_length(input) else {
            return Ok(skip_missing("length_cm"));
        };
        // The length-keyed tables carry no age axis of their own, so the
        // under-five ceiling is enforced here rather than by the lookup.
        if input.age.months > MAX_AGE_MONTHS {
            return Ok(IndicatorOutcome::Skipped {
                reason: SkipReason::OutsideDomain {
                    detail: format!(
                        "age {:.1} months exceeds the {MAX_AGE_MONTHS:.0}-month ceiling of the weight-for-length/height tables",
                        input.age.months
                    ),
                },
            });
        }
        let table = if input.age.months < STANDING_AGE_MONTHS {
            TableKind::WeightForLength
        } else {
            TableKind::WeightForHeight
        };
        self.score(
            standard,
            Indicator::WeightForHeight,
            table,
            input.sex,
            length,
            weight,
        )
    }

    fn bmi_for_age(
        &self,
        input: &MeasurementInput,
        standard: Standard,
    ) -> EngineResult<IndicatorOutcome> {
        let Some(weight) = input.weight_kg else {
            return Ok(skip_missing("weight_kg"));
        };
        let Some(length) = conventional_length(input) else {
            return Ok(skip_missing("length_cm"));
        };
        if !length.is_finite() || length <= 0.0 {
            return Err(EngineError::InvalidMeasurement {
                field: "length_cm",
                reason: format!("cannot derive BMI from length {length}"),
            });
        }
        let meters = length / 100.0;
        let bmi = weight / (meters * meters);
        self.score(
            standard,
            Indicator::BmiForAge,
            TableKind::BmiForAge,
            input.sex,
            input.age.months,
            bmi,
        )
    }

    fn head_circumference_for_age(
        &self,
        input: &MeasurementInput,
        standard: Standard,
    ) -> EngineResult<IndicatorOutcome> {
        let Some(head) = input.head_circumference_cm else {
            return Ok(skip_missing("head_circumference_cm"));
        };
        self.score(
            standard,
            Indicator::HeadCircumferenceForAge,
            TableKind::HeadCircumferenceForAge,
            input.sex,
            input.age.months,
            head,
        )
    }

    /// Resolve, transform, audit, and classify one indicator
    fn score(
        &self,
        standard: Standard,
        indicator: Indicator,
        table: TableKind,
        sex: Sex,
        key: f64,
        raw_value: f64,
    ) -> EngineResult<IndicatorOutcome> {
        let params = resolve(&self.store, standard, table, sex, indicator, key)?;
        let zscore = to_zscore(indicator, raw_value, &params)?;
        let plausibility = self.config.audit(indicator, zscore);
        if plausibility != Plausibility::Plausible {
            warn!(
                indicator = indicator.code(),
                standard = standard.code(),
                zscore,
                "z-score flagged by plausibility audit"
            );
        }
        let status = classify(standard, indicator, zscore);
        Ok(IndicatorOutcome::Computed {
            result: IndicatorResult {
                indicator,
                standard,
                raw_value,
                zscore,
                percentile: z_to_percentile(zscore),
                status,
                label: status.label(standard).to_owned(),
                plausibility,
            },
        })
    }
}

fn skip_missing(field: &str) -> IndicatorOutcome {
    IndicatorOutcome::Skipped {
        reason: SkipReason::MissingInput {
            field: field.to_owned(),
        },
    }
}

/// Length/height normalized to the age convention
///
/// Under 24 months the tables expect recumbent length; from 24 months on,
/// standing height. A measurement taken in the other posture is shifted by
/// the standard 0.7 cm before lookup. Unrecorded posture is assumed to
/// follow the convention.
fn conventional_length(input: &MeasurementInput) -> Option<f64> {
    let length = input.length_cm?;
    let expects_recumbent = input.age.months < STANDING_AGE_MONTHS;
    let adjusted = match input.measured {
        Some(MeasurementMethod::Standing) if expects_recumbent => {
            length + RECUMBENT_STANDING_OFFSET_CM
        }
        Some(MeasurementMethod::Recumbent) if !expects_recumbent => {
            length - RECUMBENT_STANDING_OFFSET_CM
        }
        _ => length,
    };
    Some(adjusted)
}
