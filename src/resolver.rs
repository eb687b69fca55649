// ABOUTME: Parameter resolver with exact-row identity and linear interpolation
// ABOUTME: Maps dataset domain misses to per-indicator OutOfRange failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AnthroHPK

//! Resolving distribution parameters at an exact query point.
//!
//! The reference tables sample the growth curves at discrete keys (whole
//! months, whole centimeters); a child's exact age or length almost never
//! lands on one. The resolver fetches the bracketing rows from the store and
//! linearly interpolates each parameter field independently, weighted by the
//! fractional position of the key between the rows. A key that lands exactly
//! on a row returns that row's parameters unchanged; a key outside the
//! tabulated support fails as `OutOfRange` — the engine never extrapolates
//! beyond the published curves.

use tracing::trace;

use anthro_core::errors::{EngineError, EngineResult};
use anthro_core::models::{Indicator, Sex, Standard, TableKind};
use anthro_reference::{Bracket, DatasetError, Parameters, ReferenceStore};

/// Resolve distribution parameters for `indicator` at `key`
///
/// # Errors
///
/// - [`EngineError::OutOfRange`] when `key` falls outside the table's
///   tabulated domain
/// - [`EngineError::InvalidParameters`] when the store cannot serve the
///   series (a completeness bug caught at load time in normal operation)
pub fn resolve(
    store: &ReferenceStore,
    standard: Standard,
    table: TableKind,
    sex: Sex,
    indicator: Indicator,
    key: f64,
) -> EngineResult<Parameters> {
    let bracket = store
        .bracketing(standard, table, sex, key)
        .map_err(|err| match err {
            DatasetError::KeyOutOfRange { key, min, max, .. } => EngineError::OutOfRange {
                indicator,
                key,
                min,
                max,
            },
            _ => EngineError::InvalidParameters {
                indicator,
                reason: "reference series unavailable",
            },
        })?;

    match bracket {
        Bracket::Exact(point) => {
            trace!(
                indicator = indicator.code(),
                key,
                "resolved parameters at tabulated row"
            );
            Ok(point.params)
        }
        Bracket::Between(lower, upper) => {
            let t = (key - lower.key) / (upper.key - lower.key);
            lower
                .params
                .lerp(&upper.params, t)
                .ok_or(EngineError::InvalidParameters {
                    indicator,
                    reason: "mixed parameter models within one table",
                })
        }
    }
}
