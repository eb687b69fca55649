// ABOUTME: Engine error types shared across the anthro workspace
// ABOUTME: Per-indicator recoverable failures and call-level evaluation errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AnthroHPK

use crate::models::Indicator;

/// Errors produced while evaluating a measurement set
///
/// `OutOfRange` and `InvalidParameters` are recoverable per indicator: the
/// orchestrator records them in the composite result and carries on. Only
/// `NoComputableIndicator` (and invalid inputs detected before evaluation)
/// surface to the caller as a call-level `Err`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Query key outside the tabulated domain; the engine never extrapolates
    #[error("{indicator}: key {key:.2} outside tabulated domain [{min:.2}, {max:.2}]")]
    OutOfRange {
        /// Indicator being computed
        indicator: Indicator,
        /// Query key (age in months or length/height in cm)
        key: f64,
        /// Smallest tabulated key
        min: f64,
        /// Largest tabulated key
        max: f64,
    },

    /// Degenerate distribution parameters (non-positive median or spread)
    #[error("{indicator}: invalid distribution parameters: {reason}")]
    InvalidParameters {
        /// Indicator being computed
        indicator: Indicator,
        /// What was degenerate about the parameters
        reason: &'static str,
    },

    /// A raw measurement required by this indicator was not supplied
    #[error("{indicator}: missing required input '{field}'")]
    MissingInput {
        /// Indicator that needed the field
        indicator: Indicator,
        /// Name of the absent field
        field: &'static str,
    },

    /// A supplied measurement is unusable (negative weight, NaN age, ...)
    #[error("invalid measurement '{field}': {reason}")]
    InvalidMeasurement {
        /// Offending field
        field: &'static str,
        /// Why it is unusable
        reason: String,
    },

    /// Every indicator was skipped or failed; nothing could be computed
    #[error("no indicator was computable from the supplied measurements")]
    NoComputableIndicator,
}

/// Result alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_display_names_the_domain() {
        let err = EngineError::OutOfRange {
            indicator: Indicator::WeightForAge,
            key: 61.0,
            min: 0.0,
            max: 60.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("WAZ"));
        assert!(msg.contains("61.00"));
        assert!(msg.contains("[0.00, 60.00]"));
    }
}
