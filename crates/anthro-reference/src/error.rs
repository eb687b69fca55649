// ABOUTME: Dataset error types for reference table loading and lookup
// ABOUTME: Fatal load-time validation failures and recoverable domain misses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AnthroHPK

use anthro_core::models::{Sex, Standard, TableKind};

/// Errors raised by the reference dataset store
///
/// Everything except `KeyOutOfRange` is a load-time validation failure and
/// fatal: a [`crate::ReferenceStore`] is only ever fully valid or never
/// constructed. `KeyOutOfRange` is the one recoverable variant, surfaced per
/// lookup when a query key falls outside a table's tabulated support.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// A table document is not valid JSON or does not match the schema
    #[error("failed to parse reference document '{name}'")]
    Parse {
        /// Document name (for diagnostics)
        name: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A document names a table the engine does not know
    #[error("unknown table '{table}' in reference document '{name}'")]
    UnknownTable {
        /// Document name
        name: String,
        /// Unrecognized table identifier
        table: String,
    },

    /// A document names a standard the engine does not know
    #[error("unknown standard '{standard}' in reference document '{name}'")]
    UnknownStandard {
        /// Document name
        name: String,
        /// Unrecognized standard identifier
        standard: String,
    },

    /// A document names a sex variant the engine does not know
    #[error("unknown sex '{sex}' in reference document '{name}'")]
    UnknownSex {
        /// Document name
        name: String,
        /// Unrecognized sex identifier
        sex: String,
    },

    /// A document names a parameter model the engine does not know
    #[error("unknown parameter model '{model}' in reference document '{name}'")]
    UnknownModel {
        /// Document name
        name: String,
        /// Unrecognized model identifier
        model: String,
    },

    /// A document's key unit disagrees with its table kind
    #[error(
        "reference document '{name}': table {table} is keyed in {expected}, document says '{key_unit}'"
    )]
    KeyUnitMismatch {
        /// Document name
        name: String,
        /// Table kind the document declares
        table: TableKind,
        /// Unit that table kind is keyed in
        expected: &'static str,
        /// Unit the document declares
        key_unit: String,
    },

    /// A (standard, table, sex) series contains no rows
    #[error("{standard}/{table}/{sex:?}: table has no rows")]
    EmptyTable {
        /// Standard the table belongs to
        standard: Standard,
        /// Table kind
        table: TableKind,
        /// Sex variant
        sex: Sex,
    },

    /// Table keys are not strictly increasing
    #[error("{standard}/{table}/{sex:?}: keys not strictly increasing at row {index}")]
    NonMonotonicKeys {
        /// Standard the table belongs to
        standard: Standard,
        /// Table kind
        table: TableKind,
        /// Sex variant
        sex: Sex,
        /// Index of the offending row
        index: usize,
    },

    /// A row carries degenerate distribution parameters
    #[error("{standard}/{table}/{sex:?}: invalid parameters at key {key}: {reason}")]
    InvalidParameterRow {
        /// Standard the table belongs to
        standard: Standard,
        /// Table kind
        table: TableKind,
        /// Sex variant
        sex: Sex,
        /// Row key
        key: f64,
        /// What is degenerate
        reason: &'static str,
    },

    /// A standard is missing a (table, sex) series it must provide
    #[error("{standard}: missing table {table} for {sex:?}")]
    MissingTable {
        /// Standard that is incomplete
        standard: Standard,
        /// Absent table kind
        table: TableKind,
        /// Absent sex variant
        sex: Sex,
    },

    /// Query key outside the table's tabulated support (recoverable)
    #[error("{standard}/{table}/{sex:?}: key {key:.2} outside [{min:.2}, {max:.2}]")]
    KeyOutOfRange {
        /// Standard queried
        standard: Standard,
        /// Table queried
        table: TableKind,
        /// Sex variant queried
        sex: Sex,
        /// Offending query key
        key: f64,
        /// Smallest tabulated key
        min: f64,
        /// Largest tabulated key
        max: f64,
    },
}

/// Result alias for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;
