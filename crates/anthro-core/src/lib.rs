// ABOUTME: Foundation crate for the anthro growth engine
// ABOUTME: Domain models, error types, plausibility constants, and age arithmetic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AnthroHPK

//! Core types shared by the anthro z-score engine crates.
//!
//! This crate carries no computation of its own. It defines the vocabulary
//! the engine speaks: sexes, standards, indicators, measurement inputs,
//! per-indicator results, and the error types that flow between the
//! reference store and the orchestrator.

pub mod age;
pub mod constants;
pub mod errors;
pub mod models;

pub use age::AgeAtMeasurement;
pub use errors::{EngineError, EngineResult};
pub use models::{
    CompositeResult, Indicator, IndicatorEntry, IndicatorOutcome, IndicatorResult,
    MeasurementInput, MeasurementMethod, NutritionalStatus, Plausibility, Sex, SkipReason,
    Standard, TableKind,
};
