// ABOUTME: Main library entry point for the anthro z-score engine
// ABOUTME: Parameter resolution, z-score transforms, classification, and orchestration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AnthroHPK

#![deny(unsafe_code)]

//! # Anthro Engine
//!
//! A z-score computation engine for child growth monitoring (0–60 months).
//! Raw measurements go in; standardized z-scores, percentiles, and
//! nutritional-status categories come out, under either of two reference
//! standards:
//!
//! - **WHO Child Growth Standards** — Box-Cox/LMS parameter tables
//! - **Permenkes RI No. 2/2020** — Indonesian median ± SD tables
//!
//! Five indicators are computed per evaluation: weight-for-age (WAZ),
//! length/height-for-age (HAZ), weight-for-length/height (WHZ), BMI-for-age
//! (BAZ), and head-circumference-for-age (HCZ).
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use anthro_engine::{AgeAtMeasurement, Engine, MeasurementInput, Sex, Standard};
//! use anthro_engine::reference::ReferenceStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(ReferenceStore::embedded()?);
//! let engine = Engine::new(store);
//!
//! let input = MeasurementInput::new(Sex::Male, AgeAtMeasurement::from_months(24.0)?)
//!     .with_weight(9.5)
//!     .with_length(87.1);
//! let result = engine.evaluate(&input, Standard::Who)?;
//! println!("{}", serde_json::to_string_pretty(&result)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The engine is a pure function of its inputs and the reference dataset:
//! - **Reference store** ([`reference::ReferenceStore`]): immutable tables,
//!   loaded and validated once, shared without locking
//! - **Resolver** ([`resolver`]): bracketing lookup plus linear interpolation
//! - **Transform** ([`transform`]): LMS and SD-from-median z-score models
//! - **Classifier** ([`classifier`]): standard-specific cut-off bands
//! - **Orchestrator** ([`Engine`]): applicability checks and aggregation
//!
//! No network, file, or CLI surface lives here; serving and reporting layers
//! consume [`CompositeResult`] values and stay entirely outside the engine.

pub mod classifier;
pub mod config;
pub mod curves;
pub mod evaluator;
pub mod resolver;
pub mod stats;
pub mod transform;

/// Core domain types (re-exported from `anthro-core`)
pub use anthro_core as core;
/// Reference dataset store (re-exported from `anthro-reference`)
pub use anthro_reference as reference;

pub use anthro_core::{
    AgeAtMeasurement, CompositeResult, EngineError, EngineResult, Indicator, IndicatorEntry,
    IndicatorOutcome, IndicatorResult, MeasurementInput, MeasurementMethod, NutritionalStatus,
    Plausibility, Sex, SkipReason, Standard, TableKind,
};

pub use config::EngineConfig;
pub use curves::{CurvePoint, ZlineCurve, STANDARD_ZLINES};
pub use evaluator::Engine;
