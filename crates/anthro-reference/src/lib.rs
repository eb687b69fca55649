// ABOUTME: Reference dataset store crate for the anthro growth engine
// ABOUTME: Validated load of embedded growth tables and read-only bracketing lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AnthroHPK

//! Growth reference tables and the read-only store that serves them.
//!
//! The store is built exactly once at startup from embedded JSON documents
//! (or caller-supplied ones), validated eagerly, and shared immutably across
//! any number of concurrent evaluations. A process must not serve z-scores
//! from a standard whose tables failed validation, so every load error is
//! fatal at construction time.

pub mod document;
pub mod error;
pub mod store;

pub use document::{ParameterModel, Parameters, ReferencePoint};
pub use error::{DatasetError, DatasetResult};
pub use store::{Bracket, ReferenceStore};
