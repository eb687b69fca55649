// ABOUTME: Normal-distribution helpers for percentile reporting
// ABOUTME: Rational erf approximation accurate to ~1.5e-7 over the full line
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AnthroHPK

//! Converting z-scores to percentiles.
//!
//! Percentiles are a reporting convenience layered on the standard normal
//! CDF; clinical cut-offs stay in z-score space. The erf approximation is
//! Abramowitz & Stegun 7.1.26, whose ~1.5e-7 absolute error is far below
//! anything visible at the reported precision.

/// Error function, Abramowitz & Stegun formula 7.1.26
#[must_use]
pub fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254_829_592;
    const A2: f64 = -0.284_496_736;
    const A3: f64 = 1.421_413_741;
    const A4: f64 = -1.453_152_027;
    const A5: f64 = 1.061_405_429;
    const P: f64 = 0.327_591_1;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / P.mul_add(x, 1.0);
    let poly = t * A5.mul_add(t, A4).mul_add(t, A3).mul_add(t, A2).mul_add(t, A1);
    sign * (-x * x).exp().mul_add(-poly, 1.0)
}

/// Percentile (0–100) corresponding to a standard-normal z-score
#[must_use]
pub fn z_to_percentile(z: f64) -> f64 {
    let cdf = 0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2));
    (cdf * 100.0).clamp(0.0, 100.0)
}
