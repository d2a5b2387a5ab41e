//! Native HTTP backend for FoodPrint Forecast
//!
//! Talks to the analysis server over `reqwest` so the page controller can
//! run outside the browser.
//!
//! Copyright (c) 2025 Michael A Wright

pub mod http;

pub use http::{ClientConfig, HttpBackend};
