//! Core of the FoodPrint Forecast page
//!
//! This crate holds the view-models decoded from the analysis backend,
//! the HTML fragments rendered from them, and the page controller that
//! ties DOM events to the three backend calls. Transport and DOM access
//! are injected through the [`Backend`] and [`Page`] traits so the same
//! controller drives the browser page and the terminal client.
//!
//! Copyright (c) 2025 Michael A Wright

pub mod controller;
pub mod error;
pub mod messages;
pub mod render;
pub mod types;

pub use controller::{Backend, Page, PageController};
pub use error::Error;
pub use messages::{Locale, Messages};
pub use types::*;
