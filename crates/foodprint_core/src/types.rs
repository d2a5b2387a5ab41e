//! View-models decoded from the analysis backend
//!
//! Every type here lives for a single render cycle: it is decoded from a
//! response body, rendered, and dropped. Nothing is cached between calls.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Items expiring within this many days are flagged on the page
pub const EXPIRY_WARNING_DAYS: i64 = 3;

/// A food item identified in the uploaded fridge image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedItem {
    /// Item name as reported by the image analyzer
    pub name: String,
    /// Number of units detected
    pub quantity: f64,
    /// Estimated remaining shelf life in days
    pub days_until_expiry: i64,
}

impl DetectedItem {
    /// True when the item should be used soon
    pub fn is_expiring(&self) -> bool {
        self.days_until_expiry <= EXPIRY_WARNING_DAYS
    }
}

/// A recipe recommended for the detected items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    /// Preparation time in minutes
    pub preparation_time: f64,
    pub ingredients: Vec<String>,
    pub instructions: String,
}

/// Environmental impact summary for one upload
///
/// Sent back verbatim when the user contributes to the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionResults {
    /// CO2-equivalent emissions avoided, in kg
    pub avoided_emissions_kg: f64,
    /// Units that would otherwise have been wasted
    pub items_saved: f64,
    /// Units detected in total
    pub total_items: f64,
    /// `items_saved / total_items` as a percentage
    pub waste_prevented_percentage: f64,
}

/// Successful analysis of a fridge image
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysisReport {
    pub detected_items: Vec<DetectedItem>,
    pub recommended_recipes: Vec<Recipe>,
    pub emission_results: EmissionResults,
}

/// One row of the community leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    /// Cumulative CO2-equivalent avoided, in kg
    pub total_emissions_avoided: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_items_saved: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributions: Option<f64>,
    /// ISO-8601 timestamp of the latest contribution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_contribution: Option<String>,
}

impl LeaderboardEntry {
    pub fn new(username: impl Into<String>, total_emissions_avoided: f64) -> Self {
        Self {
            username: username.into(),
            total_emissions_avoided,
            total_items_saved: None,
            contributions: None,
            last_contribution: None,
        }
    }
}

/// Body of `POST /add_contribution`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributionRequest {
    pub username: String,
    pub emission_results: EmissionResults,
}

/// An image file selected for upload, read into memory
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Decoded body of `POST /upload`
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    /// The server reported an application error in the body
    Rejected(String),
    Analysis(AnalysisReport),
}

impl UploadOutcome {
    pub fn from_json(body: Value) -> Result<Self> {
        if let Some(error) = body.get("error").filter(|e| is_truthy(e)) {
            return Ok(Self::Rejected(display_value(error)));
        }

        serde_json::from_value(body)
            .map(Self::Analysis)
            .map_err(Error::UnexpectedShape)
    }
}

/// Decoded body of `POST /add_contribution`
#[derive(Debug, Clone, PartialEq)]
pub enum ContributionOutcome {
    Accepted,
    /// Carries the server's `error` field when one was sent
    Rejected(Option<String>),
}

impl ContributionOutcome {
    pub fn from_json(body: &Value) -> Self {
        if body.get("success").is_some_and(is_truthy) {
            Self::Accepted
        } else {
            Self::Rejected(body.get("error").map(display_value))
        }
    }
}

/// Decode the body of `GET /leaderboard`
pub fn leaderboard_from_json(body: Value) -> Result<Vec<LeaderboardEntry>> {
    serde_json::from_value(body).map_err(Error::UnexpectedShape)
}

/// Browser truthiness of a JSON value
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Strings verbatim, anything else as its JSON text
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
