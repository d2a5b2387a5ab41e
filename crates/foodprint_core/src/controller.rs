//! Page controller
//!
//! Mediates between page events, the three backend calls and the rendered
//! fragments. The controller keeps no state of its own: every call reads
//! the page, talks to the backend and writes the page back. Calls are never
//! cancelled or serialised, so overlapping uploads race and whichever
//! response resolves last is what stays rendered.

use crate::error::Result;
use crate::messages::Messages;
use crate::render;
use crate::types::{
    leaderboard_from_json, AnalysisReport, ContributionOutcome, ContributionRequest,
    EmissionResults, LeaderboardEntry, UploadOutcome,
};
use async_trait::async_trait;
use serde_json::Value;

pub const UPLOAD_PATH: &str = "/upload";
pub const CONTRIBUTION_PATH: &str = "/add_contribution";
pub const LEADERBOARD_PATH: &str = "/leaderboard";

/// Multipart field carrying the fridge image
pub const IMAGE_FIELD: &str = "fridge_image";

/// The analysis backend
///
/// Implementations return the decoded JSON body whatever the HTTP status;
/// the server reports application errors as JSON with a 4xx/5xx status.
#[async_trait(?Send)]
pub trait Backend {
    /// File handle accepted by [`Backend::upload`]
    type Image;

    /// `POST /upload` with the multipart field `fridge_image`
    async fn upload(&self, image: Option<Self::Image>) -> Result<Value>;

    /// `POST /add_contribution` with a JSON body
    async fn add_contribution(&self, request: &ContributionRequest) -> Result<Value>;

    /// `GET /leaderboard`
    async fn leaderboard(&self) -> Result<Value>;
}

/// The page the controller renders into
pub trait Page {
    type Image;

    /// Route form submits to [`PageController::handle_upload_submit`]
    fn attach_submit_handler(&self);

    /// The file currently selected in the image input, if any
    fn selected_image(&self) -> Option<Self::Image>;

    fn set_analysis_html(&self, html: &str);

    /// Route clicks on the freshly rendered contribute button to
    /// [`PageController::handle_contribute_click`] with these results
    fn attach_contribute_handler(&self, emissions: EmissionResults);

    /// Reveal the results section
    fn show_results(&self);

    fn set_leaderboard_html(&self, html: &str);

    /// Blocking notification
    fn alert(&self, message: &str);

    /// Blocking text prompt; `None` when cancelled
    fn prompt(&self, message: &str) -> Option<String>;

    /// Developer console logging
    fn log_error(&self, message: &str);
}

pub struct PageController<B, P> {
    backend: B,
    page: P,
    messages: &'static Messages,
}

impl<B, P> PageController<B, P>
where
    B: Backend,
    P: Page<Image = B::Image>,
{
    pub fn new(backend: B, page: P, messages: &'static Messages) -> Self {
        Self {
            backend,
            page,
            messages,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// Page ready: wire the form and show the current leaderboard
    pub async fn initialize(&self) {
        self.page.attach_submit_handler();
        self.load_leaderboard().await;
    }

    /// Upload the selected image and render the analysis
    pub async fn handle_upload_submit(&self) {
        let image = self.page.selected_image();
        if image.is_none() {
            tracing::debug!("no image selected, uploading an empty field");
        }

        let outcome = match self.backend.upload(image).await {
            Ok(body) => UploadOutcome::from_json(body),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(UploadOutcome::Rejected(message)) => {
                tracing::info!(%message, "upload rejected by server");
                self.page
                    .alert(&format!("{} {}", self.messages.error_prefix, message));
            }
            Ok(UploadOutcome::Analysis(report)) => {
                self.render_results(&report);
                self.page.show_results();
            }
            Err(err) => {
                self.page.log_error(&format!("Error: {err}"));
                self.page.alert(self.messages.upload_failed);
            }
        }
    }

    /// Replace the analysis markup and re-attach the contribute handler
    pub fn render_results(&self, report: &AnalysisReport) {
        tracing::debug!(
            items = report.detected_items.len(),
            recipes = report.recommended_recipes.len(),
            "rendering analysis"
        );
        let html = render::analysis_html(report, self.messages);
        self.page.set_analysis_html(&html);
        self.page
            .attach_contribute_handler(report.emission_results.clone());
    }

    /// Ask for a username and contribute unless the prompt comes back empty
    pub async fn handle_contribute_click(&self, emissions: &EmissionResults) {
        match self.page.prompt(self.messages.contribute_prompt) {
            Some(username) if !username.is_empty() => {
                self.contribute(&username, emissions).await;
            }
            _ => tracing::debug!("contribution cancelled"),
        }
    }

    /// Submit the emission results under `username`, refreshing the
    /// leaderboard once the server accepts them
    pub async fn contribute(&self, username: &str, emissions: &EmissionResults) {
        let request = ContributionRequest {
            username: username.to_string(),
            emission_results: emissions.clone(),
        };

        match self.backend.add_contribution(&request).await {
            Ok(body) => match ContributionOutcome::from_json(&body) {
                ContributionOutcome::Accepted => {
                    tracing::info!(username, "contribution accepted");
                    self.page.alert(self.messages.contribution_thanks);
                    self.load_leaderboard().await;
                }
                ContributionOutcome::Rejected(error) => {
                    let message = error.as_deref().unwrap_or(self.messages.unknown_error);
                    self.page
                        .alert(&format!("{} {}", self.messages.error_prefix, message));
                }
            },
            Err(err) => {
                self.page.log_error(&format!("Error: {err}"));
                self.page.alert(self.messages.contribution_failed);
            }
        }
    }

    /// Fetch and render the leaderboard; failures are only logged
    pub async fn load_leaderboard(&self) {
        let entries = match self.backend.leaderboard().await {
            Ok(body) => leaderboard_from_json(body),
            Err(err) => Err(err),
        };

        match entries {
            Ok(entries) => self.render_leaderboard(&entries),
            Err(err) => self
                .page
                .log_error(&format!("Error loading leaderboard: {err}")),
        }
    }

    pub fn render_leaderboard(&self, entries: &[LeaderboardEntry]) {
        let html = render::leaderboard_html(entries, self.messages);
        self.page.set_leaderboard_html(&html);
    }
}
