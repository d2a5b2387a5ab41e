//! Terminal rendition of the page
//!
//! Fragments go to stdout, alerts and prompts to stderr, console logging
//! to tracing.

use anyhow::{Context, Result};
use foodprint_core::{EmissionResults, ImageUpload, Page};
use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::path::Path;

pub struct TerminalPage {
    image: Option<ImageUpload>,
    /// Answer given to the username prompt instead of reading stdin
    username: Option<String>,
    contribute_target: RefCell<Option<EmissionResults>>,
}

impl TerminalPage {
    pub fn new(image: Option<ImageUpload>, username: Option<String>) -> Self {
        Self {
            image,
            username,
            contribute_target: RefCell::new(None),
        }
    }

    /// Emission results bound to the last rendered contribute button
    pub fn take_contribute_target(&self) -> Option<EmissionResults> {
        self.contribute_target.borrow_mut().take()
    }
}

impl Page for TerminalPage {
    type Image = ImageUpload;

    fn attach_submit_handler(&self) {
        tracing::debug!("terminal page submits through the upload command");
    }

    fn selected_image(&self) -> Option<ImageUpload> {
        self.image.clone()
    }

    fn set_analysis_html(&self, html: &str) {
        println!("{}", html);
    }

    fn attach_contribute_handler(&self, emissions: EmissionResults) {
        *self.contribute_target.borrow_mut() = Some(emissions);
    }

    fn show_results(&self) {
        tracing::info!("analysis results rendered");
    }

    fn set_leaderboard_html(&self, html: &str) {
        println!("{}", html);
    }

    fn alert(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn prompt(&self, message: &str) -> Option<String> {
        if let Some(username) = &self.username {
            return Some(username.clone());
        }

        eprint!("{} ", message);
        let _ = std::io::stderr().flush();

        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }

    fn log_error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// Read an image file for upload
pub fn read_image(path: &Path) -> Result<ImageUpload> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(ImageUpload {
        content_type: content_type_for(&file_name).map(str::to_string),
        file_name,
        bytes,
    })
}

fn content_type_for(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}
