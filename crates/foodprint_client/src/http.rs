//! reqwest implementation of the page backend

use anyhow::Result;
use async_trait::async_trait;
use foodprint_core::controller::{CONTRIBUTION_PATH, IMAGE_FIELD, LEADERBOARD_PATH, UPLOAD_PATH};
use foodprint_core::{Backend, ContributionRequest, Error, ImageUpload};
use reqwest::multipart::{Form, Part};
use serde_json::Value;

/// Configuration for the HTTP backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the analysis server (default: http://127.0.0.1:5000)
    pub base_url: String,
    /// Request timeout in seconds (default: none, requests may wait forever)
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_secs: None,
        }
    }
}

/// Analysis server client
pub struct HttpBackend {
    config: ClientConfig,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Create a new backend client
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self { config, client })
    }

    /// Create a client with default configuration
    pub fn default_client() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Send a request and parse its body as JSON, whatever the status
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, Error> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;
        tracing::debug!(%status, bytes = body.len(), "response received");

        serde_json::from_slice(&body).map_err(Error::InvalidJson)
    }
}

fn image_form(image: Option<ImageUpload>) -> Result<Form, Error> {
    let form = Form::new();
    let Some(image) = image else {
        return Ok(form.text(IMAGE_FIELD, ""));
    };

    let mut part = Part::bytes(image.bytes).file_name(image.file_name);
    if let Some(content_type) = image.content_type {
        part = part
            .mime_str(&content_type)
            .map_err(|e| Error::Request(e.to_string()))?;
    }
    Ok(form.part(IMAGE_FIELD, part))
}

#[async_trait(?Send)]
impl Backend for HttpBackend {
    type Image = ImageUpload;

    async fn upload(&self, image: Option<ImageUpload>) -> Result<Value, Error> {
        let url = self.url(UPLOAD_PATH);
        tracing::debug!(%url, has_image = image.is_some(), "uploading fridge image");

        let form = image_form(image)?;
        self.send(self.client.post(&url).multipart(form)).await
    }

    async fn add_contribution(&self, request: &ContributionRequest) -> Result<Value, Error> {
        let url = self.url(CONTRIBUTION_PATH);
        tracing::debug!(%url, username = %request.username, "submitting contribution");

        self.send(self.client.post(&url).json(request)).await
    }

    async fn leaderboard(&self) -> Result<Value, Error> {
        let url = self.url(LEADERBOARD_PATH);
        tracing::debug!(%url, "fetching leaderboard");

        self.send(self.client.get(&url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Multipart,
        http::StatusCode,
        response::Json,
        routing::{get, post},
        Router,
    };
    use foodprint_core::{EmissionResults, UploadOutcome};
    use serde_json::json;

    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn stub_upload(mut multipart: Multipart) -> (StatusCode, Json<Value>) {
        let mut fields = Vec::new();
        let mut image = None;
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().map(str::to_string);
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.unwrap();

            fields.push(json!({"name": name, "file": file_name, "size": bytes.len()}));
            if name.as_deref() == Some(IMAGE_FIELD) {
                if let Some(file_name) = file_name {
                    image = Some((file_name, content_type.unwrap_or_default(), bytes.len()));
                }
            }
        }

        let Some((file_name, content_type, size)) = image else {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "No image uploaded", "fields": fields})),
            );
        };
        (
            StatusCode::OK,
            Json(json!({
                "detected_items": [{
                    "name": format!("{} {}", file_name, content_type),
                    "quantity": size,
                    "days_until_expiry": 2
                }],
                "recommended_recipes": [],
                "emission_results": {
                    "avoided_emissions_kg": 1.1,
                    "items_saved": 1,
                    "total_items": 1,
                    "waste_prevented_percentage": 100.0
                },
                "fields": fields
            })),
        )
    }

    async fn stub_contribution(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if body["username"].as_str().unwrap_or_default().is_empty() {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Missing username or emission results"})),
            );
        }
        (StatusCode::OK, Json(json!({"success": true, "echo": body})))
    }

    fn stub_router() -> Router {
        Router::new()
            .route("/upload", post(stub_upload))
            .route("/add_contribution", post(stub_contribution))
            .route(
                "/leaderboard",
                get(|| async {
                    Json(json!([
                        {"username": "A", "total_emissions_avoided": 5},
                        {"username": "B", "total_emissions_avoided": 2}
                    ]))
                }),
            )
    }

    fn backend(base_url: String) -> HttpBackend {
        HttpBackend::new(ClientConfig {
            base_url,
            timeout_secs: Some(5),
        })
        .unwrap()
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.timeout_secs, None);
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let backend = backend("http://localhost:5000/".to_string());
        assert_eq!(backend.url("/upload"), "http://localhost:5000/upload");
    }

    #[tokio::test]
    async fn test_upload_sends_image_field() {
        let backend = backend(spawn(stub_router()).await);
        let image = ImageUpload {
            file_name: "fridge.jpg".to_string(),
            content_type: Some("image/jpeg".to_string()),
            bytes: vec![0xff, 0xd8, 0xff, 0xe0],
        };

        let body = backend.upload(Some(image)).await.unwrap();

        assert_eq!(
            body["fields"],
            json!([{"name": IMAGE_FIELD, "file": "fridge.jpg", "size": 4}])
        );
        match UploadOutcome::from_json(body).unwrap() {
            UploadOutcome::Analysis(report) => {
                assert_eq!(report.detected_items[0].name, "fridge.jpg image/jpeg");
                assert_eq!(report.detected_items[0].quantity, 4.0);
            }
            other => panic!("expected analysis, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upload_without_image_decodes_error_body() {
        let backend = backend(spawn(stub_router()).await);

        let body = backend.upload(None).await.unwrap();

        assert_eq!(
            body["fields"],
            json!([{"name": IMAGE_FIELD, "file": null, "size": 0}])
        );
        assert_eq!(
            UploadOutcome::from_json(body).unwrap(),
            UploadOutcome::Rejected("No image uploaded".to_string())
        );
    }

    #[tokio::test]
    async fn test_add_contribution_posts_json() {
        let backend = backend(spawn(stub_router()).await);
        let request = ContributionRequest {
            username: "Sari".to_string(),
            emission_results: EmissionResults {
                avoided_emissions_kg: 3.3,
                items_saved: 3.0,
                total_items: 4.0,
                waste_prevented_percentage: 75.0,
            },
        };

        let body = backend.add_contribution(&request).await.unwrap();

        assert_eq!(body["success"], true);
        assert_eq!(body["echo"]["username"], "Sari");
        assert_eq!(body["echo"]["emission_results"]["items_saved"], 3.0);
    }

    #[tokio::test]
    async fn test_add_contribution_rejection_is_not_a_transport_error() {
        let backend = backend(spawn(stub_router()).await);
        let request = ContributionRequest {
            username: String::new(),
            emission_results: EmissionResults {
                avoided_emissions_kg: 0.0,
                items_saved: 0.0,
                total_items: 0.0,
                waste_prevented_percentage: 0.0,
            },
        };

        let body = backend.add_contribution(&request).await.unwrap();
        assert_eq!(body["error"], "Missing username or emission results");
    }

    #[tokio::test]
    async fn test_leaderboard_get() {
        let backend = backend(spawn(stub_router()).await);

        let body = backend.leaderboard().await.unwrap();
        let entries = foodprint_core::leaderboard_from_json(body).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].username, "A");
    }

    #[tokio::test]
    async fn test_non_json_body_is_invalid_json() {
        let app = Router::new().route("/leaderboard", get(|| async { "<html>oops</html>" }));
        let backend = backend(spawn(app).await);

        let err = backend.leaderboard().await.unwrap_err();
        assert!(matches!(err, Error::InvalidJson(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_request_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = backend(format!("http://{}", addr));
        let err = backend.leaderboard().await.unwrap_err();
        assert!(matches!(err, Error::Request(_)));
    }
}
