//! Browser fetch implementation of the page backend

use async_trait::async_trait;
use foodprint_core::controller::{CONTRIBUTION_PATH, IMAGE_FIELD, LEADERBOARD_PATH, UPLOAD_PATH};
use foodprint_core::{Backend, ContributionRequest, Error};
use gloo_net::http::{Request, Response};
use serde_json::Value;
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

/// Same-origin backend; paths resolve against the page URL
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchBackend;

fn js_error(err: JsValue) -> Error {
    Error::Request(format!("{:?}", err))
}

fn net_error(err: gloo_net::Error) -> Error {
    Error::Request(err.to_string())
}

async fn read_json(response: Response) -> Result<Value, Error> {
    let text = response.text().await.map_err(net_error)?;
    serde_json::from_str(&text).map_err(Error::InvalidJson)
}

#[async_trait(?Send)]
impl Backend for FetchBackend {
    type Image = File;

    async fn upload(&self, image: Option<File>) -> Result<Value, Error> {
        let form = FormData::new().map_err(js_error)?;
        match &image {
            Some(file) => form.append_with_blob_and_filename(IMAGE_FIELD, file, &file.name()),
            None => form.append_with_str(IMAGE_FIELD, ""),
        }
        .map_err(js_error)?;

        let response = Request::post(UPLOAD_PATH)
            .body(form)
            .map_err(net_error)?
            .send()
            .await
            .map_err(net_error)?;
        read_json(response).await
    }

    async fn add_contribution(&self, request: &ContributionRequest) -> Result<Value, Error> {
        let response = Request::post(CONTRIBUTION_PATH)
            .json(request)
            .map_err(net_error)?
            .send()
            .await
            .map_err(net_error)?;
        read_json(response).await
    }

    async fn leaderboard(&self) -> Result<Value, Error> {
        let response = Request::get(LEADERBOARD_PATH)
            .send()
            .await
            .map_err(net_error)?;
        read_json(response).await
    }
}
