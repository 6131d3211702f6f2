//! The one outbound call: a multipart POST to the processing endpoint.

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use shared::{
    domain::SelectedFile,
    error::{FormError, PROCESSING_FAILED_MESSAGE},
    protocol::{ProcessResponse, SCRIPT_FIELD, VIDEOS_FIELD},
};
use tracing::{debug, warn};

use crate::selection::read_file_bytes;

#[async_trait]
pub trait ProcessingBackend: Send + Sync {
    async fn process(
        &self,
        script: &SelectedFile,
        videos: &[SelectedFile],
    ) -> Result<ProcessResponse, FormError>;
}

pub struct HttpProcessingClient {
    http: Client,
    endpoint: String,
}

impl HttpProcessingClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    async fn build_form(
        &self,
        script: &SelectedFile,
        videos: &[SelectedFile],
    ) -> Result<Form, FormError> {
        let mut form = Form::new().part(SCRIPT_FIELD, file_part(script).await?);
        for video in videos {
            form = form.part(VIDEOS_FIELD, file_part(video).await?);
        }
        Ok(form)
    }
}

async fn file_part(file: &SelectedFile) -> Result<Part, FormError> {
    let bytes = read_file_bytes(file)
        .await
        .map_err(|err| FormError::transport(format!("{err:#}")))?;
    let part = Part::bytes(bytes).file_name(file.name.clone());
    if file.mime_type.is_empty() {
        return Ok(part);
    }
    part.mime_str(&file.mime_type)
        .map_err(|err| FormError::transport(err.to_string()))
}

#[async_trait]
impl ProcessingBackend for HttpProcessingClient {
    async fn process(
        &self,
        script: &SelectedFile,
        videos: &[SelectedFile],
    ) -> Result<ProcessResponse, FormError> {
        let form = self.build_form(script, videos).await?;
        debug!(
            endpoint = %self.endpoint,
            videos = videos.len(),
            "posting processing request"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|err| FormError::transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "processing endpoint returned failure status");
            return Err(FormError::transport(PROCESSING_FAILED_MESSAGE));
        }

        response
            .json::<ProcessResponse>()
            .await
            .map_err(|err| FormError::transport(err.to_string()))
    }
}
