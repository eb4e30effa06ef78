/// Video room client — the single point of entry for the third-party
/// video-conferencing API. Interview scheduling provisions a room here and
/// stores the resulting name/URL on the interview record.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::errors::AppError;

const ROOM_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum VideoError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

impl From<VideoError> for AppError {
    fn from(e: VideoError) -> Self {
        AppError::Video(e.to_string())
    }
}

#[derive(Debug, Serialize)]
struct CreateRoomRequest<'a> {
    name: &'a str,
    privacy: &'a str,
}

/// A provisioned video room.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoRoom {
    pub name: String,
    pub url: String,
}

/// The single client used for all video API calls.
#[derive(Clone)]
pub struct VideoClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl VideoClient {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(ROOM_REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_url,
            api_key,
        }
    }

    /// Creates a private room named after the interview id.
    pub async fn create_room(&self, name: &str) -> Result<VideoRoom, VideoError> {
        let response = self
            .client
            .post(format!("{}/rooms", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&CreateRoomRequest {
                name,
                privacy: "private",
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VideoError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let room: VideoRoom = response.json().await?;
        debug!("Provisioned video room '{}'", room.name);
        Ok(room)
    }

    /// Deletes a room. 404 is tolerated so cancellation stays idempotent.
    pub async fn delete_room(&self, name: &str) -> Result<(), VideoError> {
        let response = self
            .client
            .delete(format!("{}/rooms/{}", self.api_url, name))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() && status.as_u16() != 404 {
            let body = response.text().await.unwrap_or_default();
            return Err(VideoError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(())
    }
}
