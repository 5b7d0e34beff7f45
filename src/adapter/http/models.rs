//! Wire models for the data processing service

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::entities::dataset::{Row, UploadedDataset};
use crate::domain::error::ClientError;
use crate::domain::repositories::upload_repository::ChunkAck;

/// `register/` and `login/` response
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub token: Option<String>,
}

impl TokenResponse {
    pub fn into_token(self) -> Result<String, ClientError> {
        self.token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ClientError::Protocol("response did not include a token".to_string()))
    }
}

/// `upload/` response, and the final `upload-chunk/` response when the
/// server finished assembling the file
#[derive(Debug, Deserialize)]
pub struct DatasetResponse {
    #[serde(default)]
    pub data: Option<Vec<Row>>,
    #[serde(default)]
    pub data_types: Option<Map<String, Value>>,
}

impl DatasetResponse {
    pub fn into_dataset(self) -> Result<UploadedDataset, ClientError> {
        match (self.data, self.data_types) {
            (Some(rows), Some(types)) => Ok(UploadedDataset::from_type_map(rows, types)),
            (None, _) => Err(ClientError::Protocol(
                "response is missing `data`".to_string(),
            )),
            (_, None) => Err(ClientError::Protocol(
                "response is missing `data_types`".to_string(),
            )),
        }
    }
}

/// Chunk acks are free-form; only a body shaped like a dataset response
/// yields a dataset.
pub fn chunk_ack_from_value(value: Value) -> ChunkAck {
    if value.get("data").is_none() || value.get("data_types").is_none() {
        return ChunkAck::empty();
    }

    serde_json::from_value::<DatasetResponse>(value)
        .ok()
        .and_then(|response| response.into_dataset().ok())
        .map(ChunkAck::with_dataset)
        .unwrap_or_else(ChunkAck::empty)
}
