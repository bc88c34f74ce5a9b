use serde::{Deserialize, Serialize};

use crate::domain::InvalidPayloadRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<InvalidPayloadRange> for ApiError {
    fn from(value: InvalidPayloadRange) -> Self {
        Self::new(ErrorCode::Validation, value.to_string())
    }
}
