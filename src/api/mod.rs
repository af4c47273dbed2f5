pub mod indexes;
pub mod search;
pub mod server;
pub mod ui;

use serde::Serialize;

/// Error body returned by the JSON endpoints / JSON 接口的错误响应体
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
