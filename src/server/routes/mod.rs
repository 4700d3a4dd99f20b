mod categories;
mod questions;
mod quiz;

use serde::Serialize;

pub use categories::category_router;
pub use questions::questions_router;
pub use quiz::quiz_router;

/// Informational reply. Business-rule misses ("not found", "already exists")
/// omit `success` altogether and still go out as 200.
#[derive(Debug, Serialize)]
struct MessageResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    success: Option<bool>,
    message: &'static str,
}

impl MessageResponse {
    fn success(message: &'static str) -> Self {
        Self {
            success: Some(true),
            message,
        }
    }

    fn info(message: &'static str) -> Self {
        Self {
            success: None,
            message,
        }
    }
}
