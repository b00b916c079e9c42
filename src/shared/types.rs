use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Wire-level error body returned by every failing handler.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}
