use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SnapTokenResponse {
    pub token: String,
    pub redirect_url: Option<String>,
}
