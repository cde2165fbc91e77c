use crate::domain::response::upload::UploadResponse;
use async_trait::async_trait;
use shared::{domain::responses::ApiResponse, errors::ServiceError};
use std::sync::Arc;

pub type DynUploadService = Arc<dyn UploadServiceTrait + Send + Sync>;

#[async_trait]
pub trait UploadServiceTrait {
    async fn store_image(
        &self,
        file_name: Option<&str>,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<ApiResponse<UploadResponse>, ServiceError>;
}
