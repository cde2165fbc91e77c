use crate::{abstract_trait::upload::UploadServiceTrait, domain::response::upload::UploadResponse};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    config::UploadConfig,
    domain::responses::ApiResponse,
    errors::ServiceError,
    utils::{Method, ServiceTracer},
};
use std::path::{Path, PathBuf};
use tracing::{Instrument, error, info};
use uuid::Uuid;

const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Stores images on local disk; files are served back under `/uploads`.
#[derive(Clone)]
pub struct UploadService {
    dir: PathBuf,
    public_base_url: String,
    max_bytes: usize,
    tracer: ServiceTracer,
}

fn extension_for(file_name: Option<&str>, content_type: Option<&str>) -> Option<&'static str> {
    let from_name = file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .and_then(|ext| ALLOWED_EXTENSIONS.iter().copied().find(|a| *a == ext));

    from_name.or_else(|| match content_type? {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        _ => None,
    })
}

impl UploadService {
    pub fn new(config: &UploadConfig, registry: &mut Registry) -> Self {
        Self {
            dir: PathBuf::from(&config.dir),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
            max_bytes: config.max_bytes,
            tracer: ServiceTracer::new("upload_service", registry),
        }
    }
}

#[async_trait]
impl UploadServiceTrait for UploadService {
    async fn store_image(
        &self,
        file_name: Option<&str>,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<ApiResponse<UploadResponse>, ServiceError> {
        let ctx = self.tracer.start("store_image");

        let result = async {
            if bytes.is_empty() {
                return Err(ServiceError::validation("No file uploaded"));
            }
            if bytes.len() > self.max_bytes {
                return Err(ServiceError::validation(format!(
                    "File exceeds the {} byte limit",
                    self.max_bytes
                )));
            }

            let ext = extension_for(file_name, content_type).ok_or_else(|| {
                ServiceError::validation("Only jpg, jpeg, png and webp images are allowed")
            })?;

            let filename = format!("{}.{ext}", Uuid::new_v4());
            let path = self.dir.join(&filename);

            tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
                error!("❌ Cannot create upload dir {}: {e}", self.dir.display());
                ServiceError::Internal("Failed to store file".into())
            })?;
            tokio::fs::write(&path, bytes).await.map_err(|e| {
                error!("❌ Cannot write {}: {e}", path.display());
                ServiceError::Internal("Failed to store file".into())
            })?;

            info!("🖼️ Stored upload {} ({} bytes)", filename, bytes.len());

            Ok::<_, ServiceError>(ApiResponse::success(
                "Image uploaded successfully",
                UploadResponse {
                    url: format!("{}/uploads/{filename}", self.public_base_url),
                    filename,
                    size: bytes.len(),
                },
            ))
        }
        .instrument(ctx.span.clone())
        .await;

        self.tracer
            .finish(&ctx, Method::Post, result, "Image uploaded successfully")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(dir: &Path, max_bytes: usize) -> UploadService {
        let mut registry = Registry::default();
        UploadService::new(
            &UploadConfig {
                dir: dir.to_string_lossy().into_owned(),
                public_base_url: "http://localhost:5000/".into(),
                max_bytes,
            },
            &mut registry,
        )
    }

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("marketplace-uploads-{}", Uuid::new_v4()))
    }

    #[test]
    fn extension_comes_from_name_then_content_type() {
        assert_eq!(extension_for(Some("avatar.PNG"), None), Some("png"));
        assert_eq!(extension_for(Some("blob"), Some("image/jpeg")), Some("jpg"));
        assert_eq!(extension_for(Some("script.svg"), Some("image/svg+xml")), None);
        assert_eq!(extension_for(None, None), None);
    }

    #[tokio::test]
    async fn image_is_written_and_url_returned() {
        let dir = scratch_dir();
        let res = service(&dir, 1024)
            .store_image(Some("me.jpg"), Some("image/jpeg"), b"\xff\xd8\xff")
            .await
            .unwrap();

        assert!(res.data.url.starts_with("http://localhost:5000/uploads/"));
        assert!(res.data.filename.ends_with(".jpg"));
        assert_eq!(
            tokio::fs::read(dir.join(&res.data.filename)).await.unwrap(),
            b"\xff\xd8\xff"
        );

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn oversized_empty_and_foreign_files_are_rejected() {
        let dir = scratch_dir();
        let svc = service(&dir, 4);

        for (name, bytes) in [
            ("big.png", &b"12345"[..]),
            ("empty.png", &b""[..]),
            ("doc.pdf", &b"%PDF"[..]),
        ] {
            let err = svc.store_image(Some(name), None, bytes).await.unwrap_err();
            assert!(matches!(err, ServiceError::Validation(_)), "{name}");
        }
        assert!(!dir.exists());
    }
}
