//! Conversion gateway
//!
//! Validates a compression request and turns a saved upload into a derived
//! AVIF artifact. The encode itself runs on the blocking pool under a
//! deadline so a wedged codec call cannot hold a request slot forever.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use avifpress_core::AppError;
use avifpress_processing::{codec_quality, encode_avif, EncodeError};
use avifpress_storage::ArtifactStore;

/// Transient, per-call compression parameters.
#[derive(Debug, Clone)]
pub struct CompressionRequest {
    /// Requested compression percentage, 0-100 inclusive.
    pub quality_pct: i64,
    /// Explicit output path; wins verbatim over the default naming scheme.
    pub output_override: Option<PathBuf>,
    pub lossless: bool,
}

impl CompressionRequest {
    pub fn new(quality_pct: i64) -> Self {
        CompressionRequest {
            quality_pct,
            output_override: None,
            lossless: false,
        }
    }
}

#[derive(Clone)]
pub struct Converter {
    store: Arc<ArtifactStore>,
    encode_timeout: Duration,
}

impl Converter {
    pub fn new(store: Arc<ArtifactStore>, encode_timeout: Duration) -> Self {
        Converter {
            store,
            encode_timeout,
        }
    }

    /// Convert `source` into a derived AVIF artifact and return its path.
    ///
    /// Validation happens before any filesystem or codec work; on any failure
    /// no derived file is written. No retries: a codec failure is terminal
    /// for the request.
    #[tracing::instrument(skip(self), fields(quality_pct = request.quality_pct))]
    pub async fn convert(
        &self,
        source: &Path,
        request: &CompressionRequest,
    ) -> Result<PathBuf, AppError> {
        if !tokio::fs::try_exists(source).await.unwrap_or(false) {
            return Err(AppError::NotFound(format!(
                "Source file does not exist: {}",
                source.display()
            )));
        }

        if !(0..=100).contains(&request.quality_pct) {
            return Err(AppError::Validation(format!(
                "Compression percentage must be between 0 and 100, got {}",
                request.quality_pct
            )));
        }

        let quality = codec_quality(request.quality_pct);

        self.store.ensure_derived_dir().await?;
        let output = self.store.resolve_derived_path(
            source,
            request.quality_pct,
            request.output_override.as_deref(),
        );

        let data = self.store.read(source).await?;
        let lossless = request.lossless;

        let encode_task =
            tokio::task::spawn_blocking(move || encode_avif(&data, quality, lossless));

        let encoded = tokio::time::timeout(self.encode_timeout, encode_task)
            .await
            .map_err(|_| {
                AppError::Timeout(format!(
                    "Encode did not finish within {}s",
                    self.encode_timeout.as_secs()
                ))
            })?
            .map_err(|e| AppError::Codec(format!("Encode task panicked: {}", e)))?
            .map_err(|e| match e {
                EncodeError::Decode(msg) | EncodeError::Encode(msg) => AppError::Codec(msg),
            })?;

        self.store.write_derived(&output, &encoded).await?;

        tracing::info!(
            source = %source.display(),
            output = %output.display(),
            quality_pct = request.quality_pct,
            output_bytes = encoded.len(),
            "Conversion complete"
        );

        Ok(output)
    }
}
