//! Local filesystem artifact store
//!
//! Owns the two working directories of the service: `incoming` for raw
//! uploads and `derived` for encoded outputs. Both are created on
//! construction and swept on a fixed age policy by the reaper.

use std::path::{Path, PathBuf};
use std::time::Duration;

use avifpress_core::AppError;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::naming;

/// Result of one sweep pass over both directories.
#[derive(Debug, Default, Clone, Copy)]
pub struct SweepStats {
    pub examined: usize,
    pub removed: usize,
    pub failed: usize,
}

#[derive(Clone, Debug)]
pub struct ArtifactStore {
    incoming: PathBuf,
    derived: PathBuf,
}

impl ArtifactStore {
    /// Create the store, ensuring both directories exist. Creation is
    /// idempotent; a denied creation is fatal to the enclosing startup.
    pub async fn new(
        incoming: impl Into<PathBuf>,
        derived: impl Into<PathBuf>,
    ) -> Result<Self, AppError> {
        let incoming = incoming.into();
        let derived = derived.into();

        for dir in [&incoming, &derived] {
            fs::create_dir_all(dir).await.map_err(|e| {
                AppError::Filesystem(format!(
                    "Failed to create directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
        }

        Ok(ArtifactStore { incoming, derived })
    }

    pub fn incoming_dir(&self) -> &Path {
        &self.incoming
    }

    pub fn derived_dir(&self) -> &Path {
        &self.derived
    }

    /// Persist an uploaded blob under a collision-resistant name and return
    /// its path.
    pub async fn save_incoming(
        &self,
        original_name: &str,
        data: &[u8],
    ) -> Result<PathBuf, AppError> {
        let path = self.incoming.join(naming::incoming_file_name(original_name));
        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            AppError::Filesystem(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        file.write_all(data).await.map_err(|e| {
            AppError::Filesystem(format!("Failed to write file {}: {}", path.display(), e))
        })?;
        file.sync_all().await.map_err(|e| {
            AppError::Filesystem(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Saved incoming artifact"
        );

        Ok(path)
    }

    /// Re-create the derived directory if something removed it since startup.
    pub async fn ensure_derived_dir(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.derived).await.map_err(|e| {
            AppError::Filesystem(format!(
                "Failed to create directory {}: {}",
                self.derived.display(),
                e
            ))
        })
    }

    /// Resolve the output path for a derived artifact. Pure; see
    /// [`naming::resolve_derived_path`].
    pub fn resolve_derived_path(
        &self,
        source: &Path,
        quality_pct: i64,
        output_override: Option<&Path>,
    ) -> PathBuf {
        naming::resolve_derived_path(&self.derived, source, quality_pct, output_override)
    }

    /// Write an encoded output. Only called after a successful encode, so a
    /// codec failure never leaves a partial file behind.
    pub async fn write_derived(&self, path: &Path, data: &[u8]) -> Result<(), AppError> {
        let mut file = fs::File::create(path).await.map_err(|e| {
            AppError::Filesystem(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        file.write_all(data).await.map_err(|e| {
            AppError::Filesystem(format!("Failed to write file {}: {}", path.display(), e))
        })?;
        file.sync_all().await.map_err(|e| {
            AppError::Filesystem(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            size_bytes = data.len(),
            "Saved derived artifact"
        );

        Ok(())
    }

    pub async fn read(&self, path: &Path) -> Result<Vec<u8>, AppError> {
        if !fs::try_exists(path).await.unwrap_or(false) {
            return Err(AppError::NotFound(path.display().to_string()));
        }
        fs::read(path).await.map_err(|e| {
            AppError::Filesystem(format!("Failed to read file {}: {}", path.display(), e))
        })
    }

    /// Delete every artifact in both directories whose modification time is
    /// older than `retention`. Per-file failures are logged and counted, never
    /// raised; a sweep always runs to completion.
    pub async fn sweep_older_than(&self, retention: Duration) -> SweepStats {
        let mut stats = SweepStats::default();
        for dir in [self.incoming.clone(), self.derived.clone()] {
            self.sweep_dir(&dir, retention, &mut stats).await;
        }
        stats
    }

    async fn sweep_dir(&self, dir: &Path, retention: Duration, stats: &mut SweepStats) {
        let mut entries = match fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "Failed to read directory during sweep");
                stats.failed += 1;
                return;
            }
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "Failed to read directory entry during sweep");
                    stats.failed += 1;
                    break;
                }
            };

            let path = entry.path();
            stats.examined += 1;

            let age = match entry.metadata().await.and_then(|m| m.modified()) {
                Ok(modified) => modified.elapsed().unwrap_or_default(),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to stat artifact during sweep");
                    stats.failed += 1;
                    continue;
                }
            };

            if age <= retention {
                continue;
            }

            match fs::remove_file(&path).await {
                Ok(()) => {
                    tracing::debug!(
                        path = %path.display(),
                        age_secs = age.as_secs(),
                        "Removed expired artifact"
                    );
                    stats.removed += 1;
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to delete expired artifact");
                    stats.failed += 1;
                }
            }
        }
    }
}
