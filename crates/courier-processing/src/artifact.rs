//! Locally materialized artifacts.
//!
//! A [`PendingArtifact`] owns a file in the work directory and removes it when dropped,
//! so every exit path of the pipeline (including `?` and panics) cleans up after itself.

use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use tokio::io::AsyncWriteExt;

#[derive(Debug)]
pub struct PendingArtifact {
    file_name: String,
    path: TempPath,
}

impl PendingArtifact {
    /// Create `{work_dir}/{file_name}` exclusively and write `data` into it.
    ///
    /// Fails with `AlreadyExists` instead of overwriting a file another call owns.
    pub async fn create(work_dir: &Path, file_name: &str, data: &[u8]) -> io::Result<Self> {
        if file_name.is_empty() || file_name.contains(['/', '\\']) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid artifact file name: {:?}", file_name),
            ));
        }

        tokio::fs::create_dir_all(work_dir).await?;

        let named = tempfile::Builder::new()
            .prefix(file_name)
            .suffix("")
            .rand_bytes(0)
            .tempfile_in(work_dir)?;
        let (file, path) = named.into_parts();

        let mut file = tokio::fs::File::from_std(file);
        file.write_all(data).await?;
        file.flush().await?;

        tracing::debug!(
            path = %path.display(),
            size_bytes = data.len(),
            "Pending artifact written"
        );

        Ok(Self {
            file_name: file_name.to_string(),
            path,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size on disk, as reported by the filesystem.
    pub async fn len(&self) -> io::Result<u64> {
        Ok(tokio::fs::metadata(&self.path).await?.len())
    }

    pub async fn read(&self) -> io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }

    /// Delete the file now and report failures, instead of silently on drop.
    pub fn close(self) -> io::Result<()> {
        self.path.close()
    }

    /// Delete the file, logging instead of returning a failure.
    pub fn discard(self) {
        let path: PathBuf = self.path.to_path_buf();
        if let Err(e) = self.close() {
            tracing::warn!(error = %e, path = %path.display(), "Failed to remove local artifact");
        }
    }
}
