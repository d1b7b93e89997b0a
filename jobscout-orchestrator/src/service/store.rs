//! Artifact storage
//!
//! The output directory is opened once at startup and handed to the run
//! service explicitly. Every run allocates its own target inside it, so
//! concurrent runs never share a file.

use async_trait::async_trait;
use jobscout_core::domain::{RunTarget, is_artifact_file_name};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// Where run artifacts live
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Allocates a fresh, never-reused target for a run
    fn allocate(&self, slug: &str) -> RunTarget;

    /// Whether the worker produced the artifact
    async fn exists(&self, target: &RunTarget) -> bool;

    /// Reads the whole artifact
    async fn read(&self, target: &RunTarget) -> io::Result<Vec<u8>>;

    /// Removes a partial or abandoned artifact, if any
    async fn discard(&self, target: &RunTarget);
}

/// Filesystem output directory
#[derive(Debug)]
pub struct OutputDir {
    root: PathBuf,
    sequence: AtomicU64,
}

impl OutputDir {
    /// Opens the directory, creating it if missing
    ///
    /// The stored root is canonical, so every target path is absolute.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        std::fs::create_dir_all(path)?;
        let root = std::fs::canonicalize(path)?;
        Ok(Self {
            root,
            sequence: AtomicU64::new(0),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a public download name to a path inside the directory
    ///
    /// Returns `None` for anything that is not a bare artifact file name.
    pub fn resolve_download(&self, file_name: &str) -> Option<PathBuf> {
        is_artifact_file_name(file_name).then(|| self.root.join(file_name))
    }

    /// `<unix-millis>_<sequence>`; the sequence keeps same-millisecond runs apart
    fn next_token(&self) -> String {
        let millis = chrono::Utc::now().timestamp_millis();
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!("{}_{}", millis, sequence)
    }
}

#[async_trait]
impl ArtifactStore for OutputDir {
    fn allocate(&self, slug: &str) -> RunTarget {
        RunTarget::new(&self.root, slug, &self.next_token())
    }

    async fn exists(&self, target: &RunTarget) -> bool {
        tokio::fs::metadata(&target.output_path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }

    async fn read(&self, target: &RunTarget) -> io::Result<Vec<u8>> {
        tokio::fs::read(&target.output_path).await
    }

    async fn discard(&self, target: &RunTarget) {
        match tokio::fs::remove_file(&target.output_path).await {
            Ok(()) => debug!("Removed partial artifact {}", target.output_path.display()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => warn!(
                "Failed to remove artifact {}: {}",
                target.output_path.display(),
                err
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_and_canonicalizes() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("a").join("downloads");
        let dir = OutputDir::open(&nested).unwrap();
        assert!(nested.is_dir());
        assert!(dir.root().is_absolute());
    }

    #[test]
    fn test_allocate_never_repeats() {
        let temp = tempfile::tempdir().unwrap();
        let dir = OutputDir::open(temp.path()).unwrap();

        let targets: Vec<RunTarget> = (0..100).map(|_| dir.allocate("jobs")).collect();
        let mut paths: Vec<&PathBuf> = targets.iter().map(|t| &t.output_path).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), 100);

        for target in &targets {
            assert!(target.output_path.starts_with(dir.root()));
            assert!(target.output_id.starts_with("jobs_"));
        }
    }

    #[test]
    fn test_resolve_download_rejects_traversal() {
        let temp = tempfile::tempdir().unwrap();
        let dir = OutputDir::open(temp.path()).unwrap();

        assert_eq!(
            dir.resolve_download("jobs_1_0.xlsx"),
            Some(dir.root().join("jobs_1_0.xlsx"))
        );
        assert_eq!(dir.resolve_download("../jobs_1_0.xlsx"), None);
        assert_eq!(dir.resolve_download("/etc/passwd"), None);
        assert_eq!(dir.resolve_download("nested/jobs.xlsx"), None);
    }

    #[tokio::test]
    async fn test_exists_read_discard() {
        let temp = tempfile::tempdir().unwrap();
        let dir = OutputDir::open(temp.path()).unwrap();
        let target = dir.allocate("hr_manager");

        assert!(!dir.exists(&target).await);

        tokio::fs::write(&target.output_path, b"data").await.unwrap();
        assert!(dir.exists(&target).await);
        assert_eq!(dir.read(&target).await.unwrap(), b"data");

        dir.discard(&target).await;
        assert!(!dir.exists(&target).await);

        // Discarding twice is harmless
        dir.discard(&target).await;
    }
}
