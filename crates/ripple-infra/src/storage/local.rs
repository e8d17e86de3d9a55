//! Best-effort deletion of orphaned image files on the local filesystem.

use std::path::{Component, Path, PathBuf};

use ripple_core::ports::ImageCleanup;

/// Deletes image files relative to a configured images directory.
///
/// Deletion runs on a spawned task; any failure (missing file,
/// permissions) is logged and swallowed, so cleanup can never fail or roll
/// back the content mutation that triggered it.
pub struct LocalImageCleanup {
    root: PathBuf,
}

impl LocalImageCleanup {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a stored image reference against the images directory.
    /// Absolute paths and parent-directory components are rejected.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path);
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, Component::ParentDir))
        {
            return None;
        }
        Some(self.root.join(relative))
    }
}

impl ImageCleanup for LocalImageCleanup {
    fn schedule_delete(&self, path: &str) {
        let Some(full_path) = self.resolve(path) else {
            tracing::warn!(path, "refusing to delete image outside the images directory");
            return;
        };

        tokio::spawn(async move {
            match tokio::fs::remove_file(&full_path).await {
                Ok(()) => {
                    tracing::debug!(path = %full_path.display(), "orphaned image removed");
                }
                Err(err) => {
                    tracing::warn!(
                        path = %full_path.display(),
                        error = %err,
                        "image cleanup failed"
                    );
                }
            }
        });
    }
}
