//! Filesystem asset store

use async_trait::async_trait;
use imagestream_domain::{AssetStore, AssetStoreError};
use std::path::{Path, PathBuf};

/// Asset store writing uploads into a single destination directory.
///
/// Names are content-addressed upstream, so concurrent submissions only
/// collide when they carry byte-identical content; the last writer wins.
pub struct FsAssetStore {
    image_dir: PathBuf,
}

impl FsAssetStore {
    /// Create a store rooted at `image_dir`, creating the directory if needed
    pub fn new(image_dir: impl Into<PathBuf>) -> Result<Self, AssetStoreError> {
        let image_dir = image_dir.into();
        std::fs::create_dir_all(&image_dir)?;
        Ok(Self { image_dir })
    }

    /// Destination directory for stored assets
    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }
}

#[async_trait]
impl AssetStore for FsAssetStore {
    async fn read_upload(&self, temp_path: &Path) -> Result<Vec<u8>, AssetStoreError> {
        Ok(tokio::fs::read(temp_path).await?)
    }

    async fn store(
        &self,
        temp_path: &Path,
        computed_name: &str,
        content: &[u8],
    ) -> Result<PathBuf, AssetStoreError> {
        let destination = self.image_dir.join(computed_name);
        tokio::fs::write(&destination, content).await?;

        // The temp upload is no longer needed; a failed delete leaks a temp
        // file but must not fail the submission.
        if let Err(error) = tokio::fs::remove_file(temp_path).await {
            tracing::warn!(
                path = %temp_path.display(),
                error = %error,
                "Error deleting temp upload"
            );
        }

        Ok(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn store_writes_asset_and_removes_temp_file() {
        let temp = TempDir::new().unwrap();
        let temp_upload = temp.path().join("upload-1");
        tokio::fs::write(&temp_upload, b"image bytes").await.unwrap();

        let store = FsAssetStore::new(temp.path().join("images")).unwrap();
        let content = store.read_upload(&temp_upload).await.unwrap();
        assert_eq!(content, b"image bytes");

        let destination = store.store(&temp_upload, "abc.png", &content).await.unwrap();

        assert_eq!(destination, temp.path().join("images").join("abc.png"));
        assert_eq!(tokio::fs::read(&destination).await.unwrap(), b"image bytes");
        assert!(!temp_upload.exists());
    }

    #[tokio::test]
    async fn store_succeeds_when_temp_file_is_already_gone() {
        let temp = TempDir::new().unwrap();
        let store = FsAssetStore::new(temp.path().join("images")).unwrap();

        let missing = temp.path().join("never-existed");
        let destination = store.store(&missing, "abc.png", b"bytes").await.unwrap();

        assert!(destination.exists());
    }

    #[tokio::test]
    async fn read_upload_fails_on_missing_file() {
        let temp = TempDir::new().unwrap();
        let store = FsAssetStore::new(temp.path().join("images")).unwrap();

        let result = store.read_upload(&temp.path().join("missing")).await;

        assert!(matches!(result, Err(AssetStoreError::Io(_))));
    }

    #[tokio::test]
    async fn identical_content_overwrites_silently() {
        let temp = TempDir::new().unwrap();
        let store = FsAssetStore::new(temp.path().join("images")).unwrap();

        store
            .store(&temp.path().join("t1"), "same.png", b"first")
            .await
            .unwrap();
        let destination = store
            .store(&temp.path().join("t2"), "same.png", b"second")
            .await
            .unwrap();

        assert_eq!(tokio::fs::read(&destination).await.unwrap(), b"second");
    }
}
