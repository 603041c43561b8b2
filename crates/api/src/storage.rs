//! Local-directory image store for card images.
//!
//! The store is an opaque blob store keyed by generated filename: callers
//! get back a name, persist only that name, and resolve it to a URL when
//! rendering. Files are served read-only under `/uploads` with caching
//! disabled (see the router setup).

use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Extensions accepted for stored images; anything else is stored as
/// `.bin` so a crafted filename cannot smuggle a path or script suffix.
const KNOWN_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
    public_base_url: String,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    /// Create the storage directory if it does not exist yet.
    pub async fn ensure_root(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Write `bytes` under a generated filename and return that filename.
    ///
    /// Only the extension of `original_name` survives, and only when it is
    /// a known image extension.
    pub async fn store(&self, original_name: &str, bytes: &[u8]) -> std::io::Result<String> {
        let ext = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .filter(|e| KNOWN_EXTENSIONS.contains(&e.as_str()))
            .unwrap_or_else(|| "bin".to_string());

        let filename = format!("{}.{ext}", Uuid::new_v4().simple());
        tokio::fs::write(self.root.join(&filename), bytes).await?;
        Ok(filename)
    }

    /// Remove a stored file. Callers treat failure as best-effort cleanup:
    /// log it, never fail the parent request.
    pub async fn delete(&self, filename: &str) -> std::io::Result<()> {
        tokio::fs::remove_file(self.root.join(filename)).await
    }

    /// The absolute URL a stored filename is served under.
    pub fn url(&self, filename: &str) -> String {
        format!("{}/uploads/{filename}", self.public_base_url)
    }

    /// The directory served under `/uploads`.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_and_delete_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ImageStore::new(dir.path(), "http://localhost:4000");
        store.ensure_root().await.expect("ensure_root");

        let name = store.store("photo.PNG", b"fake-bytes").await.expect("store");
        assert!(name.ends_with(".png"), "extension is normalized: {name}");

        let on_disk = dir.path().join(&name);
        assert_eq!(std::fs::read(&on_disk).expect("read back"), b"fake-bytes");

        store.delete(&name).await.expect("delete");
        assert!(!on_disk.exists());
    }

    #[tokio::test]
    async fn unknown_extension_is_neutralized() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ImageStore::new(dir.path(), "http://localhost:4000");
        store.ensure_root().await.expect("ensure_root");

        let name = store.store("../evil.sh", b"x").await.expect("store");
        assert!(name.ends_with(".bin"), "suspect extension becomes .bin: {name}");
        assert!(!name.contains(".."));
    }

    #[test]
    fn url_is_absolute() {
        let store = ImageStore::new("uploads", "https://boards.example.com");
        assert_eq!(
            store.url("abc.png"),
            "https://boards.example.com/uploads/abc.png"
        );
    }
}
