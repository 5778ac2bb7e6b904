//! Screenshot evidence attached to submitted results.
//!
//! Clients send screenshots inline as base64 data URLs. We decode them once on
//! submission, park the bytes on disk next to the JSON collections and keep only
//! the generated filename in the stored records.

use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use uuid::Uuid;

use crate::store::StoreError;

const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpeg", "jpg", "gif", "webp"];

#[derive(Clone)]
pub struct EvidenceStore {
    dir: PathBuf,
}

impl EvidenceStore {
    pub async fn new(dir: PathBuf) -> Result<Self, StoreError> {
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    /// Decode a `data:image/<ext>;base64,...` payload and persist it under the
    /// evidence directory. Returns the stored filename, or None when the value
    /// is not a data URL (already-stored references pass through untouched).
    pub async fn store_image(&self, key: Uuid, data_url: &str) -> Result<Option<String>, StoreError> {
        let Some(rest) = data_url.strip_prefix("data:image/") else {
            return Ok(None);
        };
        let Some((ext, payload)) = rest.split_once(";base64,") else {
            return Ok(None);
        };
        let ext = if ALLOWED_EXTENSIONS.contains(&ext) {
            ext
        } else {
            "png"
        };

        let bytes = BASE64.decode(payload.trim()).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e)
        })?;

        let filename = format!("{}.{}", key, ext);
        tokio::fs::write(self.dir.join(&filename), bytes).await?;
        Ok(Some(filename))
    }

    /// Read a stored evidence file by name. The name is reduced to its final
    /// path component so a crafted reference cannot escape the directory.
    pub async fn read(&self, name: &str) -> Result<(Vec<u8>, &'static str), StoreError> {
        let name = name.rsplit(['/', '\\']).next().unwrap_or(name);
        let path = self.dir.join(name);
        let bytes = tokio::fs::read(&path).await?;

        let content_type = match path.extension().and_then(|e| e.to_str()) {
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            _ => "image/png",
        };
        Ok((bytes, content_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("evidence-test-{}", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn decodes_and_stores_data_url() {
        let store = EvidenceStore::new(temp_dir()).await.unwrap();
        let key = Uuid::new_v4();
        // "hello" in base64
        let stored = store
            .store_image(key, "data:image/png;base64,aGVsbG8=")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, format!("{}.png", key));

        let (bytes, content_type) = store.read(&stored).await.unwrap();
        assert_eq!(bytes, b"hello");
        assert_eq!(content_type, "image/png");
    }

    #[tokio::test]
    async fn non_data_url_passes_through() {
        let store = EvidenceStore::new(temp_dir()).await.unwrap();
        let stored = store
            .store_image(Uuid::new_v4(), "already-stored.png")
            .await
            .unwrap();
        assert!(stored.is_none());
    }

    #[tokio::test]
    async fn read_strips_path_components() {
        let store = EvidenceStore::new(temp_dir()).await.unwrap();
        let key = Uuid::new_v4();
        store
            .store_image(key, "data:image/jpeg;base64,aGVsbG8=")
            .await
            .unwrap();

        let (_, content_type) = store
            .read(&format!("../../{}.jpeg", key))
            .await
            .unwrap();
        assert_eq!(content_type, "image/jpeg");
    }
}
