use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::extract::{Path as AxumPath, State};
use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::{IntoResponse, Response};
use chrono::Utc;

use crate::web::{ApiError, AppState};

/// Blob buckets, mirroring the object-store layout the portal grew up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Documents,
    Payments,
    Pdfs,
    EditorialPhotos,
}

impl Bucket {
    pub const ALL: [Bucket; 4] = [
        Bucket::Documents,
        Bucket::Payments,
        Bucket::Pdfs,
        Bucket::EditorialPhotos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Documents => "documents",
            Bucket::Payments => "payments",
            Bucket::Pdfs => "pdfs",
            Bucket::EditorialPhotos => "editorial-photos",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Bucket::ALL.into_iter().find(|b| b.as_str() == value)
    }
}

/// A persisted blob: its key within the bucket and the durable public URL.
#[derive(Debug, Clone)]
pub struct StoredBlob {
    pub key: String,
    pub url: String,
}

/// Key-addressed blob store rooted on local disk, one directory per bucket.
/// Stored objects are served back under `/files/{bucket}/{key}`.
#[derive(Clone)]
pub struct BlobStore {
    root: PathBuf,
    public_base: String,
}

impl BlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into(),
        }
    }

    pub async fn ensure_buckets(&self) -> Result<()> {
        for bucket in Bucket::ALL {
            let dir = self.root.join(bucket.as_str());
            tokio::fs::create_dir_all(&dir)
                .await
                .with_context(|| format!("failed to create bucket directory {}", dir.display()))?;
        }
        Ok(())
    }

    /// Stores `bytes` under a timestamped, sanitized key and returns the key
    /// and public URL. Same-millisecond collisions get a numeric suffix.
    pub async fn put(
        &self,
        bucket: Bucket,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<StoredBlob> {
        let dir = self.root.join(bucket.as_str());
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("failed to create bucket directory {}", dir.display()))?;

        let mut key = object_key(original_name, Utc::now().timestamp_millis());
        let mut counter = 1usize;
        while tokio::fs::try_exists(dir.join(&key)).await.unwrap_or(false) {
            key = suffixed_key(&object_key(original_name, Utc::now().timestamp_millis()), counter);
            counter += 1;
        }

        let path = dir.join(&key);
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("failed to write blob {}", path.display()))?;

        let url = self.public_url(bucket, &key);
        Ok(StoredBlob { key, url })
    }

    pub fn public_url(&self, bucket: Bucket, key: &str) -> String {
        format!("{}/files/{}/{}", self.public_base, bucket.as_str(), key)
    }

    /// Maps a bucket/key pair back to a disk path. Keys containing separators
    /// or parent references never resolve.
    pub fn resolve(&self, bucket: Bucket, key: &str) -> Option<PathBuf> {
        if key.is_empty()
            || key.contains('/')
            || key.contains('\\')
            || key.contains("..")
        {
            return None;
        }
        Some(self.root.join(bucket.as_str()).join(key))
    }
}

fn object_key(original_name: &str, millis: i64) -> String {
    let sanitized = sanitize_filename::sanitize(original_name);
    let name = if sanitized.is_empty() {
        "upload.bin".to_string()
    } else {
        sanitized
    };
    format!("{millis}-{name}")
}

fn suffixed_key(key: &str, counter: usize) -> String {
    let path = Path::new(key);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(key);
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) => format!("{stem}_{counter}.{ext}"),
        None => format!("{stem}_{counter}"),
    }
}

fn content_type_for(key: &str) -> &'static str {
    let extension = Path::new(key)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// GET /files/:bucket/:key — serves a stored blob back to the public.
pub async fn serve_blob(
    State(state): State<AppState>,
    AxumPath((bucket, key)): AxumPath<(String, String)>,
) -> Result<Response, ApiError> {
    let bucket = Bucket::parse(&bucket).ok_or_else(|| ApiError::not_found("File not found"))?;
    let path = state
        .store()
        .resolve(bucket, &key)
        .ok_or_else(|| ApiError::not_found("File not found"))?;

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(ApiError::not_found("File not found"));
        }
        Err(err) => {
            return Err(ApiError::Dependency(
                anyhow::Error::new(err).context(format!("failed to read blob {}", path.display())),
            ));
        }
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(content_type_for(&key)),
    );
    Ok((headers, bytes).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_key_prefixes_timestamp_and_sanitizes() {
        let key = object_key("my paper.docx", 1700000000000);
        assert_eq!(key, "1700000000000-my paper.docx");

        let traversal = object_key("../../etc/passwd", 1700000000000);
        assert!(!traversal.contains(".."));
        assert!(!traversal.contains('/'));
    }

    #[test]
    fn object_key_falls_back_for_hostile_names() {
        let key = object_key("..", 1700000000000);
        assert_eq!(key, "1700000000000-upload.bin");
    }

    #[test]
    fn suffixed_key_keeps_extension() {
        assert_eq!(suffixed_key("123-paper.docx", 1), "123-paper_1.docx");
        assert_eq!(suffixed_key("123-notes", 2), "123-notes_2");
    }

    #[test]
    fn bucket_parse_round_trips() {
        for bucket in Bucket::ALL {
            assert_eq!(Bucket::parse(bucket.as_str()), Some(bucket));
        }
        assert_eq!(Bucket::parse("secrets"), None);
    }

    #[test]
    fn resolve_refuses_traversal() {
        let store = BlobStore::new("/tmp/blobs", "http://localhost:8080");
        assert!(store.resolve(Bucket::Documents, "../escape.docx").is_none());
        assert!(store.resolve(Bucket::Documents, "a/b.docx").is_none());
        assert!(store.resolve(Bucket::Documents, "").is_none());
        assert!(store.resolve(Bucket::Documents, "ok.docx").is_some());
    }

    #[test]
    fn content_types_cover_upload_formats() {
        assert_eq!(content_type_for("a.pdf"), "application/pdf");
        assert_eq!(
            content_type_for("a.DOCX"),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(content_type_for("a.png"), "image/png");
        assert_eq!(content_type_for("a.bin"), "application/octet-stream");
    }

    #[tokio::test]
    async fn put_persists_bytes_and_builds_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = BlobStore::new(dir.path(), "http://localhost:8080");

        let blob = store
            .put(Bucket::Documents, "paper.docx", b"PK\x03\x04")
            .await
            .unwrap();

        assert!(blob.key.ends_with("-paper.docx"));
        assert_eq!(
            blob.url,
            format!("http://localhost:8080/files/documents/{}", blob.key)
        );

        let on_disk = store.resolve(Bucket::Documents, &blob.key).unwrap();
        let bytes = tokio::fs::read(on_disk).await.unwrap();
        assert_eq!(bytes, b"PK\x03\x04");
    }
}
