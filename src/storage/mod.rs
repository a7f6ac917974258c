use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// Filesystem-backed blob store for task attachments.
///
/// Blobs land under `<root>/<owner>/<uploadMillis>_<fileName>` and are served
/// back through the static `/files` route, so the returned URL is the stored
/// attachment reference.
#[derive(Clone)]
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `bytes` and return the retrieval URL of the new blob.
    pub async fn store(
        &self,
        owner: Uuid,
        file_name: &str,
        bytes: &[u8],
    ) -> std::io::Result<String> {
        let rel = format!(
            "{}/{}_{}",
            owner,
            Utc::now().timestamp_millis(),
            sanitize_file_name(file_name)
        );
        let path = self.root.join(&rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, bytes).await?;
        tracing::debug!("Stored attachment at {}", path.display());
        Ok(format!("/files/{}", rel))
    }
}

/// Keep the uploaded name recognizable but path-safe.
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "attachment".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_separators_and_spaces() {
        assert_eq!(sanitize_file_name("../etc/passwd"), ".._etc_passwd");
        assert_eq!(sanitize_file_name("report final.pdf"), "report_final.pdf");
        assert_eq!(sanitize_file_name("notes.txt"), "notes.txt");
    }

    #[test]
    fn sanitize_never_returns_empty() {
        assert_eq!(sanitize_file_name(""), "attachment");
    }

    #[tokio::test]
    async fn store_writes_under_owner_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = BlobStore::new(dir.path());
        let owner = Uuid::new_v4();

        let url = store.store(owner, "notes.txt", b"hello").await.unwrap();

        let rel = url.strip_prefix("/files/").unwrap();
        assert!(rel.starts_with(&owner.to_string()));
        assert!(rel.ends_with("_notes.txt"));
        let contents = std::fs::read(dir.path().join(rel)).unwrap();
        assert_eq!(contents, b"hello");
    }
}
