use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::{AsyncReadExt, BufReader};

use super::error::StorageError;
use super::traits::{BoxReader, MediaStore};

/// Filesystem-backed media store rooted at an uploads directory.
///
/// Files land at `{root}/{logical_path}`. Writes go through a temp file in
/// `{root}/.tmp` followed by a rename, so a partially received upload is
/// never visible at its final path.
pub struct FilesystemMediaStore {
    root: PathBuf,
    max_file_size: u64,
}

impl FilesystemMediaStore {
    /// Create a store rooted at `root`, creating the root, the temp
    /// directory, and the given subdirectories up front. This is the single
    /// explicit initialization step; no directory creation happens lazily.
    pub async fn new(
        root: PathBuf,
        subdirs: &[&str],
        max_file_size: u64,
    ) -> Result<Self, StorageError> {
        fs::create_dir_all(&root).await?;
        fs::create_dir_all(root.join(".tmp")).await?;
        for sub in subdirs {
            fs::create_dir_all(root.join(sub)).await?;
        }
        Ok(Self {
            root,
            max_file_size,
        })
    }

    /// Resolve a logical path to an absolute path under the root.
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Err(StorageError::InvalidPath("path is empty".into()));
        }
        let rel = Path::new(trimmed);
        if rel.is_absolute() {
            return Err(StorageError::InvalidPath(format!(
                "absolute path not allowed: {trimmed}"
            )));
        }
        for component in rel.components() {
            match component {
                Component::Normal(_) => {}
                _ => {
                    return Err(StorageError::InvalidPath(format!(
                        "path escapes store root: {trimmed}"
                    )));
                }
            }
        }
        Ok(self.root.join(rel))
    }

    fn temp_path(&self) -> PathBuf {
        self.root.join(".tmp").join(uuid::Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl MediaStore for FilesystemMediaStore {
    async fn put_stream(&self, path: &str, mut reader: BoxReader) -> Result<u64, StorageError> {
        let dest = self.resolve(path)?;
        let temp_path = self.temp_path();

        let mut temp_file = fs::File::create(&temp_path).await?;
        let mut total_bytes: u64 = 0;
        let mut buf = vec![0u8; 64 * 1024]; // 64KB read buffer

        loop {
            let n = match reader.read(&mut buf).await {
                Ok(n) => n,
                Err(e) => {
                    drop(temp_file);
                    let _ = fs::remove_file(&temp_path).await;
                    return Err(e.into());
                }
            };
            if n == 0 {
                break;
            }

            total_bytes += n as u64;
            if total_bytes > self.max_file_size {
                drop(temp_file);
                let _ = fs::remove_file(&temp_path).await;
                return Err(StorageError::SizeLimitExceeded {
                    actual: total_bytes,
                    limit: self.max_file_size,
                });
            }

            if let Err(e) = tokio::io::AsyncWriteExt::write_all(&mut temp_file, &buf[..n]).await {
                drop(temp_file);
                let _ = fs::remove_file(&temp_path).await;
                return Err(e.into());
            }
        }

        tokio::io::AsyncWriteExt::flush(&mut temp_file).await?;
        drop(temp_file);

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).await?;
        }

        if let Err(e) = fs::rename(&temp_path, &dest).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        Ok(total_bytes)
    }

    async fn get_stream(&self, path: &str) -> Result<BoxReader, StorageError> {
        let dest = self.resolve(path)?;
        match fs::File::open(&dest).await {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        let dest = self.resolve(path)?;
        Ok(fs::try_exists(&dest).await?)
    }

    async fn delete(&self, path: &str) -> Result<bool, StorageError> {
        let dest = self.resolve(path)?;
        match fs::remove_file(&dest).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn size(&self, path: &str) -> Result<u64, StorageError> {
        let dest = self.resolve(path)?;
        match fs::metadata(&dest).await {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
