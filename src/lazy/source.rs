//! Image fetch and decode.

use std::future::Future;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::utils::path::{is_external_link, url_to_fs_path};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: image::ImageError,
    },

    #[error("unsupported image url '{0}'")]
    Unsupported(String),

    #[error("image not found: {0}")]
    NotFound(String),
}

/// A decoded image's intrinsic size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
}

/// Something that can fetch and decode an image URL.
pub trait ImageSource: Send + Sync + 'static {
    fn decode(&self, url: &str) -> impl Future<Output = Result<DecodedImage, DecodeError>> + Send;
}

/// Resolves site-absolute URLs under a public directory.
#[derive(Debug, Clone)]
pub struct FsImageSource {
    root: PathBuf,
}

impl FsImageSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn resolve(&self, url: &str) -> Result<PathBuf, DecodeError> {
        if is_external_link(url) {
            return Err(DecodeError::Unsupported(url.to_string()));
        }
        url_to_fs_path(&self.root, url).ok_or_else(|| DecodeError::Unsupported(url.to_string()))
    }
}

impl ImageSource for FsImageSource {
    async fn decode(&self, url: &str) -> Result<DecodedImage, DecodeError> {
        let path = self.resolve(url)?;

        let bytes = tokio::fs::read(&path).await.map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                DecodeError::NotFound(url.to_string())
            } else {
                DecodeError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;

        let url = url.to_string();
        let decoded = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes))
            .await
            .map_err(|e| DecodeError::Io {
                path,
                source: io::Error::other(e),
            })?;

        decoded
            .map(|img| DecodedImage {
                width: img.width(),
                height: img.height(),
            })
            .map_err(|source| DecodeError::Decode { url, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_png(path: &std::path::Path, width: u32, height: u32) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        image::RgbImage::new(width, height).save(path).unwrap();
    }

    #[tokio::test]
    async fn test_decode_png() {
        let dir = TempDir::new().unwrap();
        write_png(&dir.path().join("assets/logo.png"), 4, 3);

        let source = FsImageSource::new(dir.path());
        let img = source.decode("/assets/logo.png?v=2").await.unwrap();
        assert_eq!(img, DecodedImage { width: 4, height: 3 });
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let source = FsImageSource::new(dir.path());
        let err = source.decode("/assets/none.png").await.unwrap_err();
        assert!(matches!(err, DecodeError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_corrupt_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("broken.png"), b"not an image").unwrap();
        let source = FsImageSource::new(dir.path());
        let err = source.decode("/broken.png").await.unwrap_err();
        assert!(matches!(err, DecodeError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_rejects_remote_and_traversal() {
        let source = FsImageSource::new("/srv/public");
        for url in ["https://cdn.example.com/a.png", "//cdn/a.png", "/../etc/passwd", "/"] {
            let err = source.decode(url).await.unwrap_err();
            assert!(matches!(err, DecodeError::Unsupported(_)), "{url}");
        }
    }
}
