use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("No image files among the selection")]
    NoImages,
    #[error("Index {index} out of range for collection of {len}")]
    InvalidIndex { index: usize, len: usize },
    #[error("Failed to decode {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },
    #[error("Unsupported image {name}: {reason}")]
    UnsupportedImage { name: String, reason: String },
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ImageError>;

static NEXT_FILE_ID: AtomicU64 = AtomicU64::new(1);

/// Stable handle to a selected file, unique for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub u64);

impl FileId {
    pub fn next() -> Self {
        FileId(NEXT_FILE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Metadata triple used to detect duplicate selections.
///
/// Content is never hashed, so two different files that share name, size and
/// modification time are treated as the same file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileKey {
    pub name: String,
    pub size: u64,
    pub last_modified: Option<i64>,
}

/// Where the bytes of a selected image live
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// File on disk, read lazily
    Path(PathBuf),
    /// In-memory payload (e.g. a drop without a filesystem path)
    Bytes(Arc<[u8]>),
}

impl ImageSource {
    pub async fn read(&self) -> Result<Arc<[u8]>> {
        match self {
            ImageSource::Path(path) => {
                let bytes = tokio::fs::read(path).await?;
                Ok(Arc::from(bytes))
            }
            ImageSource::Bytes(bytes) => Ok(Arc::clone(bytes)),
        }
    }
}

/// One user-chosen file
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub id: FileId,
    pub name: String,
    pub size: u64,
    /// Milliseconds since the Unix epoch
    pub last_modified: Option<i64>,
    pub mime: String,
    pub source: ImageSource,
}

const FALLBACK_MIME: &str = "application/octet-stream";

impl SelectedFile {
    /// Build a file entry from a path on disk, reading only its metadata.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            id: FileId::next(),
            name,
            size: metadata.len(),
            last_modified: metadata.modified().ok().map(unix_millis),
            mime: mime_from_path(path).unwrap_or(FALLBACK_MIME).to_string(),
            source: ImageSource::Path(path.to_owned()),
        })
    }

    /// Build a file entry from an in-memory payload.
    ///
    /// An empty or missing `mime` falls back to the file name extension and
    /// then to content sniffing.
    pub fn from_bytes(
        name: impl Into<String>,
        bytes: Arc<[u8]>,
        mime: Option<&str>,
        last_modified: Option<SystemTime>,
    ) -> Self {
        let name = name.into();
        let mime = mime
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .or_else(|| mime_from_path(Path::new(&name)).map(str::to_string))
            .or_else(|| {
                image::guess_format(&bytes)
                    .ok()
                    .map(|f| f.to_mime_type().to_string())
            })
            .unwrap_or_else(|| FALLBACK_MIME.to_string());

        Self {
            id: FileId::next(),
            name,
            size: bytes.len() as u64,
            last_modified: last_modified.map(unix_millis),
            mime,
            source: ImageSource::Bytes(bytes),
        }
    }

    pub fn key(&self) -> FileKey {
        FileKey {
            name: self.name.clone(),
            size: self.size,
            last_modified: self.last_modified,
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

fn mime_from_path(path: &Path) -> Option<&'static str> {
    image::ImageFormat::from_path(path)
        .ok()
        .map(|format| format.to_mime_type())
}

fn unix_millis(time: SystemTime) -> i64 {
    chrono::DateTime::<chrono::Utc>::from(time).timestamp_millis()
}

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Get base dimensions (always portrait for standard sizes)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Tabloid => (279.4, 431.8),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PaperSize::A3 => "A3",
            PaperSize::A4 => "A4",
            PaperSize::A5 => "A5",
            PaperSize::Letter => "Letter",
            PaperSize::Legal => "Legal",
            PaperSize::Tabloid => "Tabloid",
            PaperSize::Custom { .. } => "Custom",
        }
    }
}
