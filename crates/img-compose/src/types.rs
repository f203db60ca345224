use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("decode error: {0}")]
    Decode(image::ImageError),
    #[error("compression error: {0}")]
    Compression(String),
    #[error("layout error: {0}")]
    Layout(String),
    #[error("document sink error: {0}")]
    Sink(#[from] lopdf::Error),
    #[error("item timed out")]
    Timeout,
    #[error("conversion cancelled")]
    Cancelled,
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("no input images")]
    NoInput,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl ComposeError {
    /// Whether this failure is local to one input image.
    ///
    /// Item-local failures are logged and the image is skipped; everything
    /// else aborts the whole run.
    pub fn is_item_local(&self) -> bool {
        matches!(
            self,
            ComposeError::Decode(_)
                | ComposeError::Compression(_)
                | ComposeError::Layout(_)
                | ComposeError::Timeout
        )
    }
}

pub type Result<T> = std::result::Result<T, ComposeError>;

/// Standard output page sizes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A4,
    A5,
    Letter,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Page dimensions in millimeters (portrait)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }
}

impl Default for PaperSize {
    fn default() -> Self {
        PaperSize::A4
    }
}

/// User-facing quality selector.
///
/// A single knob that couples the JPEG encode quality with the resolution
/// cap: levels below `Best` also clamp the pixel width of the embedded
/// image (see `compress_bitmap`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QualityLevel {
    Low,
    Medium,
    High,
    #[default]
    Best,
}

impl QualityLevel {
    /// Quality factor in (0, 1], fed to both the resampler gate and the
    /// JPEG encoder.
    pub fn factor(self) -> f32 {
        match self {
            QualityLevel::Low => 0.3,
            QualityLevel::Medium => 0.5,
            QualityLevel::High => 0.7,
            QualityLevel::Best => 0.9,
        }
    }
}

/// One uploaded raster file, exactly as selected by the caller.
///
/// Read once by the decoder and dropped after compression.
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// Display name, used in skip reports and log lines
    pub name: String,
    /// Declared MIME type, used as a decode hint when present
    pub mime: Option<String>,
    /// Raw file content
    pub bytes: Vec<u8>,
}

impl SourceImage {
    pub fn new(name: impl Into<String>, mime: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime,
            bytes,
        }
    }
}

/// Re-encoded JPEG bytes for one page, plus their pixel dimensions
#[derive(Debug, Clone)]
pub struct CompressedPage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// A rectangular area in document units (millimeters), top-left anchored
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (top edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// One page committed to the document sink
#[derive(Debug, Clone, PartialEq)]
pub struct PageRecord {
    /// Index of the source image in the input list
    pub source_index: usize,
    /// Placement of the image on the page, in millimeters
    pub placement: Rect,
    /// Pixel width of the embedded image
    pub pixel_width: u32,
    /// Pixel height of the embedded image
    pub pixel_height: u32,
}

/// One input that failed and was skipped
#[derive(Debug)]
pub struct SkippedInput {
    /// Index of the source image in the input list
    pub index: usize,
    /// Display name of the source image
    pub name: String,
    /// The item-local failure that caused the skip
    pub reason: ComposeError,
}

/// Result of one conversion run.
///
/// Owned by the caller; the library keeps no state between runs.
#[derive(Debug)]
pub struct ConversionOutput {
    /// The finished PDF byte stream
    pub pdf: Vec<u8>,
    /// Committed pages, in input order
    pub pages: Vec<PageRecord>,
    /// Inputs that failed and were skipped, in input order
    pub skipped: Vec<SkippedInput>,
}

/// Progress event emitted once per input image, before it is processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// Completion percentage, 0-100
    pub percent: u8,
    /// Human-readable status referencing the current index and total
    pub message: String,
}
