use std::time::Duration;

use crate::constants::{DEFAULT_MARGIN_MM, DEFAULT_OUTPUT_NAME, DEFAULT_WIDTH_CAP_PX};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Conversion configuration.
///
/// One parameterized pipeline replaces the upstream copy-pasted variants:
/// everything those variants disagreed on (width cap, page size, margin)
/// lives here.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComposeOptions {
    /// Output page size
    pub paper_size: PaperSize,

    /// Uniform page margin in millimeters
    pub margin_mm: f32,

    /// Quality selector, driving both JPEG quality and the width cap
    pub quality: QualityLevel,

    /// Pixel width cap for quality factors below 0.8
    pub width_cap_px: u32,

    /// Per-image processing timeout; expiry skips the image like any other
    /// item-local failure. `None` disables the timeout.
    pub item_timeout: Option<Duration>,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::default(),
            margin_mm: DEFAULT_MARGIN_MM,
            quality: QualityLevel::default(),
            width_cap_px: DEFAULT_WIDTH_CAP_PX,
            item_timeout: None,
        }
    }
}

impl ComposeOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ComposeError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ComposeError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        let (width_mm, height_mm) = self.paper_size.dimensions_mm();
        if width_mm <= 0.0 || height_mm <= 0.0 {
            return Err(ComposeError::Config(format!(
                "page size must be positive, got {width_mm}x{height_mm}"
            )));
        }
        if self.margin_mm < 0.0 {
            return Err(ComposeError::Config("margin must not be negative".into()));
        }
        if 2.0 * self.margin_mm >= width_mm || 2.0 * self.margin_mm >= height_mm {
            return Err(ComposeError::Config(format!(
                "margin {}mm leaves no printable area on a {width_mm}x{height_mm}mm page",
                self.margin_mm
            )));
        }
        if self.width_cap_px == 0 {
            return Err(ComposeError::Config("width cap must be positive".into()));
        }
        if let Some(timeout) = self.item_timeout {
            if timeout.is_zero() {
                return Err(ComposeError::Config(
                    "item timeout must be positive; use None to disable".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Resolve the output file name for a finished document.
///
/// Trims the caller-supplied name, falls back to `"My-Document.pdf"` when
/// empty or absent, and appends `.pdf` unless it is already there
/// (case-insensitively).
pub fn resolve_output_name(name: Option<&str>) -> String {
    let trimmed = name.map(str::trim).unwrap_or("");
    if trimmed.is_empty() {
        return DEFAULT_OUTPUT_NAME.to_string();
    }
    if trimmed.to_lowercase().ends_with(".pdf") {
        trimmed.to_string()
    } else {
        format!("{trimmed}.pdf")
    }
}
