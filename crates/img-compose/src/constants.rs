//! Shared constants for image-to-PDF conversion

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Pipeline Defaults
// =============================================================================

/// Default uniform page margin in millimeters
pub const DEFAULT_MARGIN_MM: f32 = 10.0;

/// Default pixel width cap applied to low-quality output.
///
/// The duplicate upstream variants disagreed (1000 vs 1200); 1000 is the
/// canonical value and the cap is plain configuration, not a fixed law.
pub const DEFAULT_WIDTH_CAP_PX: u32 = 1000;

/// Quality factor below which the width cap kicks in
pub const WIDTH_CAP_QUALITY_THRESHOLD: f32 = 0.8;

/// Default output file name when the caller supplies none
pub const DEFAULT_OUTPUT_NAME: &str = "My-Document.pdf";
