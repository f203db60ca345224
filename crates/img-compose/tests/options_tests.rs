use std::time::Duration;

use img_compose::{
    ComposeError, ComposeOptions, PaperSize, QualityLevel, resolve_output_name,
};

#[test]
fn test_default_options_validate() {
    let options = ComposeOptions::default();
    assert!(options.validate().is_ok());
    assert_eq!(options.paper_size, PaperSize::A4);
    assert_eq!(options.margin_mm, 10.0);
    assert_eq!(options.width_cap_px, 1000);
    assert_eq!(options.quality, QualityLevel::Best);
}

#[test]
fn test_quality_factors() {
    assert_eq!(QualityLevel::Low.factor(), 0.3);
    assert_eq!(QualityLevel::Medium.factor(), 0.5);
    assert_eq!(QualityLevel::High.factor(), 0.7);
    assert_eq!(QualityLevel::Best.factor(), 0.9);
}

#[test]
fn test_paper_dimensions() {
    assert_eq!(PaperSize::A4.dimensions_mm(), (210.0, 297.0));
    assert_eq!(PaperSize::A5.dimensions_mm(), (148.0, 210.0));
    assert_eq!(PaperSize::Letter.dimensions_mm(), (215.9, 279.4));
    assert_eq!(
        PaperSize::Custom {
            width_mm: 100.0,
            height_mm: 50.0
        }
        .dimensions_mm(),
        (100.0, 50.0)
    );
}

#[test]
fn test_oversized_margin_fails_validation() {
    let options = ComposeOptions {
        margin_mm: 105.0,
        ..Default::default()
    };
    assert!(matches!(
        options.validate(),
        Err(ComposeError::Config(_))
    ));
}

#[test]
fn test_negative_margin_fails_validation() {
    let options = ComposeOptions {
        margin_mm: -1.0,
        ..Default::default()
    };
    assert!(options.validate().is_err());
}

#[test]
fn test_zero_width_cap_fails_validation() {
    let options = ComposeOptions {
        width_cap_px: 0,
        ..Default::default()
    };
    assert!(options.validate().is_err());
}

#[test]
fn test_degenerate_custom_paper_fails_validation() {
    let options = ComposeOptions {
        paper_size: PaperSize::Custom {
            width_mm: 0.0,
            height_mm: 297.0,
        },
        ..Default::default()
    };
    assert!(options.validate().is_err());
}

#[test]
fn test_zero_timeout_fails_validation() {
    let options = ComposeOptions {
        item_timeout: Some(Duration::ZERO),
        ..Default::default()
    };
    assert!(options.validate().is_err());
}

#[test]
fn test_output_name_resolution() {
    assert_eq!(resolve_output_name(None), "My-Document.pdf");
    assert_eq!(resolve_output_name(Some("")), "My-Document.pdf");
    assert_eq!(resolve_output_name(Some("   ")), "My-Document.pdf");
    assert_eq!(resolve_output_name(Some("holiday")), "holiday.pdf");
    assert_eq!(resolve_output_name(Some("  holiday  ")), "holiday.pdf");
    assert_eq!(resolve_output_name(Some("scan.pdf")), "scan.pdf");
    assert_eq!(resolve_output_name(Some("SCAN.PDF")), "SCAN.PDF");
    assert_eq!(resolve_output_name(Some("notes.txt")), "notes.txt.pdf");
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_options_round_trip_through_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("compose.json");

    let options = ComposeOptions {
        paper_size: PaperSize::Letter,
        margin_mm: 12.5,
        quality: QualityLevel::Medium,
        width_cap_px: 1200,
        item_timeout: Some(Duration::from_secs(5)),
    };
    options.save(&path).await.unwrap();

    let loaded = ComposeOptions::load(&path).await.unwrap();
    assert_eq!(loaded, options);
}
