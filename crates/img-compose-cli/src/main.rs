use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use img_compose::{
    ComposeOptions, PaperSize, QualityLevel, SourceImage, convert_images, resolve_output_name,
};
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "imgpdf", about = "Bundle images into a multi-page PDF", version)]
struct Cli {
    /// Input image files (JPEG/PNG/WEBP), in page order
    #[arg(required = true, num_args = 1..)]
    input: Vec<PathBuf>,

    /// Output file name (".pdf" appended if missing; default "My-Document.pdf")
    #[arg(short, long)]
    output: Option<String>,

    /// Quality level; levels below "best" also cap the image width
    #[arg(long, default_value = "best", value_enum)]
    quality: QualityArg,

    /// Output paper size
    #[arg(long, default_value = "a4", value_enum)]
    paper: PaperArg,

    /// Uniform page margin in mm
    #[arg(long, default_value = "10.0")]
    margin: f32,

    /// Pixel width cap applied to low-quality output
    #[arg(long, default_value = "1000")]
    width_cap: u32,

    /// Per-image timeout in seconds (0 disables the timeout)
    #[arg(long, default_value = "0")]
    timeout_secs: u64,
}

#[derive(Clone, Copy, ValueEnum)]
enum QualityArg {
    Low,
    Medium,
    High,
    Best,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A4,
    A5,
    Letter,
}

impl From<QualityArg> for QualityLevel {
    fn from(arg: QualityArg) -> Self {
        match arg {
            QualityArg::Low => Self::Low,
            QualityArg::Medium => Self::Medium,
            QualityArg::High => Self::High,
            QualityArg::Best => Self::Best,
        }
    }
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
        }
    }
}

fn mime_for(path: &Path) -> Option<String> {
    match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg".to_string()),
        "png" => Some("image/png".to_string()),
        "webp" => Some("image/webp".to_string()),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let options = ComposeOptions {
        paper_size: cli.paper.into(),
        margin_mm: cli.margin,
        quality: cli.quality.into(),
        width_cap_px: cli.width_cap,
        item_timeout: (cli.timeout_secs > 0).then(|| Duration::from_secs(cli.timeout_secs)),
    };

    let mut inputs = Vec::with_capacity(cli.input.len());
    for path in &cli.input {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        inputs.push(SourceImage::new(name, mime_for(path), bytes));
    }

    let (tx, mut rx) = mpsc::unbounded_channel::<img_compose::ProgressUpdate>();
    let printer = tokio::spawn(async move {
        while let Some(update) = rx.recv().await {
            println!("[{:>3}%] {}", update.percent, update.message);
        }
    });

    let output = convert_images(inputs, &options, Some(tx), None)
        .await
        .context("conversion failed")?;
    printer.await?;

    for skip in &output.skipped {
        eprintln!("skipped {} ({})", skip.name, skip.reason);
    }

    let file_name = resolve_output_name(cli.output.as_deref());
    tokio::fs::write(&file_name, &output.pdf)
        .await
        .with_context(|| format!("failed to write {file_name}"))?;

    println!(
        "{} pages ({} skipped) → {}",
        output.pages.len(),
        output.skipped.len(),
        file_name
    );

    Ok(())
}
