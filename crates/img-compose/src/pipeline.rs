//! Sequential conversion pipeline
//!
//! Drives decode → compress → layout → commit across all inputs, one image
//! at a time. Item i is fully committed before item i+1 starts; output page
//! order therefore always equals input selection order, with failed inputs
//! omitted rather than reordered or retried.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task;
use tokio::time;

use crate::compress::compress_bitmap;
use crate::decode::decode_bitmap;
use crate::layout::fit_to_page;
use crate::options::ComposeOptions;
use crate::sink::{DocumentSink, PdfSink};
use crate::types::*;

/// Best-effort cancellation token.
///
/// Checked between items only, never mid-item, so a cancelled run still
/// upholds the page-order guarantee for the pages it already committed.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Convert an ordered list of images into a single multi-page PDF.
///
/// Emits one [`ProgressUpdate`] per input before processing it. Item-local
/// failures (decode, compression, layout, timeout) skip the image and are
/// reported in [`ConversionOutput::skipped`]; sink failures abort the run
/// with no partial document.
///
/// If every input fails the run still completes, yielding a zero-page
/// document and a full `skipped` list. An empty input list is rejected with
/// [`ComposeError::NoInput`] before any progress event is emitted.
pub async fn convert_images(
    inputs: Vec<SourceImage>,
    options: &ComposeOptions,
    progress: Option<mpsc::UnboundedSender<ProgressUpdate>>,
    cancel: Option<CancelToken>,
) -> Result<ConversionOutput> {
    let (page_width, page_height) = options.paper_size.dimensions_mm();
    let sink = PdfSink::new(page_width, page_height);
    convert_with_sink(sink, inputs, options, progress, cancel).await
}

/// Like [`convert_images`], but committing pages to a caller-supplied sink.
pub async fn convert_with_sink<S: DocumentSink>(
    mut sink: S,
    inputs: Vec<SourceImage>,
    options: &ComposeOptions,
    progress: Option<mpsc::UnboundedSender<ProgressUpdate>>,
    cancel: Option<CancelToken>,
) -> Result<ConversionOutput> {
    options.validate()?;
    if inputs.is_empty() {
        return Err(ComposeError::NoInput);
    }

    let total = inputs.len();
    let (page_width, page_height) = options.paper_size.dimensions_mm();
    let quality = options.quality.factor();
    let width_cap = options.width_cap_px;

    let mut pages = Vec::new();
    let mut skipped = Vec::new();

    for (index, input) in inputs.into_iter().enumerate() {
        if let Some(token) = &cancel {
            if token.is_cancelled() {
                return Err(ComposeError::Cancelled);
            }
        }

        let percent = (100.0 * (index + 1) as f64 / total as f64).round() as u8;
        if let Some(tx) = &progress {
            let _ = tx.send(ProgressUpdate {
                percent,
                message: format!("Converting image {} of {}", index + 1, total),
            });
        }

        let name = input.name.clone();
        let compressed = match run_item(input, quality, width_cap, options.item_timeout).await {
            Ok(page) => page,
            Err(e) if e.is_item_local() => {
                log::warn!("skipping image {} ({}): {}", index + 1, name, e);
                skipped.push(SkippedInput {
                    index,
                    name,
                    reason: e,
                });
                continue;
            }
            Err(e) => return Err(e),
        };

        let ratio = compressed.width as f32 / compressed.height as f32;
        let placement = match fit_to_page(page_width, page_height, options.margin_mm, ratio) {
            Ok(rect) => rect,
            Err(e) if e.is_item_local() => {
                log::warn!("skipping image {} ({}): {}", index + 1, name, e);
                skipped.push(SkippedInput {
                    index,
                    name,
                    reason: e,
                });
                continue;
            }
            Err(e) => return Err(e),
        };

        let (pixel_width, pixel_height) = (compressed.width, compressed.height);
        sink.push_page(compressed, &placement)?;
        pages.push(PageRecord {
            source_index: index,
            placement,
            pixel_width,
            pixel_height,
        });
        log::debug!(
            "committed page {} of {} ({}x{} px)",
            index + 1,
            total,
            pixel_width,
            pixel_height
        );
    }

    let pdf = sink.finish()?;
    Ok(ConversionOutput {
        pdf,
        pages,
        skipped,
    })
}

/// Decode and compress one input, optionally bounded by the item timeout.
async fn run_item(
    input: SourceImage,
    quality: f32,
    width_cap: u32,
    timeout: Option<Duration>,
) -> Result<CompressedPage> {
    let work = process_item(input, quality, width_cap);
    match timeout {
        Some(limit) => match time::timeout(limit, work).await {
            Ok(result) => result,
            Err(_) => Err(ComposeError::Timeout),
        },
        None => work.await,
    }
}

async fn process_item(
    input: SourceImage,
    quality: f32,
    width_cap: u32,
) -> Result<CompressedPage> {
    // Decode and re-encode are CPU-bound, keep them off the async threads
    let bitmap = task::spawn_blocking(move || decode_bitmap(&input)).await??;
    task::spawn_blocking(move || compress_bitmap(&bitmap, quality, width_cap)).await?
}
