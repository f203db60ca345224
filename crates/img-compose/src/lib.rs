pub mod compress;
pub mod constants;
pub mod decode;
pub mod layout;
mod options;
pub mod pipeline;
pub mod sink;
mod types;

pub use compress::compress_bitmap;
pub use decode::decode_bitmap;
pub use layout::fit_to_page;
pub use options::*;
pub use pipeline::{CancelToken, convert_images, convert_with_sink};
pub use sink::{DocumentSink, PdfSink};
pub use types::*;
