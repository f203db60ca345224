//! Document sink: assembling committed pages into a PDF byte stream
//!
//! The sink is the boundary between the conversion pipeline and the output
//! format. `PdfSink` embeds each compressed page as a DCTDecode image XObject
//! on its own page, so the JPEG bytes pass through without recompression.

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use crate::constants::mm_to_pt;
use crate::types::{CompressedPage, Rect, Result};

/// Ordered consumer of (image bytes, placement) pairs.
///
/// Pages must be pushed in output order; `finish` consumes the sink and
/// yields the final byte stream. A sink with zero pages still finalizes.
pub trait DocumentSink {
    /// Append one page with the image placed at `placement` (top-left
    /// anchored, millimeters).
    fn push_page(&mut self, page: CompressedPage, placement: &Rect) -> Result<()>;

    /// Finalize and produce the output byte stream.
    fn finish(self) -> Result<Vec<u8>>
    where
        Self: Sized;
}

/// PDF implementation of [`DocumentSink`] backed by lopdf.
pub struct PdfSink {
    doc: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    page_width_pt: f32,
    page_height_pt: f32,
}

impl PdfSink {
    /// Create a sink producing pages of the given size in millimeters.
    pub fn new(page_width_mm: f32, page_height_mm: f32) -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            page_ids: Vec::new(),
            page_width_pt: mm_to_pt(page_width_mm),
            page_height_pt: mm_to_pt(page_height_mm),
        }
    }

    /// Number of pages committed so far.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn create_image_xobject(&mut self, page: CompressedPage) -> ObjectId {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"XObject".to_vec()));
        dict.set("Subtype", Object::Name(b"Image".to_vec()));
        dict.set("Width", Object::Integer(page.width as i64));
        dict.set("Height", Object::Integer(page.height as i64));
        dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
        dict.set("BitsPerComponent", Object::Integer(8));
        dict.set("Filter", Object::Name(b"DCTDecode".to_vec()));

        // JPEG data is already compressed; re-deflating it would only grow it
        self.doc.add_object(Stream {
            dict,
            content: page.data,
            allows_compression: false,
            start_position: None,
        })
    }
}

impl DocumentSink for PdfSink {
    fn push_page(&mut self, page: CompressedPage, placement: &Rect) -> Result<()> {
        let image_id = self.create_image_xobject(page);

        // Placement is top-left anchored in mm; PDF user space has its
        // origin at the bottom-left corner of the page.
        let width_pt = mm_to_pt(placement.width);
        let height_pt = mm_to_pt(placement.height);
        let x_pt = mm_to_pt(placement.x);
        let y_pt = self.page_height_pt - mm_to_pt(placement.y) - height_pt;

        let content = format!(
            "q {width_pt:.4} 0 0 {height_pt:.4} {x_pt:.4} {y_pt:.4} cm /Im0 Do Q"
        );
        let content_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut xobjects = Dictionary::new();
        xobjects.set("Im0", Object::Reference(image_id));
        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(self.page_width_pt),
                Object::Real(self.page_height_pt),
            ]),
        );
        page_dict.set("Resources", Object::Dictionary(resources));
        page_dict.set("Contents", Object::Reference(content_id));

        let page_id = self.doc.add_object(page_dict);
        self.page_ids.push(page_id);
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<u8>> {
        let mut pages_dict = Dictionary::new();
        pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
        pages_dict.set(
            "Kids",
            Object::Array(
                self.page_ids
                    .iter()
                    .map(|id| Object::Reference(*id))
                    .collect(),
            ),
        );
        pages_dict.set("Count", Object::Integer(self.page_ids.len() as i64));
        self.doc
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(self.pages_id));
        let catalog_id = self.doc.add_object(catalog);
        self.doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut bytes = Vec::new();
        self.doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}
