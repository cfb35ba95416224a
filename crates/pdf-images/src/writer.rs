//! Document writer used by the conversion pipeline
//!
//! The pipeline only talks to [`DocumentWriter`]; [`PdfWriter`] is the
//! lopdf-backed implementation that produces the final bytes.

use crate::decode::{ColorModel, DecodedImage, ImageData};
use crate::layout::PageLayout;
use crate::options::ConvertOptions;
use crate::types::*;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::io::Write;

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Page-oriented document builder.
///
/// A new writer already holds one blank page. Coordinates passed to
/// [`add_image`](DocumentWriter::add_image) come from a [`PageLayout`]
/// (millimeters, top-left origin) and always target the last page.
pub trait DocumentWriter {
    fn page_width(&self) -> f32;
    fn page_height(&self) -> f32;
    fn page_count(&self) -> usize;
    fn add_page(&mut self);
    fn add_image(&mut self, image: &DecodedImage, layout: &PageLayout) -> Result<()>;
    fn save(self) -> Result<Vec<u8>>
    where
        Self: Sized;
}

/// Content of a page that has not been written out yet
struct PendingPage {
    content: String,
    xobjects: Dictionary,
}

impl PendingPage {
    fn new() -> Self {
        Self {
            content: String::new(),
            xobjects: Dictionary::new(),
        }
    }
}

pub struct PdfWriter {
    doc: Document,
    pages_id: ObjectId,
    pages: Vec<PendingPage>,
    page_width_mm: f32,
    page_height_mm: f32,
    title: String,
    image_count: usize,
}

impl PdfWriter {
    pub fn new(options: &ConvertOptions) -> Result<Self> {
        options.validate()?;
        let (page_width_mm, page_height_mm) = options.page_dimensions_mm();

        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        Ok(Self {
            doc,
            pages_id,
            pages: vec![PendingPage::new()],
            page_width_mm,
            page_height_mm,
            title: options.document_title.clone(),
            image_count: 0,
        })
    }

    fn add_image_xobject(&mut self, image: &DecodedImage) -> Result<ObjectId> {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"XObject".to_vec()));
        dict.set("Subtype", Object::Name(b"Image".to_vec()));
        dict.set("Width", Object::Integer(image.width as i64));
        dict.set("Height", Object::Integer(image.height as i64));
        dict.set("BitsPerComponent", Object::Integer(8));

        let content = match &image.data {
            ImageData::Jpeg { bytes, color } => {
                dict.set("ColorSpace", Object::Name(color.pdf_name().to_vec()));
                dict.set("Filter", Object::Name(b"DCTDecode".to_vec()));
                bytes.clone()
            }
            ImageData::Pixels {
                color,
                samples,
                alpha,
            } => {
                let expected = image.width as usize * image.height as usize * components(*color);
                if samples.len() != expected {
                    return Err(ImageError::UnsupportedImage {
                        name: image.name.clone(),
                        reason: format!("expected {} samples, got {}", expected, samples.len()),
                    });
                }

                if let Some(alpha) = alpha {
                    let smask_id = self.add_soft_mask(image.width, image.height, alpha)?;
                    dict.set("SMask", Object::Reference(smask_id));
                }
                dict.set("ColorSpace", Object::Name(color.pdf_name().to_vec()));
                dict.set("Filter", Object::Name(b"FlateDecode".to_vec()));
                deflate(samples)?
            }
        };

        Ok(self.doc.add_object(Stream::new(dict, content)))
    }

    fn add_soft_mask(&mut self, width: u32, height: u32, alpha: &[u8]) -> Result<ObjectId> {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"XObject".to_vec()));
        dict.set("Subtype", Object::Name(b"Image".to_vec()));
        dict.set("Width", Object::Integer(width as i64));
        dict.set("Height", Object::Integer(height as i64));
        dict.set("ColorSpace", Object::Name(b"DeviceGray".to_vec()));
        dict.set("BitsPerComponent", Object::Integer(8));
        dict.set("Filter", Object::Name(b"FlateDecode".to_vec()));
        Ok(self.doc.add_object(Stream::new(dict, deflate(alpha)?)))
    }

    fn media_box(&self) -> Object {
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(mm_to_pt(self.page_width_mm)),
            Object::Real(mm_to_pt(self.page_height_mm)),
        ])
    }
}

impl DocumentWriter for PdfWriter {
    fn page_width(&self) -> f32 {
        self.page_width_mm
    }

    fn page_height(&self) -> f32 {
        self.page_height_mm
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn add_page(&mut self) {
        self.pages.push(PendingPage::new());
    }

    fn add_image(&mut self, image: &DecodedImage, layout: &PageLayout) -> Result<()> {
        let xobject_id = self.add_image_xobject(image)?;
        self.image_count += 1;
        let name = format!("Im{}", self.image_count);

        // PDF user space has its origin at the bottom-left corner
        let width = mm_to_pt(layout.width);
        let height = mm_to_pt(layout.height);
        let x = mm_to_pt(layout.x);
        let y = mm_to_pt(self.page_height_mm - layout.y - layout.height);

        if self.pages.is_empty() {
            self.add_page();
        }
        let last = self.pages.len() - 1;
        let page = &mut self.pages[last];
        page.xobjects.set(name.as_bytes(), Object::Reference(xobject_id));
        page.content.push_str(&format!(
            "q {} 0 0 {} {} {} cm /{} Do Q\n",
            width, height, x, y, name
        ));

        Ok(())
    }

    fn save(mut self) -> Result<Vec<u8>> {
        let media_box = self.media_box();
        let mut kids = Vec::with_capacity(self.pages.len());

        for page in std::mem::take(&mut self.pages) {
            let content_id = self
                .doc
                .add_object(Stream::new(Dictionary::new(), page.content.into_bytes()));

            let mut resources = Dictionary::new();
            resources.set("XObject", Object::Dictionary(page.xobjects));

            let mut page_dict = Dictionary::new();
            page_dict.set("Type", Object::Name(b"Page".to_vec()));
            page_dict.set("Parent", Object::Reference(self.pages_id));
            page_dict.set("MediaBox", media_box.clone());
            page_dict.set("Resources", Object::Dictionary(resources));
            page_dict.set("Contents", Object::Reference(content_id));
            kids.push(Object::Reference(self.doc.add_object(page_dict)));
        }

        let count = kids.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(kids)),
            ("Count", Object::Integer(count)),
        ]);
        self.doc
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = self.doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_id)),
        ]));

        let info_id = self.doc.add_object(Dictionary::from_iter(vec![
            ("Title", Object::string_literal(self.title.as_str())),
            ("Producer", Object::string_literal("pdf-images")),
            (
                "CreationDate",
                Object::string_literal(chrono::Utc::now().format("D:%Y%m%d%H%M%SZ").to_string()),
            ),
        ]));

        self.doc.trailer.set("Root", catalog_id);
        self.doc.trailer.set("Info", info_id);

        let mut writer = Vec::new();
        self.doc.save_to(&mut writer)?;
        Ok(writer)
    }
}

fn components(color: ColorModel) -> usize {
    match color {
        ColorModel::Gray => 1,
        ColorModel::Rgb => 3,
    }
}

fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}
