//! OCR for scanned statements.
//!
//! Scanned PDFs carry each page as an embedded image. [`ocr_pdf`] pulls those
//! images out page by page and runs them through an [`OcrEngine`], producing
//! one text blob for the extraction engine.

#[cfg(feature = "native")]
mod pure_engine;

#[cfg(feature = "native")]
pub use pure_engine::PureOcrEngine;

use std::path::Path;

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{OcrError, PdfError, Result};
use crate::pdf::PdfProcessor;

/// A detected text box with its coordinates and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBox {
    /// Bounding box coordinates (x1, y1, x2, y2, x3, y3, x4, y4) for quadrilateral.
    pub bbox: [f32; 8],

    /// Recognized text content.
    pub text: String,

    /// Recognition confidence score (0.0 - 1.0).
    pub confidence: f32,
}

impl TextBox {
    /// Get the axis-aligned bounding rectangle.
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        let xs = [self.bbox[0], self.bbox[2], self.bbox[4], self.bbox[6]];
        let ys = [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]];

        let min_x = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_x = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let min_y = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_y = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

        (min_x, min_y, max_x, max_y)
    }
}

/// Result of OCR processing on an image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrResult {
    /// Recognized text boxes in reading order.
    pub boxes: Vec<TextBox>,

    /// Full text (boxes joined with newlines).
    pub text: String,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl OcrResult {
    /// Build a result from unordered boxes, sorting them into reading order.
    pub fn from_boxes(mut boxes: Vec<TextBox>, processing_time_ms: u64) -> Self {
        sort_by_reading_order(&mut boxes);
        let text = boxes
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            boxes,
            text,
            processing_time_ms,
        }
    }
}

/// Sort boxes top-to-bottom in 20px rows, then left-to-right.
fn sort_by_reading_order(boxes: &mut [TextBox]) {
    boxes.sort_by(|a, b| {
        let (ax, ay, _, _) = a.rect();
        let (bx, by, _, _) = b.rect();

        let row_a = (ay / 20.0) as i32;
        let row_b = (by / 20.0) as i32;

        row_a
            .cmp(&row_b)
            .then_with(|| ax.partial_cmp(&bx).unwrap_or(std::cmp::Ordering::Equal))
    });
}

/// Trait for OCR engines.
pub trait OcrEngine {
    /// Recognize text boxes in an image.
    fn process(&self, image: &DynamicImage) -> std::result::Result<OcrResult, OcrError>;

    /// Recognize an image and return only its text.
    fn extract_text(&self, image: &DynamicImage) -> std::result::Result<String, OcrError> {
        Ok(self.process(image)?.text)
    }
}

/// Load a statement image (PNG, JPEG, TIFF, BMP) for OCR.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let image = image::open(path)?;
    debug!("Loaded {}x{} image from {}", image.width(), image.height(), path.display());
    Ok(image)
}

/// OCR every page image of a PDF.
///
/// Each page's text is followed by a newline. `max_pages` of 0 means all
/// pages. Images that fail recognition are skipped with a warning; the call
/// fails only when the PDF has no images at all or none could be recognized.
pub fn ocr_pdf<P, E>(pdf: &P, engine: &E, max_pages: usize) -> Result<String>
where
    P: PdfProcessor + ?Sized,
    E: OcrEngine + ?Sized,
{
    let mut page_count = pdf.page_count();
    if max_pages > 0 {
        page_count = page_count.min(max_pages as u32);
    }

    let mut full_text = String::new();
    let mut images_seen = 0usize;
    let mut images_recognized = 0usize;

    for page in 1..=page_count {
        let images = match pdf.extract_images(page) {
            Ok(images) => images,
            Err(e) => {
                warn!("Failed to extract images from page {}: {}", page, e);
                continue;
            }
        };

        let mut page_text = Vec::with_capacity(images.len());
        for (i, image) in images.iter().enumerate() {
            images_seen += 1;
            match engine.extract_text(image) {
                Ok(text) => {
                    images_recognized += 1;
                    page_text.push(text);
                }
                Err(e) => warn!("OCR failed for image {} on page {}: {}", i + 1, page, e),
            }
        }

        debug!("Page {}: OCR'd {} images", page, page_text.len());
        full_text.push_str(&page_text.join("\n"));
        full_text.push('\n');
    }

    if images_seen == 0 {
        return Err(PdfError::ImageExtraction("No images found in PDF".to_string()).into());
    }
    if images_recognized == 0 {
        return Err(OcrError::Recognition(format!(
            "none of {} page images could be recognized",
            images_seen
        ))
        .into());
    }

    Ok(full_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::{PdfType, Result as PdfResult};
    use image::RgbaImage;

    fn text_box(text: &str, x: f32, y: f32) -> TextBox {
        TextBox {
            bbox: [x, y, x + 50.0, y, x + 50.0, y + 10.0, x, y + 10.0],
            text: text.to_string(),
            confidence: 0.9,
        }
    }

    /// Fake PDF with a fixed number of images per page.
    struct FakePdf {
        images_per_page: Vec<usize>,
    }

    impl PdfProcessor for FakePdf {
        fn load(&mut self, _data: &[u8]) -> PdfResult<()> {
            Ok(())
        }

        fn page_count(&self) -> u32 {
            self.images_per_page.len() as u32
        }

        fn analyze(&self) -> PdfType {
            PdfType::Image
        }

        fn extract_text(&self) -> PdfResult<String> {
            Ok(String::new())
        }

        fn extract_page_text(&self, _page: u32) -> PdfResult<String> {
            Ok(String::new())
        }

        fn extract_images(&self, page: u32) -> PdfResult<Vec<DynamicImage>> {
            let count = self.images_per_page[(page - 1) as usize];
            // Encode the page number in the image width.
            Ok((0..count)
                .map(|_| DynamicImage::ImageRgba8(RgbaImage::new(page, 1)))
                .collect())
        }
    }

    /// Fake engine that "reads" the page number from the image width.
    struct FakeEngine {
        fail: bool,
    }

    impl OcrEngine for FakeEngine {
        fn process(&self, image: &DynamicImage) -> std::result::Result<OcrResult, OcrError> {
            if self.fail {
                return Err(OcrError::Recognition("boom".to_string()));
            }
            let text = format!("page {} 1,000.00", image.width());
            Ok(OcrResult::from_boxes(vec![text_box(&text, 0.0, 0.0)], 1))
        }
    }

    #[test]
    fn test_reading_order() {
        let result = OcrResult::from_boxes(
            vec![
                text_box("second line", 10.0, 45.0),
                text_box("right", 200.0, 5.0),
                text_box("left", 10.0, 2.0),
            ],
            0,
        );
        assert_eq!(result.text, "left\nright\nsecond line");
    }

    #[test]
    fn test_ocr_pdf_joins_pages() {
        let pdf = FakePdf {
            images_per_page: vec![1, 1],
        };
        let text = ocr_pdf(&pdf, &FakeEngine { fail: false }, 0).unwrap();
        assert_eq!(text, "page 1 1,000.00\npage 2 1,000.00\n");
    }

    #[test]
    fn test_ocr_pdf_max_pages() {
        let pdf = FakePdf {
            images_per_page: vec![1, 1, 1],
        };
        let text = ocr_pdf(&pdf, &FakeEngine { fail: false }, 1).unwrap();
        assert_eq!(text, "page 1 1,000.00\n");
    }

    #[test]
    fn test_ocr_pdf_without_images() {
        let pdf = FakePdf {
            images_per_page: vec![0, 0],
        };
        let err = ocr_pdf(&pdf, &FakeEngine { fail: false }, 0).unwrap_err();
        assert!(matches!(err, crate::StmtError::Pdf(PdfError::ImageExtraction(_))));
    }

    #[test]
    fn test_load_image() {
        let file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        RgbaImage::new(4, 3).save(file.path()).unwrap();

        let image = load_image(file.path()).unwrap();
        assert_eq!((image.width(), image.height()), (4, 3));
    }

    #[test]
    fn test_load_image_rejects_garbage() {
        let file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        std::fs::write(file.path(), b"not an image").unwrap();

        let err = load_image(file.path()).unwrap_err();
        assert!(matches!(err, crate::StmtError::Image(_)));
    }

    #[test]
    fn test_ocr_pdf_all_images_fail() {
        let pdf = FakePdf {
            images_per_page: vec![1],
        };
        let err = ocr_pdf(&pdf, &FakeEngine { fail: true }, 0).unwrap_err();
        assert!(matches!(err, crate::StmtError::Ocr(OcrError::Recognition(_))));
    }
}
