//! Turn an input file into statement text.
//!
//! PDFs are validated first and rejected if malformed. Text-based PDFs use
//! their embedded text; scanned ones go through OCR on their page images.

use std::fs;
use std::path::Path;

use indicatif::ProgressBar;
use tracing::{debug, info, warn, Level};

use cardstmt_core::models::config::CardstmtConfig;
use cardstmt_core::{load_image, ocr_pdf, OcrEngine, PdfExtractor, PdfProcessor, PureOcrEngine, SourceType};

/// Characters of OCR text echoed by `--show-text`.
const TEXT_SAMPLE_LEN: usize = 1000;

/// Supported input extensions.
pub const SUPPORTED_EXTENSIONS: [&str; 8] =
    ["pdf", "png", "jpg", "jpeg", "tiff", "tif", "bmp", "txt"];

/// Reads statement text from files, loading the OCR engine on first use.
pub struct DocumentReader<'a> {
    config: &'a CardstmtConfig,
    text_only: bool,
    show_text: bool,
    ocr: Option<PureOcrEngine>,
}

impl<'a> DocumentReader<'a> {
    pub fn new(config: &'a CardstmtConfig) -> Self {
        Self {
            config,
            text_only: false,
            show_text: false,
            ocr: None,
        }
    }

    /// Refuse to run OCR.
    pub fn with_text_only(mut self, text_only: bool) -> Self {
        self.text_only = text_only;
        self
    }

    /// Echo the start of OCR text to stderr.
    pub fn with_show_text(mut self, show_text: bool) -> Self {
        self.show_text = show_text;
        self
    }

    /// Read statement text from a file.
    pub fn read(&mut self, path: &Path, pb: &ProgressBar) -> anyhow::Result<(String, SourceType)> {
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let (text, source) = match extension.as_str() {
            "pdf" => self.read_pdf(path, pb)?,
            "png" | "jpg" | "jpeg" | "tiff" | "tif" | "bmp" => self.read_image(path, pb)?,
            "txt" => (fs::read_to_string(path)?, SourceType::PlainText),
            _ => anyhow::bail!("Unsupported file format: {}", extension),
        };

        if source.is_ocr() && self.show_text {
            let sample: String = text.chars().take(TEXT_SAMPLE_LEN).collect();
            eprintln!("OCR TEXT SAMPLE:\n{}", sample);
        }

        Ok((text, source))
    }

    fn read_pdf(&mut self, path: &Path, pb: &ProgressBar) -> anyhow::Result<(String, SourceType)> {
        pb.set_message("Loading PDF...");
        pb.set_position(10);

        let data = fs::read(path)?;
        let mut extractor =
            PdfExtractor::new().with_min_text_length(self.config.pdf.min_text_length);

        if let Err(e) = extractor.load(&data) {
            anyhow::bail!(
                "{}: detected image-based or malformed PDF ({}).\n\
                 This PDF appears to be generated from a screenshot or is internally malformed. \
                 For reliable processing, please supply an original bank e-statement PDF.",
                path.display(),
                e
            );
        }

        debug!("PDF has {} pages", extractor.page_count());

        pb.set_message("Analyzing PDF...");
        pb.set_position(20);

        // `analyze` decodes every page image, so only classify fully when logging it.
        if tracing::enabled!(Level::DEBUG) {
            debug!("PDF type: {:?}", extractor.analyze());
        }

        if self.config.pdf.prefer_embedded_text && extractor.is_text_based() {
            info!("Text-based PDF detected");
            pb.set_message("Extracting text...");
            pb.set_position(40);

            match extractor.extract_text() {
                Ok(text) => return Ok((text, SourceType::TextPdf)),
                Err(e) if !self.text_only => {
                    warn!("Text extraction failed ({}), falling back to OCR", e);
                }
                Err(e) => return Err(e.into()),
            }
        }

        if self.text_only {
            anyhow::bail!("PDF is scanned but --text-only was set. Remove the flag to use OCR.");
        }

        info!("Scanned PDF detected, running OCR");
        pb.set_message("Running OCR...");
        pb.set_position(40);

        let max_pages = self.config.pdf.max_pages;
        let engine = self.engine()?;
        let text = ocr_pdf(&extractor, engine, max_pages)?;

        Ok((text, SourceType::ScannedPdf))
    }

    fn read_image(&mut self, path: &Path, pb: &ProgressBar) -> anyhow::Result<(String, SourceType)> {
        if self.text_only {
            anyhow::bail!("Images require OCR but --text-only was set.");
        }

        pb.set_message("Loading image...");
        pb.set_position(10);

        let image = load_image(path)?;

        pb.set_message("Running OCR...");
        pb.set_position(40);

        let text = self.engine()?.extract_text(&image)?;
        Ok((text, SourceType::Image))
    }

    fn engine(&mut self) -> anyhow::Result<&PureOcrEngine> {
        if self.ocr.is_none() {
            let ocr_config = &self.config.ocr;
            if !ocr_config.models_available() {
                anyhow::bail!(
                    "OCR models not found in {}.\n\n\
                     Place {}, {} and {} there, or point --model-dir at them.",
                    ocr_config.model_dir.display(),
                    ocr_config.detection_model,
                    ocr_config.recognition_model,
                    ocr_config.dictionary
                );
            }
            self.ocr = Some(PureOcrEngine::from_config(ocr_config)?);
        }

        self.ocr
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("OCR engine unavailable"))
    }
}
