//! Configuration structures for the statement pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, StmtError};

/// Main configuration for the cardstmt pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CardstmtConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// OCR configuration.
    pub ocr: OcrConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// A PDF counts as text-based when any single page has more than this
    /// many characters of trimmed text.
    pub min_text_length: usize,

    /// Maximum pages to OCR (0 = unlimited).
    pub max_pages: usize,

    /// Use the embedded text layer when the PDF has one.
    pub prefer_embedded_text: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_length: 50,
            max_pages: 0,
            prefer_embedded_text: true,
        }
    }
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,

    /// Keep `[UNK]` tokens in recognized text instead of blanking them.
    pub keep_unknown: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
            keep_unknown: false,
        }
    }
}

impl OcrConfig {
    /// Full paths to the detection model, recognition model, and dictionary.
    pub fn model_paths(&self) -> (PathBuf, PathBuf, PathBuf) {
        (
            self.model_dir.join(&self.detection_model),
            self.model_dir.join(&self.recognition_model),
            self.model_dir.join(&self.dictionary),
        )
    }

    /// Whether all model files are present on disk.
    pub fn models_available(&self) -> bool {
        let (det, rec, dict) = self.model_paths();
        det.exists() && rec.exists() && dict.exists()
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Characters scanned forward from a matched label for its value.
    pub context_window: usize,

    /// Smallest amount the minimum-due fallback will accept.
    pub minimum_due_floor: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            context_window: 250,
            minimum_due_floor: 50.0,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for saved results.
    pub directory: PathBuf,

    /// File name for a single saved result.
    pub file_name: String,

    /// JSON indentation width in spaces.
    pub indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
            file_name: "result.json".to_string(),
            indent: 4,
        }
    }
}

impl OutputConfig {
    /// Path a single saved result is written to.
    pub fn result_path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

impl CardstmtConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| StmtError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file, creating its directory if needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            serde_json::to_string_pretty(self).map_err(|e| StmtError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_engine_constants() {
        let config = CardstmtConfig::default();
        assert_eq!(config.extraction.context_window, 250);
        assert_eq!(config.extraction.minimum_due_floor, 50.0);
        assert_eq!(config.pdf.min_text_length, 50);
        assert_eq!(config.output.indent, 4);
        assert_eq!(config.output.result_path(), PathBuf::from("output/result.json"));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: CardstmtConfig =
            serde_json::from_str(r#"{"extraction": {"context_window": 100}}"#).unwrap();
        assert_eq!(config.extraction.context_window, 100);
        assert_eq!(config.extraction.minimum_due_floor, 50.0);
        assert_eq!(config.ocr.detection_model, "det.onnx");
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = CardstmtConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, StmtError::Config(_)));
    }
}
