use crate::layout::FitMode;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// File name used for every generated document unless overridden
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "converted_images.pdf";

/// Pause before heavy work starts so the busy state can be painted
pub const DEFAULT_REPAINT_DELAY_MS: u64 = 500;

/// Conversion configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConvertOptions {
    // Page
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    pub fit_mode: FitMode,

    // Output
    pub output_file_name: String,
    pub document_title: String,

    pub repaint_delay_ms: u64,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            fit_mode: FitMode::Orientation,
            output_file_name: DEFAULT_OUTPUT_FILE_NAME.to_string(),
            document_title: "Converted Images".to_string(),
            repaint_delay_ms: DEFAULT_REPAINT_DELAY_MS,
        }
    }
}

impl ConvertOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ImageError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ImageError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Page size in millimeters with orientation applied
    pub fn page_dimensions_mm(&self) -> (f32, f32) {
        self.paper_size.dimensions_with_orientation(self.orientation)
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.page_dimensions_mm();
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(ImageError::Config(format!(
                "Page size must be positive, got {} x {} mm",
                width, height
            )));
        }

        if self.output_file_name.trim().is_empty() {
            return Err(ImageError::Config(
                "Output file name must not be empty".to_string(),
            ));
        }

        if self.output_file_name.contains(['/', '\\']) {
            return Err(ImageError::Config(format!(
                "Output file name must not contain a path separator: {}",
                self.output_file_name
            )));
        }

        Ok(())
    }
}
