//! Fit an image onto a fixed page size.
//!
//! All page measurements are millimeters with the origin at the top-left
//! corner of the page. The writer converts to PDF user space when placing.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rounding slack when comparing against page edges
const OVERFLOW_TOLERANCE_MM: f32 = 1e-3;

/// How an image is scaled onto the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FitMode {
    /// Landscape images span the page width, portrait and square images span
    /// the page height. A portrait image wider (relative to the page) than the
    /// page is left overflowing, with a negative horizontal offset.
    #[default]
    Orientation,
    /// Largest size that keeps the whole image on the page
    Contain,
}

/// Placement of one image on one page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub image_width: u32,
    pub image_height: u32,
    pub page_width: f32,
    pub page_height: f32,
    pub width: f32,
    pub height: f32,
    pub x: f32,
    pub y: f32,
}

impl PageLayout {
    /// Layout with the default [`FitMode::Orientation`] rule.
    pub fn compute(image_width: u32, image_height: u32, page_width: f32, page_height: f32) -> Self {
        Self::compute_with(
            FitMode::Orientation,
            image_width,
            image_height,
            page_width,
            page_height,
        )
    }

    pub fn compute_with(
        mode: FitMode,
        image_width: u32,
        image_height: u32,
        page_width: f32,
        page_height: f32,
    ) -> Self {
        let w = image_width as f32;
        let h = image_height as f32;

        let (width, height) = match mode {
            FitMode::Orientation => {
                if image_width > image_height {
                    (page_width, h * page_width / w)
                } else {
                    (w * page_height / h, page_height)
                }
            }
            FitMode::Contain => {
                let scale = (page_width / w).min(page_height / h);
                (w * scale, h * scale)
            }
        };

        Self {
            image_width,
            image_height,
            page_width,
            page_height,
            width,
            height,
            x: (page_width - width) / 2.0,
            y: (page_height - height) / 2.0,
        }
    }

    /// True when part of the image falls outside the page
    pub fn overflows(&self) -> bool {
        self.x < -OVERFLOW_TOLERANCE_MM || self.y < -OVERFLOW_TOLERANCE_MM
    }
}
