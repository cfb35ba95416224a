//! Turn raw file bytes into something the document writer can embed.

use crate::types::*;
use image::{DynamicImage, ImageFormat};

/// Color model of embeddable samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorModel {
    Gray,
    Rgb,
}

impl ColorModel {
    pub fn pdf_name(self) -> &'static [u8] {
        match self {
            ColorModel::Gray => b"DeviceGray",
            ColorModel::Rgb => b"DeviceRGB",
        }
    }
}

/// Payload handed to the writer
#[derive(Debug, Clone)]
pub enum ImageData {
    /// Original JPEG stream, embedded without re-encoding
    Jpeg { bytes: Vec<u8>, color: ColorModel },
    /// Uncompressed 8-bit samples plus an optional alpha plane
    Pixels {
        color: ColorModel,
        samples: Vec<u8>,
        alpha: Option<Vec<u8>>,
    },
}

/// A decoded image with its intrinsic pixel size
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    pub data: ImageData,
}

/// RGBA preview bitmap
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

/// Read and decode a selected file
pub async fn decode_image(file: &SelectedFile) -> Result<DecodedImage> {
    let bytes = file.source.read().await?;
    let name = file.name.clone();

    // Decoding is CPU-bound, spawn blocking
    tokio::task::spawn_blocking(move || decode_bytes(&name, &bytes)).await?
}

/// Read a selected file and scale it down to fit `max_side` pixels
pub async fn decode_thumbnail(file: &SelectedFile, max_side: u32) -> Result<Thumbnail> {
    let bytes = file.source.read().await?;
    let name = file.name.clone();

    tokio::task::spawn_blocking(move || {
        let image = load(&name, &bytes)?.1;
        let rgba = image.thumbnail(max_side, max_side).to_rgba8();
        Ok(Thumbnail {
            width: rgba.width() as usize,
            height: rgba.height() as usize,
            rgba: rgba.into_raw(),
        })
    })
    .await?
}

pub fn decode_bytes(name: &str, bytes: &[u8]) -> Result<DecodedImage> {
    let (format, image) = load(name, bytes)?;
    let (width, height) = (image.width(), image.height());

    if width == 0 || height == 0 {
        return Err(ImageError::UnsupportedImage {
            name: name.to_string(),
            reason: format!("empty image ({}x{})", width, height),
        });
    }

    let data = match (format, jpeg_components(bytes)) {
        (ImageFormat::Jpeg, Some(1)) => ImageData::Jpeg {
            bytes: bytes.to_vec(),
            color: ColorModel::Gray,
        },
        (ImageFormat::Jpeg, Some(3)) => ImageData::Jpeg {
            bytes: bytes.to_vec(),
            color: ColorModel::Rgb,
        },
        _ => pixels(&image),
    };

    log::debug!("Decoded {} as {:?} ({}x{})", name, format, width, height);

    Ok(DecodedImage {
        name: name.to_string(),
        width,
        height,
        format,
        data,
    })
}

fn load(name: &str, bytes: &[u8]) -> Result<(ImageFormat, DynamicImage)> {
    let decode_error = |source| ImageError::Decode {
        name: name.to_string(),
        source,
    };
    // Formats without a magic number (TGA) can only be told apart by name
    let format = image::guess_format(bytes)
        .or_else(|e| ImageFormat::from_path(name).map_err(|_| e))
        .map_err(decode_error)?;
    let image = image::load_from_memory_with_format(bytes, format).map_err(decode_error)?;
    Ok((format, image))
}

fn pixels(image: &DynamicImage) -> ImageData {
    let color_type = image.color();
    let gray = matches!(
        color_type,
        image::ColorType::L8 | image::ColorType::L16 | image::ColorType::La8 | image::ColorType::La16
    );

    let alpha = color_type.has_alpha().then(|| {
        image
            .to_rgba8()
            .pixels()
            .map(|p| p.0[3])
            .collect::<Vec<u8>>()
    });

    if gray {
        ImageData::Pixels {
            color: ColorModel::Gray,
            samples: image.to_luma8().into_raw(),
            alpha,
        }
    } else {
        ImageData::Pixels {
            color: ColorModel::Rgb,
            samples: image.to_rgb8().into_raw(),
            alpha,
        }
    }
}

/// Component count of a JPEG frame that PDF readers can consume as-is.
///
/// Only baseline, extended and progressive Huffman frames qualify; anything
/// else returns `None` and is embedded from decoded samples instead.
fn jpeg_components(bytes: &[u8]) -> Option<u8> {
    if bytes.len() < 4 || bytes[0] != 0xFF || bytes[1] != 0xD8 {
        return None;
    }

    let mut pos = 2;
    while pos + 4 <= bytes.len() {
        if bytes[pos] != 0xFF {
            return None;
        }
        let marker = bytes[pos + 1];
        match marker {
            // Fill byte
            0xFF => {
                pos += 1;
                continue;
            }
            // Standalone markers carry no length
            0x01 | 0xD0..=0xD8 => {
                pos += 2;
                continue;
            }
            // Start of scan or end of image before any frame header
            0xD9 | 0xDA => return None,
            _ => {}
        }

        let length = u16::from_be_bytes([bytes[pos + 2], bytes[pos + 3]]) as usize;
        match marker {
            // SOF segment: length(2) precision(1) height(2) width(2) components(1)
            0xC0..=0xC2 => {
                return match bytes.get(pos + 4) {
                    Some(8) => bytes.get(pos + 9).copied(),
                    _ => None,
                };
            }
            0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF => return None,
            _ => pos += 2 + length,
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jpeg_components_reads_sof0() {
        // SOI, APP0 (length 4), SOF0 with 3 components
        let bytes = [
            0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x04, 0x00, 0x00, 0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00,
            0x10, 0x00, 0x20, 0x03,
        ];
        assert_eq!(jpeg_components(&bytes), Some(3));
    }

    #[test]
    fn jpeg_components_rejects_lossless_and_non_jpeg() {
        let lossless = [
            0xFF, 0xD8, 0xFF, 0xC3, 0x00, 0x0B, 0x08, 0x00, 0x10, 0x00, 0x20, 0x01,
        ];
        assert_eq!(jpeg_components(&lossless), None);
        assert_eq!(jpeg_components(b"\x89PNG\r\n\x1a\n"), None);
    }

    #[test]
    fn jpeg_components_rejects_twelve_bit_frames() {
        // SOI, SOF1 with 12-bit precision and 3 components
        let extended = [
            0xFF, 0xD8, 0xFF, 0xC1, 0x00, 0x11, 0x0C, 0x00, 0x10, 0x00, 0x20, 0x03,
        ];
        assert_eq!(jpeg_components(&extended), None);
    }

    #[test]
    fn tga_is_decoded_by_extension() {
        let image = image::RgbImage::from_pixel(8, 4, image::Rgb([1, 2, 3]));
        let mut buf = std::io::Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(image)
            .write_to(&mut buf, ImageFormat::Tga)
            .unwrap();

        let decoded = decode_bytes("pic.tga", buf.get_ref()).unwrap();
        assert_eq!(decoded.format, ImageFormat::Tga);
        assert_eq!((decoded.width, decoded.height), (8, 4));
        assert!(decode_bytes("pic.bin", buf.get_ref()).is_err());
    }
}
