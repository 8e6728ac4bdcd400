//! Attachment processor
//!
//! Validates and transforms uploads before anything touches storage:
//! classification by extension, size limits for text files, and
//! decode/downscale/re-encode for images. Pure bytes-in/bytes-out; the blob
//! store and repository are invoked by the service afterwards.
//!
//! Policy is fail-closed: any decode, resize, or encode error rejects the
//! upload as an invalid image. Nothing is silently dropped.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};
use uuid::Uuid;

use comment_core::entities::AttachmentKind;
use comment_core::error::Violation;

/// Maximum accepted size for text attachments
pub const MAX_TEXT_ATTACHMENT_BYTES: usize = 100 * 1024;

/// Bounding box for stored images
pub const MAX_IMAGE_WIDTH: u32 = 320;
pub const MAX_IMAGE_HEIGHT: u32 = 240;

/// Re-encode quality for lossy formats
const JPEG_QUALITY: u8 = 90;

/// A raw upload as received from the client
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// A validated, possibly-transformed attachment ready for storage
#[derive(Debug, Clone)]
pub struct ProcessedAttachment {
    pub kind: AttachmentKind,
    /// Final bytes to store
    pub bytes: Vec<u8>,
    /// Original filename, preserved for display
    pub name: String,
    /// Byte length of `bytes`
    pub size: i64,
    /// Lowercased original extension, used for the storage key
    pub extension: String,
}

impl ProcessedAttachment {
    /// Generate a storage key: a fresh UUID plus the original extension.
    /// Collision-free by construction, not by check.
    #[must_use]
    pub fn storage_key(&self) -> String {
        format!("{}.{}", Uuid::new_v4(), self.extension)
    }
}

/// Validate and transform an upload.
///
/// CPU-bound for images; callers on an async runtime should run this via
/// `spawn_blocking`.
pub fn process(upload: Upload) -> Result<ProcessedAttachment, Violation> {
    let extension = extension_of(&upload.filename)
        .ok_or_else(|| Violation::UnsupportedFormat {
            filename: upload.filename.clone(),
        })?
        .to_ascii_lowercase();

    match extension.as_str() {
        "txt" => process_text(upload, extension),
        "jpg" | "jpeg" | "png" | "gif" => process_image(upload, extension),
        _ => Err(Violation::UnsupportedFormat {
            filename: upload.filename,
        }),
    }
}

fn extension_of(filename: &str) -> Option<&str> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext)
}

fn process_text(upload: Upload, extension: String) -> Result<ProcessedAttachment, Violation> {
    if upload.bytes.len() > MAX_TEXT_ATTACHMENT_BYTES {
        return Err(Violation::AttachmentTooLarge {
            limit: MAX_TEXT_ATTACHMENT_BYTES,
            actual: upload.bytes.len(),
        });
    }

    let size = upload.bytes.len() as i64;
    Ok(ProcessedAttachment {
        kind: AttachmentKind::Text,
        bytes: upload.bytes,
        name: upload.filename,
        size,
        extension,
    })
}

fn process_image(upload: Upload, extension: String) -> Result<ProcessedAttachment, Violation> {
    let format = image::guess_format(&upload.bytes).map_err(|_| Violation::InvalidImage)?;
    if !matches!(format, ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::Gif) {
        return Err(Violation::InvalidImage);
    }

    let img = image::load_from_memory_with_format(&upload.bytes, format)
        .map_err(|_| Violation::InvalidImage)?;
    let (width, height) = img.dimensions();

    // Already within bounds: keep the upload byte-for-byte. The stored size
    // can never exceed the original this way, and pixel dimensions stay
    // untouched.
    if width <= MAX_IMAGE_WIDTH && height <= MAX_IMAGE_HEIGHT {
        let size = upload.bytes.len() as i64;
        return Ok(ProcessedAttachment {
            kind: AttachmentKind::Image,
            bytes: upload.bytes,
            name: upload.filename,
            size,
            extension,
        });
    }

    let (new_width, new_height) = fit_bounds(width, height);
    let resized = img.resize_exact(new_width, new_height, FilterType::Lanczos3);

    // Flatten palette/alpha color modes before re-encoding
    let flat = DynamicImage::ImageRgb8(resized.to_rgb8());
    let bytes = encode(&flat, format).map_err(|_| Violation::InvalidImage)?;

    let size = bytes.len() as i64;
    Ok(ProcessedAttachment {
        kind: AttachmentKind::Image,
        bytes,
        name: upload.filename,
        size,
        extension,
    })
}

/// Scale dimensions into the bounding box preserving aspect ratio.
/// Factor is min(320/w, 240/h); the free axis is floored, never below 1.
/// Integer arithmetic keeps the limiting axis exact.
fn fit_bounds(width: u32, height: u32) -> (u32, u32) {
    let (w, h) = (u64::from(width), u64::from(height));
    let (max_w, max_h) = (u64::from(MAX_IMAGE_WIDTH), u64::from(MAX_IMAGE_HEIGHT));

    // Width-limited iff 320/w <= 240/h, i.e. 320*h <= 240*w
    if max_w * h <= max_h * w {
        let new_height = ((h * max_w / w).max(1)) as u32;
        (MAX_IMAGE_WIDTH, new_height)
    } else {
        let new_width = ((w * max_h / h).max(1)) as u32;
        (new_width, MAX_IMAGE_HEIGHT)
    }
}

fn encode(img: &DynamicImage, format: ImageFormat) -> image::ImageResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    match format {
        ImageFormat::Jpeg => {
            let encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
            img.write_with_encoder(encoder)?;
        }
        other => {
            img.write_to(&mut buffer, other)?;
        }
    }
    Ok(buffer.into_inner())
}
