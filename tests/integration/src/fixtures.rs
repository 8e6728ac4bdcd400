//! Test fixtures
//!
//! Multipart form builders and synthetic attachment bytes.

use std::io::Cursor;

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use reqwest::multipart::{Form, Part};

/// Base multipart form for a create-comment request
pub fn comment_form(text: &str) -> Form {
    Form::new().text("text", text.to_string())
}

/// Add a parent reference to a create form
pub fn with_parent(form: Form, parent_id: &str) -> Form {
    form.text("parent_comment_id", parent_id.to_string())
}

/// Add an attachment part to a create form
pub fn with_attachment(form: Form, filename: &str, bytes: Vec<u8>) -> Form {
    let part = Part::bytes(bytes).file_name(filename.to_string());
    form.part("attachment", part)
}

/// Synthesize JPEG bytes of the given dimensions
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = ImageBuffer::from_pixel(width, height, Rgb([90u8, 120, 40]));
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut buffer, ImageFormat::Jpeg)
        .expect("encoding fixture image");
    buffer.into_inner()
}

/// Synthesize PNG bytes of the given dimensions
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = ImageBuffer::from_pixel(width, height, Rgb([20u8, 60, 180]));
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut buffer, ImageFormat::Png)
        .expect("encoding fixture image");
    buffer.into_inner()
}

/// Text-file bytes of the given length
pub fn text_bytes(len: usize) -> Vec<u8> {
    vec![b'a'; len]
}

/// Unique comment text, so concurrent test runs don't collide
pub fn unique_text(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4())
}
