use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for accepted image filenames
    /// Must end with a lowercase `.jpg` or `.jpeg` extension
    /// - Valid: "photo.jpg", "holiday.2024.jpeg", "a b.jpg"
    /// - Invalid: "photo.png", "photo.JPG", "photo.jpg.exe", "jpg"
    pub static ref JPEG_FILENAME_REGEX: Regex = Regex::new(r"\.(jpg|jpeg)$").unwrap();
}

/// Check whether a client-supplied filename names a JPEG image
pub fn is_jpeg_filename(filename: &str) -> bool {
    JPEG_FILENAME_REGEX.is_match(filename)
}
