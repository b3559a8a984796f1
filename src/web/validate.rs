use std::sync::OnceLock;

use regex::Regex;

use crate::web::ApiError;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
pub const MAX_DOCX_BYTES: usize = 10 * 1024 * 1024;
pub const MAX_PDF_BYTES: usize = 50 * 1024 * 1024;

/// Accepted content types for payment screenshots.
pub const PAYMENT_IMAGE_TYPES: &[&str] = &["image/png", "image/jpeg", "image/jpg"];

/// Accepted content types for board member photos.
pub const PHOTO_IMAGE_TYPES: &[&str] = &["image/png", "image/jpeg", "image/jpg", "image/webp"];

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

/// Trims a required text field, rejecting absent or blank values.
pub fn required_text(value: Option<&str>, field: &str) -> Result<String, ApiError> {
    match value.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed.to_string()),
        _ => Err(ApiError::validation(format!("{field} is required"))),
    }
}

/// Trims an optional field, collapsing blank input to `None`.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}

/// Validates and normalizes an email address to lowercase.
pub fn email_address(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim();
    if !email_pattern().is_match(trimmed) {
        return Err(ApiError::validation(
            "Please provide a valid email address",
        ));
    }
    Ok(trimmed.to_ascii_lowercase())
}

fn has_extension(file_name: &str, extension: &str) -> bool {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

pub fn docx_upload(file_name: &str, size: usize) -> Result<(), ApiError> {
    if !has_extension(file_name, "docx") {
        return Err(ApiError::validation("Only DOCX files are allowed"));
    }
    if size > MAX_DOCX_BYTES {
        return Err(ApiError::validation(
            "DOCX file size must be less than 10MB",
        ));
    }
    Ok(())
}

pub fn pdf_upload(file_name: &str, size: usize) -> Result<(), ApiError> {
    if !has_extension(file_name, "pdf") {
        return Err(ApiError::validation("Only PDF files are allowed"));
    }
    if size > MAX_PDF_BYTES {
        return Err(ApiError::validation(
            "PDF file size must be less than 50MB",
        ));
    }
    Ok(())
}

pub fn image_upload(
    content_type: Option<&str>,
    size: usize,
    allowed_types: &[&str],
) -> Result<(), ApiError> {
    // Parse through `mime` so parameters like `; charset=` don't defeat the
    // allow-list.
    let parsed = content_type.and_then(|value| value.parse::<mime::Mime>().ok());
    let accepted = parsed
        .as_ref()
        .is_some_and(|value| allowed_types.contains(&value.essence_str()));
    if !accepted {
        return Err(ApiError::validation(
            "Invalid file type. Only PNG, JPG, JPEG, and WEBP images are allowed",
        ));
    }
    if size > MAX_IMAGE_BYTES {
        return Err(ApiError::validation(
            "File size too large. Maximum size is 5MB",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_trims_and_rejects_blank() {
        assert_eq!(
            required_text(Some("  Paper A  "), "Title").unwrap(),
            "Paper A"
        );
        assert!(required_text(Some("   "), "Title").is_err());
        assert!(required_text(None, "Title").is_err());
    }

    #[test]
    fn optional_text_collapses_blank_to_none() {
        assert_eq!(optional_text(Some(" bio ")), Some("bio".to_string()));
        assert_eq!(optional_text(Some("   ")), None);
        assert_eq!(optional_text(None), None);
    }

    #[test]
    fn email_normalizes_case() {
        assert_eq!(
            email_address(" Jane@X.Com ").unwrap(),
            "jane@x.com".to_string()
        );
    }

    #[test]
    fn email_rejects_malformed_input() {
        assert!(email_address("jane").is_err());
        assert!(email_address("jane@x").is_err());
        assert!(email_address("jane @x.com").is_err());
        assert!(email_address("@x.com").is_err());
    }

    #[test]
    fn docx_extension_is_case_insensitive() {
        assert!(docx_upload("paper.docx", 1024).is_ok());
        assert!(docx_upload("paper.DOCX", 1024).is_ok());
        assert!(docx_upload("paper.doc", 1024).is_err());
        assert!(docx_upload("paper", 1024).is_err());
    }

    #[test]
    fn docx_size_ceiling() {
        assert!(docx_upload("paper.docx", MAX_DOCX_BYTES).is_ok());
        assert!(docx_upload("paper.docx", MAX_DOCX_BYTES + 1).is_err());
    }

    #[test]
    fn pdf_checks_extension_and_size() {
        assert!(pdf_upload("issue.pdf", 1024).is_ok());
        assert!(pdf_upload("issue.docx", 1024).is_err());
        assert!(pdf_upload("issue.pdf", MAX_PDF_BYTES + 1).is_err());
    }

    #[test]
    fn image_checks_type_and_size() {
        assert!(image_upload(Some("image/png"), 1024, PAYMENT_IMAGE_TYPES).is_ok());
        assert!(image_upload(Some("image/webp"), 1024, PAYMENT_IMAGE_TYPES).is_err());
        assert!(image_upload(Some("image/webp"), 1024, PHOTO_IMAGE_TYPES).is_ok());
        assert!(image_upload(Some("application/pdf"), 1024, PHOTO_IMAGE_TYPES).is_err());
        assert!(image_upload(None, 1024, PHOTO_IMAGE_TYPES).is_err());
        assert!(image_upload(Some("image/png"), MAX_IMAGE_BYTES + 1, PHOTO_IMAGE_TYPES).is_err());
    }
}
