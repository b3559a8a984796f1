use std::collections::HashMap;

use axum::extract::Multipart;

use crate::web::ApiError;

/// One file part, buffered in memory. Every accepted upload is bounded by a
/// per-endpoint size ceiling well below the router body limit.
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Fully-read multipart form: repeated text fields plus named file parts.
#[derive(Default)]
pub struct FormData {
    text_fields: HashMap<String, Vec<String>>,
    files: HashMap<String, UploadedFile>,
}

impl FormData {
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = FormData::default();

        while let Some(field) = multipart.next_field().await.map_err(|err| {
            ApiError::validation(format!("Failed to parse upload form: {err}"))
        })? {
            let field_name = field.name().unwrap_or("").to_string();

            if let Some(file_name) = field.file_name() {
                let file_name = file_name.to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(|err| {
                    ApiError::validation(format!("Failed to read uploaded file: {err}"))
                })?;
                form.files.insert(
                    field_name,
                    UploadedFile {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    },
                );
                continue;
            }

            let value = field.text().await.map_err(|err| {
                ApiError::validation(format!("Failed to read field `{field_name}`: {err}"))
            })?;
            form.text_fields.entry(field_name).or_default().push(value);
        }

        Ok(form)
    }

    pub fn text(&self, field_name: &str) -> Option<&str> {
        self.text_fields
            .get(field_name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the named file part, treating empty parts as absent. Browsers
    /// send a zero-byte part for an optional file input left blank.
    pub fn file(&self, field_name: &str) -> Option<&UploadedFile> {
        self.files.get(field_name).filter(|file| !file.is_empty())
    }
}
