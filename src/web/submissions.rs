use axum::Json;
use axum::extract::{Multipart, State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::web::{
    ApiError, AppState,
    data::{self, NewSubmission},
    multipart::FormData,
    storage::Bucket,
    validate,
};

#[derive(Serialize)]
pub struct UploadResponse {
    success: bool,
    article: CreatedArticle,
}

#[derive(Serialize)]
struct CreatedArticle {
    id: Uuid,
    title: String,
    status: String,
    created_at: DateTime<Utc>,
}

/// POST /api/upload — the manuscript submission workflow.
///
/// Validation, blob uploads, user resolution, and the article insert run as a
/// straight-line sequence; the first failure aborts the rest. A blob persisted
/// before a later step fails is left behind rather than rolled back.
pub async fn submit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let form = FormData::read(multipart).await?;

    let title = validate::required_text(form.text("title"), "Title")?;
    let author_name = validate::required_text(form.text("authorName"), "Author name")?;
    let email_raw = validate::required_text(form.text("email"), "Email")?;
    let email = validate::email_address(&email_raw)?;
    let mobile_number = validate::required_text(form.text("mobileNumber"), "Mobile number")?;

    let manuscript = form
        .file("file")
        .ok_or_else(|| ApiError::validation("Manuscript file is required"))?;
    validate::docx_upload(&manuscript.file_name, manuscript.bytes.len())?;

    let payment = form.file("paymentScreenshot");
    if let Some(screenshot) = payment {
        validate::image_upload(
            screenshot.content_type.as_deref(),
            screenshot.bytes.len(),
            validate::PAYMENT_IMAGE_TYPES,
        )?;
    }

    let docx = state
        .store()
        .put(Bucket::Documents, &manuscript.file_name, &manuscript.bytes)
        .await?;

    let payment_screenshot_url = match payment {
        Some(screenshot) => Some(
            state
                .store()
                .put(Bucket::Payments, &screenshot.file_name, &screenshot.bytes)
                .await?
                .url,
        ),
        None => None,
    };

    let user = data::resolve_user(state.pool_ref(), &email, &mobile_number, &author_name).await?;

    let article = data::insert_submission(
        state.pool_ref(),
        NewSubmission {
            user_id: user.id,
            title,
            author_name,
            docx_url: docx.url,
            payment_screenshot_url,
        },
    )
    .await?;

    Ok(Json(UploadResponse {
        success: true,
        article: CreatedArticle {
            id: article.id,
            title: article.title,
            status: article.status,
            created_at: article.created_at,
        },
    }))
}
