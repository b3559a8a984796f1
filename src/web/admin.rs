use axum::Json;
use axum::extract::{Multipart, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::web::{
    ApiError, AppState, data,
    models::ArticleRow,
    multipart::FormData,
    status::ArticleStatus,
    storage::Bucket,
    validate,
};

#[derive(Serialize)]
pub struct AdminArticlesResponse {
    articles: Vec<ArticleRow>,
}

/// GET /api/admin/approve — every article regardless of status, newest first.
pub async fn list_all(
    State(state): State<AppState>,
) -> Result<Json<AdminArticlesResponse>, ApiError> {
    let articles = data::list_all_articles(state.pool_ref()).await?;
    Ok(Json(AdminArticlesResponse { articles }))
}

#[derive(Deserialize)]
pub struct SetStatusRequest {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Serialize)]
pub struct SetStatusResponse {
    success: bool,
    article: ArticleRow,
}

/// PATCH /api/admin/approve — admin review decision on a submission.
pub async fn set_status(
    State(state): State<AppState>,
    Json(request): Json<SetStatusRequest>,
) -> Result<Json<SetStatusResponse>, ApiError> {
    let id_raw = validate::required_text(request.id.as_deref(), "Article ID")?;
    let status_raw = validate::required_text(request.status.as_deref(), "Status")?;

    let id = Uuid::parse_str(&id_raw)
        .map_err(|_| ApiError::validation("Article ID must be a valid UUID"))?;
    let next = ArticleStatus::parse(&status_raw).ok_or_else(|| {
        ApiError::validation("Invalid status. Must be pending, approved, or rejected")
    })?;

    let article = data::fetch_article(state.pool_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found("Article not found"))?;

    if let Some(current) = ArticleStatus::parse(&article.status) {
        if !state.config().transition_policy.allows(current, next) {
            return Err(ApiError::validation(format!(
                "Status transition from {} to {} is not permitted",
                current.as_str(),
                next.as_str()
            )));
        }
    }

    let article = data::update_article_status(state.pool_ref(), id, next.as_str())
        .await?
        .ok_or_else(|| ApiError::not_found("Article not found"))?;

    Ok(Json(SetStatusResponse {
        success: true,
        article,
    }))
}

#[derive(Serialize)]
pub struct PublishResponse {
    success: bool,
    message: String,
    article: PublishedArticle,
}

#[derive(Serialize)]
struct PublishedArticle {
    id: Uuid,
    title: String,
    volume: Option<String>,
    issue: Option<String>,
    pdf_url: Option<String>,
    is_published: bool,
}

impl From<ArticleRow> for PublishedArticle {
    fn from(article: ArticleRow) -> Self {
        Self {
            id: article.id,
            title: article.title,
            volume: article.volume,
            issue: article.issue,
            pdf_url: article.pdf_url,
            is_published: article.is_published,
        }
    }
}

/// POST /api/admin/publish — attach an issue PDF to an existing article, or
/// create a standalone published entry when no article id is supplied.
pub async fn publish(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<PublishResponse>, ApiError> {
    let form = FormData::read(multipart).await?;

    let volume = validate::required_text(form.text("volume"), "Volume")?;
    let issue = validate::required_text(form.text("issue"), "Issue")?;
    let pdf = form
        .file("pdf")
        .ok_or_else(|| ApiError::validation("Volume, Issue, and PDF file are required"))?;
    validate::pdf_upload(&pdf.file_name, pdf.bytes.len())?;

    let article_id = match form.text("articleId").map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(
            Uuid::parse_str(raw)
                .map_err(|_| ApiError::validation("Article ID must be a valid UUID"))?,
        ),
        _ => None,
    };

    let blob = state
        .store()
        .put(Bucket::Pdfs, &pdf.file_name, &pdf.bytes)
        .await?;

    let article = match article_id {
        Some(id) => data::publish_article(state.pool_ref(), id, &volume, &issue, &blob.url)
            .await?
            .ok_or_else(|| ApiError::not_found("Article not found"))?,
        None => {
            data::insert_published_article(state.pool_ref(), &volume, &issue, &blob.url).await?
        }
    };

    Ok(Json(PublishResponse {
        success: true,
        message: "Article published successfully".to_string(),
        article: article.into(),
    }))
}
