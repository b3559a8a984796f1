use axum::Json;
use axum::extract::{Query, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::web::{ApiError, AppState, data, models::ArticleRow, validate};

#[derive(Serialize)]
pub struct ArticlesResponse {
    articles: Vec<ArticleRow>,
}

/// GET /api/articles — the public listing: approved articles, newest first.
pub async fn list_approved(
    State(state): State<AppState>,
) -> Result<Json<ArticlesResponse>, ApiError> {
    let articles = data::list_articles_by_status(state.pool_ref(), "approved").await?;
    Ok(Json(ArticlesResponse { articles }))
}

#[derive(Deserialize)]
pub struct UserSubmissionsQuery {
    #[serde(default)]
    email: Option<String>,
}

#[derive(Serialize)]
struct SubmissionSummary {
    id: Uuid,
    title: String,
    docx_url: String,
    payment_screenshot_url: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
}

impl From<ArticleRow> for SubmissionSummary {
    fn from(article: ArticleRow) -> Self {
        Self {
            id: article.id,
            title: article.title,
            docx_url: article.docx_url,
            payment_screenshot_url: article.payment_screenshot_url,
            status: article.status,
            created_at: article.created_at,
        }
    }
}

#[derive(Serialize)]
struct UserWithSubmissions {
    id: Uuid,
    email: String,
    mobile_number: String,
    author_name: String,
    created_at: DateTime<Utc>,
    articles: Vec<SubmissionSummary>,
}

#[derive(Serialize)]
pub struct UserSubmissionsResponse {
    user: UserWithSubmissions,
}

/// GET /api/user-submissions?email= — an author's profile with their articles.
pub async fn user_submissions(
    State(state): State<AppState>,
    Query(query): Query<UserSubmissionsQuery>,
) -> Result<Json<UserSubmissionsResponse>, ApiError> {
    let raw = validate::required_text(query.email.as_deref(), "Email parameter")?;
    let email = validate::email_address(&raw)?;

    let user = data::fetch_user_by_email(state.pool_ref(), &email)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let articles = data::list_articles_for_user(state.pool_ref(), user.id)
        .await?
        .into_iter()
        .map(SubmissionSummary::from)
        .collect();

    Ok(Json(UserSubmissionsResponse {
        user: UserWithSubmissions {
            id: user.id,
            email: user.email,
            mobile_number: user.mobile_number,
            author_name: user.author_name,
            created_at: user.created_at,
            articles,
        },
    }))
}
