use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Clone, Debug, FromRow, Serialize)]
pub struct ArticleRow {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub title: String,
    pub author_name: String,
    pub docx_url: String,
    pub pdf_url: Option<String>,
    pub payment_screenshot_url: Option<String>,
    pub status: String,
    pub is_published: bool,
    pub volume: Option<String>,
    pub issue: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Submitting author, created lazily on first submission and keyed by email.
#[derive(Clone, Debug, FromRow, Serialize)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub mobile_number: String,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, FromRow, Serialize)]
pub struct BoardMemberRow {
    pub id: Uuid,
    pub name: String,
    pub title: String,
    pub affiliation: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub order_index: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, FromRow, Serialize)]
pub struct ContactMessageRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub phone: Option<String>,
    pub organization: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Credential row used during login.
#[derive(Clone, FromRow)]
pub struct AccountAuthRow {
    pub id: Uuid,
    pub password_hash: String,
}

/// Account identity exposed through the auth endpoints.
#[derive(Clone, Debug, FromRow, Serialize)]
pub struct AccountRow {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}
