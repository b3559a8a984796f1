use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{
    AccountAuthRow, AccountRow, ArticleRow, BoardMemberRow, ContactMessageRow, UserRow,
};

const ARTICLE_COLUMNS: &str = "id, user_id, title, author_name, docx_url, pdf_url, \
     payment_screenshot_url, status, is_published, volume, issue, created_at, updated_at";

const MEMBER_COLUMNS: &str = "id, name, title, affiliation, email, phone_number, bio, \
     photo_url, order_index, is_active, created_at, updated_at";

// ---------------------------------------------------------------------------
// Articles

pub struct NewSubmission {
    pub user_id: Uuid,
    pub title: String,
    pub author_name: String,
    pub docx_url: String,
    pub payment_screenshot_url: Option<String>,
}

pub async fn list_articles_by_status(pool: &PgPool, status: &str) -> sqlx::Result<Vec<ArticleRow>> {
    sqlx::query_as::<_, ArticleRow>(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles WHERE status = $1 ORDER BY created_at DESC"
    ))
    .bind(status)
    .fetch_all(pool)
    .await
}

pub async fn list_all_articles(pool: &PgPool) -> sqlx::Result<Vec<ArticleRow>> {
    sqlx::query_as::<_, ArticleRow>(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await
}

pub async fn list_articles_for_user(pool: &PgPool, user_id: Uuid) -> sqlx::Result<Vec<ArticleRow>> {
    sqlx::query_as::<_, ArticleRow>(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles WHERE user_id = $1 ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn fetch_article(pool: &PgPool, id: Uuid) -> sqlx::Result<Option<ArticleRow>> {
    sqlx::query_as::<_, ArticleRow>(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn insert_submission(
    pool: &PgPool,
    submission: NewSubmission,
) -> sqlx::Result<ArticleRow> {
    sqlx::query_as::<_, ArticleRow>(&format!(
        "INSERT INTO articles (id, user_id, title, author_name, docx_url, payment_screenshot_url, status)
         VALUES ($1, $2, $3, $4, $5, $6, 'pending')
         RETURNING {ARTICLE_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(submission.user_id)
    .bind(&submission.title)
    .bind(&submission.author_name)
    .bind(&submission.docx_url)
    .bind(submission.payment_screenshot_url.as_deref())
    .fetch_one(pool)
    .await
}

pub async fn update_article_status(
    pool: &PgPool,
    id: Uuid,
    status: &str,
) -> sqlx::Result<Option<ArticleRow>> {
    sqlx::query_as::<_, ArticleRow>(&format!(
        "UPDATE articles SET status = $2, updated_at = NOW() WHERE id = $1
         RETURNING {ARTICLE_COLUMNS}"
    ))
    .bind(id)
    .bind(status)
    .fetch_optional(pool)
    .await
}

/// Attaches an issue PDF to an existing article and marks it published.
/// Publication implies approval.
pub async fn publish_article(
    pool: &PgPool,
    id: Uuid,
    volume: &str,
    issue: &str,
    pdf_url: &str,
) -> sqlx::Result<Option<ArticleRow>> {
    sqlx::query_as::<_, ArticleRow>(&format!(
        "UPDATE articles
         SET volume = $2, issue = $3, pdf_url = $4, is_published = TRUE,
             status = 'approved', updated_at = NOW()
         WHERE id = $1
         RETURNING {ARTICLE_COLUMNS}"
    ))
    .bind(id)
    .bind(volume)
    .bind(issue)
    .bind(pdf_url)
    .fetch_optional(pool)
    .await
}

/// Creates a standalone published article with no originating submission.
/// The issue label doubles as the title.
pub async fn insert_published_article(
    pool: &PgPool,
    volume: &str,
    issue: &str,
    pdf_url: &str,
) -> sqlx::Result<ArticleRow> {
    sqlx::query_as::<_, ArticleRow>(&format!(
        "INSERT INTO articles (id, title, author_name, docx_url, pdf_url, status,
                               is_published, volume, issue)
         VALUES ($1, $2, 'Editorial Team', '', $3, 'approved', TRUE, $4, $2)
         RETURNING {ARTICLE_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(issue)
    .bind(pdf_url)
    .bind(volume)
    .fetch_one(pool)
    .await
}

// ---------------------------------------------------------------------------
// Users

/// Lookup-or-create keyed on email. The insert races through the unique index
/// rather than select-then-insert, so concurrent first submissions converge on
/// a single row.
pub async fn resolve_user(
    pool: &PgPool,
    email: &str,
    mobile_number: &str,
    author_name: &str,
) -> sqlx::Result<UserRow> {
    let inserted = sqlx::query_as::<_, UserRow>(
        "INSERT INTO users (id, email, mobile_number, author_name)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (email) DO NOTHING
         RETURNING id, email, mobile_number, author_name, created_at",
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(mobile_number)
    .bind(author_name)
    .fetch_optional(pool)
    .await?;

    if let Some(user) = inserted {
        return Ok(user);
    }

    sqlx::query_as::<_, UserRow>(
        "SELECT id, email, mobile_number, author_name, created_at FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_one(pool)
    .await
}

pub async fn fetch_user_by_email(pool: &PgPool, email: &str) -> sqlx::Result<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(
        "SELECT id, email, mobile_number, author_name, created_at FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

// ---------------------------------------------------------------------------
// Editorial board

pub struct NewBoardMember {
    pub name: String,
    pub title: String,
    pub affiliation: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub order_index: i32,
}

pub struct BoardMemberUpdate {
    pub name: String,
    pub title: String,
    pub affiliation: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub order_index: i32,
    pub is_active: bool,
}

pub async fn list_active_members(pool: &PgPool) -> sqlx::Result<Vec<BoardMemberRow>> {
    sqlx::query_as::<_, BoardMemberRow>(&format!(
        "SELECT {MEMBER_COLUMNS} FROM editorial_board WHERE is_active = TRUE
         ORDER BY order_index ASC"
    ))
    .fetch_all(pool)
    .await
}

pub async fn fetch_active_member(pool: &PgPool, id: Uuid) -> sqlx::Result<Option<BoardMemberRow>> {
    sqlx::query_as::<_, BoardMemberRow>(&format!(
        "SELECT {MEMBER_COLUMNS} FROM editorial_board WHERE id = $1 AND is_active = TRUE"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn insert_member(pool: &PgPool, member: NewBoardMember) -> sqlx::Result<BoardMemberRow> {
    sqlx::query_as::<_, BoardMemberRow>(&format!(
        "INSERT INTO editorial_board
             (id, name, title, affiliation, email, phone_number, bio, photo_url, order_index, is_active)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, TRUE)
         RETURNING {MEMBER_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(&member.name)
    .bind(&member.title)
    .bind(member.affiliation.as_deref())
    .bind(member.email.as_deref())
    .bind(member.phone_number.as_deref())
    .bind(member.bio.as_deref())
    .bind(member.photo_url.as_deref())
    .bind(member.order_index)
    .fetch_one(pool)
    .await
}

pub async fn update_member(
    pool: &PgPool,
    id: Uuid,
    update: BoardMemberUpdate,
) -> sqlx::Result<Option<BoardMemberRow>> {
    sqlx::query_as::<_, BoardMemberRow>(&format!(
        "UPDATE editorial_board
         SET name = $2, title = $3, affiliation = $4, email = $5, phone_number = $6,
             bio = $7, photo_url = $8, order_index = $9, is_active = $10, updated_at = NOW()
         WHERE id = $1
         RETURNING {MEMBER_COLUMNS}"
    ))
    .bind(id)
    .bind(&update.name)
    .bind(&update.title)
    .bind(update.affiliation.as_deref())
    .bind(update.email.as_deref())
    .bind(update.phone_number.as_deref())
    .bind(update.bio.as_deref())
    .bind(update.photo_url.as_deref())
    .bind(update.order_index)
    .bind(update.is_active)
    .fetch_optional(pool)
    .await
}

/// Soft delete: the row stays resolvable by id in unfiltered scans but drops
/// out of the active listing.
pub async fn deactivate_member(pool: &PgPool, id: Uuid) -> sqlx::Result<Option<BoardMemberRow>> {
    sqlx::query_as::<_, BoardMemberRow>(&format!(
        "UPDATE editorial_board SET is_active = FALSE, updated_at = NOW() WHERE id = $1
         RETURNING {MEMBER_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

// ---------------------------------------------------------------------------
// Contact messages

pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub phone: Option<String>,
    pub organization: Option<String>,
}

pub async fn insert_contact_message(
    pool: &PgPool,
    message: NewContactMessage,
) -> sqlx::Result<ContactMessageRow> {
    sqlx::query_as::<_, ContactMessageRow>(
        "INSERT INTO contact_messages (id, name, email, subject, message, phone, organization)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING id, name, email, subject, message, phone, organization, created_at",
    )
    .bind(Uuid::new_v4())
    .bind(&message.name)
    .bind(&message.email)
    .bind(&message.subject)
    .bind(&message.message)
    .bind(message.phone.as_deref())
    .bind(message.organization.as_deref())
    .fetch_one(pool)
    .await
}

pub async fn list_contact_messages(pool: &PgPool) -> sqlx::Result<Vec<ContactMessageRow>> {
    sqlx::query_as::<_, ContactMessageRow>(
        "SELECT id, name, email, subject, message, phone, organization, created_at
         FROM contact_messages ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await
}

// ---------------------------------------------------------------------------
// Accounts & sessions

pub async fn insert_account(
    pool: &PgPool,
    email: &str,
    name: Option<&str>,
    password_hash: &str,
) -> sqlx::Result<AccountRow> {
    sqlx::query_as::<_, AccountRow>(
        "INSERT INTO accounts (id, email, name, password_hash) VALUES ($1, $2, $3, $4)
         RETURNING id, email, name, created_at",
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(name)
    .bind(password_hash)
    .fetch_one(pool)
    .await
}

pub async fn fetch_account_auth_by_email(
    pool: &PgPool,
    email: &str,
) -> sqlx::Result<Option<AccountAuthRow>> {
    sqlx::query_as::<_, AccountAuthRow>("SELECT id, password_hash FROM accounts WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn create_session(
    pool: &PgPool,
    token: Uuid,
    account_id: Uuid,
    expires_at: DateTime<Utc>,
) -> sqlx::Result<()> {
    sqlx::query("INSERT INTO sessions (id, account_id, expires_at) VALUES ($1, $2, $3)")
        .bind(token)
        .bind(account_id)
        .bind(expires_at)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete_session(pool: &PgPool, token: Uuid) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM sessions WHERE id = $1")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn fetch_account_by_session(
    pool: &PgPool,
    token: Uuid,
) -> sqlx::Result<Option<AccountRow>> {
    sqlx::query_as::<_, AccountRow>(
        "SELECT accounts.id, accounts.email, accounts.name, accounts.created_at
         FROM sessions JOIN accounts ON accounts.id = sessions.account_id
         WHERE sessions.id = $1 AND sessions.expires_at > NOW()",
    )
    .bind(token)
    .fetch_optional(pool)
    .await
}
