use axum::Json;
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::web::{
    ApiError, AppState,
    data::{self, NewContactMessage},
    models::ContactMessageRow,
    validate,
};

#[derive(Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    organization: Option<String>,
}

#[derive(Serialize)]
pub struct ContactResponse {
    success: bool,
    message: String,
    contact: ContactSummary,
}

#[derive(Serialize)]
struct ContactSummary {
    id: Uuid,
    name: String,
    email: String,
    subject: String,
    created_at: DateTime<Utc>,
}

/// POST /api/contact — append-only contact form intake.
pub async fn submit(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> Result<Json<ContactResponse>, ApiError> {
    let name = validate::required_text(request.name.as_deref(), "Name")?;
    let email_raw = validate::required_text(request.email.as_deref(), "Email")?;
    let email = validate::email_address(&email_raw)?;
    let subject = validate::required_text(request.subject.as_deref(), "Subject")?;
    let message = validate::required_text(request.message.as_deref(), "Message")?;

    let contact = data::insert_contact_message(
        state.pool_ref(),
        NewContactMessage {
            name,
            email,
            subject,
            message,
            phone: validate::optional_text(request.phone.as_deref()),
            organization: validate::optional_text(request.organization.as_deref()),
        },
    )
    .await?;

    Ok(Json(ContactResponse {
        success: true,
        message: "Thank you for your message! We will get back to you soon.".to_string(),
        contact: ContactSummary {
            id: contact.id,
            name: contact.name,
            email: contact.email,
            subject: contact.subject,
            created_at: contact.created_at,
        },
    }))
}

#[derive(Serialize)]
pub struct ContactListResponse {
    contacts: Vec<ContactMessageRow>,
}

/// GET /api/contact — stored messages, newest first.
pub async fn list(State(state): State<AppState>) -> Result<Json<ContactListResponse>, ApiError> {
    let contacts = data::list_contact_messages(state.pool_ref()).await?;
    Ok(Json(ContactListResponse { contacts }))
}
