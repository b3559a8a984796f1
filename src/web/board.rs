use axum::Json;
use axum::extract::{Multipart, Path as AxumPath, Query, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::web::{
    ApiError, AppState,
    data::{self, BoardMemberUpdate, NewBoardMember},
    models::BoardMemberRow,
    multipart::FormData,
    storage::Bucket,
    validate,
};

#[derive(Serialize)]
pub struct MembersResponse {
    members: Vec<BoardMemberRow>,
}

/// GET /api/editorial-board — active members in display order.
pub async fn list_active(State(state): State<AppState>) -> Result<Json<MembersResponse>, ApiError> {
    let members = data::list_active_members(state.pool_ref()).await?;
    Ok(Json(MembersResponse { members }))
}

#[derive(Serialize)]
pub struct MemberResponse {
    member: BoardMemberRow,
}

/// GET /api/editorial-board/:id — a single active member. Soft-deleted rows
/// resolve to 404 here even though they still exist in the table.
pub async fn fetch_one(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<MemberResponse>, ApiError> {
    let id =
        Uuid::parse_str(&id).map_err(|_| ApiError::not_found("Editorial board member not found"))?;
    let member = data::fetch_active_member(state.pool_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found("Editorial board member not found"))?;
    Ok(Json(MemberResponse { member }))
}

#[derive(Deserialize)]
pub struct CreateMemberRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    affiliation: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone_number: Option<String>,
    #[serde(default)]
    bio: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
    #[serde(default)]
    order_index: Option<i32>,
}

#[derive(Serialize)]
pub struct MemberMutationResponse {
    success: bool,
    message: String,
    member: BoardMemberRow,
}

/// POST /api/editorial-board — create a member. Only name and title are
/// required; affiliation may be omitted entirely.
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateMemberRequest>,
) -> Result<Json<MemberMutationResponse>, ApiError> {
    let name = validate::required_text(request.name.as_deref(), "Name")?;
    let title = validate::required_text(request.title.as_deref(), "Title (profession)")?;
    let email = normalized_email(request.email.as_deref())?;

    let member = data::insert_member(
        state.pool_ref(),
        NewBoardMember {
            name,
            title,
            affiliation: validate::optional_text(request.affiliation.as_deref()),
            email,
            phone_number: validate::optional_text(request.phone_number.as_deref()),
            bio: validate::optional_text(request.bio.as_deref()),
            photo_url: validate::optional_text(request.photo_url.as_deref()),
            order_index: request.order_index.unwrap_or(0),
        },
    )
    .await?;

    Ok(Json(MemberMutationResponse {
        success: true,
        message: "Editorial board member added successfully".to_string(),
        member,
    }))
}

#[derive(Deserialize)]
pub struct UpdateMemberRequest {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    affiliation: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone_number: Option<String>,
    #[serde(default)]
    bio: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
    #[serde(default)]
    order_index: Option<i32>,
    #[serde(default)]
    is_active: Option<bool>,
}

/// PUT /api/editorial-board — full-row update. Unlike create, a supplied
/// affiliation must be non-empty here.
pub async fn update(
    State(state): State<AppState>,
    Json(request): Json<UpdateMemberRequest>,
) -> Result<Json<MemberMutationResponse>, ApiError> {
    let id_raw = validate::required_text(request.id.as_deref(), "Member ID")?;
    let id = Uuid::parse_str(&id_raw)
        .map_err(|_| ApiError::validation("Member ID must be a valid UUID"))?;

    let name = validate::required_text(request.name.as_deref(), "Name")?;
    let title = validate::required_text(request.title.as_deref(), "Title")?;

    let affiliation = match request.affiliation.as_deref() {
        Some(raw) => Some(validate::required_text(Some(raw), "Affiliation")?),
        None => None,
    };
    let email = normalized_email(request.email.as_deref())?;

    let member = data::update_member(
        state.pool_ref(),
        id,
        BoardMemberUpdate {
            name,
            title,
            affiliation,
            email,
            phone_number: validate::optional_text(request.phone_number.as_deref()),
            bio: validate::optional_text(request.bio.as_deref()),
            photo_url: validate::optional_text(request.photo_url.as_deref()),
            order_index: request.order_index.unwrap_or(0),
            is_active: request.is_active.unwrap_or(true),
        },
    )
    .await?
    .ok_or_else(|| ApiError::not_found("Editorial board member not found"))?;

    Ok(Json(MemberMutationResponse {
        success: true,
        message: "Editorial board member updated successfully".to_string(),
        member,
    }))
}

#[derive(Deserialize)]
pub struct DeleteMemberQuery {
    #[serde(default)]
    id: Option<String>,
}

#[derive(Serialize)]
pub struct DeleteMemberResponse {
    success: bool,
    message: String,
}

/// DELETE /api/editorial-board?id= — soft delete; the row is retained with
/// is_active=false.
pub async fn remove(
    State(state): State<AppState>,
    Query(query): Query<DeleteMemberQuery>,
) -> Result<Json<DeleteMemberResponse>, ApiError> {
    let id_raw = validate::required_text(query.id.as_deref(), "Member ID")?;
    let id = Uuid::parse_str(&id_raw)
        .map_err(|_| ApiError::validation("Member ID must be a valid UUID"))?;

    data::deactivate_member(state.pool_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found("Editorial board member not found"))?;

    Ok(Json(DeleteMemberResponse {
        success: true,
        message: "Editorial board member deleted successfully".to_string(),
    }))
}

#[derive(Serialize)]
pub struct PhotoUploadResponse {
    success: bool,
    photo_url: String,
    message: String,
}

/// POST /api/editorial-board/upload — stores a profile photo and returns its
/// URL for the caller to attach to a member in a follow-up request.
pub async fn upload_photo(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<PhotoUploadResponse>, ApiError> {
    let form = FormData::read(multipart).await?;
    let photo = form
        .file("file")
        .ok_or_else(|| ApiError::validation("No file provided"))?;

    validate::image_upload(
        photo.content_type.as_deref(),
        photo.bytes.len(),
        validate::PHOTO_IMAGE_TYPES,
    )?;

    let blob = state
        .store()
        .put(Bucket::EditorialPhotos, &photo.file_name, &photo.bytes)
        .await?;

    Ok(Json(PhotoUploadResponse {
        success: true,
        photo_url: blob.url,
        message: "Profile picture uploaded successfully".to_string(),
    }))
}

fn normalized_email(raw: Option<&str>) -> Result<Option<String>, ApiError> {
    match validate::optional_text(raw) {
        Some(value) => Ok(Some(validate::email_address(&value)?)),
        None => Ok(None),
    }
}
