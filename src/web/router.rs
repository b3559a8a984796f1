use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};

use crate::web::{AppState, admin, articles, auth, board, contact, cors, storage, submissions};

// Headroom above the 50MB PDF ceiling; per-file limits are enforced in
// validation.
const MAX_BODY_BYTES: usize = 52 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/articles", get(articles::list_approved))
        .route("/api/upload", post(submissions::submit))
        .route(
            "/api/admin/approve",
            get(admin::list_all).patch(admin::set_status),
        )
        .route("/api/admin/publish", post(admin::publish))
        .route(
            "/api/editorial-board",
            get(board::list_active)
                .post(board::create)
                .put(board::update)
                .delete(board::remove),
        )
        .route("/api/editorial-board/upload", post(board::upload_photo))
        .route("/api/editorial-board/:id", get(board::fetch_one))
        .route("/api/user-submissions", get(articles::user_submissions))
        .route("/api/contact", get(contact::list).post(contact::submit))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/files/:bucket/:key", get(storage::serve_blob))
        .layer(middleware::from_fn_with_state(state.clone(), cors::apply))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    StatusCode::OK
}
