pub mod admin;
pub mod articles;
pub mod auth;
pub mod board;
pub mod contact;
pub mod cors;
pub mod data;
pub mod models;
pub mod multipart;
pub mod responses;
pub mod router;
pub mod state;
pub mod status;
pub mod storage;
pub mod submissions;
pub mod validate;

pub use responses::{ApiError, ApiMessage, json_error};
pub use state::AppState;
