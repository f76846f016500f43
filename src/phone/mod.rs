use crate::state::AppState;
use axum::Router;

pub mod code;
pub mod dto;
pub mod handlers;
pub mod number;
pub mod repo;
pub mod sms;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
