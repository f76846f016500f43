use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod google;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod repo;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
