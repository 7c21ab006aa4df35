use axum::{extract::State, Router};

use crate::errors::AppError;
use crate::reflection::runner::run_reflection;
use crate::state::AppState;

/// Body returned when a run finishes.
pub const REFLECTION_COMPLETE: &str = "Reflection complete";

/// Any method, any path: run one reflection.
pub async fn handle_reflect(State(state): State<AppState>) -> Result<&'static str, AppError> {
    run_reflection(
        state.store.as_ref(),
        state.generator.as_ref(),
        state.config.template,
    )
    .await?;
    Ok(REFLECTION_COMPLETE)
}

pub fn build_router(state: AppState) -> Router {
    Router::new().fallback(handle_reflect).with_state(state)
}
