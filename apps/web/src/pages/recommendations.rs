use axum::{
    extract::{Path, State},
    response::Redirect,
    Json,
};

use crate::errors::AppError;
use crate::pages::{chrome, Page};
use crate::recommendation::{sample_recommendations, Recommendation};
use crate::resource::Resource;
use crate::state::AppState;

/// GET /recomendacoes
pub async fn recommendations(
    State(state): State<AppState>,
) -> Result<Json<Page<Resource<Vec<Recommendation>>>>, AppError> {
    state.require_user()?;

    let catalog = Resource::load(state.api.list_careers()).await;
    let recs = catalog.map(|careers| {
        let mut rng = rand::thread_rng();
        sample_recommendations(&careers, &mut rng)
    });

    Ok(chrome(recs))
}

/// POST /recomendacoes/:idCarreira
///
/// Assigns the career, then sends the user to its trail.
pub async fn select_career(
    State(state): State<AppState>,
    Path(career_id): Path<i64>,
) -> Result<Redirect, AppError> {
    let user = state.require_user()?;

    let assignment = state.api.select_career(user.id, career_id).await?;
    tracing::info!(
        "User {} selected career {}",
        assignment.user_id,
        assignment.career_id
    );
    state.trail_cache().trail = None;

    Ok(Redirect::to(&format!("/trilha/{career_id}")))
}
