use axum::{extract::State, Json};

use crate::dashboard::{load_dashboard, DashboardView};
use crate::errors::AppError;
use crate::pages::{chrome, current_month, Page};
use crate::resource::Resource;
use crate::state::AppState;

/// GET /dashboard
pub async fn dashboard(
    State(state): State<AppState>,
) -> Result<Json<Page<Resource<DashboardView>>>, AppError> {
    let user = state.require_user()?;
    let view = load_dashboard(state.api.as_ref(), &user, &current_month()).await;
    Ok(chrome(Resource::success(view)))
}
