use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::{User, UserStats, UserUpdate};
use crate::pages::{chrome, Page};
use crate::progress::LevelInfo;
use crate::resource::Resource;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub user: User,
    pub stats: Option<UserStats>,
    pub level: Option<LevelInfo>,
}

#[derive(Debug, Serialize)]
pub struct ProfilePage {
    pub profile: Resource<ProfileView>,
    /// Present when loading failed: where the retry button points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry: Option<&'static str>,
}

/// GET /perfil
///
/// Unlike the dashboard, a failed profile fetch is surfaced with a retry
/// action instead of placeholder data. Stats are optional.
pub async fn profile(State(state): State<AppState>) -> Result<Json<Page<ProfilePage>>, AppError> {
    let user = state.require_user()?;

    let (fetched, stats) = tokio::join!(
        state.api.get_user(user.id),
        state.api.user_stats(user.id),
    );

    let stats = stats
        .map_err(|e| tracing::warn!("Profile stats unavailable: {e}"))
        .ok();
    let profile = Resource::from_result(fetched).map(|user| ProfileView {
        level: stats.as_ref().map(|s| LevelInfo::from_xp(s.xp_total)),
        user,
        stats,
    });
    let retry = (!profile.is_success()).then_some("/perfil");

    Ok(chrome(ProfilePage { profile, retry }))
}

/// PUT /perfil
pub async fn update_profile(
    State(state): State<AppState>,
    Json(update): Json<UserUpdate>,
) -> Result<Json<Page<Resource<User>>>, AppError> {
    let user = state.require_user()?;

    if update.is_empty() {
        return Err(AppError::Validation("Nenhum campo para atualizar.".to_string()));
    }
    if let Some(name) = &update.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Nome é obrigatório.".to_string()));
        }
    }
    if let Some(email) = &update.email {
        if !email.contains('@') {
            return Err(AppError::Validation("Email inválido.".to_string()));
        }
    }

    let updated = state.api.update_user(user.id, &update).await?;
    state.session.store_user(&updated)?;
    tracing::info!("Profile of user {} updated", updated.id);

    Ok(chrome(Resource::success(updated)))
}
