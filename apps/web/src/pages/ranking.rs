use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::RankingEntry;
use crate::pages::{chrome, current_month, Page};
use crate::resource::{Resource, Sourced};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RankingView {
    pub month: String,
    pub leaderboard: Sourced<Vec<RankingEntry>>,
    pub me: Option<RankingEntry>,
}

fn placeholder_leaderboard(month: &str) -> Vec<RankingEntry> {
    [
        ("Ana Souza", 3200),
        ("Pedro Lima", 2950),
        ("Julia Santos", 2780),
        ("Marcos Alves", 2410),
        ("Beatriz Rocha", 2200),
    ]
    .iter()
    .enumerate()
    .map(|(i, (name, score))| RankingEntry {
        position: i as u32 + 1,
        score: *score,
        month: month.to_string(),
        user_id: None,
        user_name: Some(name.to_string()),
    })
    .collect()
}

/// GET /ranking
///
/// The leaderboard falls back to placeholder entries (flagged `degraded`);
/// the user's own position is simply omitted when unavailable.
pub async fn ranking(
    State(state): State<AppState>,
) -> Result<Json<Page<Resource<RankingView>>>, AppError> {
    let user = state.require_user()?;
    let month = current_month();

    let (leaderboard, me) = tokio::join!(
        state.api.monthly_ranking(&month),
        state.api.user_ranking(user.id),
    );

    let leaderboard = Sourced::or_fallback(
        leaderboard.map(|mut entries| {
            entries.sort_by_key(|e| e.position);
            entries
        }),
        "leaderboard",
        || placeholder_leaderboard(&month),
    );
    let me = me
        .map_err(|e| tracing::warn!("User ranking unavailable: {e}"))
        .ok();

    Ok(chrome(Resource::success(RankingView {
        month,
        leaderboard,
        me,
    })))
}
