//! Dashboard aggregation.
//!
//! Five independent fetches run concurrently. Each one falls back to a fixed
//! placeholder on failure, and the section is listed in `degraded` so the
//! page can show a degraded-mode banner instead of passing placeholders off
//! as real data.

use serde::Serialize;
use tracing::debug;

use crate::api::SkillMatchApi;
use crate::models::{CareerAssignment, DashboardSummary, JourneyStatus, RankingEntry, User};
use crate::progress::LevelInfo;
use crate::resource::Sourced;

pub const LEADERBOARD_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardSection {
    Profile,
    Career,
    Courses,
    Ranking,
    Leaderboard,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub user: User,
    pub career_id: Option<i64>,
    pub career_name: Option<String>,
    pub journey_status: JourneyStatus,
    pub level: LevelInfo,
    pub xp_label: String,
    pub career_progress: f64,
    pub progress_label: String,
    pub courses_completed: u32,
    pub courses_total: u32,
    pub courses_label: String,
    pub ranking: RankingEntry,
    pub leaderboard: Vec<RankingEntry>,
    pub degraded: Vec<DashboardSection>,
}

// ────────────────────────────────────────────────────────────────────────────
// Placeholders
// ────────────────────────────────────────────────────────────────────────────

fn placeholder_assignment(user_id: i64) -> CareerAssignment {
    CareerAssignment {
        user_id,
        career_id: 0,
        status: JourneyStatus::EmAndamento,
        progress: 25.5,
        xp_total: 1250,
        career: None,
    }
}

fn placeholder_summary() -> DashboardSummary {
    DashboardSummary {
        courses_completed: 2,
        courses_total: 10,
    }
}

fn placeholder_ranking(month: &str) -> RankingEntry {
    RankingEntry {
        position: 15,
        score: 1250,
        month: month.to_string(),
        user_id: None,
        user_name: None,
    }
}

fn placeholder_leaderboard(month: &str) -> Vec<RankingEntry> {
    [("Ana Souza", 3200), ("Pedro Lima", 2950), ("Julia Santos", 2780)]
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

// ────────────────────────────────────────────────────────────────────────────
// Formatting
// ────────────────────────────────────────────────────────────────────────────

/// One decimal place, dropping a trailing `.0`.
pub fn format_percent(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregation
// ────────────────────────────────────────────────────────────────────────────

/// Loads every dashboard section. Never fails: `cached_user` stands in for the
/// profile when it cannot be fetched.
pub async fn load_dashboard(
    api: &dyn SkillMatchApi,
    cached_user: &User,
    month: &str,
) -> DashboardView {
    let user_id = cached_user.id;

    let (user, assignment, summary, ranking, leaderboard) = tokio::join!(
        api.get_user(user_id),
        api.current_career(user_id),
        api.dashboard_summary(user_id),
        api.user_ranking(user_id),
        api.monthly_ranking(month),
    );

    let user = Sourced::or_fallback(user, "profile", || cached_user.clone());
    let assignment =
        Sourced::or_fallback(assignment, "career", || placeholder_assignment(user_id));
    let summary = Sourced::or_fallback(summary, "course summary", placeholder_summary);
    let ranking = Sourced::or_fallback(ranking, "ranking", || placeholder_ranking(month));
    let leaderboard = Sourced::or_fallback(
        leaderboard.map(top_of_leaderboard),
        "leaderboard",
        || placeholder_leaderboard(month),
    );

    let mut degraded = Vec::new();
    for (flag, section) in [
        (user.degraded, DashboardSection::Profile),
        (assignment.degraded, DashboardSection::Career),
        (summary.degraded, DashboardSection::Courses),
        (ranking.degraded, DashboardSection::Ranking),
        (leaderboard.degraded, DashboardSection::Leaderboard),
    ] {
        if flag {
            degraded.push(section);
        }
    }

    let assignment_value = assignment.value;
    let career_name = match (&assignment_value.career, assignment.degraded) {
        (Some(career), _) => Some(career.name.clone()),
        (None, true) => None,
        (None, false) => api
            .get_career(assignment_value.career_id)
            .await
            .map(|c| c.name)
            .map_err(|e| debug!("Career name unavailable: {e}"))
            .ok(),
    };

    build_view(
        user.value,
        &assignment_value,
        career_name,
        summary.value,
        ranking.value,
        leaderboard.value,
        degraded,
    )
}

fn top_of_leaderboard(mut entries: Vec<RankingEntry>) -> Vec<RankingEntry> {
    entries.sort_by_key(|e| e.position);
    entries.truncate(LEADERBOARD_SIZE);
    entries
}

fn build_view(
    user: User,
    assignment: &CareerAssignment,
    career_name: Option<String>,
    summary: DashboardSummary,
    ranking: RankingEntry,
    leaderboard: Vec<RankingEntry>,
    degraded: Vec<DashboardSection>,
) -> DashboardView {
    let level = LevelInfo::from_xp(assignment.xp_total);
    DashboardView {
        user,
        career_id: (assignment.career_id > 0).then_some(assignment.career_id),
        career_name,
        journey_status: assignment.status,
        xp_label: format!("{} XP", level.xp),
        level,
        career_progress: assignment.progress,
        progress_label: format!("{}% Concluído", format_percent(assignment.progress)),
        courses_completed: summary.courses_completed,
        courses_total: summary.courses_total,
        courses_label: format!("{} de {}", summary.courses_completed, summary.courses_total),
        ranking,
        leaderboard,
        degraded,
    }
}
