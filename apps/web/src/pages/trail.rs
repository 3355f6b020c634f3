//! Trail page: the active career's skills and courses, plus the course
//! actions (start, checkpoint, complete).
//!
//! Course actions apply to the cached `TrailState` first and reach the
//! backend afterwards. A completion is synced on a background task whose
//! report is kept in `TrailCache::last_sync`.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::api::SkillMatchApi;
use crate::errors::AppError;
use crate::http_client::HttpError;
use crate::models::{Career, User};
use crate::pages::{chrome, Page};
use crate::progress::{Completion, CompletionDelta, LevelInfo, TrailState};
use crate::resource::Resource;
use crate::state::{AppState, TrailCache};
use crate::sync::{spawn_completion_sync, SyncReport};

#[derive(Debug, Clone, Serialize)]
pub struct TrailView {
    pub career: Option<Career>,
    pub level: LevelInfo,
    pub completed_courses: usize,
    pub total_courses: usize,
    pub trail: TrailState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<SyncReport>,
}

#[derive(Debug, Serialize)]
pub struct CourseActionResult {
    /// False when the action was a no-op (already started/completed).
    pub changed: bool,
    /// Whether the backend accepted the change. `None` while a background
    /// sync is still running.
    pub synced: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion: Option<CompletionDelta>,
    pub view: TrailView,
}

#[derive(Debug, Deserialize)]
pub struct ProgressForm {
    #[serde(alias = "progresso")]
    pub progress: u8,
}

// ────────────────────────────────────────────────────────────────────────────
// Loading
// ────────────────────────────────────────────────────────────────────────────

/// Fetches the catalog and the user's course rows for one career. The career
/// assignment is optional: without it XP starts at zero.
async fn fetch_trail(
    api: &dyn SkillMatchApi,
    user_id: i64,
    career_id: i64,
) -> Result<TrailState, HttpError> {
    let assignment = api
        .current_career(user_id)
        .await
        .map_err(|e| warn!("Career assignment unavailable: {e}"))
        .ok();

    let skills = api.career_skills(career_id).await?;
    let mut catalog = Vec::with_capacity(skills.len());
    for skill in skills {
        let courses = api.skill_courses(skill.id).await?;
        catalog.push((skill, courses));
    }
    let progress = api.user_courses(user_id).await?;

    Ok(TrailState::build(
        user_id,
        career_id,
        assignment.as_ref(),
        catalog,
        &progress,
    ))
}

async fn fetch_career(api: &dyn SkillMatchApi, career_id: i64) -> Option<Career> {
    api.get_career(career_id)
        .await
        .map_err(|e| warn!("Career {career_id} details unavailable: {e}"))
        .ok()
}

fn view_of(state: &AppState, trail: TrailState, career: Option<Career>) -> TrailView {
    let last_sync = state.trail_cache().last_sync.clone();
    TrailView {
        career,
        level: trail.level(),
        completed_courses: trail.completed_courses(),
        total_courses: trail.total_courses(),
        trail,
        last_sync,
    }
}

fn is_cached(cache: &TrailCache, user_id: i64, career_id: i64) -> bool {
    cache
        .trail
        .as_ref()
        .is_some_and(|t| t.career_id == career_id && t.user_id == user_id)
}

/// Stores a freshly fetched trail. Completions already applied to a cached
/// trail of the same career survive the reload; any other cached trail is
/// replaced along with its sync report.
fn install_trail(state: &AppState, mut fresh: TrailState) -> TrailState {
    let mut cache = state.trail_cache();
    if is_cached(&cache, fresh.user_id, fresh.career_id) {
        if let Some(cached) = cache.trail.as_ref() {
            let carried = fresh.carry_over(cached);
            if carried > 0 {
                debug!("Kept {carried} locally completed course(s) the backend has not seen yet");
            }
        }
    } else {
        cache.last_sync = None;
    }
    cache.trail = Some(fresh.clone());
    fresh
}

/// Makes sure the cache holds the trail of `career_id`, loading it when it
/// holds nothing or another career. The cache is checked again after the
/// fetch so concurrent loads never replace a trail another request already
/// installed and changed.
async fn ensure_trail(state: &AppState, user: &User, career_id: i64) -> Result<(), AppError> {
    if is_cached(&state.trail_cache(), user.id, career_id) {
        return Ok(());
    }

    let trail = fetch_trail(state.api.as_ref(), user.id, career_id).await?;
    let mut cache = state.trail_cache();
    if !is_cached(&cache, user.id, career_id) {
        cache.trail = Some(trail);
        cache.last_sync = None;
    }
    Ok(())
}

/// Applies `apply` to the cached trail and returns its result with a copy of
/// the trail after the change.
fn with_trail<R>(
    state: &AppState,
    apply: impl FnOnce(&mut TrailState) -> Result<R, AppError>,
) -> Result<(R, TrailState), AppError> {
    let mut cache = state.trail_cache();
    let trail = cache
        .trail
        .as_mut()
        .ok_or_else(|| AppError::NotFound("Trilha não carregada".to_string()))?;
    let out = apply(trail)?;
    Ok((out, trail.clone()))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /trilha/:idCarreira
///
/// Always reloads from the backend, keeping completions the backend has not
/// caught up with. A failed load is reported as an error state; no
/// placeholder trail is fabricated.
pub async fn trail(
    State(state): State<AppState>,
    Path(career_id): Path<i64>,
) -> Result<Json<Page<Resource<TrailView>>>, AppError> {
    let user = state.require_user()?;

    let (loaded, career) = tokio::join!(
        fetch_trail(state.api.as_ref(), user.id, career_id),
        fetch_career(state.api.as_ref(), career_id),
    );

    let resource = match loaded {
        Ok(fresh) => {
            let trail = install_trail(&state, fresh);
            Resource::success(view_of(&state, trail, career))
        }
        Err(e) => {
            warn!("Trail {career_id} failed to load: {e}");
            Resource::error(AppError::Upstream(e).to_string())
        }
    };

    Ok(chrome(resource))
}

/// POST /trilha/:idCarreira/cursos/:idCurso/iniciar
pub async fn start_course(
    State(state): State<AppState>,
    Path((career_id, course_id)): Path<(i64, i64)>,
) -> Result<Json<Page<CourseActionResult>>, AppError> {
    let user = state.require_user()?;
    ensure_trail(&state, &user, career_id).await?;

    let (changed, trail) = with_trail(&state, |t| Ok(t.start_course(course_id)?))?;

    let synced = if changed {
        match state.api.start_course(user.id, course_id).await {
            Ok(()) => Some(true),
            Err(e) => {
                warn!("Start of course {course_id} not synced: {e}");
                Some(false)
            }
        }
    } else {
        Some(true)
    };

    Ok(chrome(CourseActionResult {
        changed,
        synced,
        completion: None,
        view: view_of(&state, trail, None),
    }))
}

/// POST /trilha/:idCarreira/cursos/:idCurso/progresso
pub async fn update_progress(
    State(state): State<AppState>,
    Path((career_id, course_id)): Path<(i64, i64)>,
    Json(form): Json<ProgressForm>,
) -> Result<Json<Page<CourseActionResult>>, AppError> {
    let user = state.require_user()?;
    ensure_trail(&state, &user, career_id).await?;

    let ((), trail) = with_trail(&state, |t| {
        Ok(t.set_course_progress(course_id, form.progress)?)
    })?;

    let synced = match state
        .api
        .update_course_progress(user.id, course_id, form.progress)
        .await
    {
        Ok(()) => true,
        Err(e) => {
            warn!("Progress of course {course_id} not synced: {e}");
            false
        }
    };

    Ok(chrome(CourseActionResult {
        changed: true,
        synced: Some(synced),
        completion: None,
        view: view_of(&state, trail, None),
    }))
}

/// POST /trilha/:idCarreira/cursos/:idCurso/concluir
///
/// Completing an already-completed course is a no-op: no XP, no sync.
pub async fn complete_course(
    State(state): State<AppState>,
    Path((career_id, course_id)): Path<(i64, i64)>,
) -> Result<Json<Page<CourseActionResult>>, AppError> {
    let user = state.require_user()?;
    ensure_trail(&state, &user, career_id).await?;

    let (completion, trail) = with_trail(&state, |t| Ok(t.complete_course(course_id)?))?;

    let delta = match completion {
        Completion::AlreadyCompleted => {
            info!("Course {course_id} already completed, ignoring");
            return Ok(chrome(CourseActionResult {
                changed: false,
                synced: Some(true),
                completion: None,
                view: view_of(&state, trail, None),
            }));
        }
        Completion::Completed(delta) => delta,
    };

    info!(
        "Course {course_id} completed: +{} XP (total {})",
        delta.xp_awarded, delta.xp_total
    );

    let cache = state.trail.clone();
    spawn_completion_sync(state.api.clone(), user.id, delta.clone(), move |report| {
        let mut cache = cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.last_sync = Some(report);
    });

    Ok(chrome(CourseActionResult {
        changed: true,
        synced: None,
        completion: Some(delta),
        view: view_of(&state, trail, None),
    }))
}
