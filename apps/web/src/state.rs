use std::sync::{Arc, Mutex, MutexGuard};

use crate::api::SkillMatchApi;
use crate::auth::AuthService;
use crate::errors::AppError;
use crate::models::User;
use crate::progress::TrailState;
use crate::recommender::Recommender;
use crate::session::Session;
use crate::sync::SyncReport;

/// The active trail and the outcome of its latest background sync.
/// Single user, so one slot.
#[derive(Default)]
pub struct TrailCache {
    pub trail: Option<TrailState>,
    pub last_sync: Option<SyncReport>,
}

/// Shared application state injected into all page handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn SkillMatchApi>,
    pub recommender: Arc<dyn Recommender>,
    pub session: Session,
    pub auth: AuthService,
    /// Never held across an `.await`.
    pub trail: Arc<Mutex<TrailCache>>,
}

impl AppState {
    pub fn new(
        api: Arc<dyn SkillMatchApi>,
        recommender: Arc<dyn Recommender>,
        session: Session,
    ) -> Self {
        Self {
            auth: AuthService::new(api.clone(), session.clone()),
            api,
            recommender,
            session,
            trail: Arc::new(Mutex::new(TrailCache::default())),
        }
    }

    /// The logged-in user, or `Unauthorized`.
    pub fn require_user(&self) -> Result<User, AppError> {
        if !self.session.is_authenticated() {
            return Err(AppError::Unauthorized);
        }
        self.session.current_user().ok_or(AppError::Unauthorized)
    }

    pub fn trail_cache(&self) -> MutexGuard<'_, TrailCache> {
        self.trail.lock().unwrap_or_else(|e| e.into_inner())
    }
}
