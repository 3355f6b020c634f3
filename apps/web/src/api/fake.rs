//! In-memory `SkillMatchApi` for tests. Operations can be made to fail by
//! name, and every call is recorded.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::api::{CareerProgressUpdate, LoginBody, RegisterBody, SkillMatchApi};
use crate::http_client::HttpError;
use crate::models::{
    Career, CareerAssignment, Course, CourseProgress, CourseStatus, DashboardSummary,
    RankingEntry, Skill, User, UserStats, UserUpdate,
};

#[derive(Debug, Clone, Copy)]
pub enum Failure {
    Network,
    Status(u16),
}

#[derive(Default)]
pub struct FakeState {
    pub login_response: Option<Value>,
    pub register_response: Option<Value>,
    pub users: HashMap<i64, User>,
    pub careers: Vec<Career>,
    pub assignment: Option<CareerAssignment>,
    pub skills: HashMap<i64, Vec<Skill>>,
    pub courses: HashMap<i64, Vec<Course>>,
    pub course_progress: Vec<CourseProgress>,
    pub ranking: Vec<RankingEntry>,
    pub user_ranking: Option<RankingEntry>,
    pub summary: Option<DashboardSummary>,
    pub stats: Option<UserStats>,
    pub xp_awarded: Vec<u32>,
    pub career_updates: Vec<CareerProgressUpdate>,
    pub failures: HashMap<&'static str, Failure>,
    /// Operations that yield to the scheduler once before answering.
    pub slow: Vec<&'static str>,
    pub calls: Vec<String>,
}

#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

pub fn network_error() -> HttpError {
    // A request to an unparsable URL fails in the builder, without any I/O.
    match reqwest::Client::new().get("not a url").build() {
        Err(e) => HttpError::Network(e),
        Ok(_) => HttpError::Status {
            status: 599,
            message: "unreachable".to_string(),
        },
    }
}

fn not_found(what: &str) -> HttpError {
    HttpError::Status {
        status: 404,
        message: format!("{what} not found"),
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, setup: impl FnOnce(&mut FakeState)) -> Self {
        setup(&mut *self.lock());
        self
    }

    pub fn fail(&self, op: &'static str, failure: Failure) {
        self.lock().failures.insert(op, failure);
    }

    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn inspect<R>(&self, read: impl FnOnce(&FakeState) -> R) -> R {
        read(&*self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn pause(&self, op: &'static str) {
        let slow = self.lock().slow.contains(&op);
        if slow {
            tokio::task::yield_now().await;
        }
    }

    /// Records the call and returns the state, or the configured failure.
    fn enter(&self, op: &'static str) -> Result<MutexGuard<'_, FakeState>, HttpError> {
        let mut state = self.lock();
        state.calls.push(op.to_string());
        match state.failures.get(op) {
            Some(Failure::Network) => Err(network_error()),
            Some(Failure::Status(status)) => Err(HttpError::Status {
                status: *status,
                message: format!("{op} failed"),
            }),
            None => Ok(state),
        }
    }
}

#[async_trait]
impl SkillMatchApi for FakeApi {
    async fn login(&self, _body: &LoginBody) -> Result<Value, HttpError> {
        let state = self.enter("login")?;
        state
            .login_response
            .clone()
            .ok_or_else(|| not_found("login response"))
    }

    async fn register(&self, body: &RegisterBody) -> Result<Value, HttpError> {
        let state = self.enter("register")?;
        Ok(state
            .register_response
            .clone()
            .unwrap_or_else(|| json!({ "idUsuario": 100, "nome": body.nome, "email": body.email })))
    }

    async fn get_user(&self, user_id: i64) -> Result<User, HttpError> {
        let state = self.enter("get_user")?;
        state.users.get(&user_id).cloned().ok_or_else(|| not_found("user"))
    }

    async fn update_user(&self, user_id: i64, update: &UserUpdate) -> Result<User, HttpError> {
        let mut state = self.enter("update_user")?;
        let user = state.users.get_mut(&user_id).ok_or_else(|| not_found("user"))?;
        update.apply_to(user);
        Ok(user.clone())
    }

    async fn list_careers(&self) -> Result<Vec<Career>, HttpError> {
        Ok(self.enter("list_careers")?.careers.clone())
    }

    async fn get_career(&self, career_id: i64) -> Result<Career, HttpError> {
        let state = self.enter("get_career")?;
        state
            .careers
            .iter()
            .find(|c| c.id == career_id)
            .cloned()
            .ok_or_else(|| not_found("career"))
    }

    async fn select_career(
        &self,
        user_id: i64,
        career_id: i64,
    ) -> Result<CareerAssignment, HttpError> {
        let mut state = self.enter("select_career")?;
        let assignment = CareerAssignment {
            user_id,
            career_id,
            status: Default::default(),
            progress: 0.0,
            xp_total: 0,
            career: state.careers.iter().find(|c| c.id == career_id).cloned(),
        };
        state.assignment = Some(assignment.clone());
        Ok(assignment)
    }

    async fn current_career(&self, _user_id: i64) -> Result<CareerAssignment, HttpError> {
        let state = self.enter("current_career")?;
        state
            .assignment
            .clone()
            .ok_or_else(|| not_found("career assignment"))
    }

    async fn update_career_progress(
        &self,
        _user_id: i64,
        update: &CareerProgressUpdate,
    ) -> Result<(), HttpError> {
        let mut state = self.enter("update_career_progress")?;
        state.career_updates.push(update.clone());
        Ok(())
    }

    async fn career_skills(&self, career_id: i64) -> Result<Vec<Skill>, HttpError> {
        let state = self.enter("career_skills")?;
        Ok(state.skills.get(&career_id).cloned().unwrap_or_default())
    }

    async fn skill_courses(&self, skill_id: i64) -> Result<Vec<Course>, HttpError> {
        let state = self.enter("skill_courses")?;
        Ok(state.courses.get(&skill_id).cloned().unwrap_or_default())
    }

    async fn start_course(&self, _user_id: i64, course_id: i64) -> Result<(), HttpError> {
        let mut state = self.enter("start_course")?;
        upsert_progress(&mut state, course_id, CourseStatus::EmAndamento, 0);
        Ok(())
    }

    async fn complete_course(&self, _user_id: i64, course_id: i64) -> Result<(), HttpError> {
        let mut state = self.enter("complete_course")?;
        upsert_progress(&mut state, course_id, CourseStatus::Concluido, 100);
        Ok(())
    }

    async fn update_course_progress(
        &self,
        _user_id: i64,
        course_id: i64,
        progress: u8,
    ) -> Result<(), HttpError> {
        let mut state = self.enter("update_course_progress")?;
        upsert_progress(&mut state, course_id, CourseStatus::EmAndamento, progress);
        Ok(())
    }

    async fn user_courses(&self, _user_id: i64) -> Result<Vec<CourseProgress>, HttpError> {
        self.pause("user_courses").await;
        Ok(self.enter("user_courses")?.course_progress.clone())
    }

    async fn monthly_ranking(&self, _month: &str) -> Result<Vec<RankingEntry>, HttpError> {
        Ok(self.enter("monthly_ranking")?.ranking.clone())
    }

    async fn user_ranking(&self, _user_id: i64) -> Result<RankingEntry, HttpError> {
        let state = self.enter("user_ranking")?;
        state
            .user_ranking
            .clone()
            .ok_or_else(|| not_found("ranking"))
    }

    async fn add_xp(&self, _user_id: i64, amount: u32) -> Result<(), HttpError> {
        self.enter("add_xp")?.xp_awarded.push(amount);
        Ok(())
    }

    async fn dashboard_summary(&self, _user_id: i64) -> Result<DashboardSummary, HttpError> {
        let state = self.enter("dashboard_summary")?;
        state.summary.ok_or_else(|| not_found("dashboard"))
    }

    async fn user_stats(&self, _user_id: i64) -> Result<UserStats, HttpError> {
        let state = self.enter("user_stats")?;
        state.stats.clone().ok_or_else(|| not_found("stats"))
    }
}

fn upsert_progress(state: &mut FakeState, course_id: i64, status: CourseStatus, progress: u8) {
    match state
        .course_progress
        .iter_mut()
        .find(|p| p.course_id == course_id)
    {
        Some(row) => {
            row.status = status;
            row.progress = progress;
        }
        None => state.course_progress.push(CourseProgress {
            course_id,
            status,
            progress,
        }),
    }
}
