//! Domain services over the SkillMatch REST API.
//!
//! `AppState` holds an `Arc<dyn SkillMatchApi>`; `RestApi` is the production
//! backend, tests swap in `fake::FakeApi`.

#[cfg(test)]
pub mod fake;
pub mod rest;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http_client::HttpError;
use crate::models::{
    Career, CareerAssignment, Course, CourseProgress, DashboardSummary, JourneyStatus,
    RankingEntry, Skill, User, UserStats, UserUpdate,
};

pub use rest::RestApi;

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginBody {
    pub email: String,
    pub senha: String,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterBody {
    pub nome: String,
    pub email: String,
    pub senha: String,
    #[serde(rename = "dataNascimento", skip_serializing_if = "Option::is_none")]
    pub data_nascimento: Option<chrono::NaiveDate>,
}

/// Career-level aggregate pushed after a course completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerProgressUpdate {
    #[serde(rename = "idCarreira")]
    pub career_id: i64,
    #[serde(rename = "progresso")]
    pub progress: f64,
    #[serde(rename = "xpTotal")]
    pub xp_total: u32,
    #[serde(rename = "statusJornada")]
    pub status: JourneyStatus,
}

#[async_trait]
pub trait SkillMatchApi: Send + Sync {
    /// Auth responses are returned raw; their shape is validated by `auth`.
    async fn login(&self, body: &LoginBody) -> Result<Value, HttpError>;
    async fn register(&self, body: &RegisterBody) -> Result<Value, HttpError>;

    async fn get_user(&self, user_id: i64) -> Result<User, HttpError>;
    async fn update_user(&self, user_id: i64, update: &UserUpdate) -> Result<User, HttpError>;

    async fn list_careers(&self) -> Result<Vec<Career>, HttpError>;
    async fn get_career(&self, career_id: i64) -> Result<Career, HttpError>;
    async fn select_career(
        &self,
        user_id: i64,
        career_id: i64,
    ) -> Result<CareerAssignment, HttpError>;
    async fn current_career(&self, user_id: i64) -> Result<CareerAssignment, HttpError>;
    async fn update_career_progress(
        &self,
        user_id: i64,
        update: &CareerProgressUpdate,
    ) -> Result<(), HttpError>;

    async fn career_skills(&self, career_id: i64) -> Result<Vec<Skill>, HttpError>;
    async fn skill_courses(&self, skill_id: i64) -> Result<Vec<Course>, HttpError>;

    async fn start_course(&self, user_id: i64, course_id: i64) -> Result<(), HttpError>;
    async fn complete_course(&self, user_id: i64, course_id: i64) -> Result<(), HttpError>;
    async fn update_course_progress(
        &self,
        user_id: i64,
        course_id: i64,
        progress: u8,
    ) -> Result<(), HttpError>;
    async fn user_courses(&self, user_id: i64) -> Result<Vec<CourseProgress>, HttpError>;

    async fn monthly_ranking(&self, month: &str) -> Result<Vec<RankingEntry>, HttpError>;
    async fn user_ranking(&self, user_id: i64) -> Result<RankingEntry, HttpError>;
    async fn add_xp(&self, user_id: i64, amount: u32) -> Result<(), HttpError>;

    async fn dashboard_summary(&self, user_id: i64) -> Result<DashboardSummary, HttpError>;
    async fn user_stats(&self, user_id: i64) -> Result<UserStats, HttpError>;
}
