use async_trait::async_trait;
use serde_json::{json, Value};

use crate::api::{CareerProgressUpdate, LoginBody, RegisterBody, SkillMatchApi};
use crate::http_client::{HttpClient, HttpError};
use crate::models::{
    Career, CareerAssignment, Course, CourseProgress, DashboardSummary, RankingEntry, Skill,
    User, UserStats, UserUpdate,
};

/// `SkillMatchApi` over the REST backend.
#[derive(Clone)]
pub struct RestApi {
    http: HttpClient,
}

impl RestApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl SkillMatchApi for RestApi {
    async fn login(&self, body: &LoginBody) -> Result<Value, HttpError> {
        self.http.post("/auth/login", body).await
    }

    async fn register(&self, body: &RegisterBody) -> Result<Value, HttpError> {
        self.http.post("/auth/register", body).await
    }

    async fn get_user(&self, user_id: i64) -> Result<User, HttpError> {
        self.http.get(&format!("/usuarios/{user_id}")).await
    }

    async fn update_user(&self, user_id: i64, update: &UserUpdate) -> Result<User, HttpError> {
        self.http.put(&format!("/usuarios/{user_id}"), update).await
    }

    async fn list_careers(&self) -> Result<Vec<Career>, HttpError> {
        self.http.get("/carreiras").await
    }

    async fn get_career(&self, career_id: i64) -> Result<Career, HttpError> {
        self.http.get(&format!("/carreiras/{career_id}")).await
    }

    async fn select_career(
        &self,
        user_id: i64,
        career_id: i64,
    ) -> Result<CareerAssignment, HttpError> {
        self.http
            .post(
                &format!("/usuarios/{user_id}/carreira"),
                &json!({ "idCarreira": career_id }),
            )
            .await
    }

    async fn current_career(&self, user_id: i64) -> Result<CareerAssignment, HttpError> {
        self.http
            .get(&format!("/usuarios/{user_id}/carreira-atual"))
            .await
    }

    async fn update_career_progress(
        &self,
        user_id: i64,
        update: &CareerProgressUpdate,
    ) -> Result<(), HttpError> {
        let _: Value = self
            .http
            .put(&format!("/usuarios/{user_id}/carreira-atual"), update)
            .await?;
        Ok(())
    }

    async fn career_skills(&self, career_id: i64) -> Result<Vec<Skill>, HttpError> {
        self.http.get(&format!("/carreiras/{career_id}/skills")).await
    }

    async fn skill_courses(&self, skill_id: i64) -> Result<Vec<Course>, HttpError> {
        self.http.get(&format!("/skills/{skill_id}/cursos")).await
    }

    async fn start_course(&self, user_id: i64, course_id: i64) -> Result<(), HttpError> {
        let _: Value = self
            .http
            .post(
                &format!("/cursos/{course_id}/iniciar"),
                &json!({ "idUsuario": user_id }),
            )
            .await?;
        Ok(())
    }

    async fn complete_course(&self, user_id: i64, course_id: i64) -> Result<(), HttpError> {
        let _: Value = self
            .http
            .put(
                &format!("/cursos/{course_id}/concluir"),
                &json!({ "idUsuario": user_id }),
            )
            .await?;
        Ok(())
    }

    async fn update_course_progress(
        &self,
        user_id: i64,
        course_id: i64,
        progress: u8,
    ) -> Result<(), HttpError> {
        let _: Value = self
            .http
            .put(
                &format!("/cursos/{course_id}/progresso"),
                &json!({ "idUsuario": user_id, "progresso": progress }),
            )
            .await?;
        Ok(())
    }

    async fn user_courses(&self, user_id: i64) -> Result<Vec<CourseProgress>, HttpError> {
        self.http.get(&format!("/usuarios/{user_id}/cursos")).await
    }

    async fn monthly_ranking(&self, month: &str) -> Result<Vec<RankingEntry>, HttpError> {
        self.http.get(&format!("/ranking/{month}")).await
    }

    async fn user_ranking(&self, user_id: i64) -> Result<RankingEntry, HttpError> {
        self.http.get(&format!("/usuarios/{user_id}/ranking")).await
    }

    async fn add_xp(&self, user_id: i64, amount: u32) -> Result<(), HttpError> {
        let _: Value = self
            .http
            .post(&format!("/usuarios/{user_id}/xp"), &json!({ "xp": amount }))
            .await?;
        Ok(())
    }

    async fn dashboard_summary(&self, user_id: i64) -> Result<DashboardSummary, HttpError> {
        self.http.get(&format!("/usuarios/{user_id}/dashboard")).await
    }

    async fn user_stats(&self, user_id: i64) -> Result<UserStats, HttpError> {
        self.http
            .get(&format!("/usuarios/{user_id}/estatisticas"))
            .await
    }
}
