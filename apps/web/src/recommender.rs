//! Client for the standalone recommendation service (`POST /recomendar`).
//!
//! Optional enhancement: callers use `recommend_or_fallback` and always get a
//! list back.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::http_client::{HttpClient, HttpError};
use crate::resource::Sourced;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecommendation {
    #[serde(rename = "carreira")]
    pub career: String,
    #[serde(rename = "pontuacao", default)]
    pub score: f64,
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[async_trait]
pub trait Recommender: Send + Sync {
    async fn recommend(&self, skills: &[String]) -> Result<Vec<ServiceRecommendation>, HttpError>;
}

#[derive(Clone)]
pub struct RecommenderClient {
    http: HttpClient,
}

impl RecommenderClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Recommender for RecommenderClient {
    async fn recommend(&self, skills: &[String]) -> Result<Vec<ServiceRecommendation>, HttpError> {
        self.http
            .post("/recomendar", &json!({ "skills": skills }))
            .await
    }
}

/// Shown whenever the service is unreachable or returns nothing.
const FALLBACK: &[(&str, f64)] = &[
    ("Desenvolvedor Full Stack", 0.92),
    ("Cientista de Dados", 0.88),
    ("Engenheiro de Cloud", 0.85),
    ("Analista de Cibersegurança", 0.81),
    ("Designer UX/UI", 0.77),
];

pub fn fallback_recommendations() -> Vec<ServiceRecommendation> {
    FALLBACK
        .iter()
        .map(|(career, score)| ServiceRecommendation {
            career: career.to_string(),
            score: *score,
            description: None,
        })
        .collect()
}

/// Service results ordered by descending score, or the fixed fallback list
/// flagged as degraded.
pub async fn recommend_or_fallback(
    recommender: &Arc<dyn Recommender>,
    skills: &[String],
) -> Sourced<Vec<ServiceRecommendation>> {
    match recommender.recommend(skills).await {
        Ok(mut recs) if !recs.is_empty() => {
            recs.sort_by(|a, b| b.score.total_cmp(&a.score));
            Sourced::live(recs)
        }
        Ok(_) => {
            tracing::warn!("Recommendation service returned no careers, using fallback list");
            Sourced::fallback(fallback_recommendations())
        }
        Err(e) => {
            tracing::warn!("Recommendation service unavailable: {e}");
            Sourced::fallback(fallback_recommendations())
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::fake::network_error;

    pub(crate) struct StaticRecommender(pub Option<Vec<ServiceRecommendation>>);

    #[async_trait]
    impl Recommender for StaticRecommender {
        async fn recommend(
            &self,
            _skills: &[String],
        ) -> Result<Vec<ServiceRecommendation>, HttpError> {
            self.0.clone().ok_or_else(network_error)
        }
    }

    fn rec(career: &str, score: f64) -> ServiceRecommendation {
        ServiceRecommendation {
            career: career.to_string(),
            score,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_service_results_sorted() {
        let r: Arc<dyn Recommender> = Arc::new(StaticRecommender(Some(vec![
            rec("A", 0.2),
            rec("B", 0.9),
        ])));
        let out = recommend_or_fallback(&r, &["python".to_string()]).await;
        assert!(!out.degraded);
        assert_eq!(out.value[0].career, "B");
    }

    #[tokio::test]
    async fn test_unreachable_service_uses_flagged_fallback() {
        let r: Arc<dyn Recommender> = Arc::new(StaticRecommender(None));
        let out = recommend_or_fallback(&r, &[]).await;
        assert!(out.degraded);
        assert_eq!(out.value.len(), FALLBACK.len());
    }

    #[tokio::test]
    async fn test_empty_answer_uses_fallback() {
        let r: Arc<dyn Recommender> = Arc::new(StaticRecommender(Some(vec![])));
        assert!(recommend_or_fallback(&r, &[]).await.degraded);
    }
}
