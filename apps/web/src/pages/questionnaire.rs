//! Profile questionnaire: collects interests and skills, asks the
//! recommendation service for careers.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::pages::{bare, Page};
use crate::recommender::{recommend_or_fallback, ServiceRecommendation};
use crate::resource::{Resource, Sourced};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub text: &'static str,
    pub multiple: bool,
    pub options: &'static [&'static str],
}

const QUESTIONS: &[Question] = &[
    Question {
        id: "interesses",
        text: "Quais áreas mais despertam o seu interesse?",
        multiple: true,
        options: &[
            "Desenvolvimento Web",
            "Dados e Inteligência Artificial",
            "Infraestrutura e Cloud",
            "Segurança da Informação",
            "Design e Experiência do Usuário",
        ],
    },
    Question {
        id: "habilidades",
        text: "Quais dessas habilidades você já possui?",
        multiple: true,
        options: &[
            "Lógica de programação",
            "Python",
            "JavaScript",
            "SQL",
            "Redes",
            "Figma",
            "Comunicação",
        ],
    },
    Question {
        id: "objetivo",
        text: "Qual é o seu objetivo principal?",
        multiple: false,
        options: &[
            "Primeiro emprego na área",
            "Transição de carreira",
            "Crescer na carreira atual",
        ],
    },
];

#[derive(Debug, Deserialize)]
pub struct QuestionnaireAnswers {
    #[serde(default)]
    pub interesses: Vec<String>,
    #[serde(default)]
    pub habilidades: Vec<String>,
    #[serde(default)]
    pub objetivo: Option<String>,
}

impl QuestionnaireAnswers {
    /// Skills payload for the recommender: skills first, then interests,
    /// without duplicates or blanks.
    pub fn skills(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for item in self.habilidades.iter().chain(self.interesses.iter()) {
            let item = item.trim();
            if !item.is_empty() && !out.iter().any(|s| s.eq_ignore_ascii_case(item)) {
                out.push(item.to_string());
            }
        }
        out
    }
}

#[derive(Debug, Serialize)]
pub struct QuestionnaireResult {
    pub skills: Vec<String>,
    pub objetivo: Option<String>,
    pub recommendations: Sourced<Vec<ServiceRecommendation>>,
    pub next: &'static str,
}

/// GET /formulario-perfil
pub async fn questions() -> Json<Page<&'static [Question]>> {
    bare(QUESTIONS)
}

/// POST /formulario-perfil
pub async fn submit(
    State(state): State<AppState>,
    Json(answers): Json<QuestionnaireAnswers>,
) -> Result<Json<Page<Resource<QuestionnaireResult>>>, AppError> {
    let skills = answers.skills();
    if skills.is_empty() {
        return Err(AppError::Validation(
            "Selecione ao menos uma habilidade ou interesse.".to_string(),
        ));
    }

    let recommendations = recommend_or_fallback(&state.recommender, &skills).await;
    Ok(bare(Resource::success(QuestionnaireResult {
        skills,
        objetivo: answers.objetivo,
        recommendations,
        next: "/recomendacoes",
    })))
}
