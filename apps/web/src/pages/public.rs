//! Static public pages and the not-found view.

use axum::{http::StatusCode, http::Uri, response::IntoResponse, Json};
use serde::Serialize;

use crate::pages::{bare, Page};

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub title: &'static str,
    pub tagline: &'static str,
    pub actions: Vec<Link>,
}

#[derive(Debug, Serialize)]
pub struct Link {
    pub label: &'static str,
    pub href: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TextPage {
    pub title: &'static str,
    pub paragraphs: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct Member {
    pub name: &'static str,
    pub role: &'static str,
}

#[derive(Debug, Serialize)]
pub struct FaqEntry {
    pub question: &'static str,
    pub answer: &'static str,
}

/// GET /
pub async fn home() -> Json<Page<HomePage>> {
    bare(HomePage {
        title: "SkillMatch",
        tagline: "Descubra a carreira ideal e siga uma trilha de aprendizado feita para você.",
        actions: vec![
            Link {
                label: "Entrar",
                href: "/login",
            },
            Link {
                label: "Criar conta",
                href: "/cadastro",
            },
        ],
    })
}

/// GET /sobre
pub async fn about() -> Json<Page<TextPage>> {
    bare(TextPage {
        title: "Sobre o SkillMatch",
        paragraphs: vec![
            "O SkillMatch recomenda carreiras a partir do seu perfil e organiza o aprendizado em trilhas de skills e cursos.",
            "Cada curso concluído rende XP, e o XP acumulado define o seu nível e a sua posição no ranking mensal.",
        ],
    })
}

/// GET /integrantes
pub async fn members() -> Json<Page<Vec<Member>>> {
    bare(vec![
        Member {
            name: "Equipe SkillMatch",
            role: "Produto e desenvolvimento",
        },
        Member {
            name: "Equipe de Dados",
            role: "Serviço de recomendação",
        },
    ])
}

/// GET /faq
pub async fn faq() -> Json<Page<Vec<FaqEntry>>> {
    bare(vec![
        FaqEntry {
            question: "Como ganho XP?",
            answer: "Concluindo cursos da sua trilha. Cada skill distribui o seu XP igualmente entre os cursos.",
        },
        FaqEntry {
            question: "Como funciona o nível?",
            answer: "A cada 500 XP você sobe um nível. Todo mundo começa no nível 1.",
        },
        FaqEntry {
            question: "Posso trocar de carreira?",
            answer: "Sim. Escolha outra carreira em Recomendações e a sua trilha será atualizada.",
        },
        FaqEntry {
            question: "Quando o ranking é atualizado?",
            answer: "O ranking é mensal e considera a pontuação acumulada no mês de referência.",
        },
    ])
}

#[derive(Debug, Serialize)]
pub struct NotFoundPage {
    pub title: &'static str,
    pub path: String,
    pub home: &'static str,
}

/// Fallback for unmatched paths.
pub async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        bare(NotFoundPage {
            title: "Página não encontrada",
            path: uri.path().to_string(),
            home: "/",
        }),
    )
}
