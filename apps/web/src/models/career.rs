use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Career {
    #[serde(rename = "idCarreira", alias = "id")]
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
    /// Market-demand score, 0 – 100.
    #[serde(rename = "demandaMercado", default)]
    pub demand: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JourneyStatus {
    #[default]
    NaoIniciada,
    EmAndamento,
    Concluida,
    Pausada,
}

/// The user's link to their active career.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerAssignment {
    #[serde(rename = "idUsuario")]
    pub user_id: i64,
    #[serde(rename = "idCarreira")]
    pub career_id: i64,
    #[serde(rename = "statusJornada", default)]
    pub status: JourneyStatus,
    #[serde(rename = "progresso", default)]
    pub progress: f64,
    #[serde(rename = "xpTotal", default)]
    pub xp_total: u32,
    #[serde(rename = "carreira", default, skip_serializing_if = "Option::is_none")]
    pub career: Option<Career>,
}
