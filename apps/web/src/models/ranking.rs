use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    #[serde(rename = "posicao")]
    pub position: u32,
    #[serde(rename = "pontuacaoTotal", default)]
    pub score: u32,
    /// Reference month, `YYYY-MM`.
    #[serde(rename = "mesReferencia", default)]
    pub month: String,
    #[serde(rename = "idUsuario", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(rename = "nomeUsuario", default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(rename = "cursosConcluidos", default)]
    pub courses_completed: u32,
    #[serde(rename = "skillsConcluidas", default)]
    pub skills_completed: u32,
    #[serde(rename = "xpTotal", default)]
    pub xp_total: u32,
    #[serde(rename = "diasAtivos", default)]
    pub active_days: u32,
}

/// Course counters behind the dashboard's "X de Y" line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    #[serde(rename = "cursosConcluidos", default)]
    pub courses_completed: u32,
    #[serde(rename = "totalCursos", default)]
    pub courses_total: u32,
}
