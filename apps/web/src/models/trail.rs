use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    #[default]
    Iniciante,
    Intermediario,
    Avancado,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(rename = "idSkill", alias = "id")]
    pub id: i64,
    #[serde(rename = "idCarreira", default)]
    pub career_id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "nivelDificuldade", default)]
    pub difficulty: Difficulty,
    /// Position of the skill in the trail.
    #[serde(rename = "ordem", default)]
    pub order: i32,
    /// Total XP granted by completing every course of the skill.
    #[serde(default)]
    pub xp: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(rename = "idCurso", alias = "id")]
    pub id: i64,
    #[serde(rename = "idSkill", default)]
    pub skill_id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(default)]
    pub link: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseStatus {
    #[default]
    Pendente,
    EmAndamento,
    Concluido,
}

/// Per-user status of one course, as returned by `GET /usuarios/{id}/cursos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseProgress {
    #[serde(rename = "idCurso")]
    pub course_id: i64,
    #[serde(default)]
    pub status: CourseStatus,
    #[serde(rename = "progresso", default)]
    pub progress: u8,
}
