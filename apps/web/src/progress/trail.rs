//! Trail state for the user's active career.
//!
//! Every transition is one local transaction: the course is patched and the
//! owning skill, career progress and XP total are recomputed together before
//! the method returns. Remote sync happens afterwards, outside this module.

use serde::Serialize;
use thiserror::Error;

use crate::models::{
    CareerAssignment, Course, CourseProgress, CourseStatus, JourneyStatus, Skill,
};
use crate::progress::course_meta::{estimated_duration, platform_label};
use crate::progress::level::LevelInfo;

#[derive(Debug, Error, PartialEq)]
pub enum ProgressError {
    #[error("Course {0} is not part of this trail")]
    CourseNotFound(i64),

    #[error("Course {0} is not in progress")]
    NotInProgress(i64),

    #[error("Progress must be between 0 and 100, got {0}")]
    InvalidProgress(u8),
}

#[derive(Debug, Clone, Serialize)]
pub struct TrailCourse {
    #[serde(flatten)]
    pub course: Course,
    pub status: CourseStatus,
    #[serde(rename = "progresso")]
    pub progress: u8,
    #[serde(rename = "plataforma")]
    pub platform: &'static str,
    #[serde(rename = "duracao")]
    pub duration: &'static str,
}

impl TrailCourse {
    pub fn new(course: Course, progress: Option<&CourseProgress>) -> Self {
        let (status, pct) = match progress {
            Some(p) if p.status == CourseStatus::Concluido => (CourseStatus::Concluido, 100),
            Some(p) => (p.status, p.progress.min(100)),
            None => (CourseStatus::Pendente, 0),
        };
        Self {
            platform: platform_label(&course.link),
            duration: estimated_duration(&course.name),
            course,
            status,
            progress: pct,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == CourseStatus::Concluido
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TrailSkill {
    #[serde(flatten)]
    pub skill: Skill,
    #[serde(rename = "cursos")]
    pub courses: Vec<TrailCourse>,
    #[serde(rename = "concluida")]
    pub completed: bool,
    #[serde(rename = "progresso")]
    pub progress: f64,
}

impl TrailSkill {
    pub fn new(skill: Skill, courses: Vec<TrailCourse>) -> Self {
        let mut s = Self {
            skill,
            courses,
            completed: false,
            progress: 0.0,
        };
        s.recompute();
        s
    }

    fn recompute(&mut self) {
        self.progress = skill_progress(&self.courses);
        self.completed = self.progress == 100.0;
    }
}

/// Completed courses over total courses, as a percentage. 0 for an empty skill.
pub fn skill_progress(courses: &[TrailCourse]) -> f64 {
    if courses.is_empty() {
        return 0.0;
    }
    let done = courses.iter().filter(|c| c.is_completed()).count();
    done as f64 / courses.len() as f64 * 100.0
}

/// Completed skills over total skills, as a percentage. 0 for an empty trail.
pub fn career_progress(skills: &[TrailSkill]) -> f64 {
    if skills.is_empty() {
        return 0.0;
    }
    let done = skills.iter().filter(|s| s.completed).count();
    done as f64 / skills.len() as f64 * 100.0
}

/// XP granted per completed course of a skill (floor division).
///
/// Summed over every course this can fall short of `skill_xp` by up to
/// `course_count - 1`. The remainder is never awarded.
pub fn xp_per_course(skill_xp: u32, course_count: usize) -> u32 {
    match u32::try_from(course_count) {
        Ok(0) | Err(_) => 0,
        Ok(n) => skill_xp / n,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionDelta {
    pub career_id: i64,
    pub course_id: i64,
    pub skill_id: i64,
    pub xp_awarded: u32,
    pub skill_completed: bool,
    pub career_progress: f64,
    pub xp_total: u32,
    pub status: JourneyStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Completed(CompletionDelta),
    /// The course was already completed; nothing changed and no XP was awarded.
    AlreadyCompleted,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrailState {
    pub user_id: i64,
    pub career_id: i64,
    pub status: JourneyStatus,
    pub skills: Vec<TrailSkill>,
    pub xp_total: u32,
    pub career_progress: f64,
}

impl TrailState {
    /// Assembles the trail from the catalog (skills with their courses) and
    /// the user's per-course progress rows. Skills are ordered by `ordem`.
    pub fn build(
        user_id: i64,
        career_id: i64,
        assignment: Option<&CareerAssignment>,
        catalog: Vec<(Skill, Vec<Course>)>,
        progress: &[CourseProgress],
    ) -> Self {
        let mut skills: Vec<TrailSkill> = catalog
            .into_iter()
            .map(|(skill, courses)| {
                let courses = courses
                    .into_iter()
                    .map(|c| {
                        let row = progress.iter().find(|p| p.course_id == c.id);
                        TrailCourse::new(c, row)
                    })
                    .collect();
                TrailSkill::new(skill, courses)
            })
            .collect();
        skills.sort_by_key(|s| s.skill.order);

        let assignment = assignment.filter(|a| a.career_id == career_id);
        let mut state = Self {
            user_id,
            career_id,
            status: assignment.map(|a| a.status).unwrap_or_default(),
            skills,
            xp_total: assignment.map(|a| a.xp_total).unwrap_or(0),
            career_progress: 0.0,
        };
        state.recompute_career();
        state
    }

    pub fn level(&self) -> LevelInfo {
        LevelInfo::from_xp(self.xp_total)
    }

    pub fn course(&self, course_id: i64) -> Option<&TrailCourse> {
        self.skills
            .iter()
            .flat_map(|s| s.courses.iter())
            .find(|c| c.course.id == course_id)
    }

    pub fn total_courses(&self) -> usize {
        self.skills.iter().map(|s| s.courses.len()).sum()
    }

    pub fn completed_courses(&self) -> usize {
        self.skills
            .iter()
            .flat_map(|s| s.courses.iter())
            .filter(|c| c.is_completed())
            .count()
    }

    /// Pending → in progress. Returns `false` when the course was already
    /// started or completed (nothing changes).
    pub fn start_course(&mut self, course_id: i64) -> Result<bool, ProgressError> {
        let (skill_idx, course_idx) = self.locate(course_id)?;
        let course = &mut self.skills[skill_idx].courses[course_idx];
        if course.status != CourseStatus::Pendente {
            return Ok(false);
        }
        course.status = CourseStatus::EmAndamento;
        course.progress = 0;
        self.recompute_career();
        Ok(true)
    }

    /// Overwrites the checkpoint of an in-progress course. Not monotonic, and
    /// 100 does not complete the course.
    pub fn set_course_progress(&mut self, course_id: i64, progress: u8) -> Result<(), ProgressError> {
        if progress > 100 {
            return Err(ProgressError::InvalidProgress(progress));
        }
        let (skill_idx, course_idx) = self.locate(course_id)?;
        let course = &mut self.skills[skill_idx].courses[course_idx];
        if course.status != CourseStatus::EmAndamento {
            return Err(ProgressError::NotInProgress(course_id));
        }
        course.progress = progress;
        Ok(())
    }

    /// Marks a course completed and awards its XP share once.
    pub fn complete_course(&mut self, course_id: i64) -> Result<Completion, ProgressError> {
        let (skill_idx, course_idx) = self.locate(course_id)?;

        let skill = &mut self.skills[skill_idx];
        if skill.courses[course_idx].is_completed() {
            return Ok(Completion::AlreadyCompleted);
        }

        let xp_awarded = xp_per_course(skill.skill.xp, skill.courses.len());
        let course = &mut skill.courses[course_idx];
        course.status = CourseStatus::Concluido;
        course.progress = 100;
        skill.recompute();

        let skill_id = skill.skill.id;
        let skill_completed = skill.completed;

        self.xp_total = self.xp_total.saturating_add(xp_awarded);
        self.recompute_career();

        Ok(Completion::Completed(CompletionDelta {
            career_id: self.career_id,
            course_id,
            skill_id,
            xp_awarded,
            skill_completed,
            career_progress: self.career_progress,
            xp_total: self.xp_total,
            status: self.status,
        }))
    }

    /// Folds completions already applied to `previous` into a freshly loaded
    /// trail of the same user and career. The backend may lag behind (sync in
    /// flight or failed), so a course completed locally stays completed and
    /// the XP total never goes down. Returns the number of courses carried over.
    pub fn carry_over(&mut self, previous: &TrailState) -> usize {
        if previous.user_id != self.user_id || previous.career_id != self.career_id {
            return 0;
        }

        let mut carried = 0;
        for skill in &mut self.skills {
            for course in &mut skill.courses {
                if course.is_completed() {
                    continue;
                }
                let done_locally = previous
                    .course(course.course.id)
                    .is_some_and(TrailCourse::is_completed);
                if done_locally {
                    course.status = CourseStatus::Concluido;
                    course.progress = 100;
                    carried += 1;
                }
            }
        }

        self.xp_total = self.xp_total.max(previous.xp_total);
        self.recompute_career();
        carried
    }

    fn locate(&self, course_id: i64) -> Result<(usize, usize), ProgressError> {
        self.skills
            .iter()
            .enumerate()
            .find_map(|(si, s)| {
                s.courses
                    .iter()
                    .position(|c| c.course.id == course_id)
                    .map(|ci| (si, ci))
            })
            .ok_or(ProgressError::CourseNotFound(course_id))
    }

    fn recompute_career(&mut self) {
        for skill in &mut self.skills {
            skill.recompute();
        }
        self.career_progress = career_progress(&self.skills);

        let any_started = self
            .skills
            .iter()
            .flat_map(|s| s.courses.iter())
            .any(|c| c.status != CourseStatus::Pendente);
        self.status = match self.status {
            JourneyStatus::Pausada => JourneyStatus::Pausada,
            _ if self.career_progress >= 100.0 => JourneyStatus::Concluida,
            _ if any_started => JourneyStatus::EmAndamento,
            current => current,
        };
    }
}
