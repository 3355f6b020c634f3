pub mod career;
pub mod ranking;
pub mod trail;
pub mod user;

pub use career::{Career, CareerAssignment, JourneyStatus};
pub use ranking::{DashboardSummary, RankingEntry, UserStats};
pub use trail::{Course, CourseProgress, CourseStatus, Difficulty, Skill};
pub use user::{User, UserUpdate};
