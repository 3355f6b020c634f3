// Progress/XP derivation.
// Pure functions over the active career's trail; no I/O here. Remote sync of
// the results lives in `crate::sync`.

pub mod course_meta;
pub mod level;
pub mod trail;

pub use level::LevelInfo;
pub use trail::{Completion, CompletionDelta, ProgressError, TrailState};
