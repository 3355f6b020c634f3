use serde::Serialize;

/// XP needed to climb one level. Level 1 starts at 0 XP.
pub const XP_PER_LEVEL: u32 = 500;

pub fn level(xp: u32) -> u32 {
    xp / XP_PER_LEVEL + 1
}

pub fn xp_to_next_level(xp: u32) -> u32 {
    level(xp) * XP_PER_LEVEL - xp
}

/// Percentage of the current level already earned, 0 – 100 (exclusive of 100).
pub fn level_progress(xp: u32) -> f64 {
    let floor = (level(xp) - 1) * XP_PER_LEVEL;
    f64::from(xp - floor) / f64::from(XP_PER_LEVEL) * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelInfo {
    pub level: u32,
    pub xp: u32,
    pub xp_to_next_level: u32,
    pub level_progress: f64,
}

impl LevelInfo {
    pub fn from_xp(xp: u32) -> Self {
        Self {
            level: level(xp),
            xp,
            xp_to_next_level: xp_to_next_level(xp),
            level_progress: level_progress(xp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_examples() {
        assert_eq!(level(0), 1);
        assert_eq!(level(499), 1);
        assert_eq!(level(500), 2);
        assert_eq!(level(1250), 3);
    }

    #[test]
    fn test_level_monotonic_and_at_least_one() {
        let mut previous = level(0);
        for xp in (0..5000).step_by(7) {
            let current = level(xp);
            assert!(current >= 1);
            assert!(current >= previous, "level dropped at xp={xp}");
            previous = current;
        }
    }

    #[test]
    fn test_xp_to_next_level() {
        assert_eq!(xp_to_next_level(0), 500);
        assert_eq!(xp_to_next_level(1250), 250);
        assert_eq!(xp_to_next_level(500), 500);
    }

    #[test]
    fn test_level_progress() {
        assert_eq!(level_progress(0), 0.0);
        assert!((level_progress(1250) - 50.0).abs() < f64::EPSILON);
        assert!((level_progress(499) - 99.8).abs() < 1e-9);
    }

    #[test]
    fn test_level_info_from_xp() {
        let info = LevelInfo::from_xp(1250);
        assert_eq!(info.level, 3);
        assert_eq!(info.xp, 1250);
        assert_eq!(info.xp_to_next_level, 250);
    }
}
