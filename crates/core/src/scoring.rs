//! Scoring module - line clear points, levels, and gravity speed

use crate::types::{
    BASE_GRAVITY_MS, GRAVITY_STEP_MS, LINES_PER_LEVEL, LINE_SCORES, MIN_GRAVITY_MS,
};

/// Calculate line clear score
/// lines: number of lines cleared simultaneously
/// level: current level (0-based), before this clear is counted
///
/// Returns `None` for more than four lines: a single piece cannot produce such
/// a clear and the table has no entry for it.
pub fn line_clear_score(lines: usize, level: u32) -> Option<u32> {
    let base = *LINE_SCORES.get(lines)?;
    Some(base.saturating_mul(level.saturating_add(1)))
}

/// Level management
/// Level increases every `LINES_PER_LEVEL` lines cleared
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}

/// Gravity period for a level (in milliseconds).
///
/// Level 0 falls at the base period; each level after that is one step faster,
/// clamped at the minimum.
pub fn gravity_period_ms(level: u32) -> u32 {
    BASE_GRAVITY_MS
        .saturating_sub(level.saturating_mul(GRAVITY_STEP_MS))
        .max(MIN_GRAVITY_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores() {
        assert_eq!(line_clear_score(0, 0), Some(0));
        assert_eq!(line_clear_score(1, 0), Some(100));
        assert_eq!(line_clear_score(2, 0), Some(300));
        assert_eq!(line_clear_score(3, 0), Some(500));
        assert_eq!(line_clear_score(4, 0), Some(800));

        // Level 5
        assert_eq!(line_clear_score(1, 5), Some(100 * 6));
        assert_eq!(line_clear_score(4, 5), Some(800 * 6));
    }

    #[test]
    fn test_unsupported_line_counts() {
        assert_eq!(line_clear_score(5, 0), None);
        assert_eq!(line_clear_score(20, 3), None);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(level_for_lines(0), 0);
        assert_eq!(level_for_lines(9), 0);
        assert_eq!(level_for_lines(10), 1);
        assert_eq!(level_for_lines(29), 2);
        assert_eq!(level_for_lines(100), 10);
    }

    #[test]
    fn test_gravity_periods() {
        assert_eq!(gravity_period_ms(0), 800);
        assert_eq!(gravity_period_ms(1), 740);
        assert_eq!(gravity_period_ms(5), 500);
        assert_eq!(gravity_period_ms(11), 140);
        assert_eq!(gravity_period_ms(12), 100);
        assert_eq!(gravity_period_ms(30), 100); // Floor at 100
        assert_eq!(gravity_period_ms(u32::MAX), 100);
    }

    #[test]
    fn test_gravity_is_non_increasing() {
        for level in 0..40 {
            assert!(gravity_period_ms(level + 1) <= gravity_period_ms(level));
        }
    }
}
