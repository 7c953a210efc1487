//! Progression rules applied when a user completes an adventure.

/// Points awarded when the caller does not say otherwise.
pub const DEFAULT_ADVENTURE_POINTS: u32 = 50;

/// A user at level `n` levels up once their points reach `n * POINTS_PER_LEVEL`.
pub const POINTS_PER_LEVEL: i64 = 1000;

/// Highest reachable level. Points past its threshold still accumulate.
pub const MAX_LEVEL: u32 = u32::MAX;

/// The mutable counters of a user, detached from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progression {
    pub level: u32,
    pub points: i64,
    pub streak: u32,
    pub adventures_completed: u32,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            level: 1,
            points: 0,
            streak: 0,
            adventures_completed: 0,
        }
    }
}

impl Progression {
    /// Credit one completed adventure worth `points_earned`.
    ///
    /// The streak goes up on every adventure; nothing ever resets it.
    /// A single adventure can cross several level thresholds, so levels are
    /// granted in a loop until the next threshold is out of reach.
    /// Returns the number of levels gained.
    pub fn record_adventure(&mut self, points_earned: u32) -> u32 {
        self.adventures_completed = self.adventures_completed.saturating_add(1);
        self.points = self.points.saturating_add(i64::from(points_earned));
        self.streak = self.streak.saturating_add(1);

        let start = self.level;
        while self.level < MAX_LEVEL && self.points >= i64::from(self.level) * POINTS_PER_LEVEL {
            self.level += 1;
        }
        self.level - start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_move_by_exactly_one_adventure() {
        let mut p = Progression::default();
        let gained = p.record_adventure(DEFAULT_ADVENTURE_POINTS);

        assert_eq!(gained, 0);
        assert_eq!(
            p,
            Progression {
                level: 1,
                points: 50,
                streak: 1,
                adventures_completed: 1,
            }
        );
    }

    #[test]
    fn big_adventure_crosses_several_thresholds() {
        let mut p = Progression {
            level: 1,
            points: 999,
            ..Default::default()
        };

        // 3499 clears 1000, 2000 and 3000 but not 4000
        let gained = p.record_adventure(2500);

        assert_eq!(p.points, 3499);
        assert_eq!(p.level, 4);
        assert_eq!(gained, 3);
    }

    #[test]
    fn reaching_threshold_exactly_levels_up() {
        let mut p = Progression {
            points: 950,
            ..Default::default()
        };
        p.record_adventure(50);
        assert_eq!(p.level, 2);

        p.record_adventure(999);
        assert_eq!(p.points, 1999);
        assert_eq!(p.level, 2);

        p.record_adventure(1);
        assert_eq!(p.level, 3);
    }

    #[test]
    fn level_stops_at_the_cap() {
        let mut p = Progression {
            level: MAX_LEVEL,
            points: i64::from(MAX_LEVEL) * POINTS_PER_LEVEL - 1,
            ..Default::default()
        };

        assert_eq!(p.record_adventure(1), 0);
        assert_eq!(p.level, MAX_LEVEL);

        p.record_adventure(u32::MAX);
        assert_eq!(p.level, MAX_LEVEL);
        assert_eq!(p.points, i64::from(MAX_LEVEL) * POINTS_PER_LEVEL + i64::from(u32::MAX));
    }

    #[test]
    fn climbing_onto_the_cap() {
        let mut p = Progression {
            level: MAX_LEVEL - 1,
            points: i64::from(MAX_LEVEL - 1) * POINTS_PER_LEVEL - 1,
            ..Default::default()
        };

        // clears MAX_LEVEL - 1 and MAX_LEVEL's thresholds, but the loop halts at the cap
        let gained = p.record_adventure(u32::MAX);
        assert_eq!(p.level, MAX_LEVEL);
        assert_eq!(gained, 1);
    }

    #[test]
    fn zero_point_adventure_still_counts() {
        let mut p = Progression::default();
        p.record_adventure(0);
        p.record_adventure(0);

        assert_eq!(p.points, 0);
        assert_eq!(p.level, 1);
        assert_eq!(p.streak, 2);
        assert_eq!(p.adventures_completed, 2);
    }
}
