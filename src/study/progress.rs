use chrono::NaiveDate;
use serde::Serialize;

/// XP needed to clear one level is `level * XP_PER_LEVEL`.
pub const XP_PER_LEVEL: u32 = 100;

/// Highest level whose threshold still fits in a `u32`.
pub const MAX_LEVEL: u32 = u32::MAX / XP_PER_LEVEL;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Gamification snapshot. Transitions return a new value and leave `self` untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub level: u32,
    #[serde(rename = "currentXP")]
    pub current_xp: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_study_date: Option<NaiveDate>,
    pub total_quizzes_taken: u32,
    pub total_words_learned: u32,
    pub unlocked_badges: Vec<String>,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            level: 1,
            current_xp: 0,
            current_streak: 0,
            longest_streak: 0,
            last_study_date: None,
            total_quizzes_taken: 0,
            total_words_learned: 0,
            unlocked_badges: Vec::new(),
        }
    }
}

impl UserProgress {
    pub fn xp_for_next_level(&self) -> u32 {
        self.level.saturating_mul(XP_PER_LEVEL)
    }

    /// Ratio in `[0, 1)` once normalized.
    pub fn level_progress(&self) -> f64 {
        f64::from(self.current_xp) / f64::from(self.xp_for_next_level().max(1))
    }

    /// Adds XP and carries every full threshold into levels. At
    /// [`MAX_LEVEL`] XP stops one short of the threshold.
    pub fn add_xp(&self, amount: u32) -> Self {
        let mut level = self.level.clamp(1, MAX_LEVEL);
        let mut xp = u64::from(self.current_xp) + u64::from(amount);

        while level < MAX_LEVEL && xp >= level_threshold(level) {
            xp -= level_threshold(level);
            level += 1;
        }
        let xp = xp.min(level_threshold(level) - 1);

        Self {
            level,
            current_xp: u32::try_from(xp).unwrap_or(u32::MAX),
            ..self.clone()
        }
    }

    pub fn update_streak_for_today(&self, today: NaiveDate) -> Self {
        if self.last_study_date == Some(today) {
            return self.clone();
        }

        let streak = if self.last_study_date.is_some_and(|last| is_day_before(last, today)) {
            self.current_streak.saturating_add(1)
        } else {
            1
        };

        Self {
            current_streak: streak,
            longest_streak: self.longest_streak.max(streak),
            last_study_date: Some(today),
            ..self.clone()
        }
    }

    pub fn unlock_badge(&self, badge_id: &str) -> Self {
        if self.has_badge(badge_id) {
            return self.clone();
        }
        let mut next = self.clone();
        next.unlocked_badges.push(badge_id.to_string());
        next
    }

    pub fn has_badge(&self, badge_id: &str) -> bool {
        self.unlocked_badges.iter().any(|b| b == badge_id)
    }

    pub fn record_quiz_completed(&self) -> Self {
        Self {
            total_quizzes_taken: self.total_quizzes_taken.saturating_add(1),
            ..self.clone()
        }
    }

    pub fn record_word_learned(&self) -> Self {
        Self {
            total_words_learned: self.total_words_learned.saturating_add(1),
            ..self.clone()
        }
    }
}

fn level_threshold(level: u32) -> u64 {
    u64::from(level) * u64::from(XP_PER_LEVEL)
}

fn is_day_before(last: NaiveDate, today: NaiveDate) -> bool {
    today.pred_opt() == Some(last)
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> NaiveDate {
        parse_date(raw).expect("valid date")
    }

    fn studied_on(raw: &str, streak: u32) -> UserProgress {
        UserProgress {
            current_streak: streak,
            longest_streak: streak,
            last_study_date: Some(date(raw)),
            ..UserProgress::default()
        }
    }

    #[test]
    fn add_xp_single_level_up() {
        let p = UserProgress {
            current_xp: 90,
            ..UserProgress::default()
        };
        let next = p.add_xp(25);
        assert_eq!(next.level, 2);
        assert_eq!(next.current_xp, 15);
    }

    #[test]
    fn add_xp_crosses_two_levels() {
        let next = UserProgress::default().add_xp(250);
        assert_eq!(next.level, 3);
        assert_eq!(next.current_xp, 50);
    }

    #[test]
    fn add_xp_stops_at_max_level() {
        let p = UserProgress {
            level: u32::MAX,
            current_xp: u32::MAX,
            ..UserProgress::default()
        };
        let next = p.add_xp(u32::MAX);
        assert_eq!(next.level, MAX_LEVEL);
        assert_eq!(next.current_xp, MAX_LEVEL * XP_PER_LEVEL - 1);
    }

    #[test]
    fn add_xp_exact_threshold_levels_up() {
        let next = UserProgress::default().add_xp(100);
        assert_eq!(next.level, 2);
        assert_eq!(next.current_xp, 0);
        assert_eq!(next.xp_for_next_level(), 200);
    }

    #[test]
    fn level_progress_is_ratio() {
        let p = UserProgress {
            level: 2,
            current_xp: 50,
            ..UserProgress::default()
        };
        assert!((p.level_progress() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn streak_increments_across_month() {
        let next = studied_on("2024-01-31", 4).update_streak_for_today(date("2024-02-01"));
        assert_eq!(next.current_streak, 5);
        assert_eq!(next.longest_streak, 5);
        assert_eq!(next.last_study_date, Some(date("2024-02-01")));
    }

    #[test]
    fn streak_increments_across_year() {
        let next = studied_on("2023-12-31", 2).update_streak_for_today(date("2024-01-01"));
        assert_eq!(next.current_streak, 3);
    }

    #[test]
    fn streak_increments_across_leap_day() {
        let next = studied_on("2024-02-29", 1).update_streak_for_today(date("2024-03-01"));
        assert_eq!(next.current_streak, 2);
        // Feb 29 sits between these two in 2024.
        let gap = studied_on("2024-02-28", 1).update_streak_for_today(date("2024-03-01"));
        assert_eq!(gap.current_streak, 1);
    }

    #[test]
    fn same_day_is_noop() {
        let p = studied_on("2024-03-01", 6);
        assert_eq!(p.update_streak_for_today(date("2024-03-01")), p);
    }

    #[test]
    fn gap_resets_streak_but_keeps_longest() {
        let next = studied_on("2024-03-01", 6).update_streak_for_today(date("2024-03-05"));
        assert_eq!(next.current_streak, 1);
        assert_eq!(next.longest_streak, 6);
    }

    #[test]
    fn first_study_day_starts_streak() {
        let next = UserProgress::default().update_streak_for_today(date("2024-06-10"));
        assert_eq!(next.current_streak, 1);
        assert_eq!(next.longest_streak, 1);
    }

    #[test]
    fn unlock_badge_is_idempotent() {
        let once = UserProgress::default().unlock_badge("first_word");
        let twice = once.unlock_badge("first_word");
        assert_eq!(once, twice);
        assert_eq!(twice.unlocked_badges, vec!["first_word".to_string()]);
    }

    #[test]
    fn counters_increment() {
        let p = UserProgress::default()
            .record_quiz_completed()
            .record_word_learned()
            .record_word_learned();
        assert_eq!(p.total_quizzes_taken, 1);
        assert_eq!(p.total_words_learned, 2);
    }
}
