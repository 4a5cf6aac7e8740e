use serde::Serialize;

use crate::study::progress::UserProgress;
use crate::study::word::WordEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeId {
    FirstWord,
    TenWords,
    FiftyWords,
    FirstQuiz,
    TenQuizzes,
    Streak3,
    Streak7,
    Streak30,
    Level5,
    Level10,
    Level20,
    PerfectQuiz,
}

impl BadgeId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstWord => "first_word",
            Self::TenWords => "ten_words",
            Self::FiftyWords => "fifty_words",
            Self::FirstQuiz => "first_quiz",
            Self::TenQuizzes => "ten_quizzes",
            Self::Streak3 => "streak_3",
            Self::Streak7 => "streak_7",
            Self::Streak30 => "streak_30",
            Self::Level5 => "level_5",
            Self::Level10 => "level_10",
            Self::Level20 => "level_20",
            Self::PerfectQuiz => "perfect_quiz",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        BADGES.iter().map(|b| b.id).find(|b| b.as_str() == id)
    }
}

type Predicate = fn(&UserProgress, &[WordEntry]) -> bool;

pub struct BadgeDef {
    pub id: BadgeId,
    pub title: &'static str,
    pub description: &'static str,
    pub emoji: &'static str,
    unlock: Predicate,
}

impl BadgeDef {
    pub fn can_unlock(&self, progress: &UserProgress, words: &[WordEntry]) -> bool {
        (self.unlock)(progress, words)
    }
}

// Table order is also the unlock order used by `auto_unlock`.
pub static BADGES: [BadgeDef; 12] = [
    BadgeDef {
        id: BadgeId::FirstWord,
        title: "First Steps",
        description: "Add your first word",
        emoji: "🌱",
        unlock: |_, words| !words.is_empty(),
    },
    BadgeDef {
        id: BadgeId::TenWords,
        title: "Word Collector",
        description: "Add 10 words",
        emoji: "📚",
        unlock: |_, words| words.len() >= 10,
    },
    BadgeDef {
        id: BadgeId::FiftyWords,
        title: "Word Master",
        description: "Add 50 words",
        emoji: "🎓",
        unlock: |_, words| words.len() >= 50,
    },
    BadgeDef {
        id: BadgeId::FirstQuiz,
        title: "Quiz Challenger",
        description: "Finish your first quiz",
        emoji: "🎯",
        unlock: |p, _| p.total_quizzes_taken >= 1,
    },
    BadgeDef {
        id: BadgeId::TenQuizzes,
        title: "Quiz Fanatic",
        description: "Finish 10 quizzes",
        emoji: "🏆",
        unlock: |p, _| p.total_quizzes_taken >= 10,
    },
    BadgeDef {
        id: BadgeId::Streak3,
        title: "Consistency",
        description: "Study 3 days in a row",
        emoji: "🔥",
        unlock: |p, _| p.current_streak >= 3,
    },
    BadgeDef {
        id: BadgeId::Streak7,
        title: "Power of a Week",
        description: "Study 7 days in a row",
        emoji: "⚡",
        unlock: |p, _| p.current_streak >= 7,
    },
    BadgeDef {
        id: BadgeId::Streak30,
        title: "A Month's Journey",
        description: "Study 30 days in a row",
        emoji: "💪",
        unlock: |p, _| p.current_streak >= 30,
    },
    BadgeDef {
        id: BadgeId::Level5,
        title: "Learner",
        description: "Reach level 5",
        emoji: "⭐",
        unlock: |p, _| p.level >= 5,
    },
    BadgeDef {
        id: BadgeId::Level10,
        title: "Expert",
        description: "Reach level 10",
        emoji: "🌟",
        unlock: |p, _| p.level >= 10,
    },
    BadgeDef {
        id: BadgeId::Level20,
        title: "Master",
        description: "Reach level 20",
        emoji: "✨",
        unlock: |p, _| p.level >= 20,
    },
    BadgeDef {
        id: BadgeId::PerfectQuiz,
        title: "Perfectionist",
        description: "Answer every quiz question correctly",
        emoji: "💯",
        // No event carries per-quiz accuracy yet, so this one cannot be earned.
        unlock: |_, _| false,
    },
];

/// Rows are laid out in `BadgeId` declaration order.
pub fn find(id: BadgeId) -> &'static BadgeDef {
    &BADGES[id as usize]
}

pub fn can_unlock(id: BadgeId, progress: &UserProgress, words: &[WordEntry]) -> bool {
    find(id).can_unlock(progress, words)
}

pub fn auto_unlock(progress: &UserProgress, words: &[WordEntry]) -> UserProgress {
    let mut updated = progress.clone();
    for badge in &BADGES {
        let id = badge.id.as_str();
        if !updated.has_badge(id) && badge.can_unlock(&updated, words) {
            tracing::debug!(badge = id, "Badge unlocked");
            updated = updated.unlock_badge(id);
        }
    }
    updated
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeView {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub emoji: &'static str,
    pub unlocked: bool,
}

pub fn views(progress: &UserProgress) -> Vec<BadgeView> {
    BADGES
        .iter()
        .map(|b| BadgeView {
            id: b.id.as_str(),
            title: b.title,
            description: b.description,
            emoji: b.emoji,
            unlocked: progress.has_badge(b.id.as_str()),
        })
        .collect()
}
