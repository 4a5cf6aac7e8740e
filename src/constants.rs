/// XP awarded for each correct quiz answer
pub const XP_PER_CORRECT_ANSWER: u32 = 10;

/// Bonus XP when a quiz round is finished
pub const XP_QUIZ_COMPLETION_BONUS: u32 = 20;

/// XP per correctly typed word in a typing round
pub const XP_PER_TYPING_CORRECT: u32 = 15;

/// Upper bound on a term, in characters
pub const MAX_TERM_CHARS: usize = 200;

/// Upper bound on a meaning, in characters
pub const MAX_MEANING_CHARS: usize = 1000;

/// Words stored on first start when the collection is empty: (id, term, meaning)
pub const DEFAULT_SEED_WORDS: &[(i64, &str, &str)] = &[
    (1, "apple", "a round fruit"),
    (2, "compose", "to create or put together"),
];

/// Attempts at the seeding compare-and-swap before giving up
pub const MAX_CAS_RETRIES: u32 = 20;
