use chrono::NaiveDate;
use proptest::prelude::*;

use wordquiz_backend::store::codec;
use wordquiz_backend::study::badge::{self, BADGES};
use wordquiz_backend::study::category;
use wordquiz_backend::study::classifier;
use wordquiz_backend::study::progress::{UserProgress, XP_PER_LEVEL};
use wordquiz_backend::study::word::{dedup_by_id_sorted, WordEntry};

/// XP spent to reach `level` from level 1, plus what is held now.
fn lifetime_xp(p: &UserProgress) -> u64 {
    let spent: u64 = (1..p.level).map(|l| u64::from(l * XP_PER_LEVEL)).sum();
    spent + u64::from(p.current_xp)
}

fn word_strategy() -> impl Strategy<Value = WordEntry> {
    let ids: Vec<&'static str> = category::catalog()
        .iter()
        .filter(|c| c.is_selectable())
        .map(|c| c.id)
        .collect();
    (
        0_i64..40,
        "[a-z]{1,12}",
        "[a-z]{1,8}( [a-z]{1,8}){0,3}",
        0_u32..50,
        0_u32..50,
        proptest::sample::select(ids),
    )
        .prop_map(|(id, term, meaning, correct, incorrect, category_id)| WordEntry {
            id,
            term,
            meaning,
            correct_count: correct,
            incorrect_count: incorrect,
            category_id: category_id.to_string(),
        })
}

fn progress_strategy() -> impl Strategy<Value = UserProgress> {
    (
        1_u32..30,
        0_u32..100,
        0_u32..40,
        0_u32..10,
        proptest::option::of(0_i64..3000),
        0_u32..500,
        0_u32..500,
        proptest::sample::subsequence(
            BADGES.iter().map(|b| b.id.as_str().to_string()).collect::<Vec<_>>(),
            0..=BADGES.len(),
        ),
    )
        .prop_map(
            |(level, xp_seed, streak, extra, day_offset, quizzes, learned, badges)| UserProgress {
                level,
                current_xp: xp_seed * level % (level * XP_PER_LEVEL),
                current_streak: streak,
                longest_streak: streak + extra,
                last_study_date: day_offset.map(|d| {
                    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + chrono::Duration::days(d)
                }),
                total_quizzes_taken: quizzes,
                total_words_learned: learned,
                unlocked_badges: badges,
            },
        )
}

proptest! {
    #[test]
    fn pt_add_xp_stays_normalized_and_conserves_xp(
        start in progress_strategy(),
        grants in proptest::collection::vec(0_u32..2_000, 1..10),
    ) {
        let mut p = start.clone();
        let mut granted = 0_u64;
        for amount in grants {
            let next = p.add_xp(amount);
            prop_assert!(next.level >= p.level);
            prop_assert!(next.current_xp < next.level * XP_PER_LEVEL);
            granted += u64::from(amount);
            p = next;
        }
        prop_assert_eq!(lifetime_xp(&p), lifetime_xp(&start) + granted);
    }

    #[test]
    fn pt_streak_never_exceeds_longest(
        start in progress_strategy(),
        gaps in proptest::collection::vec(0_i64..4, 1..20),
    ) {
        let mut p = start;
        let mut today = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        for gap in gaps {
            today += chrono::Duration::days(gap);
            p = p.update_streak_for_today(today);
            prop_assert!(p.current_streak >= 1);
            prop_assert!(p.longest_streak >= p.current_streak);
            prop_assert_eq!(p.last_study_date, Some(today));
        }
    }

    #[test]
    fn pt_word_list_round_trip(words in proptest::collection::vec(word_strategy(), 0..25)) {
        let encoded = codec::encode_words(&words).unwrap();
        prop_assert_eq!(codec::decode_words(encoded.as_bytes()), dedup_by_id_sorted(&words));
    }

    #[test]
    fn pt_progress_round_trip(progress in progress_strategy()) {
        let encoded = codec::encode_progress(&progress).unwrap();
        prop_assert_eq!(codec::decode_progress(encoded.as_bytes()), progress);
    }

    #[test]
    fn pt_classification_is_deterministic_and_selectable(
        term in "[A-Za-z ]{0,20}",
        meaning in "[A-Za-z ]{0,40}",
    ) {
        let first = classifier::classify(&term, &meaning);
        prop_assert_eq!(first, classifier::classify(&term.to_uppercase(), &meaning.to_lowercase()));
        prop_assert!(category::is_selectable(first));
        prop_assert_ne!(first, category::UNCATEGORIZED);
    }

    #[test]
    fn pt_auto_unlock_is_monotonic_and_idempotent(
        progress in progress_strategy(),
        words in proptest::collection::vec(word_strategy(), 0..60),
    ) {
        let once = badge::auto_unlock(&progress, &words);
        for id in &progress.unlocked_badges {
            prop_assert!(once.has_badge(id));
        }
        prop_assert_eq!(&badge::auto_unlock(&once, &words), &once);
        prop_assert!(!once.has_badge("perfect_quiz") || progress.has_badge("perfect_quiz"));
    }
}
