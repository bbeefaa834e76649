// crates/cert-portal-core/tests/proptest_scoring.rs
// ============================================================================
// Module: Exam Scoring Property-Based Tests
// Description: Property tests for scorer bounds and monotonicity.
// Purpose: Detect rounding drift and verdict inconsistencies across ranges.
// ============================================================================

//! Property-based tests for scoring invariants.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use cert_portal_core::Answer;
use cert_portal_core::AnswerKey;
use cert_portal_core::QuestionId;
use cert_portal_core::score_sheet;
use proptest::prelude::*;

fn uniform_key(total: usize) -> AnswerKey {
    AnswerKey::from_pairs(
        (0 .. total).map(|index| (QuestionId::new(format!("q-{index}")), "a".to_string())),
    )
    .expect("unique question ids")
}

fn sheet_with_correct(total: usize, correct: usize) -> Vec<Answer> {
    (0 .. total)
        .map(|index| Answer {
            question_id: QuestionId::new(format!("q-{index}")),
            answer: if index < correct { "a".to_string() } else { "b".to_string() },
        })
        .collect()
}

proptest! {
    #[test]
    fn score_stays_within_percentage_bounds(
        total in 1usize .. 200,
        correct_seed in 0usize .. 200,
        passing in 0u32 ..= 100,
    ) {
        let correct = correct_seed % (total + 1);
        let outcome = score_sheet(&sheet_with_correct(total, correct), &uniform_key(total), passing);
        prop_assert!(outcome.score <= 100);
        prop_assert_eq!(outcome.correct_answers as usize, correct);
        prop_assert_eq!(outcome.total_questions as usize, total);
    }

    #[test]
    fn score_is_monotone_in_correct_answers(
        total in 1usize .. 100,
        correct_seed in 0usize .. 100,
    ) {
        let correct = correct_seed % total;
        let key = uniform_key(total);
        let lower = score_sheet(&sheet_with_correct(total, correct), &key, 70);
        let higher = score_sheet(&sheet_with_correct(total, correct + 1), &key, 70);
        prop_assert!(higher.score >= lower.score);
    }

    #[test]
    fn verdict_matches_score_threshold(
        total in 1usize .. 100,
        correct_seed in 0usize .. 100,
        passing in 0u32 ..= 100,
    ) {
        let correct = correct_seed % (total + 1);
        let outcome = score_sheet(&sheet_with_correct(total, correct), &uniform_key(total), passing);
        prop_assert_eq!(outcome.passed, outcome.score >= passing);
    }

    #[test]
    fn rounding_is_half_up_against_float_reference(
        total in 1usize .. 150,
        correct_seed in 0usize .. 150,
    ) {
        let correct = correct_seed % (total + 1);
        let outcome = score_sheet(&sheet_with_correct(total, correct), &uniform_key(total), 70);
        #[allow(
            clippy::cast_precision_loss,
            reason = "Reference computation; totals stay far below 2^52."
        )]
        let reference = (100.0_f64 * correct as f64 / total as f64 + 0.5).floor();
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "Reference value is a small non-negative integer."
        )]
        let reference = reference as u32;
        prop_assert_eq!(outcome.score, reference);
    }

    #[test]
    fn perfect_sheets_always_score_one_hundred(total in 1usize .. 150) {
        let outcome = score_sheet(&sheet_with_correct(total, total), &uniform_key(total), 70);
        prop_assert_eq!(outcome.score, 100);
        prop_assert!(outcome.passed);
    }
}
