use serde::{Deserialize, Serialize};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// One answered question on a review form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewAnswer {
    pub question: String,
    pub rating: u8,
    pub comment: Option<String>,
}

/// Checks the submitted answer set before scoring.
pub fn validate_answers(answers: &[ReviewAnswer]) -> Result<(), String> {
    if answers.is_empty() {
        return Err("A review must contain at least one answer".to_string());
    }
    for answer in answers {
        if answer.question.trim().is_empty() {
            return Err("Answer is missing its question text".to_string());
        }
        if !(MIN_RATING..=MAX_RATING).contains(&answer.rating) {
            return Err(format!(
                "Rating {} for '{}' is outside {}-{}",
                answer.rating, answer.question, MIN_RATING, MAX_RATING
            ));
        }
    }
    Ok(())
}

/// Overall score = mean of all ratings, rounded to 2 decimals.
/// Callers must validate first; an empty slice scores 0.
pub fn overall_score(answers: &[ReviewAnswer]) -> f64 {
    if answers.is_empty() {
        return 0.0;
    }
    let sum: u32 = answers.iter().map(|a| u32::from(a.rating)).sum();
    let mean = f64::from(sum) / answers.len() as f64;
    (mean * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(rating: u8) -> ReviewAnswer {
        ReviewAnswer {
            question: "Quality of work".to_string(),
            rating,
            comment: None,
        }
    }

    #[test]
    fn test_mean_of_ratings() {
        let answers = vec![answer(4), answer(5), answer(3)];
        assert_eq!(overall_score(&answers), 4.0);
    }

    #[test]
    fn test_score_rounds_to_two_decimals() {
        let answers = vec![answer(5), answer(4), answer(4)];
        // 13/3 = 4.333...
        assert_eq!(overall_score(&answers), 4.33);
    }

    #[test]
    fn test_single_answer_score() {
        assert_eq!(overall_score(&[answer(2)]), 2.0);
    }

    #[test]
    fn test_empty_answers_score_zero() {
        assert_eq!(overall_score(&[]), 0.0);
    }

    #[test]
    fn test_validate_accepts_full_range() {
        let answers = vec![answer(1), answer(5)];
        assert!(validate_answers(&answers).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_set() {
        assert!(validate_answers(&[]).is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_rating() {
        assert!(validate_answers(&[answer(0)]).is_err());
        assert!(validate_answers(&[answer(6)]).is_err());
    }

    #[test]
    fn test_validate_rejects_blank_question() {
        let bad = ReviewAnswer {
            question: "   ".to_string(),
            rating: 3,
            comment: None,
        };
        assert!(validate_answers(&[bad]).is_err());
    }
}
