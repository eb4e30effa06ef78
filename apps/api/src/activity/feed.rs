pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 50;
pub const MAX_POST_LENGTH: usize = 2000;

/// Clamps a requested page size into [1, MAX_PAGE_SIZE], defaulting when absent.
pub fn clamp_limit(requested: Option<i64>) -> i64 {
    requested
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE)
}

/// Validates post or comment body text.
pub fn validate_body(body: &str) -> Result<(), String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err("Body cannot be empty".to_string());
    }
    if trimmed.chars().count() > MAX_POST_LENGTH {
        return Err(format!("Body exceeds {MAX_POST_LENGTH} characters"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_defaults_when_absent() {
        assert_eq!(clamp_limit(None), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_limit_clamped_to_max() {
        assert_eq!(clamp_limit(Some(500)), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_limit_clamped_to_min() {
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(-5)), 1);
    }

    #[test]
    fn test_limit_in_range_passes_through() {
        assert_eq!(clamp_limit(Some(35)), 35);
    }

    #[test]
    fn test_body_rejects_empty() {
        assert!(validate_body("   ").is_err());
    }

    #[test]
    fn test_body_rejects_overlong() {
        let long = "x".repeat(MAX_POST_LENGTH + 1);
        assert!(validate_body(&long).is_err());
    }

    #[test]
    fn test_body_accepts_normal_text() {
        assert!(validate_body("Shipped the Q3 report today!").is_ok());
    }

    #[test]
    fn test_body_length_counts_chars_not_bytes() {
        let multibyte = "é".repeat(MAX_POST_LENGTH);
        assert!(validate_body(&multibyte).is_ok());
    }
}
