//! Lyrics input validation.

/// Minimum accepted lyrics length in characters, after trimming
pub const MIN_LYRICS_CHARS: usize = 20;

/// Maximum accepted lyrics length in characters, after trimming
pub const MAX_LYRICS_CHARS: usize = 5000;

/// Rejection reasons. The messages are shown to end users as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Mohon masukkan lirik lagu terlebih dahulu!")]
    Empty,

    #[error("Lirik terlalu pendek. Mohon masukkan lirik yang lebih panjang untuk hasil yang akurat.")]
    TooShort,

    #[error("Lirik terlalu panjang. Maksimal 5000 karakter.")]
    TooLong,
}

/// Check that `lyrics` is long enough to classify and not too long.
pub fn validate_lyrics(lyrics: &str) -> Result<(), ValidationError> {
    let trimmed = lyrics.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }

    let len = trimmed.chars().count();
    if len < MIN_LYRICS_CHARS {
        return Err(ValidationError::TooShort);
    }
    if len > MAX_LYRICS_CHARS {
        return Err(ValidationError::TooLong);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(validate_lyrics(""), Err(ValidationError::Empty));
        assert_eq!(validate_lyrics(" \n\t "), Err(ValidationError::Empty));
    }

    #[test]
    fn test_too_short() {
        assert_eq!(validate_lyrics("short"), Err(ValidationError::TooShort));
        assert_eq!(
            validate_lyrics(&"a".repeat(19)),
            Err(ValidationError::TooShort)
        );
    }

    #[test]
    fn test_bounds_inclusive() {
        assert_eq!(validate_lyrics(&"a".repeat(20)), Ok(()));
        assert_eq!(validate_lyrics(&"a".repeat(21)), Ok(()));
        assert_eq!(validate_lyrics(&"a".repeat(5000)), Ok(()));
        assert_eq!(
            validate_lyrics(&"a".repeat(5001)),
            Err(ValidationError::TooLong)
        );
    }

    #[test]
    fn test_length_measured_after_trim() {
        let padded = format!("   {}   ", "a".repeat(19));
        assert_eq!(validate_lyrics(&padded), Err(ValidationError::TooShort));
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // 10 two-byte chars are 20 bytes but still too short
        assert_eq!(
            validate_lyrics(&"é".repeat(10)),
            Err(ValidationError::TooShort)
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ValidationError::TooLong.to_string(),
            "Lirik terlalu panjang. Maksimal 5000 karakter."
        );
    }
}
