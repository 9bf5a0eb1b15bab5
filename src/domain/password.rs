use validator::ValidationError;
use zxcvbn::{Score, zxcvbn};

const MIN_LENGTH: usize = 8;
const MIN_STRENGTH_SCORE: Score = Score::Three;

/// Rejects passwords that lack character variety or that zxcvbn rates as guessable.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_LENGTH {
        return Err(password_error(
            "password_length",
            format!("Must be at least {MIN_LENGTH} characters"),
        ));
    }

    let has_upper = password.chars().any(char::is_uppercase);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| c.is_ascii_punctuation());

    if !(has_upper && has_digit && has_symbol) {
        return Err(password_error(
            "password_complexity",
            "Must include uppercase, number, and symbol".to_string(),
        ));
    }

    let estimate = zxcvbn(password, &[]);
    if estimate.score() < MIN_STRENGTH_SCORE {
        let hint = estimate
            .feedback()
            .and_then(|f| f.warning().map(|w| w.to_string()))
            .unwrap_or_else(|| "Password is too easy to guess".to_string());
        return Err(password_error("password_strength", hint));
    }

    Ok(())
}

fn password_error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}
