use chrono::NaiveDateTime;

use crate::error::ValidationError;

/// Every field must be non-empty after trimming.
pub fn require_all(fields: &[&str]) -> Result<(), ValidationError> {
    if fields.iter().any(|field| field.trim().is_empty()) {
        return Err(ValidationError::MissingFields);
    }
    Ok(())
}

/// Shape check only: something before the @, a dot with non-empty sides in
/// the domain, no whitespace anywhere. Deliverability is the backend's
/// problem.
pub fn email_is_valid(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Spanish landline/mobile format: exactly nine digits.
pub fn phone_is_valid(phone: &str) -> bool {
    phone.len() == 9 && phone.chars().all(|c| c.is_ascii_digit())
}

/// At least eight characters, letters and digits only, with at least one of
/// each.
pub fn password_is_valid(password: &str) -> bool {
    password.len() >= 8
        && password.chars().all(|c| c.is_ascii_alphanumeric())
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
}

pub fn end_after_start(start: NaiveDateTime, end: NaiveDateTime) -> Result<(), ValidationError> {
    if end <= start {
        return Err(ValidationError::EndNotAfterStart);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn email_shapes() {
        assert!(email_is_valid("ana@refugio.es"));
        assert!(email_is_valid("ana.lopez@mail.refugio.es"));
        assert!(!email_is_valid("ana@refugio"));
        assert!(!email_is_valid("ana@.es"));
        assert!(!email_is_valid("ana refugio@mail.es"));
        assert!(!email_is_valid("@refugio.es"));
        assert!(!email_is_valid("ana@@refugio.es"));
    }

    #[test]
    fn phone_is_exactly_nine_digits() {
        assert!(phone_is_valid("612345678"));
        assert!(!phone_is_valid("61234567"));
        assert!(!phone_is_valid("6123456789"));
        assert!(!phone_is_valid("61234567a"));
    }

    #[test]
    fn password_policy() {
        assert!(password_is_valid("abcde123"));
        assert!(!password_is_valid("abc123"));        // too short
        assert!(!password_is_valid("abcdefgh"));      // no digit
        assert!(!password_is_valid("12345678"));      // no letter
        assert!(!password_is_valid("abcde12!"));      // symbol not allowed
    }

    #[test]
    fn end_must_be_strictly_after_start() {
        let day = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let ten = day.and_hms_opt(10, 0, 0).unwrap();
        let eleven = day.and_hms_opt(11, 0, 0).unwrap();
        assert!(end_after_start(ten, eleven).is_ok());
        assert_eq!(end_after_start(ten, ten), Err(ValidationError::EndNotAfterStart));
        assert_eq!(end_after_start(eleven, ten), Err(ValidationError::EndNotAfterStart));
    }

    #[test]
    fn required_fields() {
        assert!(require_all(&["Ana", "ana@mail.es"]).is_ok());
        assert_eq!(require_all(&["Ana", "  "]), Err(ValidationError::MissingFields));
    }
}
