//! Login identifier classification
//!
//! A login request carries a single `identifier` string which is classified
//! by shape before any storage lookup: email syntax selects lookup by email,
//! an 11-digit number selects lookup by mobile, anything else is rejected
//! outright.

/// A login identifier classified by shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginIdentifier {
    /// Matches email syntax; lookup is by the `email` column.
    Email(String),
    /// Matches the 11-digit mobile pattern; lookup is by the `mobile` column.
    Mobile(String),
}

impl LoginIdentifier {
    /// Classify a raw identifier string.
    ///
    /// Returns `None` when the string is neither a syntactically valid email
    /// nor an 11-digit mobile number; callers must not attempt a storage
    /// lookup in that case.
    pub fn classify(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if is_valid_email(raw) {
            Some(Self::Email(raw.to_string()))
        } else if is_valid_mobile(raw) {
            Some(Self::Mobile(raw.to_string()))
        } else {
            None
        }
    }
}

/// Syntactic email check: one `@`, non-empty local part, dotted domain.
pub fn is_valid_email(s: &str) -> bool {
    let mut parts = s.splitn(2, '@');
    let (local, domain) = match (parts.next(), parts.next()) {
        (Some(l), Some(d)) => (l, d),
        _ => return false,
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if s.chars().any(|c| c.is_whitespace()) || domain.contains('@') {
        return false;
    }
    // Domain needs an interior dot: "a@b." and "a@.b" are both malformed.
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Mobile numbers are exactly 11 ASCII digits.
pub fn is_valid_mobile(s: &str) -> bool {
    s.len() == 11 && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_email() {
        assert_eq!(
            LoginIdentifier::classify("a@x.com"),
            Some(LoginIdentifier::Email("a@x.com".to_string()))
        );
    }

    #[test]
    fn test_classify_mobile() {
        assert_eq!(
            LoginIdentifier::classify("01711111111"),
            Some(LoginIdentifier::Mobile("01711111111".to_string()))
        );
    }

    #[test]
    fn test_classify_bad_format() {
        // Not an email, not 11 digits.
        assert_eq!(LoginIdentifier::classify("hello"), None);
        assert_eq!(LoginIdentifier::classify("0171111111"), None); // 10 digits
        assert_eq!(LoginIdentifier::classify("017111111112"), None); // 12 digits
        assert_eq!(LoginIdentifier::classify("0171111111a"), None);
        assert_eq!(LoginIdentifier::classify(""), None);
    }

    #[test]
    fn test_email_syntax_edges() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("u.ser+tag@mail.example.org"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("user@domain."));
        assert!(!is_valid_email("us er@example.com"));
    }

    #[test]
    fn test_mobile_rejects_non_ascii_digits() {
        // Bengali digits are the right length but not ASCII.
        assert!(!is_valid_mobile("০১৭১১১১১১১১"));
    }
}
