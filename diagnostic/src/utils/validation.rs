// Input validation utilities

/// A text answer counts as present once it has a non-whitespace character.
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Labels of the required fields whose value is blank, in the given order.
pub fn missing_required<'a>(fields: &[(&'a str, &str)]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(_, value)| !is_present(value))
        .map(|(label, _)| *label)
        .collect()
}

/// Loose email shape check used for hints only; the backend owns real validation.
pub fn looks_like_email(value: &str) -> bool {
    let v = value.trim();
    match v.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !v.contains(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_is_missing() {
        assert!(!is_present(""));
        assert!(!is_present("   \t"));
        assert!(is_present("0"));
    }

    #[test]
    fn missing_required_preserves_order() {
        let missing = missing_required(&[("Role", ""), ("Industry", "Tech"), ("Location", " ")]);
        assert_eq!(missing, vec!["Role", "Location"]);
    }

    #[test]
    fn email_shape() {
        assert!(looks_like_email("a@b.co"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("@b.co"));
        assert!(!looks_like_email("a b@c.co"));
    }
}
