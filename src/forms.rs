//! Booking form extraction and validation.

use serde::Deserialize;

/// Fields submitted from the album detail page.
///
/// Missing fields default to empty strings so that an incomplete submission
/// reaches validation (and gets field-level messages) instead of being
/// rejected by the extractor.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Field-level validation messages, in form order.
#[derive(Debug, Default)]
pub struct FormErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    /// Non-field message (booking conflict retry)
    pub internal: Option<&'static str>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.internal.is_none()
    }
}

impl ContactForm {
    /// Validate submitted fields. Empty `FormErrors` means the form is good.
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();

        if self.name.trim().is_empty() {
            errors.name = Some("Please enter your name.");
        }

        if self.email.trim().is_empty() {
            errors.email = Some("Please enter your email address.");
        } else if !is_valid_email(self.email.trim()) {
            errors.email = Some("Please enter a valid email address.");
        }

        errors
    }
}

/// Minimal well-formedness check: non-empty local part, one @, dotted domain.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
        && !email.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        for email in ["fred@queen.forever", "a@b.co", "first.last@sub.domain.org"] {
            assert!(is_valid_email(email), "{email} should be valid");
        }
    }

    #[test]
    fn test_invalid_emails() {
        for email in [
            "",
            "fred",
            "@queen.forever",
            "fred@",
            "fred@queen",
            "fred@.queen",
            "fred@queen.",
            "fred smith@queen.forever",
        ] {
            assert!(!is_valid_email(email), "{email} should be invalid");
        }
    }

    #[test]
    fn test_validate_collects_field_errors() {
        let form = ContactForm {
            name: String::new(),
            email: "not-an-email".to_string(),
        };
        let errors = form.validate();
        assert!(errors.name.is_some());
        assert!(errors.email.is_some());
        assert!(!errors.is_empty());

        let form = ContactForm {
            name: "Freddie".to_string(),
            email: "fred@queen.forever".to_string(),
        };
        assert!(form.validate().is_empty());
    }
}
