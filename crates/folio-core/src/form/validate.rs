use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::Error;

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Email address is invalid";
pub const MESSAGE_REQUIRED: &str = "Message is required";

/// Contact form fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Your Name",
            Field::Email => "Your Email",
            Field::Message => "Message",
        }
    }

    /// Next field in tab order, wrapping
    pub fn next(&self) -> Field {
        match self {
            Field::Name => Field::Email,
            Field::Email => Field::Message,
            Field::Message => Field::Name,
        }
    }

    /// Previous field in tab order, wrapping
    pub fn prev(&self) -> Field {
        match self {
            Field::Name => Field::Message,
            Field::Email => Field::Name,
            Field::Message => Field::Email,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(Field::Name),
            "email" => Ok(Field::Email),
            "message" => Ok(Field::Message),
            other => Err(Error::Validation(format!("unknown field '{}'", other))),
        }
    }
}

/// Field name → error message; an absent key means the field is valid
pub type FieldErrors = BTreeMap<Field, String>;

/// Loose `local@domain.tld` shape used by the contact form
pub fn is_contact_email(email: &str) -> bool {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE
        .get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("valid contact email pattern"))
        .is_match(email)
}

/// Strict whole-string shape used by the waitlist form
pub fn is_waitlist_email(email: &str) -> bool {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid waitlist email pattern"))
        .is_match(email)
}

/// Validate the three contact fields
pub fn validate_contact(name: &str, email: &str, message: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if name.is_empty() {
        errors.insert(Field::Name, NAME_REQUIRED.to_string());
    }
    if email.is_empty() {
        errors.insert(Field::Email, EMAIL_REQUIRED.to_string());
    } else if !is_contact_email(email) {
        errors.insert(Field::Email, EMAIL_INVALID.to_string());
    }
    if message.is_empty() {
        errors.insert(Field::Message, MESSAGE_REQUIRED.to_string());
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_blank() {
        let errors = validate_contact("", "", "");
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[&Field::Name], NAME_REQUIRED);
        assert_eq!(errors[&Field::Email], EMAIL_REQUIRED);
        assert_eq!(errors[&Field::Message], MESSAGE_REQUIRED);
    }

    #[test]
    fn test_invalid_email_only() {
        for email in ["plainaddress", "a@b", "@.", "user@domain"] {
            let errors = validate_contact("Ada", email, "Hello");
            assert_eq!(errors.len(), 1, "{}", email);
            assert_eq!(errors[&Field::Email], EMAIL_INVALID);
        }
    }

    #[test]
    fn test_valid() {
        assert!(validate_contact("Ada", "ada@example.com", "Hi").is_empty());
    }

    #[test]
    fn test_contact_shape_is_loose() {
        // Substring match, like the site's pattern
        assert!(is_contact_email("x y@b.c"));
        assert!(!is_waitlist_email("x y@b.c"));
    }

    #[test]
    fn test_waitlist_shape() {
        assert!(is_waitlist_email("ada@example.com"));
        assert!(!is_waitlist_email("ada@@example.com"));
        assert!(!is_waitlist_email("ada@example"));
        assert!(!is_waitlist_email(" ada@example.com"));
    }

    #[test]
    fn test_field_parse_and_order() {
        assert_eq!("Email".parse::<Field>().unwrap(), Field::Email);
        assert!("phone".parse::<Field>().is_err());
        assert_eq!(Field::Message.next(), Field::Name);
        assert_eq!(Field::Name.prev(), Field::Message);
    }
}
