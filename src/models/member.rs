use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// A club participant. `belay` marks a verified belay qualification,
/// `pr` holds the member's personal record (highest grade/colour).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub belay: bool,
    #[serde(default)]
    pub emergency: String,
    #[serde(default)]
    pub pr: String,
    #[serde(default)]
    pub notes: String,
}

/// Request body for member create/update.
#[derive(Debug, Deserialize)]
pub struct MemberForm {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub belay: bool,
    #[serde(default)]
    pub emergency: String,
    #[serde(default)]
    pub pr: String,
    #[serde(default)]
    pub notes: String,
}

impl MemberForm {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push("Member name is required".to_string());
        }
        let email = self.email.trim();
        if !email.is_empty() && !looks_like_email(email) {
            errors.push("Invalid email format".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors.join("; ")))
        }
    }

    /// Build the stored member, trimming free-text fields.
    pub fn into_member(self, id: String) -> Member {
        Member {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            belay: self.belay,
            emergency: self.emergency.trim().to_string(),
            pr: self.pr.trim().to_string(),
            notes: self.notes.trim().to_string(),
        }
    }
}

/// local-part@domain with a dotted domain and no whitespace.
fn looks_like_email(s: &str) -> bool {
    if s.contains(char::is_whitespace) {
        return false;
    }
    let mut parts = s.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::looks_like_email;

    #[test]
    fn accepts_plain_addresses() {
        assert!(looks_like_email("anna@example.com"));
        assert!(looks_like_email("erik.normann@klubb.example.no"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!looks_like_email("no-at-sign"));
        assert!(!looks_like_email("two@@signs.com"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("anna@nodot"));
        assert!(!looks_like_email("anna@.com"));
        assert!(!looks_like_email("anna b@example.com"));
    }
}
