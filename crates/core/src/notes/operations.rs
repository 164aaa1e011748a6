use super::error::ValidationError;
use super::requests::{CreateNoteRequest, RegisterUserRequest, UpdateNoteRequest};

/// Minimum password length accepted at registration and password change.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A name starts with an ASCII capital and has at least 3 ASCII letters.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {}
        _ => return false,
    }
    name.len() >= 3 && chars.all(|c| c.is_ascii_alphabetic())
}

/// Checks `local@domain.tld` where the TLD has at least two letters.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty()
        || !local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c))
    {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// At least [`MIN_PASSWORD_LEN`] characters with a lowercase letter, an
/// uppercase letter and a digit.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

/// Validates a registration request before anything touches the store.
pub fn validate_registration(request: &RegisterUserRequest) -> Result<(), ValidationError> {
    if !is_valid_name(&request.first_name) {
        return Err(ValidationError::InvalidFirstName);
    }
    if !is_valid_name(&request.last_name) {
        return Err(ValidationError::InvalidLastName);
    }
    if !is_valid_email(&request.email) {
        return Err(ValidationError::InvalidEmail);
    }
    validate_password(&request.password)
}

/// Validates a new password.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if is_strong_password(password) {
        Ok(())
    } else {
        Err(ValidationError::WeakPassword)
    }
}

/// Rejects blank background colors.
pub fn validate_background_color(color: &str) -> Result<(), ValidationError> {
    if color.trim().is_empty() {
        return Err(ValidationError::EmptyBackgroundColor);
    }
    Ok(())
}

fn validate_note_fields(title: &str, color: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    validate_background_color(color)
}

/// Validates a note before creation.
pub fn validate_new_note(request: &CreateNoteRequest) -> Result<(), ValidationError> {
    validate_note_fields(&request.title, &request.background_color)
}

/// Validates a full note update.
pub fn validate_note_update(request: &UpdateNoteRequest) -> Result<(), ValidationError> {
    validate_note_fields(&request.title, &request.background_color)
}

/// Rejects blank label names.
pub fn validate_label_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyLabelName);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> RegisterUserRequest {
        RegisterUserRequest {
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
            email: "alice@example.com".to_string(),
            password: "Abcdef1".to_string(),
        }
    }

    #[test]
    fn test_is_valid_name() {
        assert!(is_valid_name("Alice"));
        assert!(is_valid_name("Bob"));
        assert!(!is_valid_name("Al"));
        assert!(!is_valid_name("alice"));
        assert!(!is_valid_name("Al1ce"));
        assert!(!is_valid_name(""));
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("a.b+tag@mail.example.co"));
        assert!(!is_valid_email("alice.example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("alice@example"));
        assert!(!is_valid_email("alice@example.c"));
        assert!(!is_valid_email("alice@.com"));
    }

    #[test]
    fn test_is_strong_password() {
        assert!(is_strong_password("Abcdef1"));
        assert!(!is_strong_password("Abc1"));
        assert!(!is_strong_password("abcdef1"));
        assert!(!is_strong_password("ABCDEF1"));
        assert!(!is_strong_password("Abcdefg"));
    }

    #[test]
    fn test_validate_registration() {
        assert!(validate_registration(&alice()).is_ok());

        let request = RegisterUserRequest {
            last_name: "sm".to_string(),
            ..alice()
        };
        assert_eq!(
            validate_registration(&request),
            Err(ValidationError::InvalidLastName)
        );

        let request = RegisterUserRequest {
            password: "weak".to_string(),
            ..alice()
        };
        assert_eq!(
            validate_registration(&request),
            Err(ValidationError::WeakPassword)
        );
    }

    #[test]
    fn test_validate_new_note() {
        assert!(validate_new_note(&CreateNoteRequest::new("Groceries")).is_ok());
        assert_eq!(
            validate_new_note(&CreateNoteRequest::new("  ")),
            Err(ValidationError::EmptyTitle)
        );
        assert_eq!(
            validate_new_note(&CreateNoteRequest::new("Groceries").with_background_color("")),
            Err(ValidationError::EmptyBackgroundColor)
        );
    }

    #[test]
    fn test_validate_label_name() {
        assert!(validate_label_name("Work").is_ok());
        assert_eq!(
            validate_label_name(" "),
            Err(ValidationError::EmptyLabelName)
        );
    }
}
