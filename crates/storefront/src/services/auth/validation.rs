//! Account form checks.
//!
//! Front ends run [`validate_registration`] before calling
//! [`super::AccountDirectory::register`]. The admin console applies
//! [`validate_identity`] to the users it creates. Every failing field is
//! reported, not just the first.

use thiserror::Error;

use crate::models::NewAccount;

/// Email domains accepted at registration.
pub const ALLOWED_EMAIL_DOMAINS: &[&str] = &["gmail.com", "duoc.cl"];

/// Minimum secret length.
const MIN_SECRET_LENGTH: usize = 4;

/// Maximum secret length.
const MAX_SECRET_LENGTH: usize = 10;

/// A single failing form field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("RUN must be 7-9 characters of digits or K, without dots or dash")]
    Run,
    #[error("name is required")]
    Name,
    #[error("surname is required")]
    Surname,
    #[error("email must be @gmail.com or @duoc.cl")]
    Email,
    #[error("password must be 4 to 10 characters")]
    Secret,
    #[error("address is required")]
    Address,
}

/// Whether `run` is 7-9 characters drawn from digits and `K`.
#[must_use]
pub fn is_valid_run(run: &str) -> bool {
    let run = run.trim().to_uppercase();
    (7..=9).contains(&run.len()) && run.chars().all(|c| c.is_ascii_digit() || c == 'K')
}

/// Whether `email` belongs to an accepted domain.
#[must_use]
pub fn is_allowed_email(email: &str) -> bool {
    let email = email.trim().to_lowercase();
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '-'))
        && ALLOWED_EMAIL_DOMAINS.contains(&domain)
}

/// Whether `secret` has an accepted length.
#[must_use]
pub fn is_valid_secret(secret: &str) -> bool {
    (MIN_SECRET_LENGTH..=MAX_SECRET_LENGTH).contains(&secret.chars().count())
}

/// Check the fields shared by registration and the admin console: RUN, name,
/// surname and email.
///
/// # Errors
///
/// Returns all failing fields in form order.
pub fn validate_identity(form: &NewAccount) -> Result<(), Vec<FieldError>> {
    into_result(identity_errors(form))
}

/// Check every registration field.
///
/// # Errors
///
/// Returns all failing fields in form order.
pub fn validate_registration(form: &NewAccount) -> Result<(), Vec<FieldError>> {
    let mut errors = identity_errors(form);

    if !is_valid_secret(&form.secret) {
        errors.push(FieldError::Secret);
    }
    if form.address.trim().is_empty() {
        errors.push(FieldError::Address);
    }

    into_result(errors)
}

/// Join field errors into one message.
#[must_use]
pub fn describe(fields: &[FieldError]) -> String {
    let reasons: Vec<String> = fields.iter().map(ToString::to_string).collect();
    reasons.join("; ")
}

fn identity_errors(form: &NewAccount) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if !is_valid_run(&form.id) {
        errors.push(FieldError::Run);
    }
    if form.name.trim().is_empty() {
        errors.push(FieldError::Name);
    }
    if form.surname.trim().is_empty() {
        errors.push(FieldError::Surname);
    }
    if !is_allowed_email(&form.email) {
        errors.push(FieldError::Email);
    }

    errors
}

fn into_result(errors: Vec<FieldError>) -> Result<(), Vec<FieldError>> {
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form() -> NewAccount {
        NewAccount {
            id: "19011022K".to_string(),
            name: "Ana".to_string(),
            surname: "Soto".to_string(),
            email: "ana@duoc.cl".to_string(),
            secret: "clave".to_string(),
            address: "Sede Central".to_string(),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(validate_registration(&form()).is_ok());
    }

    #[test]
    fn test_run_rules() {
        assert!(is_valid_run("19011022k"));
        assert!(is_valid_run("1234567"));
        assert!(!is_valid_run("123456"));
        assert!(!is_valid_run("19.011.022-K"));
        assert!(!is_valid_run("1234567890"));
    }

    #[test]
    fn test_email_domains() {
        assert!(is_allowed_email("Ana.Soto@Gmail.com"));
        assert!(is_allowed_email("ana-soto@duoc.cl"));
        assert!(!is_allowed_email("ana@hotmail.com"));
        assert!(!is_allowed_email("@gmail.com"));
        assert!(!is_allowed_email("ana+tag@gmail.com"));
    }

    #[test]
    fn test_secret_length() {
        assert!(!is_valid_secret("abc"));
        assert!(is_valid_secret("abcd"));
        assert!(is_valid_secret("abcdefghij"));
        assert!(!is_valid_secret("abcdefghijk"));
    }

    #[test]
    fn test_reports_every_failing_field() {
        let mut bad = form();
        bad.id = "x".to_string();
        bad.email = "ana@hotmail.com".to_string();
        bad.address = "  ".to_string();

        let errors = validate_registration(&bad).unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::Run, FieldError::Email, FieldError::Address]
        );
        assert_eq!(
            describe(&errors),
            "RUN must be 7-9 characters of digits or K, without dots or dash; \
             email must be @gmail.com or @duoc.cl; address is required"
        );
    }

    #[test]
    fn test_identity_ignores_secret_and_address() {
        let mut staff = form();
        staff.secret = String::new();
        staff.address = String::new();
        assert!(validate_identity(&staff).is_ok());

        staff.name = " ".to_string();
        staff.email = "ana@hotmail.com".to_string();
        assert_eq!(
            validate_identity(&staff).unwrap_err(),
            vec![FieldError::Name, FieldError::Email]
        );
    }
}
