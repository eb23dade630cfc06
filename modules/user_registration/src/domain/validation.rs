//! Input checks for registration: email grammar, birth date format and age.

use chrono::{Local, NaiveDate};
use validator::ValidateEmail;

use crate::domain::error::DomainError;

/// `dd.MM.yyyy`
pub const BIRTH_DATE_FORMAT: &str = "%d.%m.%Y";

/// Accepts `local@domain` where the domain has at least two labels and an
/// alphabetic top-level label of two or more letters, or is a bracketed IP
/// literal. The local part may not start or end with a dot.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let Some((local, domain)) = email.rsplit_once('@') else {
        return Err(DomainError::invalid_email(email));
    };

    let local_ok = !local.starts_with('.') && !local.ends_with('.');
    let domain_ok = (domain.starts_with('[') && domain.ends_with(']')) || has_valid_tld(domain);
    if local_ok && domain_ok && email.to_owned().validate_email() {
        Ok(())
    } else {
        Err(DomainError::invalid_email(email))
    }
}

fn has_valid_tld(domain: &str) -> bool {
    match domain.rsplit_once('.') {
        Some((_, tld)) => tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()),
        None => false,
    }
}

/// Two-digit day, two-digit month, four-digit year, dot separated.
fn has_birth_date_shape(date: &str) -> bool {
    let bytes = date.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'.',
            _ => b.is_ascii_digit(),
        })
}

/// Parse a `dd.MM.yyyy` birth date into a real calendar date.
pub fn parse_birth_date(date: &str) -> Result<NaiveDate, DomainError> {
    if date.is_empty() {
        return Err(DomainError::missing_birth_date());
    }
    if !has_birth_date_shape(date) {
        return Err(DomainError::invalid_birth_date(date));
    }
    NaiveDate::parse_from_str(date, BIRTH_DATE_FORMAT).map_err(|e| {
        tracing::debug!(date, error = %e, "birth date does not denote a calendar date");
        DomainError::invalid_birth_date(date)
    })
}

/// Whole years between the birth date and today's local date.
pub fn compute_age(date: &str) -> Result<u32, DomainError> {
    compute_age_at(date, Local::now().date_naive())
}

/// Same as [`compute_age`] against an explicit `today`.
pub fn compute_age_at(date: &str, today: NaiveDate) -> Result<u32, DomainError> {
    let born = parse_birth_date(date)?;
    if born > today {
        return Err(DomainError::future_birth_date(date));
    }
    Ok(today.years_since(born).unwrap_or_default())
}
