//! Field validation shared by the resident, payment and guest services.

use chrono::NaiveDate;

use super::errors::DomainError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

const MAX_NAME_LEN: usize = 50;
const MAX_REG_CODE_LEN: usize = 10;
const MAX_PHONE_LEN: usize = 15;

/// Parse a YYYY-MM-DD field
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| DomainError::validation(format!("{}: '{}' is not a YYYY-MM-DD date", field, value)))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn require_reg_code(value: &str) -> Result<(), DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("reg_code: cannot be empty"));
    }
    if trimmed.len() > MAX_REG_CODE_LEN {
        return Err(DomainError::validation(format!(
            "reg_code: cannot exceed {} characters",
            MAX_REG_CODE_LEN
        )));
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(DomainError::validation(format!("reg_code: '{}' must be alphanumeric", value)));
    }
    Ok(())
}

/// Names are letters only; spaces are not allowed
pub fn require_name(field: &str, value: &str) -> Result<(), DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{}: cannot be empty", field)));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::validation(format!(
            "{}: cannot exceed {} characters",
            field, MAX_NAME_LEN
        )));
    }
    if !trimmed.chars().all(char::is_alphabetic) {
        return Err(DomainError::validation(format!("{}: '{}' must contain only letters", field, value)));
    }
    Ok(())
}

pub fn require_phone(field: &str, value: &str) -> Result<(), DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.len() > MAX_PHONE_LEN || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(DomainError::validation(format!(
            "{}: '{}' must be 1 to {} digits",
            field, value, MAX_PHONE_LEN
        )));
    }
    Ok(())
}

pub fn require_email(value: Option<&str>) -> Result<(), DomainError> {
    match value.map(str::trim) {
        None | Some("") => Ok(()),
        Some(email) => {
            let valid = email
                .split_once('@')
                .map(|(user, domain)| !user.is_empty() && domain.contains('.'))
                .unwrap_or(false);
            if valid {
                Ok(())
            } else {
                Err(DomainError::validation(format!("email: '{}' is not a valid address", email)))
            }
        }
    }
}

pub fn require_non_negative(field: &str, value: f64) -> Result<(), DomainError> {
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::validation(format!("{}: must be zero or more", field)));
    }
    Ok(())
}

pub fn require_positive(field: &str, value: f64) -> Result<(), DomainError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(DomainError::validation(format!("{}: must be greater than zero", field)));
    }
    Ok(())
}

pub fn require_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), DomainError> {
    if start > end {
        return Err(DomainError::validation(format!(
            "start_date {} is after end_date {}",
            format_date(start),
            format_date(end)
        )));
    }
    Ok(())
}

/// Trim and drop empty optional text fields
pub fn clean_optional(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("joining_date", "2024-01-10").unwrap(), NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert!(parse_date("joining_date", "10/01/2024").is_err());
        assert!(parse_date("joining_date", "2024-02-30").is_err());
    }

    #[test]
    fn test_reg_code_rules() {
        assert!(require_reg_code("UG0001").is_ok());
        assert!(require_reg_code("").is_err());
        assert!(require_reg_code("UG-0001").is_err());
        assert!(require_reg_code("UG000100000").is_err());
    }

    #[test]
    fn test_name_rules() {
        assert!(require_name("first_name", "Asha").is_ok());
        assert!(require_name("first_name", "Asha2").is_err());
        assert!(require_name("first_name", "  ").is_err());
    }

    #[test]
    fn test_phone_and_email_rules() {
        assert!(require_phone("phone", "9876543210").is_ok());
        assert!(require_phone("phone", "98765-43210").is_err());
        assert!(require_email(None).is_ok());
        assert!(require_email(Some("a@b.in")).is_ok());
        assert!(require_email(Some("not-an-email")).is_err());
    }

    #[test]
    fn test_amount_rules() {
        assert!(require_non_negative("paid_amount", 0.0).is_ok());
        assert!(require_non_negative("paid_amount", -1.0).is_err());
        assert!(require_positive("pay_amount", 0.0).is_err());
        assert!(require_positive("pay_amount", f64::NAN).is_err());
    }

    #[test]
    fn test_date_range() {
        let jan = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let feb = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert!(require_date_range(jan, feb).is_ok());
        assert!(require_date_range(jan, jan).is_ok());
        assert!(require_date_range(feb, jan).is_err());
    }
}
