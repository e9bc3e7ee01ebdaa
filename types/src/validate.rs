//! Input validators for user-supplied fields.
//!
//! These mirror what the sign-in and share forms enforce: format checks
//! only, surfaced as recoverable errors the caller can show inline.

use crate::DivsError;

pub struct Validators;

impl Validators {
    /// Email must be `local@domain.tld` with no whitespace.
    pub fn email(email: &str) -> Result<(), DivsError> {
        if email.is_empty() {
            return Err(DivsError::InvalidEmail("email is required".into()));
        }
        let valid = match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.is_empty()
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
                    && !email.chars().any(|c| c.is_whitespace())
                    && !domain.contains('@')
            }
            None => false,
        };
        if valid {
            Ok(())
        } else {
            Err(DivsError::InvalidEmail(
                "please enter a valid email address".into(),
            ))
        }
    }

    /// Phone must be at least 10 characters of digits, spaces, dashes, or
    /// parentheses, with an optional leading `+`.
    pub fn phone(phone: &str) -> Result<(), DivsError> {
        if phone.is_empty() {
            return Err(DivsError::InvalidPhone("phone number is required".into()));
        }
        let rest = phone.strip_prefix('+').unwrap_or(phone);
        let allowed = rest
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')'));
        if allowed && rest.len() >= 10 {
            Ok(())
        } else {
            Err(DivsError::InvalidPhone(
                "please enter a valid phone number".into(),
            ))
        }
    }

    /// OTP must be exactly 6 ASCII digits.
    pub fn otp(otp: &str) -> Result<(), DivsError> {
        if otp.is_empty() {
            return Err(DivsError::InvalidOtp("OTP is required".into()));
        }
        if otp.len() != 6 {
            return Err(DivsError::InvalidOtp("OTP must be 6 digits".into()));
        }
        if !otp.chars().all(|c| c.is_ascii_digit()) {
            return Err(DivsError::InvalidOtp("OTP must contain only numbers".into()));
        }
        Ok(())
    }

    /// Access codes share the OTP format: exactly 6 ASCII digits.
    pub fn access_code(code: &str) -> Result<(), DivsError> {
        if code.is_empty() {
            return Err(DivsError::InvalidAccessCode("access code is required".into()));
        }
        if code.len() != 6 {
            return Err(DivsError::InvalidAccessCode(
                "access code must be 6 digits".into(),
            ));
        }
        if !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(DivsError::InvalidAccessCode(
                "access code must contain only numbers".into(),
            ));
        }
        Ok(())
    }

    /// Display name, at least 2 characters after trimming.
    pub fn name(name: &str) -> Result<(), DivsError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DivsError::InvalidName("name is required".into()));
        }
        if trimmed.chars().count() < 2 {
            return Err(DivsError::InvalidName(
                "name must be at least 2 characters".into(),
            ));
        }
        Ok(())
    }

    /// Business registration number, at least 5 characters after trimming.
    pub fn business_registration(reg: &str) -> Result<(), DivsError> {
        let trimmed = reg.trim();
        if trimmed.is_empty() {
            return Err(DivsError::InvalidRegistration(
                "business registration number is required".into(),
            ));
        }
        if trimmed.chars().count() < 5 {
            return Err(DivsError::InvalidRegistration(
                "registration number must be at least 5 characters".into(),
            ));
        }
        Ok(())
    }
}
