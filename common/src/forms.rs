//! Validation for the sign-in, registration and template forms.
//!
//! Each form collects every failing field so the page can show all messages
//! at once.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::FormError;
use crate::model::auth::{LoginRequest, RegisterRequest};
use crate::model::suggestion::DesignSuggestionRequest;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email pattern compiles")
});

/// `(value, label)` pairs offered by the registration form.
pub const ORGANIZATION_TYPES: [(&str, &str); 7] = [
    ("college", "College/University"),
    ("school", "School"),
    ("company", "Company"),
    ("hospital", "Hospital"),
    ("government", "Government"),
    ("ngo", "NGO"),
    ("other", "Other"),
];

pub const CARD_PURPOSES: [(&str, &str); 4] = [
    ("student_id", "Student ID"),
    ("employee_id", "Employee ID"),
    ("visitor_pass", "Visitor Pass"),
    ("access_card", "Access Card"),
];

/// Messages keyed by form field name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors(Vec<FormError>);

impl FieldErrors {
    fn push(&mut self, field: &'static str, message: &'static str) {
        self.0.push(FormError { field, message });
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.0.is_empty() { Ok(value) } else { Err(self) }
    }
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    if email.trim().is_empty() {
        errors.push("email", "Email is required");
    } else if !EMAIL.is_match(email.trim()) {
        errors.push("email", "Invalid email address");
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, FieldErrors> {
        let mut errors = FieldErrors::default();
        check_email(&mut errors, &self.email);
        if self.password.is_empty() {
            errors.push("password", "Password is required");
        }
        errors.into_result(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegisterForm {
    pub email: String,
    pub organization_name: String,
    pub organization_type: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<RegisterRequest, FieldErrors> {
        let mut errors = FieldErrors::default();
        check_email(&mut errors, &self.email);

        let organization = self.organization_name.trim();
        if organization.is_empty() {
            errors.push("organization_name", "Organization name is required");
        } else if organization.chars().count() < 2 {
            errors.push("organization_name", "Organization name must be at least 2 characters");
        }

        if !ORGANIZATION_TYPES.iter().any(|(value, _)| *value == self.organization_type) {
            errors.push("organization_type", "Organization type is required");
        }

        if self.password.is_empty() {
            errors.push("password", "Password is required");
        } else if self.password.chars().count() < 6 {
            errors.push("password", "Password must be at least 6 characters");
        }

        if self.confirm_password.is_empty() {
            errors.push("confirm_password", "Please confirm your password");
        } else if self.confirm_password != self.password {
            errors.push("confirm_password", "Passwords do not match");
        }

        errors.into_result(RegisterRequest {
            email: self.email.trim().to_string(),
            organization_name: organization.to_string(),
            organization_type: self.organization_type.clone(),
            password: self.password.clone(),
        })
    }
}

/// Checks a template name before upload and returns it trimmed.
pub fn validate_template_name(name: &str) -> Result<String, FieldErrors> {
    let mut errors = FieldErrors::default();
    let name = name.trim();
    if name.is_empty() {
        errors.push("name", "Please enter a template name first");
    } else if name.chars().count() < 2 {
        errors.push("name", "Name must be at least 2 characters");
    }
    errors.into_result(name.to_string())
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DesignSuggestionForm {
    pub organization_type: String,
    pub card_purpose: String,
    pub template_description: String,
}

impl DesignSuggestionForm {
    pub fn validate(&self) -> Result<DesignSuggestionRequest, FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.organization_type.is_empty() {
            errors.push("organization_type", "Select an organization type");
        }
        if self.card_purpose.is_empty() {
            errors.push("card_purpose", "Select a card purpose");
        }
        if self.template_description.trim().is_empty() {
            errors.push("template_description", "Describe your template");
        }
        errors.into_result(DesignSuggestionRequest {
            organization_type: self.organization_type.clone(),
            card_purpose: self.card_purpose.clone(),
            template_description: self.template_description.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_registration() -> RegisterForm {
        RegisterForm {
            email: "admin@college.edu".into(),
            organization_name: "City College".into(),
            organization_type: "college".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
        }
    }

    #[test]
    fn registration_passes_through_clean_values() {
        let request = valid_registration().validate().unwrap();
        assert_eq!(request.organization_name, "City College");
        assert_eq!(request.organization_type, "college");
    }

    #[test]
    fn password_mismatch_is_reported_on_confirmation() {
        let form = RegisterForm { confirm_password: "secret2".into(), ..valid_registration() };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("confirm_password"), Some("Passwords do not match"));
        assert_eq!(errors.get("password"), None);
    }

    #[test]
    fn every_failing_field_is_collected() {
        let errors = RegisterForm::default().validate().unwrap_err();
        for field in ["email", "organization_name", "organization_type", "password", "confirm_password"] {
            assert!(errors.get(field).is_some(), "{field}");
        }
    }

    #[test]
    fn email_pattern_is_case_insensitive() {
        let form = LoginForm { email: "Admin@College.EDU".into(), password: "x".into() };
        assert!(form.validate().is_ok());
        let form = LoginForm { email: "admin@college".into(), password: "x".into() };
        assert_eq!(form.validate().unwrap_err().get("email"), Some("Invalid email address"));
    }

    #[test]
    fn template_name_needs_two_characters() {
        assert_eq!(validate_template_name("  Staff "), Ok("Staff".to_string()));
        assert_eq!(
            validate_template_name("A").unwrap_err().get("name"),
            Some("Name must be at least 2 characters")
        );
    }

    #[test]
    fn suggestion_form_requires_all_fields() {
        let errors = DesignSuggestionForm::default().validate().unwrap_err();
        assert!(errors.get("card_purpose").is_some());
        let form = DesignSuggestionForm {
            organization_type: "school".into(),
            card_purpose: "student_id".into(),
            template_description: "blue header, logo left".into(),
        };
        assert!(form.validate().is_ok());
    }
}
