//! Investment submission form.
//!
//! The form is what the user typed (amount still as text, password entered
//! twice); [`InvestmentForm::validate`] turns it into the [`InvestmentRecord`]
//! that is sent to the backend.

use std::fmt;

use thiserror::Error;

use crate::security::SecretString;

#[derive(Debug)]
pub struct InvestmentForm {
    pub name: String,
    pub invest_amount: String,
    pub comment: String,
    pub password: SecretString,
    pub check_password: SecretString,
}

/// Validated investment record.
#[derive(Debug)]
pub struct InvestmentRecord {
    pub name: String,
    pub invest_amount: f64,
    pub comment: String,
    pub password: SecretString,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvestmentField {
    Name,
    InvestAmount,
    Comment,
    Password,
    CheckPassword,
}

impl InvestmentField {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentField::Name => "name",
            InvestmentField::InvestAmount => "investAmount",
            InvestmentField::Comment => "comment",
            InvestmentField::Password => "password",
            InvestmentField::CheckPassword => "checkPassword",
        }
    }
}

impl fmt::Display for InvestmentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorReason {
    Required,
    InvalidAmount,
    PasswordMismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: InvestmentField,
    pub reason: FieldErrorReason,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            FieldErrorReason::Required => write!(f, "{} is required", self.field),
            FieldErrorReason::InvalidAmount => {
                write!(f, "{} must be a positive number", self.field)
            }
            FieldErrorReason::PasswordMismatch => {
                write!(f, "{} does not match password", self.field)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid investment form: {}", describe(.fields))]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    pub fn has(&self, field: InvestmentField) -> bool {
        self.fields.iter().any(|error| error.field == field)
    }
}

fn describe(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl InvestmentForm {
    /// True when every field has content; mirrors the enabled state of the submit button.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.invest_amount.trim().is_empty()
            && !self.comment.trim().is_empty()
            && !self.password.is_blank()
            && !self.check_password.is_blank()
    }

    pub fn validate(self) -> Result<InvestmentRecord, ValidationError> {
        let mut fields = Vec::new();
        let mut required = |field: InvestmentField, blank: bool| {
            if blank {
                fields.push(FieldError {
                    field,
                    reason: FieldErrorReason::Required,
                });
            }
            blank
        };

        required(InvestmentField::Name, self.name.trim().is_empty());
        let amount_blank = required(
            InvestmentField::InvestAmount,
            self.invest_amount.trim().is_empty(),
        );
        required(InvestmentField::Comment, self.comment.trim().is_empty());
        required(InvestmentField::Password, self.password.is_blank());
        let check_blank = required(
            InvestmentField::CheckPassword,
            self.check_password.is_blank(),
        );

        let amount = self.invest_amount.trim().parse::<f64>().ok();
        let amount = match amount {
            Some(value) if value.is_finite() && value > 0.0 => Some(value),
            _ => {
                if !amount_blank {
                    fields.push(FieldError {
                        field: InvestmentField::InvestAmount,
                        reason: FieldErrorReason::InvalidAmount,
                    });
                }
                None
            }
        };

        if !check_blank && !self.password.matches(&self.check_password) {
            fields.push(FieldError {
                field: InvestmentField::CheckPassword,
                reason: FieldErrorReason::PasswordMismatch,
            });
        }

        match amount {
            Some(invest_amount) if fields.is_empty() => Ok(InvestmentRecord {
                name: self.name.trim().to_string(),
                invest_amount,
                comment: self.comment.trim().to_string(),
                password: self.password,
            }),
            _ => Err(ValidationError { fields }),
        }
    }
}
