// ============================================================================
// PR FORM DRAFT - Raw form fields + validation into NewPurchaseRequest
// ============================================================================

use chrono::NaiveDate;
use crate::error::AppError;
use crate::models::purchase_request::{Department, Location, NewPurchaseRequest};

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields!";
pub const INVALID_AMOUNT_MESSAGE: &str = "Estimated amount must be a non-negative number.";
pub const UNKNOWN_CHOICE_MESSAGE: &str = "Please select a location and department from the list.";

/// Editable PR form state, values exactly as typed
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrFormDraft {
    pub uprn: String,
    pub location: String,
    pub department: String,
    pub estimated_amount: String,
    /// Seeded from the session, read-only in the UI
    pub requester: String,
    /// Empty means "submission date"
    pub date: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrField {
    Uprn,
    Location,
    Department,
    EstimatedAmount,
    Date,
}

impl PrFormDraft {
    pub fn with_requester(requester: &str) -> Self {
        Self {
            requester: requester.to_string(),
            ..Self::default()
        }
    }

    pub fn set(&mut self, field: PrField, value: String) {
        match field {
            PrField::Uprn => self.uprn = value,
            PrField::Location => self.location = value,
            PrField::Department => self.department = value,
            PrField::EstimatedAmount => self.estimated_amount = value,
            PrField::Date => self.date = value,
        }
    }

    /// Clear everything except the requester, which is re-seeded
    pub fn reset(&mut self, requester: &str) {
        *self = Self::with_requester(requester);
    }

    /// Check the draft and build the payload.
    ///
    /// Produces a single combined message on failure; the first failing
    /// rule wins (missing fields, then unknown choices, then amount).
    /// `code_for` is only called once the draft is valid.
    pub fn validate<F>(&self, today: NaiveDate, code_for: F) -> Result<NewPurchaseRequest, AppError>
    where
        F: FnOnce(Location, Department) -> String,
    {
        let uprn = self.uprn.trim();
        let amount_raw = self.estimated_amount.trim();

        if uprn.is_empty()
            || self.location.trim().is_empty()
            || self.department.trim().is_empty()
            || amount_raw.is_empty()
        {
            return Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
        }

        let (location, department) = match (
            Location::from_key(&self.location),
            Department::from_key(&self.department),
        ) {
            (Some(l), Some(d)) => (l, d),
            _ => return Err(AppError::Validation(UNKNOWN_CHOICE_MESSAGE.to_string())),
        };

        let estimated_amount = amount_raw
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite() && *a >= 0.0)
            .ok_or_else(|| AppError::Validation(INVALID_AMOUNT_MESSAGE.to_string()))?;

        let date = match self.date.trim() {
            "" => today,
            raw => NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap_or(today),
        };

        Ok(NewPurchaseRequest {
            uprn: uprn.to_string(),
            location,
            department,
            estimated_amount,
            requester: self.requester.trim().to_string(),
            date,
            code: code_for(location, department),
        })
    }
}
