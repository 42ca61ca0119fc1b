//! Input validation for ganging runs.
//!
//! Checks structural integrity of job and slot batches before a run.
//! Detects:
//! - Duplicate IDs
//! - Zero-quantity jobs
//! - Single-colour jobs missing a color tag
//!
//! Infeasible layouts and empty pools are *not* validation failures —
//! those are normal engine outcomes.

use std::collections::HashSet;

use crate::models::{Job, OutputSlot, ProductType};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A job has quantity 0.
    ZeroQuantity,
    /// A single-colour job has no color tag.
    MissingColor,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input batch for a ganging run.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(jobs: &[Job], slots: &[OutputSlot]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut job_ids = HashSet::new();
    for job in jobs {
        if !job_ids.insert(job.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate job ID: {}", job.id),
            ));
        }

        if job.quantity == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroQuantity,
                format!("Job '{}' has quantity 0", job.id),
            ));
        }

        if job.product_type == ProductType::SingleColour && job.color.is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingColor,
                format!("Single-colour job '{}' has no color tag", job.id),
            ));
        }
    }

    let mut slot_ids = HashSet::new();
    for slot in slots {
        if !slot_ids.insert(slot.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate slot ID: {}", slot.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ColorVariant, TransferSize};

    fn valid_job(id: &str) -> Job {
        Job::new(id, ProductType::FullColour, TransferSize::A6).with_quantity(5)
    }

    #[test]
    fn test_valid_input() {
        let jobs = vec![valid_job("J1"), valid_job("J2")];
        let slots = vec![OutputSlot::new("LAY-A1"), OutputSlot::new("LAY-B1")];
        assert!(validate_input(&jobs, &slots).is_ok());
    }

    #[test]
    fn test_duplicate_job_ids() {
        let jobs = vec![valid_job("J1"), valid_job("J1")];
        let errors = validate_input(&jobs, &[]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId);
    }

    #[test]
    fn test_duplicate_slot_ids() {
        let slots = vec![OutputSlot::new("LAY-A1"), OutputSlot::new("LAY-A1")];
        let errors = validate_input(&[], &slots).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId);
    }

    #[test]
    fn test_zero_quantity() {
        let jobs = vec![valid_job("J1").with_quantity(0)];
        let errors = validate_input(&jobs, &[]).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::ZeroQuantity);
    }

    #[test]
    fn test_missing_color() {
        let mut job = valid_job("J1");
        job.product_type = ProductType::SingleColour;
        let errors = validate_input(&[job], &[]).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::MissingColor);

        let colored = Job::new("J2", ProductType::SingleColour, TransferSize::A6)
            .with_color(ColorVariant::Blue);
        assert!(validate_input(&[colored], &[]).is_ok());
    }

    #[test]
    fn test_multiple_errors_accumulate() {
        let jobs = vec![valid_job("J1").with_quantity(0), valid_job("J1")];
        let errors = validate_input(&jobs, &[]).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
