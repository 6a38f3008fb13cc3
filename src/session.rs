// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! State carried between workflow steps: the last estimate and the last
//! application. The caller owns the session and decides where, if anywhere,
//! it is kept between runs.

use crate::api::ClientError;
use crate::backend::LoanBackend;
use crate::models::{Applicant, EstimateRequest, LoanApplication, LoanEstimate};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());
static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9][0-9-]{6,18}$").unwrap());
static BANK_ACCOUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{7,10}$").unwrap());

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No estimate in this session; calculate one first")]
    NoEstimate,
    #[error("Application {field} does not match the quoted estimate")]
    TermsDiverge { field: &'static str },
    #[error("Invalid {field}: {reason}")]
    InvalidApplicant { field: &'static str, reason: String },
    #[error("Session file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Session file {path} is not valid: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Client(#[from] ClientError),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<LoanEstimate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<LoanApplication>,
}

impl Session {
    /// A missing file is an empty session.
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let display = path.display().to_string();
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(SessionError::Io {
                    path: display,
                    source,
                });
            }
        };
        serde_json::from_str(&raw).map_err(|source| SessionError::Json {
            path: display,
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), SessionError> {
        let display = path.display().to_string();
        let raw = serde_json::to_string_pretty(self).map_err(|source| SessionError::Json {
            path: display.clone(),
            source,
        })?;
        std::fs::write(path, raw).map_err(|source| SessionError::Io {
            path: display,
            source,
        })
    }

    pub fn estimate(&self) -> Result<&LoanEstimate, SessionError> {
        self.estimate.as_ref().ok_or(SessionError::NoEstimate)
    }

    /// A new estimate supersedes any application drafted from the old one.
    pub fn record_estimate(&mut self, estimate: LoanEstimate) {
        self.estimate = Some(estimate);
        self.application = None;
    }

    pub fn calculate(
        &mut self,
        backend: &mut dyn LoanBackend,
        request: &EstimateRequest,
    ) -> Result<&LoanEstimate, SessionError> {
        let estimate = backend.calculate_estimate(request)?;
        self.record_estimate(estimate);
        self.estimate()
    }

    pub fn draft_application(&self, applicant: Applicant) -> Result<LoanApplication, SessionError> {
        let estimate = self.estimate()?;
        validate_applicant(&applicant)?;
        Ok(LoanApplication::from_estimate(estimate, applicant))
    }

    /// The application's commercial terms must be exactly those quoted.
    pub fn check_terms(&self, app: &LoanApplication) -> Result<(), SessionError> {
        let est = self.estimate()?;
        let diverged = if app.product_id != est.product_id {
            Some("product")
        } else if app.loan_amount != est.loan_amount {
            Some("loan amount")
        } else if app.loan_term != est.loan_term {
            Some("loan term")
        } else if app.interest_rate != Some(est.interest_rate) {
            Some("interest rate")
        } else if app.monthly_payment != Some(est.monthly_payment) {
            Some("monthly payment")
        } else {
            None
        };
        match diverged {
            Some(field) => Err(SessionError::TermsDiverge { field }),
            None => Ok(()),
        }
    }

    /// Send an application drafted from the estimate. Only the draft is
    /// checked against the quote; whatever the service accepted is kept.
    pub fn submit(
        &mut self,
        backend: &mut dyn LoanBackend,
        applicant: Applicant,
    ) -> Result<&LoanApplication, SessionError> {
        let draft = self.draft_application(applicant)?;
        self.check_terms(&draft)?;
        let mut submitted = backend.submit_application(&draft)?;
        // The service may echo the application without its terms.
        submitted.interest_rate = submitted.interest_rate.or(draft.interest_rate);
        submitted.monthly_payment = submitted.monthly_payment.or(draft.monthly_payment);
        if let Err(e) = self.check_terms(&submitted) {
            tracing::warn!(
                application = submitted.application_id.as_deref().unwrap_or_default(),
                "accepted application differs from the quote: {e}"
            );
        }
        Ok(&*self.application.insert(submitted))
    }

    /// Keep `app` as the session's application if it carries the quoted terms.
    pub fn record_application(
        &mut self,
        app: LoanApplication,
    ) -> Result<&LoanApplication, SessionError> {
        self.check_terms(&app)?;
        Ok(&*self.application.insert(app))
    }
}

pub fn validate_applicant(a: &Applicant) -> Result<(), SessionError> {
    let invalid = |field: &'static str, reason: &str| SessionError::InvalidApplicant {
        field,
        reason: reason.to_string(),
    };
    let required = [
        ("customer name", &a.customer_name),
        ("property address", &a.property_address),
        ("bank name", &a.bank_name),
        ("branch name", &a.branch_name),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(invalid(field, "required"));
        }
    }
    if !EMAIL.is_match(a.customer_email.trim()) {
        return Err(invalid("email", "expected name@domain"));
    }
    if !PHONE.is_match(a.customer_phone.trim()) {
        return Err(invalid("phone", "digits and dashes only"));
    }
    if !BANK_ACCOUNT.is_match(a.bank_account_number.trim()) {
        return Err(invalid("bank account number", "7 to 10 digits"));
    }
    if a.property_value <= Decimal::ZERO {
        return Err(invalid("property value", "must be greater than zero"));
    }
    if a.annual_income <= Decimal::ZERO {
        return Err(invalid("annual income", "must be greater than zero"));
    }
    Ok(())
}
