// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{ApplicationStatus, LoanApplication};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

pub const REVIEWER: &str = "SYSTEM";
pub const INCOME_MULTIPLE_REASON: &str = "Loan amount exceeds 4x annual income";
pub const LOAN_TO_VALUE_REASON: &str = "Loan amount exceeds 80% of property value";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Approved,
    Rejected(&'static str),
}

/// Automatic screening: the loan may not exceed four times annual income nor
/// 80% of the property value. When both fail the loan-to-value reason wins.
pub fn screen(app: &LoanApplication) -> Decision {
    let mut decision = Decision::Approved;
    if app.loan_amount > app.annual_income * Decimal::from(4) {
        decision = Decision::Rejected(INCOME_MULTIPLE_REASON);
    }
    if app.loan_amount > app.property_value * Decimal::new(8, 1) {
        decision = Decision::Rejected(LOAN_TO_VALUE_REASON);
    }
    decision
}

/// Screen `app` and record the outcome on it.
pub fn apply(app: &mut LoanApplication, now: NaiveDateTime) -> Decision {
    let decision = screen(app);
    match decision {
        Decision::Approved => {
            app.application_status = Some(ApplicationStatus::Approved);
            app.approval_date = Some(now);
            app.approved_by = Some(REVIEWER.to_string());
            app.rejection_reason = None;
        }
        Decision::Rejected(reason) => {
            app.application_status = Some(ApplicationStatus::Rejected);
            app.rejection_reason = Some(reason.to_string());
        }
    }
    app.updated_at = Some(now);
    decision
}
