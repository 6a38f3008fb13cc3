// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::estimator::{EstimateError, Estimator};
use crate::models::{LoanEstimate, RepaymentMethod};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    pub period: i32,
    pub payment: Decimal,
    pub principal: Decimal,
    pub interest: Decimal,
    pub balance: Decimal,
}

/// Month-by-month repayment table. The last period settles whatever balance
/// rounding left behind, so the closing balance is always zero.
pub fn build(
    estimator: &Estimator,
    principal: Decimal,
    annual_rate: Decimal,
    years: i32,
    method: RepaymentMethod,
) -> Result<Vec<ScheduleRow>, EstimateError> {
    let quote = estimator.quote(principal, annual_rate, years)?;
    let n = quote.payments;
    let monthly_rate = annual_rate / Decimal::from(1200);
    let level_principal = estimator.round(principal / Decimal::from(n));

    let mut rows = Vec::with_capacity(n as usize);
    let mut balance = principal;
    for period in 1..=n {
        let interest = estimator.round(balance * monthly_rate);
        let scheduled = match method {
            RepaymentMethod::EqualPayment => quote.monthly_payment - interest,
            RepaymentMethod::EqualPrincipal => level_principal,
        };
        let principal_part = if period == n {
            balance
        } else {
            scheduled.min(balance)
        };
        balance -= principal_part;
        rows.push(ScheduleRow {
            period,
            payment: principal_part + interest,
            principal: principal_part,
            interest,
            balance,
        });
    }
    Ok(rows)
}

pub fn for_estimate(
    estimator: &Estimator,
    estimate: &LoanEstimate,
    method: RepaymentMethod,
) -> Result<Vec<ScheduleRow>, EstimateError> {
    build(
        estimator,
        estimate.loan_amount,
        estimate.interest_rate,
        estimate.loan_term,
        method,
    )
}

pub fn total_interest(rows: &[ScheduleRow]) -> Decimal {
    rows.iter().map(|r| r.interest).sum()
}
