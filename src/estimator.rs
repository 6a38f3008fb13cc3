// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Equal-payment (annuity) loan estimates.
//!
//! The monthly payment is computed at full `Decimal` precision and rounded
//! once, half away from zero, to the configured payment scale. Totals are
//! derived from the rounded payment so rounding error lands in the total
//! interest.

use crate::models::{EstimateRequest, LoanEstimate, LoanProduct};
use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use thiserror::Error;

/// Decimal places of a man-yen payment, matching the loan service.
pub const DEFAULT_PAYMENT_SCALE: u32 = 2;

const MONTHS_PER_YEAR: i32 = 12;

/// Longest term any quote or schedule is built for.
pub const MAX_LOAN_TERM_YEARS: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundField {
    LoanAmount,
    LoanTerm,
}

impl fmt::Display for BoundField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundField::LoanAmount => f.write_str("loan amount"),
            BoundField::LoanTerm => f.write_str("loan term"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimateError {
    #[error("Loan amount must be greater than zero (got {0})")]
    InvalidAmount(Decimal),
    #[error("Loan term must be between 1 and 100 years (got {0})")]
    InvalidTerm(i32),
    #[error("Interest rate cannot be negative (got {0}%)")]
    InvalidRate(Decimal),
    #[error("The {field} {value} is outside this product's range of {min} to {max}")]
    OutOfProductRange {
        field: BoundField,
        value: Decimal,
        min: Decimal,
        max: Decimal,
    },
    #[error("Product '{0}' is not currently offered")]
    InactiveProduct(String),
    #[error("Payment calculation overflowed ({rate}% over {payments} payments)")]
    ArithmeticOverflow { rate: Decimal, payments: i32 },
}

/// Figures for one loan, all in the loan's currency scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub interest_rate: Decimal,
    pub payments: i32,
    pub monthly_payment: Decimal,
    pub total_payment: Decimal,
    pub total_interest: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Estimator {
    scale: u32,
}

impl Default for Estimator {
    fn default() -> Self {
        Self {
            scale: DEFAULT_PAYMENT_SCALE,
        }
    }
}

impl Estimator {
    pub fn with_scale(scale: u32) -> Self {
        Self { scale }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn round(&self, d: Decimal) -> Decimal {
        d.round_dp_with_strategy(self.scale, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Smallest payment representable at this scale.
    pub fn minor_unit(&self) -> Decimal {
        Decimal::new(1, self.scale.min(28))
    }

    /// Quote a loan with no product limits applied.
    pub fn quote(
        &self,
        principal: Decimal,
        annual_rate: Decimal,
        years: i32,
    ) -> Result<Quote, EstimateError> {
        check_inputs(principal, annual_rate, years)?;
        self.compute(principal, annual_rate, years)
    }

    /// Quote a loan at the product's current rate, enforcing its amount and
    /// term ranges.
    pub fn quote_for_product(
        &self,
        product: &LoanProduct,
        principal: Decimal,
        years: i32,
    ) -> Result<Quote, EstimateError> {
        let rate = product.current_interest_rate;
        check_inputs(principal, rate, years)?;
        if !product.is_active {
            return Err(EstimateError::InactiveProduct(product.product_id.clone()));
        }
        check_range(
            BoundField::LoanAmount,
            principal,
            product.min_loan_amount,
            product.max_loan_amount,
        )?;
        check_range(
            BoundField::LoanTerm,
            Decimal::from(years),
            Decimal::from(product.min_loan_term),
            Decimal::from(product.max_loan_term),
        )?;
        self.compute(principal, rate, years)
    }

    /// Build the estimate record for `request`. The caller supplies the
    /// timestamp; the id is left for the issuing service to assign.
    pub fn estimate(
        &self,
        product: &LoanProduct,
        request: &EstimateRequest,
        estimated_at: NaiveDateTime,
    ) -> Result<LoanEstimate, EstimateError> {
        let q = self.quote_for_product(product, request.loan_amount, request.loan_term)?;
        tracing::debug!(
            product = %product.product_id,
            amount = %request.loan_amount,
            term = request.loan_term,
            monthly = %q.monthly_payment,
            "estimate computed"
        );
        Ok(LoanEstimate {
            estimate_id: None,
            product_id: product.product_id.clone(),
            product_name: product.product_name.clone(),
            loan_amount: request.loan_amount,
            loan_term: request.loan_term,
            interest_rate: q.interest_rate,
            monthly_payment: q.monthly_payment,
            total_payment: Some(q.total_payment),
            total_interest: Some(q.total_interest),
            repayment_method: Some(product.repayment_method),
            estimated_at: Some(estimated_at),
            customer_id: None,
        })
    }

    fn compute(
        &self,
        principal: Decimal,
        annual_rate: Decimal,
        years: i32,
    ) -> Result<Quote, EstimateError> {
        let payments = years
            .checked_mul(MONTHS_PER_YEAR)
            .ok_or(EstimateError::InvalidTerm(years))?;
        let overflow = EstimateError::ArithmeticOverflow {
            rate: annual_rate,
            payments,
        };
        let n = Decimal::from(payments);
        let monthly_rate = annual_rate / Decimal::from(100 * MONTHS_PER_YEAR);

        let exact = if monthly_rate.is_zero() {
            principal / n
        } else {
            let growth = powu(Decimal::ONE + monthly_rate, payments as u32)
                .ok_or_else(|| overflow.clone())?;
            principal
                .checked_mul(monthly_rate)
                .and_then(|x| x.checked_mul(growth))
                .and_then(|x| x.checked_div(growth - Decimal::ONE))
                .ok_or_else(|| overflow.clone())?
        };

        // A positive loan never rounds down to a zero installment.
        let monthly_payment = self.round(exact).max(self.minor_unit());
        let total_payment = monthly_payment.checked_mul(n).ok_or(overflow)?;
        Ok(Quote {
            interest_rate: annual_rate,
            payments,
            monthly_payment,
            total_payment,
            total_interest: total_payment - principal,
        })
    }
}

fn check_inputs(principal: Decimal, annual_rate: Decimal, years: i32) -> Result<(), EstimateError> {
    if principal <= Decimal::ZERO {
        return Err(EstimateError::InvalidAmount(principal));
    }
    if years <= 0 || years > MAX_LOAN_TERM_YEARS {
        return Err(EstimateError::InvalidTerm(years));
    }
    if annual_rate.is_sign_negative() && !annual_rate.is_zero() {
        return Err(EstimateError::InvalidRate(annual_rate));
    }
    Ok(())
}

fn check_range(
    field: BoundField,
    value: Decimal,
    min: Decimal,
    max: Decimal,
) -> Result<(), EstimateError> {
    if value < min || value > max {
        return Err(EstimateError::OutOfProductRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

// Exponentiation by squaring; None on overflow.
fn powu(base: Decimal, mut exp: u32) -> Option<Decimal> {
    let mut result = Decimal::ONE;
    let mut b = base;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result.checked_mul(b)?;
        }
        exp >>= 1;
        if exp > 0 {
            b = b.checked_mul(b)?;
        }
    }
    Some(result)
}
