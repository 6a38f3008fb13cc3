// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use mortgage_quote::models::{
    Applicant, ApplicationStatus, EmploymentType, LoanApplication, LoanEstimate, PropertyType,
};
use mortgage_quote::review::{self, Decision, INCOME_MULTIPLE_REASON, LOAN_TO_VALUE_REASON};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn application(amount: &str, income: &str, property_value: &str) -> LoanApplication {
    let estimate = LoanEstimate {
        estimate_id: Some("EST001".into()),
        product_id: "PROD001".into(),
        product_name: "Fixed-rate mortgage".into(),
        loan_amount: dec(amount),
        loan_term: 30,
        interest_rate: dec("1.5"),
        monthly_payment: dec("10.35"),
        total_payment: None,
        total_interest: None,
        repayment_method: None,
        estimated_at: None,
        customer_id: None,
    };
    let applicant = Applicant {
        customer_id: Some("CUST001".into()),
        customer_name: "Taro Tanaka".into(),
        customer_email: "tanaka@example.com".into(),
        customer_phone: "090-1234-5678".into(),
        property_address: "1-1-1 Shibuya, Tokyo".into(),
        property_type: PropertyType::Detached,
        property_value: dec(property_value),
        employment_type: EmploymentType::Salaried,
        annual_income: dec(income),
        bank_account_number: "1234567890".into(),
        bank_name: "Test Bank".into(),
        branch_name: "Shibuya".into(),
    };
    LoanApplication::from_estimate(&estimate, applicant)
}

#[test]
fn within_limits_is_approved() {
    let mut app = application("2400", "600", "4000");
    let now = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
    assert_eq!(review::apply(&mut app, now), Decision::Approved);
    assert_eq!(app.application_status, Some(ApplicationStatus::Approved));
    assert_eq!(app.approval_date, Some(now));
    assert_eq!(app.approved_by.as_deref(), Some("SYSTEM"));
    assert_eq!(app.rejection_reason, None);
}

#[test]
fn limits_are_inclusive() {
    // exactly 4x income and exactly 80% of value
    assert_eq!(review::screen(&application("2400", "600", "3000")), Decision::Approved);
}

#[test]
fn income_multiple_rejects() {
    let mut app = application("3000", "600", "4000");
    let now = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
    assert_eq!(
        review::apply(&mut app, now),
        Decision::Rejected(INCOME_MULTIPLE_REASON)
    );
    assert_eq!(app.application_status, Some(ApplicationStatus::Rejected));
    assert_eq!(app.rejection_reason.as_deref(), Some(INCOME_MULTIPLE_REASON));
    assert_eq!(app.approval_date, None);
}

#[test]
fn loan_to_value_rejects_and_wins_when_both_fail() {
    assert_eq!(
        review::screen(&application("3500", "1000", "4000")),
        Decision::Rejected(LOAN_TO_VALUE_REASON)
    );
    assert_eq!(
        review::screen(&application("3500", "600", "4000")),
        Decision::Rejected(LOAN_TO_VALUE_REASON)
    );
}
