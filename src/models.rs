// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Wire types shared with the loan service. Field names follow the service's
//! camelCase JSON; amounts are man-yen decimals.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    Fixed,
    Variable,
    Mixed,
}

impl ProductType {
    pub fn label(&self) -> &'static str {
        match self {
            ProductType::Fixed => "Fixed rate",
            ProductType::Variable => "Variable rate",
            ProductType::Mixed => "Mixed",
        }
    }
}

impl FromStr for ProductType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FIXED" => Ok(ProductType::Fixed),
            "VARIABLE" => Ok(ProductType::Variable),
            "MIXED" => Ok(ProductType::Mixed),
            other => Err(format!(
                "Unknown product type '{}' (use fixed|variable|mixed)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepaymentMethod {
    EqualPayment,
    EqualPrincipal,
}

impl RepaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            RepaymentMethod::EqualPayment => "Equal payment",
            RepaymentMethod::EqualPrincipal => "Equal principal",
        }
    }
}

impl FromStr for RepaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "equal-payment" => Ok(RepaymentMethod::EqualPayment),
            "equal-principal" => Ok(RepaymentMethod::EqualPrincipal),
            other => Err(format!(
                "Unknown repayment method '{}' (use equal-payment|equal-principal)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    Processing,
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Approved => "APPROVED",
            ApplicationStatus::Rejected => "REJECTED",
            ApplicationStatus::Processing => "PROCESSING",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyType {
    Detached,
    Apartment,
    Condo,
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DETACHED" => Ok(PropertyType::Detached),
            "APARTMENT" => Ok(PropertyType::Apartment),
            "CONDO" => Ok(PropertyType::Condo),
            other => Err(format!(
                "Unknown property type '{}' (use detached|apartment|condo)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentType {
    Salaried,
    SelfEmployed,
    BusinessOwner,
}

impl FromStr for EmploymentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "SALARIED" => Ok(EmploymentType::Salaried),
            "SELF_EMPLOYED" => Ok(EmploymentType::SelfEmployed),
            "BUSINESS_OWNER" => Ok(EmploymentType::BusinessOwner),
            other => Err(format!(
                "Unknown employment type '{}' (use salaried|self-employed|business-owner)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanProduct {
    pub product_id: String,
    pub product_name: String,
    pub product_type: ProductType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_interest_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_interest_rate: Option<Decimal>,
    pub current_interest_rate: Decimal, // percent per annum
    pub min_loan_amount: Decimal,
    pub max_loan_amount: Decimal,
    pub min_loan_term: i32,
    pub max_loan_term: i32,
    pub repayment_method: RepaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    pub product_id: String,
    pub loan_amount: Decimal,
    pub loan_term: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanEstimate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate_id: Option<String>,
    pub product_id: String,
    pub product_name: String,
    pub loan_amount: Decimal,
    pub loan_term: i32,
    pub interest_rate: Decimal,
    pub monthly_payment: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_payment: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_interest: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repayment_method: Option<RepaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
}

/// Customer, property and bank details entered on the application form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub property_address: String,
    pub property_type: PropertyType,
    pub property_value: Decimal,
    pub employment_type: EmploymentType,
    pub annual_income: Decimal,
    pub bank_account_number: String,
    pub bank_name: String,
    pub branch_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub product_id: String,
    pub product_name: String,
    pub loan_amount: Decimal,
    pub loan_term: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_payment: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_status: Option<ApplicationStatus>,
    pub property_address: String,
    pub property_type: PropertyType,
    pub property_value: Decimal,
    pub employment_type: EmploymentType,
    pub annual_income: Decimal,
    pub bank_account_number: String,
    pub bank_name: String,
    pub branch_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_date: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_date: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl LoanApplication {
    /// Builds a pending application whose commercial terms are copied from
    /// `estimate`. The terms are never taken from anywhere else.
    pub fn from_estimate(estimate: &LoanEstimate, applicant: Applicant) -> Self {
        Self {
            application_id: None,
            customer_id: applicant.customer_id.or_else(|| estimate.customer_id.clone()),
            customer_name: applicant.customer_name,
            customer_email: applicant.customer_email,
            customer_phone: applicant.customer_phone,
            product_id: estimate.product_id.clone(),
            product_name: estimate.product_name.clone(),
            loan_amount: estimate.loan_amount,
            loan_term: estimate.loan_term,
            interest_rate: Some(estimate.interest_rate),
            monthly_payment: Some(estimate.monthly_payment),
            application_status: Some(ApplicationStatus::Pending),
            property_address: applicant.property_address,
            property_type: applicant.property_type,
            property_value: applicant.property_value,
            employment_type: applicant.employment_type,
            annual_income: applicant.annual_income,
            bank_account_number: applicant.bank_account_number,
            bank_name: applicant.bank_name,
            branch_name: applicant.branch_name,
            application_date: None,
            approval_date: None,
            approved_by: None,
            rejection_reason: None,
            created_at: None,
            updated_at: None,
        }
    }
}
