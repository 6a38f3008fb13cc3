// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use mortgage_quote::catalog::Catalog;
use mortgage_quote::models::{ProductType, RepaymentMethod};
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::Builder;

const CSV: &str = "\
product_id,product_name,product_type,current_interest_rate,min_loan_amount,max_loan_amount,min_loan_term,max_loan_term,repayment_method,is_active,description
PROD001,Fixed-rate mortgage,fixed,1.5,1000,5000,10,35,equal_payment,true,35-year fixed
PROD002, Variable-rate mortgage ,VARIABLE,0.475,500,8000,5,35,EQUAL_PRINCIPAL,yes
PROD003,Retired product,mixed,1.0,1000,3000,10,20,equal-payment,false,
";

#[test]
fn loads_csv_catalog() {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    write!(file, "{}", CSV).unwrap();
    file.flush().unwrap();

    let catalog = Catalog::load(file.path()).unwrap();
    assert_eq!(catalog.products().len(), 3);

    let fixed = catalog.get("PROD001").unwrap();
    assert_eq!(fixed.product_type, ProductType::Fixed);
    assert_eq!(fixed.current_interest_rate, Decimal::new(15, 1));
    assert_eq!(fixed.max_loan_term, 35);
    assert_eq!(fixed.description.as_deref(), Some("35-year fixed"));

    let variable = catalog.get("PROD002").unwrap();
    assert_eq!(variable.product_name, "Variable-rate mortgage");
    assert_eq!(variable.repayment_method, RepaymentMethod::EqualPrincipal);
    assert!(variable.is_active);
    assert_eq!(variable.description, None);

    assert!(!catalog.get("PROD003").unwrap().is_active);
    assert!(catalog.get("NOPE").is_none());
    assert!(catalog.problems().is_empty());
}

#[test]
fn loads_json_catalog() {
    let mut file = Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"[{{"productId":"P1","productName":"Mixed","productType":"MIXED","currentInterestRate":0.9,
            "minInterestRate":0.5,"maxInterestRate":2.0,"minLoanAmount":100,"maxLoanAmount":900,
            "minLoanTerm":1,"maxLoanTerm":20,"repaymentMethod":"EQUAL_PAYMENT","isActive":true}}]"#
    )
    .unwrap();
    file.flush().unwrap();

    let catalog = Catalog::load(file.path()).unwrap();
    let p = catalog.get("P1").unwrap();
    assert_eq!(p.product_type, ProductType::Mixed);
    assert_eq!(p.max_interest_rate, Some(Decimal::from(2)));
}

#[test]
fn bad_rows_name_the_line() {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    write!(
        file,
        "product_id,product_name,product_type,current_interest_rate,min_loan_amount,max_loan_amount,min_loan_term,max_loan_term,repayment_method,is_active\n\
         P1,One,fixed,1.5,1000,5000,10,35,equal_payment,true\n\
         P2,Two,balloon,1.5,1000,5000,10,35,equal_payment,true\n"
    )
    .unwrap();
    file.flush().unwrap();

    let err = Catalog::load(file.path()).unwrap_err();
    let msg = format!("{:#}", err).to_lowercase();
    assert!(msg.contains("balloon"), "{}", msg);
    assert!(msg.contains("line 3"), "{}", msg);
}

#[test]
fn unknown_extension_is_refused() {
    let file = Builder::new().suffix(".xlsx").tempfile().unwrap();
    assert!(Catalog::load(file.path()).is_err());
}

#[test]
fn problems_flag_inconsistent_products() {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    write!(
        file,
        "product_id,product_name,product_type,current_interest_rate,min_loan_amount,max_loan_amount,min_loan_term,max_loan_term,repayment_method,is_active\n\
         P1,Upside down,fixed,1.5,5000,1000,10,35,equal_payment,true\n\
         P1,Duplicate,fixed,1.5,1000,5000,35,10,equal_payment,true\n\
         P3,Negative,fixed,-0.5,1000,5000,10,35,equal_payment,true\n"
    )
    .unwrap();
    file.flush().unwrap();

    let catalog = Catalog::load(file.path()).unwrap();
    let issues: Vec<String> = catalog.problems().into_iter().map(|(i, _)| i).collect();
    assert_eq!(
        issues,
        vec![
            "bad_amount_range",
            "duplicate_product_id",
            "bad_term_range",
            "negative_rate"
        ]
    );
}
