// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use mortgage_quote::api::{ApiResponse, ClientError};
use mortgage_quote::models::{LoanEstimate, LoanProduct, ProductType, RepaymentMethod};
use rust_decimal::Decimal;

#[test]
fn success_envelope_carries_data() {
    let raw = r#"{
        "success": true,
        "data": {
            "estimateId": "EST001",
            "productId": "PROD001",
            "productName": "Fixed-rate mortgage",
            "loanAmount": 3000,
            "loanTerm": 30,
            "interestRate": 1.5,
            "monthlyPayment": 10.35,
            "totalPayment": 3726.0,
            "totalInterest": 726.0,
            "repaymentMethod": "EQUAL_PAYMENT",
            "estimatedAt": "2025-04-01T09:00:00"
        }
    }"#;
    let env: ApiResponse<LoanEstimate> = serde_json::from_str(raw).unwrap();
    assert!(env.is_success());
    let est = env.into_required("failed").unwrap();
    assert_eq!(est.estimate_id.as_deref(), Some("EST001"));
    assert_eq!(est.monthly_payment, Decimal::new(1035, 2));
    assert_eq!(est.total_interest, Some(Decimal::from(726)));
    assert_eq!(est.repayment_method, Some(RepaymentMethod::EqualPayment));
    assert!(est.estimated_at.is_some());
    assert_eq!(est.customer_id, None);
}

#[test]
fn rejection_surfaces_message_verbatim() {
    let raw = r#"{"success": false, "message": "Loan amount is below the product minimum", "errors": ["loanAmount"]}"#;
    let env: ApiResponse<LoanEstimate> = serde_json::from_str(raw).unwrap();
    assert!(!env.is_success());
    match env.into_required("Estimate calculation failed") {
        Err(ClientError::BusinessRejection { message, errors }) => {
            assert_eq!(message, "Loan amount is below the product minimum");
            assert_eq!(errors, vec!["loanAmount".to_string()]);
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[test]
fn rejection_without_message_uses_fallback() {
    let env: ApiResponse<LoanEstimate> =
        serde_json::from_str(r#"{"success": false, "message": ""}"#).unwrap();
    let err = env.into_required("Estimate calculation failed").unwrap_err();
    assert_eq!(err.to_string(), "Estimate calculation failed");
}

#[test]
fn rejection_ignores_stray_data() {
    let env: ApiResponse<Vec<String>> =
        serde_json::from_str(r#"{"success": false, "data": ["x"], "message": "no"}"#).unwrap();
    assert_eq!(
        env,
        ApiResponse::Rejected {
            message: Some("no".into()),
            errors: vec![]
        }
    );
}

#[test]
fn success_without_data_is_empty() {
    let env: ApiResponse<Vec<LoanProduct>> =
        serde_json::from_str(r#"{"success": true, "data": null}"#).unwrap();
    assert_eq!(env, ApiResponse::Empty);
    assert_eq!(env.clone().into_data("x").unwrap(), None);
    assert!(matches!(
        env.into_required("x"),
        Err(ClientError::MalformedResponse(_))
    ));
}

#[test]
fn product_list_decodes_wire_names() {
    let raw = r#"{"success": true, "data": [{
        "productId": "PROD001",
        "productName": "Fixed-rate mortgage",
        "productType": "FIXED",
        "currentInterestRate": 1.5,
        "minLoanAmount": 1000,
        "maxLoanAmount": 5000,
        "minLoanTerm": 10,
        "maxLoanTerm": 35,
        "repaymentMethod": "EQUAL_PAYMENT",
        "isActive": true
    }]}"#;
    let env: ApiResponse<Vec<LoanProduct>> = serde_json::from_str(raw).unwrap();
    let products = env.into_data("x").unwrap().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].product_type, ProductType::Fixed);
    assert_eq!(products[0].max_loan_term, 35);
    assert_eq!(products[0].min_interest_rate, None);
}

#[test]
fn envelope_serializes_to_wire_shape() {
    let ok = serde_json::to_value(ApiResponse::Ok(vec![1, 2])).unwrap();
    assert_eq!(ok, serde_json::json!({"success": true, "data": [1, 2]}));

    let rejected = serde_json::to_value(ApiResponse::<Vec<i32>>::rejected("Product not found")).unwrap();
    assert_eq!(
        rejected,
        serde_json::json!({"success": false, "message": "Product not found"})
    );
}

#[test]
fn transport_failure_message_is_generic() {
    let err = ClientError::rejection("Application already submitted");
    assert_eq!(err.to_string(), "Application already submitted");
    assert!(
        mortgage_quote::api::TRANSPORT_FAILURE_MESSAGE.contains("try again later or contact support")
    );
}
