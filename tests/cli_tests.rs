// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use mortgage_quote::backend::LocalBackend;
use mortgage_quote::catalog::Catalog;
use mortgage_quote::cli::build_cli;
use mortgage_quote::commands::{self, Context};
use mortgage_quote::config::Config;
use mortgage_quote::models::{ApplicationStatus, LoanProduct, ProductType, RepaymentMethod};
use mortgage_quote::session::Session;
use rust_decimal::Decimal;
use std::path::Path;

fn catalog() -> Catalog {
    Catalog::from_products(vec![LoanProduct {
        product_id: "PROD001".into(),
        product_name: "Fixed-rate mortgage".into(),
        product_type: ProductType::Fixed,
        min_interest_rate: None,
        max_interest_rate: None,
        current_interest_rate: Decimal::new(15, 1),
        min_loan_amount: Decimal::from(1000),
        max_loan_amount: Decimal::from(5000),
        min_loan_term: 10,
        max_loan_term: 35,
        repayment_method: RepaymentMethod::EqualPayment,
        description: None,
        is_active: true,
        created_at: None,
        updated_at: None,
    }])
}

fn context(session: &Path) -> Context {
    let config = Config::default();
    let backend = LocalBackend::new(catalog(), config.estimator());
    Context::new(config, Box::new(backend), Some(session.to_path_buf()))
}

fn run(ctx: &mut Context, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["mortgage-quote"];
    argv.extend_from_slice(args);
    let m = build_cli().try_get_matches_from(argv)?;
    match m.subcommand() {
        Some(("products", sub)) => commands::products::handle(ctx, sub),
        Some(("estimate", sub)) => commands::estimates::handle(ctx, sub),
        Some(("apply", sub)) => commands::applications::handle(ctx, sub),
        Some(("status", sub)) => commands::status::handle(ctx, sub),
        Some(("export", sub)) => commands::exporter::handle(ctx, sub),
        _ => Ok(()),
    }
}

const APPLICANT: &[&str] = &[
    "apply",
    "--customer-id",
    "CUST001",
    "--customer-name",
    "Taro Tanaka",
    "--email",
    "tanaka@example.com",
    "--phone",
    "090-1234-5678",
    "--property-address",
    "1-1-1 Shibuya, Tokyo",
    "--property-type",
    "condo",
    "--property-value",
    "4000",
    "--employment-type",
    "self-employed",
    "--annual-income",
    "800",
    "--bank-account",
    "1234567",
    "--bank-name",
    "Test Bank",
    "--branch-name",
    "Shibuya",
];

#[test]
fn estimate_then_apply_through_session_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let mut ctx = context(&path);

    run(
        &mut ctx,
        &["estimate", "calc", "--product", "PROD001", "--amount", "3000", "--term", "30"],
    )
    .unwrap();
    let session = Session::load(&path).unwrap();
    assert_eq!(session.estimate().unwrap().monthly_payment, Decimal::new(1035, 2));
    assert!(session.application.is_none());

    run(&mut ctx, APPLICANT).unwrap();
    let session = Session::load(&path).unwrap();
    let app = session.application.as_ref().unwrap();
    assert_eq!(app.application_status, Some(ApplicationStatus::Approved));
    assert_eq!(app.monthly_payment, Some(Decimal::new(1035, 2)));

    let id = app.application_id.clone().unwrap();
    run(&mut ctx, &["status", "application", &id]).unwrap();
    run(&mut ctx, &["status", "customer", "CUST001", "--json"]).unwrap();
    assert!(run(&mut ctx, &["status", "application", "APP-missing"]).is_err());
}

#[test]
fn apply_without_estimate_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = context(&dir.path().join("session.json"));
    let err = run(&mut ctx, APPLICANT).unwrap_err();
    assert!(err.to_string().contains("No estimate"), "{}", err);
}

#[test]
fn out_of_range_estimate_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = context(&dir.path().join("session.json"));
    assert!(
        run(
            &mut ctx,
            &["estimate", "calc", "--product", "PROD001", "--amount", "9000", "--term", "30"],
        )
        .is_err()
    );
    assert!(
        run(
            &mut ctx,
            &["estimate", "calc", "--product", "PROD001", "--amount", "3000", "--term", "-5"],
        )
        .is_err()
    );
}

#[test]
fn export_schedule_writes_every_period() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let out = dir.path().join("schedule.csv");
    let mut ctx = context(&path);

    run(
        &mut ctx,
        &["estimate", "calc", "--product", "PROD001", "--amount", "3000", "--term", "30"],
    )
    .unwrap();
    run(
        &mut ctx,
        &["export", "schedule", "--out", out.to_str().unwrap()],
    )
    .unwrap();

    let mut rdr = csv::Reader::from_path(&out).unwrap();
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 360);
    assert_eq!(&rows[0][0], "1");
    assert_eq!(&rows[0][1], "10.35");
    assert!(rows[359][4].parse::<Decimal>().unwrap().is_zero());

    let bad = dir.path().join("schedule.xml");
    assert!(
        run(
            &mut ctx,
            &["export", "schedule", "--format", "xml", "--out", bad.to_str().unwrap()],
        )
        .is_err()
    );
}

#[test]
fn adhoc_schedule_needs_rate_and_term() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = context(&dir.path().join("session.json"));
    assert!(run(&mut ctx, &["estimate", "schedule", "--amount", "3000"]).is_err());
    run(
        &mut ctx,
        &[
            "estimate",
            "schedule",
            "--amount",
            "3000",
            "--rate",
            "1.5",
            "--term",
            "30",
            "--method",
            "equal-principal",
            "--json",
        ],
    )
    .unwrap();
}

#[test]
fn doctor_reports_catalog_and_session_issues() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let ctx = context(&path);
    let healthy = catalog();
    assert!(commands::doctor::check(&ctx, Some(&healthy)).is_empty());

    let mut broken = healthy.products().to_vec();
    broken.push(broken[0].clone());
    std::fs::write(&path, "{ not json").unwrap();
    let issues: Vec<String> = commands::doctor::check(&ctx, Some(&Catalog::from_products(broken)))
        .into_iter()
        .map(|row| row[0].clone())
        .collect();
    assert_eq!(issues, vec!["duplicate_product_id", "session_unreadable"]);
}

#[test]
fn oversized_adhoc_schedule_is_a_user_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = context(&dir.path().join("session.json"));
    let err = run(
        &mut ctx,
        &["estimate", "schedule", "--amount", "1", "--rate", "0", "--term", "150000000"],
    )
    .unwrap_err();
    assert!(err.to_string().contains("Loan term"), "{}", err);
}

#[test]
fn json_export_matches_schedule_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let out = dir.path().join("schedule.json");
    let mut ctx = context(&path);

    run(
        &mut ctx,
        &["estimate", "calc", "--product", "PROD001", "--amount", "3000", "--term", "30"],
    )
    .unwrap();
    run(
        &mut ctx,
        &["export", "schedule", "--format", "json", "--out", out.to_str().unwrap()],
    )
    .unwrap();

    let rows: Vec<serde_json::Value> =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(rows.len(), 360);
    assert_eq!(rows[0]["period"], 1);
    for key in ["payment", "principal", "interest", "balance"] {
        assert!(rows[0][key].is_number(), "{} is {}", key, rows[0][key]);
    }
}
