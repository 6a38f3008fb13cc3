// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Context;
use crate::models::{Applicant, ApplicationStatus, LoanApplication};
use crate::utils::{fmt_man_yen, fmt_rate, parse_decimal, pretty_table};
use anyhow::{Result, anyhow};

pub fn handle(ctx: &mut Context, m: &clap::ArgMatches) -> Result<()> {
    let applicant = applicant_from_args(m)?;
    let mut session = ctx.load_session()?;
    let submitted = session.submit(ctx.backend.as_mut(), applicant)?.clone();
    ctx.save_session(&session)?;

    if m.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&submitted)?);
        return Ok(());
    }
    print_outcome(&submitted, ctx.config.payment_scale);
    Ok(())
}

fn text(m: &clap::ArgMatches, id: &str) -> String {
    m.get_one::<String>(id)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

pub fn applicant_from_args(m: &clap::ArgMatches) -> Result<Applicant> {
    Ok(Applicant {
        customer_id: m
            .get_one::<String>("customer-id")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        customer_name: text(m, "customer-name"),
        customer_email: text(m, "email"),
        customer_phone: text(m, "phone"),
        property_address: text(m, "property-address"),
        property_type: text(m, "property-type").parse().map_err(|e: String| anyhow!(e))?,
        property_value: parse_decimal(&text(m, "property-value"))?,
        employment_type: text(m, "employment-type")
            .parse()
            .map_err(|e: String| anyhow!(e))?,
        annual_income: parse_decimal(&text(m, "annual-income"))?,
        bank_account_number: text(m, "bank-account"),
        bank_name: text(m, "bank-name"),
        branch_name: text(m, "branch-name"),
    })
}

pub fn print_outcome(app: &LoanApplication, scale: u32) {
    let id = app.application_id.as_deref().unwrap_or("-");
    match app.application_status {
        Some(ApplicationStatus::Approved) => println!("Application {} approved.", id),
        Some(ApplicationStatus::Rejected) => println!(
            "Application {} was not approved: {}",
            id,
            app.rejection_reason.as_deref().unwrap_or("no reason given")
        ),
        Some(s) => println!("Application {} received ({}).", id, s),
        None => println!("Application {} received.", id),
    }
    println!("{}", pretty_table(&["Field", "Value"], detail_rows(app, scale)));
}

pub fn detail_rows(a: &LoanApplication, scale: u32) -> Vec<Vec<String>> {
    let mut rows = vec![
        vec![
            "Application id".into(),
            a.application_id.clone().unwrap_or_else(|| "-".into()),
        ],
        vec![
            "Status".into(),
            a.application_status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".into()),
        ],
        vec!["Customer".into(), a.customer_name.clone()],
        vec!["Product".into(), format!("{} ({})", a.product_name, a.product_id)],
        vec!["Loan amount".into(), fmt_man_yen(&a.loan_amount, scale)],
        vec!["Loan term".into(), format!("{} years", a.loan_term)],
    ];
    if let Some(r) = &a.interest_rate {
        rows.push(vec!["Interest rate".into(), fmt_rate(r)]);
    }
    if let Some(p) = &a.monthly_payment {
        rows.push(vec!["Monthly payment".into(), fmt_man_yen(p, scale)]);
    }
    if let Some(d) = &a.application_date {
        rows.push(vec!["Applied".into(), d.format("%Y-%m-%d %H:%M").to_string()]);
    }
    if let Some(d) = &a.approval_date {
        rows.push(vec!["Approved".into(), d.format("%Y-%m-%d %H:%M").to_string()]);
    }
    if let Some(r) = &a.rejection_reason {
        rows.push(vec!["Reason".into(), r.clone()]);
    }
    rows
}
