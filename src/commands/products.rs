// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Context;
use crate::models::LoanProduct;
use crate::utils::{fmt_rate, maybe_print_json, pretty_table};
use anyhow::{Result, anyhow};

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("show", sub)) => show(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let products = ctx.backend.products()?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &products)? {
        return Ok(());
    }
    if products.is_empty() {
        println!("No loan products available.");
        return Ok(());
    }
    let data = products
        .iter()
        .map(|p| {
            vec![
                p.product_id.clone(),
                p.product_name.clone(),
                p.product_type.label().to_string(),
                fmt_rate(&p.current_interest_rate),
                format!("{} - {}", p.min_loan_amount, p.max_loan_amount),
                format!("{} - {}", p.min_loan_term, p.max_loan_term),
                p.repayment_method.label().to_string(),
                if p.is_active { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &[
                "ID",
                "Name",
                "Type",
                "Rate",
                "Amount (man-yen)",
                "Term (years)",
                "Repayment",
                "Active",
            ],
            data
        )
    );
    Ok(())
}

fn show(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("product_id").unwrap().trim();
    let product = ctx
        .backend
        .product(id)?
        .ok_or_else(|| anyhow!("Product '{}' not found", id))?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &product)? {
        return Ok(());
    }
    println!("{}", pretty_table(&["Field", "Value"], detail_rows(&product)));
    Ok(())
}

fn detail_rows(p: &LoanProduct) -> Vec<Vec<String>> {
    let mut rows = vec![
        vec!["ID".into(), p.product_id.clone()],
        vec!["Name".into(), p.product_name.clone()],
        vec!["Type".into(), p.product_type.label().into()],
        vec!["Current rate".into(), fmt_rate(&p.current_interest_rate)],
    ];
    if let (Some(lo), Some(hi)) = (p.min_interest_rate, p.max_interest_rate) {
        rows.push(vec!["Rate band".into(), format!("{} - {}", fmt_rate(&lo), fmt_rate(&hi))]);
    }
    rows.push(vec![
        "Loan amount".into(),
        format!("{} - {} man-yen", p.min_loan_amount, p.max_loan_amount),
    ]);
    rows.push(vec![
        "Loan term".into(),
        format!("{} - {} years", p.min_loan_term, p.max_loan_term),
    ]);
    rows.push(vec!["Repayment".into(), p.repayment_method.label().into()]);
    rows.push(vec!["Active".into(), p.is_active.to_string()]);
    if let Some(d) = &p.description {
        rows.push(vec!["Description".into(), d.clone()]);
    }
    rows
}
