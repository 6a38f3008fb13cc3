// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Context;
use crate::estimator::Estimator;
use crate::models::{EstimateRequest, LoanEstimate, RepaymentMethod};
use crate::schedule::{self, ScheduleRow};
use crate::utils::{fmt_man_yen, fmt_rate, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Result, anyhow};

pub fn handle(ctx: &mut Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("calc", sub)) => calc(ctx, sub)?,
        Some(("show", sub)) => show(ctx, sub)?,
        Some(("schedule", sub)) => print_schedule(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn calc(ctx: &mut Context, sub: &clap::ArgMatches) -> Result<()> {
    let request = EstimateRequest {
        product_id: sub.get_one::<String>("product").unwrap().trim().to_string(),
        loan_amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        loan_term: *sub.get_one::<i32>("term").unwrap(),
    };
    let mut session = ctx.load_session()?;
    let estimate = session.calculate(ctx.backend.as_mut(), &request)?.clone();
    ctx.save_session(&session)?;

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &estimate)? {
        print_estimate(&estimate, ctx.config.payment_scale);
    }
    Ok(())
}

fn show(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let session = ctx.load_session()?;
    let estimate = session.estimate()?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), estimate)? {
        print_estimate(estimate, ctx.config.payment_scale);
    }
    Ok(())
}

pub fn print_estimate(e: &LoanEstimate, scale: u32) {
    let mut rows = vec![
        vec!["Product".into(), format!("{} ({})", e.product_name, e.product_id)],
        vec!["Loan amount".into(), fmt_man_yen(&e.loan_amount, scale)],
        vec!["Loan term".into(), format!("{} years", e.loan_term)],
        vec!["Interest rate".into(), fmt_rate(&e.interest_rate)],
        vec!["Monthly payment".into(), fmt_man_yen(&e.monthly_payment, scale)],
    ];
    if let Some(t) = &e.total_payment {
        rows.push(vec!["Total payment".into(), fmt_man_yen(t, scale)]);
    }
    if let Some(t) = &e.total_interest {
        rows.push(vec!["Total interest".into(), fmt_man_yen(t, scale)]);
    }
    if let Some(m) = &e.repayment_method {
        rows.push(vec!["Repayment".into(), m.label().into()]);
    }
    if let Some(id) = &e.estimate_id {
        rows.push(vec!["Estimate id".into(), id.clone()]);
    }
    if let Some(at) = &e.estimated_at {
        rows.push(vec!["Estimated at".into(), at.format("%Y-%m-%d %H:%M:%S").to_string()]);
    }
    println!("{}", pretty_table(&["Field", "Value"], rows));
}

pub fn parse_method(sub: &clap::ArgMatches, fallback: Option<RepaymentMethod>) -> Result<RepaymentMethod> {
    match sub.get_one::<String>("method") {
        Some(s) => s.parse::<RepaymentMethod>().map_err(|e| anyhow!(e)),
        None => Ok(fallback.unwrap_or(RepaymentMethod::EqualPayment)),
    }
}

/// Rows for the session estimate, or for an ad-hoc loan when `--amount`
/// (with `--rate` and `--term`) is given.
pub fn schedule_rows(
    ctx: &Context,
    estimator: &Estimator,
    sub: &clap::ArgMatches,
) -> Result<Vec<ScheduleRow>> {
    let adhoc = sub
        .try_get_one::<String>("amount")
        .ok()
        .flatten();
    if let Some(amount) = adhoc {
        let amount = parse_decimal(amount)?;
        let rate = parse_decimal(sub.get_one::<String>("rate").unwrap())?;
        let term = *sub.get_one::<i32>("term").unwrap();
        let method = parse_method(sub, None)?;
        return Ok(schedule::build(estimator, amount, rate, term, method)?);
    }
    let session = ctx.load_session()?;
    let estimate = session.estimate()?;
    let method = parse_method(sub, estimate.repayment_method)?;
    Ok(schedule::for_estimate(estimator, estimate, method)?)
}

fn print_schedule(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let estimator = ctx.estimator();
    let rows = schedule_rows(ctx, &estimator, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        return Ok(());
    }
    let scale = estimator.scale() as usize;
    let interest = schedule::total_interest(&rows);
    let data = rows
        .iter()
        .map(|r| {
            vec![
                r.period.to_string(),
                format!("{:.*}", scale, r.payment),
                format!("{:.*}", scale, r.principal),
                format!("{:.*}", scale, r.interest),
                format!("{:.*}", scale, r.balance),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Period", "Payment", "Principal", "Interest", "Balance"],
            data
        )
    );
    println!("Total interest: {}", fmt_man_yen(&interest, estimator.scale()));
    Ok(())
}
