// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Context;
use super::applications::detail_rows;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Result, anyhow};

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("application", sub)) => {
            let id = sub.get_one::<String>("application_id").unwrap().trim();
            let app = ctx
                .backend
                .application(id)?
                .ok_or_else(|| anyhow!("Application '{}' not found", id))?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &app)? {
                println!(
                    "{}",
                    pretty_table(&["Field", "Value"], detail_rows(&app, ctx.config.payment_scale))
                );
            }
        }
        Some(("customer", sub)) => {
            let id = sub.get_one::<String>("customer_id").unwrap().trim();
            let apps = ctx.backend.applications_for_customer(id)?;
            if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &apps)? {
                return Ok(());
            }
            if apps.is_empty() {
                println!("No applications for customer '{}'.", id);
                return Ok(());
            }
            let data = apps
                .iter()
                .map(|a| {
                    vec![
                        a.application_id.clone().unwrap_or_default(),
                        a.product_name.clone(),
                        a.loan_amount.to_string(),
                        a.loan_term.to_string(),
                        a.application_status
                            .map(|s| s.to_string())
                            .unwrap_or_default(),
                        a.application_date
                            .map(|d| d.format("%Y-%m-%d").to_string())
                            .unwrap_or_default(),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(
                    &["Application", "Product", "Amount", "Term", "Status", "Applied"],
                    data
                )
            );
        }
        _ => {}
    }
    Ok(())
}
