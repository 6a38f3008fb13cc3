// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Context;
use super::estimates::schedule_rows;
use crate::schedule::ScheduleRow;
use anyhow::{Result, anyhow};

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("schedule", sub)) => export_schedule(ctx, sub),
        _ => Ok(()),
    }
}

fn export_schedule(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();
    let estimator = ctx.estimator();
    let rows = schedule_rows(ctx, &estimator, sub)?;

    match fmt.as_str() {
        "csv" => write_csv(out, &rows)?,
        "json" => std::fs::write(out, serde_json::to_string_pretty(&rows)?)?,
        _ => return Err(anyhow!("Unknown format: {} (use csv|json)", fmt)),
    }
    println!("Exported {} schedule rows to {}", rows.len(), out);
    Ok(())
}

fn write_csv(out: &str, rows: &[ScheduleRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(out)?;
    wtr.write_record(["period", "payment", "principal", "interest", "balance"])?;
    for r in rows {
        wtr.write_record([
            r.period.to_string(),
            r.payment.to_string(),
            r.principal.to_string(),
            r.interest.to_string(),
            r.balance.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
