// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Context;
use crate::catalog::Catalog;
use crate::utils::pretty_table;
use anyhow::Result;

/// Collect (issue, detail) rows; an empty list means all checks passed.
pub fn check(ctx: &Context, catalog: Option<&Catalog>) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    // 1) Catalog sanity (offline) or service reachability (online)
    match catalog {
        Some(c) => {
            for (issue, detail) in c.problems() {
                rows.push(vec![issue, detail]);
            }
        }
        None => {
            if let Err(e) = ctx.backend.products() {
                rows.push(vec![
                    "service_unreachable".into(),
                    format!("{} ({})", ctx.config.api_url, e),
                ]);
            }
        }
    }

    // 2) Session: readable, and any application still matches its estimate
    match ctx.load_session() {
        Ok(session) => {
            if let Some(app) = &session.application {
                if let Err(e) = session.check_terms(app) {
                    rows.push(vec!["session_terms".into(), e.to_string()]);
                }
            }
        }
        Err(e) => rows.push(vec!["session_unreadable".into(), format!("{:#}", e)]),
    }
    rows
}

pub fn handle(ctx: &Context, catalog: Option<&Catalog>) -> Result<()> {
    let rows = check(ctx, catalog);
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
