// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

use mortgage_quote::backend::{HttpBackend, LoanBackend, LocalBackend};
use mortgage_quote::catalog::Catalog;
use mortgage_quote::commands::{self, Context};
use mortgage_quote::{cli, config::Config};

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let matches = cli::build_cli().get_matches();

    let mut config = Config::load()?;
    if let Some(url) = matches.get_one::<String>("api-url") {
        config.api_url = url.trim().to_string();
    }
    let catalog = match matches.get_one::<String>("catalog") {
        Some(path) => Some(Catalog::load(&PathBuf::from(path.trim()))?),
        None => None,
    };
    let backend: Box<dyn LoanBackend> = match &catalog {
        Some(c) => Box::new(LocalBackend::new(c.clone(), config.estimator())),
        None => Box::new(HttpBackend::new(&config.api_url, config.timeout())?),
    };
    let session_path = matches
        .get_one::<String>("session")
        .map(|s| PathBuf::from(s.trim()));
    let mut ctx = Context::new(config, backend, session_path);

    match matches.subcommand() {
        Some(("products", sub)) => commands::products::handle(&ctx, sub)?,
        Some(("estimate", sub)) => commands::estimates::handle(&mut ctx, sub)?,
        Some(("apply", sub)) => commands::applications::handle(&mut ctx, sub)?,
        Some(("status", sub)) => commands::status::handle(&ctx, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&ctx, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&ctx, catalog.as_ref())?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
