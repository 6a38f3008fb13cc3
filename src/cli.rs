// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn method_arg() -> Arg {
    Arg::new("method")
        .long("method")
        .help("equal-payment|equal-principal (default: the estimate's method)")
}

fn required(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).required(true).help(help)
}

pub fn build_cli() -> Command {
    Command::new("mortgage-quote")
        .about("Mortgage loan estimates, repayment schedules and applications")
        .version(clap::crate_version!())
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .global(true)
                .help("Loan service base URL (overrides config and MORTGAGE_API_URL)"),
        )
        .arg(
            Arg::new("catalog")
                .long("catalog")
                .global(true)
                .help("Work offline against a product catalog (.csv or .json)"),
        )
        .arg(
            Arg::new("session")
                .long("session")
                .global(true)
                .help("Session file carrying the last estimate and application"),
        )
        .subcommand(
            Command::new("products")
                .about("Loan products")
                .subcommand(json_flags(Command::new("list").about("List products")))
                .subcommand(json_flags(
                    Command::new("show")
                        .about("Show one product")
                        .arg(Arg::new("product_id").required(true)),
                )),
        )
        .subcommand(
            Command::new("estimate")
                .about("Loan estimates")
                .subcommand(json_flags(
                    Command::new("calc")
                        .about("Calculate an estimate for a product")
                        .arg(required("product", "Product id"))
                        .arg(required("amount", "Loan amount in man-yen"))
                        .arg(
                            Arg::new("term")
                                .long("term")
                                .required(true)
                                .allow_negative_numbers(true)
                                .value_parser(value_parser!(i32))
                                .help("Loan term in years"),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("show").about("Show the session's last estimate"),
                ))
                .subcommand(json_flags(
                    Command::new("schedule")
                        .about("Month-by-month repayment table")
                        .arg(method_arg())
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .requires_all(["rate", "term"])
                                .help("Ad-hoc loan amount instead of the session estimate"),
                        )
                        .arg(Arg::new("rate").long("rate").requires("amount").help("Annual rate in percent"))
                        .arg(
                            Arg::new("term")
                                .long("term")
                                .requires("amount")
                                .value_parser(value_parser!(i32))
                                .help("Loan term in years"),
                        ),
                )),
        )
        .subcommand(
            Command::new("apply")
                .about("Apply for the loan quoted in the session")
                .arg(Arg::new("customer-id").long("customer-id"))
                .arg(required("customer-name", "Full name"))
                .arg(required("email", "Contact e-mail"))
                .arg(required("phone", "Contact phone"))
                .arg(required("property-address", "Address of the property"))
                .arg(required("property-type", "detached|apartment|condo"))
                .arg(required("property-value", "Property value in man-yen"))
                .arg(required("employment-type", "salaried|self-employed|business-owner"))
                .arg(required("annual-income", "Annual income in man-yen"))
                .arg(required("bank-account", "Repayment account number"))
                .arg(required("bank-name", "Bank"))
                .arg(required("branch-name", "Branch"))
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print JSON"),
                ),
        )
        .subcommand(
            Command::new("status")
                .about("Application status")
                .subcommand(json_flags(
                    Command::new("application")
                        .about("Look up one application")
                        .arg(Arg::new("application_id").required(true)),
                ))
                .subcommand(json_flags(
                    Command::new("customer")
                        .about("List a customer's applications")
                        .arg(Arg::new("customer_id").required(true)),
                )),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("schedule")
                    .about("Export the session estimate's repayment table")
                    .arg(method_arg())
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv|json"),
                    )
                    .arg(required("out", "Output path")),
            ),
        )
        .subcommand(Command::new("doctor").about("Check configuration, catalog and service"))
}
