// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{LoanProduct, ProductType, RepaymentMethod};
use crate::utils::parse_decimal;
use anyhow::{Context, Result, anyhow};
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::path::Path;

/// Product reference data for offline estimates.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<LoanProduct>,
}

impl Catalog {
    pub fn from_products(products: Vec<LoanProduct>) -> Self {
        Self { products }
    }

    /// Load a catalog from `.json` (an array of products in wire format) or
    /// `.csv` (one product per row, header required).
    pub fn load(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        let products = match ext.as_str() {
            "json" => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Read catalog {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("Parse catalog {}", path.display()))?
            }
            "csv" => read_csv(path)?,
            _ => {
                return Err(anyhow!(
                    "Unsupported catalog '{}' (expected .csv or .json)",
                    path.display()
                ));
            }
        };
        tracing::debug!(path = %path.display(), "catalog loaded");
        Ok(Self { products })
    }

    pub fn products(&self) -> &[LoanProduct] {
        &self.products
    }

    pub fn get(&self, product_id: &str) -> Option<&LoanProduct> {
        self.products.iter().find(|p| p.product_id == product_id)
    }

    /// Inconsistencies that would make estimates against the catalog
    /// misleading, as (issue, detail) pairs.
    pub fn problems(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        for p in &self.products {
            let id = p.product_id.as_str();
            if !seen.insert(id) {
                out.push(("duplicate_product_id".into(), id.to_string()));
            }
            if p.min_loan_amount <= Decimal::ZERO || p.min_loan_amount > p.max_loan_amount {
                out.push((
                    "bad_amount_range".into(),
                    format!("{} [{}, {}]", id, p.min_loan_amount, p.max_loan_amount),
                ));
            }
            if p.min_loan_term <= 0 || p.min_loan_term > p.max_loan_term {
                out.push((
                    "bad_term_range".into(),
                    format!("{} [{}, {}]", id, p.min_loan_term, p.max_loan_term),
                ));
            }
            if p.current_interest_rate.is_sign_negative() && !p.current_interest_rate.is_zero() {
                out.push((
                    "negative_rate".into(),
                    format!("{} {}%", id, p.current_interest_rate),
                ));
            }
            let below = p.min_interest_rate.is_some_and(|m| p.current_interest_rate < m);
            let above = p.max_interest_rate.is_some_and(|m| p.current_interest_rate > m);
            if below || above {
                out.push((
                    "rate_outside_band".into(),
                    format!("{} {}%", id, p.current_interest_rate),
                ));
            }
        }
        out
    }
}

fn read_csv(path: &Path) -> Result<Vec<LoanProduct>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path.display()))?;

    let mut out = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let rec = result?;
        let line = i + 2;
        let field = |idx: usize, name: &str| -> Result<String> {
            rec.get(idx)
                .map(|s| s.to_string())
                .with_context(|| format!("{} missing on line {}", name, line))
        };
        let product_id = field(0, "product_id")?;
        let product_type: ProductType = field(2, "product_type")?
            .parse()
            .map_err(|e: String| anyhow!("{} (line {})", e, line))?;
        let repayment_method: RepaymentMethod = field(8, "repayment_method")?
            .parse()
            .map_err(|e: String| anyhow!("{} (line {})", e, line))?;
        let is_active = match field(9, "is_active")?.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" => false,
            other => return Err(anyhow!("Invalid is_active '{}' on line {}", other, line)),
        };
        let description = rec
            .get(10)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());

        out.push(LoanProduct {
            product_name: field(1, "product_name")?,
            product_type,
            min_interest_rate: None,
            max_interest_rate: None,
            current_interest_rate: parse_decimal(&field(3, "current_interest_rate")?)?,
            min_loan_amount: parse_decimal(&field(4, "min_loan_amount")?)?,
            max_loan_amount: parse_decimal(&field(5, "max_loan_amount")?)?,
            min_loan_term: parse_term(&field(6, "min_loan_term")?, line)?,
            max_loan_term: parse_term(&field(7, "max_loan_term")?, line)?,
            repayment_method,
            description,
            is_active,
            created_at: None,
            updated_at: None,
            product_id,
        });
    }
    Ok(out)
}

fn parse_term(s: &str, line: usize) -> Result<i32> {
    s.parse::<i32>()
        .with_context(|| format!("Invalid term '{}' on line {}", s, line))
}
