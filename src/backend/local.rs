// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::LoanBackend;
use crate::api::ClientError;
use crate::catalog::Catalog;
use crate::estimator::Estimator;
use crate::models::{ApplicationStatus, EstimateRequest, LoanApplication, LoanEstimate, LoanProduct};
use crate::review;
use chrono::{Local, NaiveDateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

/// Serves the loan service contract from a catalog. Estimates and
/// applications live only as long as the value does.
pub struct LocalBackend {
    catalog: Catalog,
    estimator: Estimator,
    estimates: HashMap<String, LoanEstimate>,
    applications: Vec<LoanApplication>,
}

impl LocalBackend {
    pub fn new(catalog: Catalog, estimator: Estimator) -> Self {
        Self {
            catalog,
            estimator,
            estimates: HashMap::new(),
            applications: Vec::new(),
        }
    }
}

/// `<prefix><epoch millis><8 hex chars>`
pub fn generate_id(prefix: &str) -> String {
    let rand = Uuid::new_v4().simple().to_string();
    format!("{}{}{}", prefix, Utc::now().timestamp_millis(), &rand[..8])
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl LoanBackend for LocalBackend {
    fn products(&self) -> Result<Vec<LoanProduct>, ClientError> {
        Ok(self.catalog.products().to_vec())
    }

    fn product(&self, product_id: &str) -> Result<Option<LoanProduct>, ClientError> {
        Ok(self.catalog.get(product_id).cloned())
    }

    fn calculate_estimate(
        &mut self,
        request: &EstimateRequest,
    ) -> Result<LoanEstimate, ClientError> {
        let product = self
            .catalog
            .get(&request.product_id)
            .ok_or_else(|| ClientError::ProductNotFound(request.product_id.clone()))?;
        let mut estimate = self.estimator.estimate(product, request, now())?;
        let id = generate_id("EST");
        estimate.estimate_id = Some(id.clone());
        self.estimates.insert(id, estimate.clone());
        Ok(estimate)
    }

    fn estimate(&self, estimate_id: &str) -> Result<Option<LoanEstimate>, ClientError> {
        Ok(self.estimates.get(estimate_id).cloned())
    }

    fn submit_application(
        &mut self,
        application: &LoanApplication,
    ) -> Result<LoanApplication, ClientError> {
        if self.catalog.get(&application.product_id).is_none() {
            return Err(ClientError::ProductNotFound(application.product_id.clone()));
        }
        let ts = now();
        let mut app = application.clone();
        app.application_id = Some(generate_id("APP"));
        app.application_status = Some(ApplicationStatus::Pending);
        app.application_date = Some(ts);
        app.created_at = Some(ts);
        app.updated_at = Some(ts);

        let decision = review::apply(&mut app, ts);
        tracing::info!(
            application = app.application_id.as_deref().unwrap_or_default(),
            ?decision,
            "application reviewed"
        );
        self.applications.push(app.clone());
        Ok(app)
    }

    fn application(&self, application_id: &str) -> Result<Option<LoanApplication>, ClientError> {
        Ok(self
            .applications
            .iter()
            .find(|a| a.application_id.as_deref() == Some(application_id))
            .cloned())
    }

    fn applications_for_customer(
        &self,
        customer_id: &str,
    ) -> Result<Vec<LoanApplication>, ClientError> {
        Ok(self
            .applications
            .iter()
            .filter(|a| a.customer_id.as_deref() == Some(customer_id))
            .cloned()
            .collect())
    }
}
