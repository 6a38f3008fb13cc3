// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{ESTIMATE_FAILED, LoanBackend, REQUEST_FAILED, SUBMIT_FAILED};
use crate::api::{ApiResponse, ClientError};
use crate::models::{EstimateRequest, LoanApplication, LoanEstimate, LoanProduct};
use crate::utils::http_client;
use anyhow::{Context, Result, anyhow};
use reqwest::Url;
use reqwest::blocking::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub struct HttpBackend {
    base: Url,
    client: Client,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url)
            .with_context(|| format!("Invalid loan service URL '{}'", base_url))?;
        if base.cannot_be_a_base() {
            return Err(anyhow!("Loan service URL '{}' cannot hold a path", base_url));
        }
        Ok(Self {
            base,
            client: http_client(timeout)?,
        })
    }

    /// `segments` are appended to the base path, each percent-encoded.
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<ApiResponse<T>, ClientError> {
        let url = self.url(segments);
        tracing::debug!(%url, "GET");
        let resp = self.client.get(url).send().map_err(ClientError::Transport)?;
        read_envelope(resp)
    }

    fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<ApiResponse<T>, ClientError> {
        let url = self.url(segments);
        tracing::debug!(%url, "POST");
        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .map_err(ClientError::Transport)?;
        read_envelope(resp)
    }
}

// A rejection envelope is honoured whatever the HTTP status; any other
// non-2xx response is a transport failure.
fn read_envelope<T: DeserializeOwned>(resp: Response) -> Result<ApiResponse<T>, ClientError> {
    let status = resp.status();
    let status_err = resp.error_for_status_ref().err();
    let body = resp.text().map_err(ClientError::Transport)?;
    tracing::debug!(%status, bytes = body.len(), "response");
    match (serde_json::from_str::<ApiResponse<T>>(&body), status_err) {
        (Ok(env), None) => Ok(env),
        (Ok(env @ ApiResponse::Rejected { .. }), Some(_)) => Ok(env),
        (_, Some(e)) => Err(ClientError::Transport(e)),
        (Err(e), None) => Err(ClientError::MalformedResponse(e.to_string())),
    }
}

impl LoanBackend for HttpBackend {
    fn products(&self) -> Result<Vec<LoanProduct>, ClientError> {
        let env: ApiResponse<Vec<LoanProduct>> = self.get(&["api", "loan", "products"])?;
        Ok(env.into_data(REQUEST_FAILED)?.unwrap_or_default())
    }

    fn product(&self, product_id: &str) -> Result<Option<LoanProduct>, ClientError> {
        self.get(&["api", "loan", "products", product_id])?
            .into_data(REQUEST_FAILED)
    }

    fn calculate_estimate(
        &mut self,
        request: &EstimateRequest,
    ) -> Result<LoanEstimate, ClientError> {
        self.post(&["api", "loan", "estimate", "calculate"], request)?
            .into_required(ESTIMATE_FAILED)
    }

    fn estimate(&self, estimate_id: &str) -> Result<Option<LoanEstimate>, ClientError> {
        self.get(&["api", "loan", "estimate", estimate_id])?
            .into_data(REQUEST_FAILED)
    }

    fn submit_application(
        &mut self,
        application: &LoanApplication,
    ) -> Result<LoanApplication, ClientError> {
        self.post(&["api", "loan", "application", "submit"], application)?
            .into_required(SUBMIT_FAILED)
    }

    fn application(&self, application_id: &str) -> Result<Option<LoanApplication>, ClientError> {
        self.get(&["api", "loan", "application", application_id])?
            .into_data(REQUEST_FAILED)
    }

    fn applications_for_customer(
        &self,
        customer_id: &str,
    ) -> Result<Vec<LoanApplication>, ClientError> {
        let env: ApiResponse<Vec<LoanApplication>> =
            self.get(&["api", "loan", "application", "customer", customer_id])?;
        Ok(env.into_data(REQUEST_FAILED)?.unwrap_or_default())
    }
}
