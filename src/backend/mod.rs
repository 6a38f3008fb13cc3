// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Where products, estimates and applications come from: the remote loan
//! service ([`HttpBackend`]) or an in-process stand-in driven by a product
//! catalog ([`LocalBackend`]).

pub mod http;
pub mod local;

pub use http::HttpBackend;
pub use local::LocalBackend;

use crate::api::ClientError;
use crate::models::{EstimateRequest, LoanApplication, LoanEstimate, LoanProduct};

pub const ESTIMATE_FAILED: &str = "Estimate calculation failed";
pub const SUBMIT_FAILED: &str = "Application submission failed";
pub const REQUEST_FAILED: &str = "Request to the loan service failed";

pub trait LoanBackend {
    fn products(&self) -> Result<Vec<LoanProduct>, ClientError>;

    fn product(&self, product_id: &str) -> Result<Option<LoanProduct>, ClientError>;

    fn calculate_estimate(
        &mut self,
        request: &EstimateRequest,
    ) -> Result<LoanEstimate, ClientError>;

    fn estimate(&self, estimate_id: &str) -> Result<Option<LoanEstimate>, ClientError>;

    fn submit_application(
        &mut self,
        application: &LoanApplication,
    ) -> Result<LoanApplication, ClientError>;

    fn application(&self, application_id: &str) -> Result<Option<LoanApplication>, ClientError>;

    fn applications_for_customer(
        &self,
        customer_id: &str,
    ) -> Result<Vec<LoanApplication>, ClientError>;
}
