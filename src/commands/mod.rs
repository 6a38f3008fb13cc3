// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod applications;
pub mod doctor;
pub mod estimates;
pub mod exporter;
pub mod products;
pub mod status;

use crate::backend::LoanBackend;
use crate::config::Config;
use crate::estimator::Estimator;
use crate::session::Session;
use anyhow::Result;
use std::path::PathBuf;

/// Everything a command needs: resolved configuration, the backend to talk
/// to, and where the workflow session lives (if the caller named one).
pub struct Context {
    pub config: Config,
    pub backend: Box<dyn LoanBackend>,
    pub session_path: Option<PathBuf>,
}

impl Context {
    pub fn new(config: Config, backend: Box<dyn LoanBackend>, session_path: Option<PathBuf>) -> Self {
        Self {
            config,
            backend,
            session_path,
        }
    }

    pub fn estimator(&self) -> Estimator {
        self.config.estimator()
    }

    pub fn load_session(&self) -> Result<Session> {
        match &self.session_path {
            Some(p) => Ok(Session::load(p)?),
            None => Ok(Session::default()),
        }
    }

    pub fn save_session(&self, session: &Session) -> Result<()> {
        if let Some(p) = &self.session_path {
            session.save(p)?;
            tracing::debug!(path = %p.display(), "session saved");
        }
        Ok(())
    }
}
