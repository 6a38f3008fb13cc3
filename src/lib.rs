// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod api;
pub mod backend;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod estimator;
pub mod models;
pub mod review;
pub mod schedule;
pub mod session;
pub mod utils;
