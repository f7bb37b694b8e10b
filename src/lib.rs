// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Exercise Tracker: a minimal exercise-logging HTTP API.
//!
//! This crate provides the backend API for creating users, appending
//! dated exercises to each user's log, and querying filtered slices
//! of that log.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod time_utils;

use config::Config;
use db::UserStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: UserStore,
}
