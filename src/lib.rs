// SPDX-License-Identifier: MIT

//! Jog Tracker: a small record-keeping backend for jogging activities.
//!
//! Stores per-user jog entries (time, distance, date, location) in Firestore
//! and serves paginated CRUD queries plus a weekly aggregate report.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::{JogService, ReportService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub jogs: JogService,
    pub reports: ReportService,
}
