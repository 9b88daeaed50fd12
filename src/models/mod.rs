// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod jog;
pub mod report;

pub use jog::{CreateJogRequest, Jog, Location, UpdateJogRequest};
pub use report::WeeklyReport;
