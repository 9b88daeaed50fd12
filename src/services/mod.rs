// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod jog;
pub mod report;

pub use jog::JogService;
pub use report::ReportService;
