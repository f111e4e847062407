//! Analysis core of a farm soil-monitoring system: rule-based soil
//! health scoring, threshold insights, descriptive statistics with
//! trends and correlations, and a prioritized action/risk synthesis,
//! plus the push-notification connection registry the surrounding
//! service injects at its call sites.

pub mod cli;
pub mod config;
pub mod demo;
pub mod error;
pub mod logic;
pub mod models;
pub mod notify;
