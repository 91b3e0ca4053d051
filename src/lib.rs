pub mod catalog;
pub mod cli;
pub mod config;
pub mod observability;
pub mod planner;
pub mod report;

pub use planner::{WeekOutput, plan_week};
