//! Port traits connecting the domain to its collaborators.

pub mod config_port;
pub mod data_port;
pub mod report_port;
pub mod strategy_port;
