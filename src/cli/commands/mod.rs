//! CLI command implementations

pub mod alert;
pub mod batch;
pub mod capa;
pub mod chart;
pub mod completions;
pub mod config;
pub mod data;
pub mod hist;
pub mod init;
pub mod masters;
pub mod notify;
pub mod opr;
pub mod param;
pub mod pspec;
pub mod report;
pub mod study;
pub mod txn;
pub mod validate;
