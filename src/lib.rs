//! SQT: SPC Quality Toolkit
//!
//! Statistical process control quality records (parameters, control
//! charts, data points, capability studies, batches, alerts, corrective
//! actions) kept as plain-text YAML files. Every record passes through the
//! save rules in [`rules`] before it is written.

pub mod cli;
pub mod core;
pub mod entities;
pub mod rules;
