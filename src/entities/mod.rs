//! Entity type definitions
//!
//! SQT supports the following record types:
//!
//! **Statistical Process Control:**
//! - [`Parameter`] - Measurable parameter with specification limits
//! - [`ParameterSpecification`] - Parameter limits in a product/customer context
//! - [`ControlChart`] - Control limits and center line for a parameter
//! - [`DataPoint`] - One measured value with derived quality status
//!
//! **Quality Management:**
//! - [`CapabilityStudy`] - Process capability study with Cp/Cpk
//! - [`Alert`] - SPC alert with severity and assignment
//! - [`Capa`] - Corrective action with action items
//! - [`Report`] - SPC report
//!
//! **Manufacturing:**
//! - [`Batch`] - Production batch with dates, quantity and release status
//! - [`BatchHistory`] - Processing value recorded against a batch
//! - [`Transaction`] - Shop-floor transaction
//! - [`Operator`] - Shop-floor operator
//!
//! **Masters:**
//! - [`Item`], [`Employee`] - Display names for references

pub mod alert;
pub mod batch;
pub mod capa;
pub mod chart;
pub mod data_point;
pub mod history;
pub mod masters;
pub mod operator;
pub mod parameter;
pub mod report;
pub mod specification;
pub mod study;
pub mod transaction;

pub use alert::Alert;
pub use batch::Batch;
pub use capa::Capa;
pub use chart::ControlChart;
pub use data_point::DataPoint;
pub use history::BatchHistory;
pub use masters::{Employee, Item};
pub use operator::Operator;
pub use parameter::Parameter;
pub use report::Report;
pub use specification::ParameterSpecification;
pub use study::CapabilityStudy;
pub use transaction::Transaction;
