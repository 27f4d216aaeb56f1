//! Save-time rules for SPC quality records
//!
//! Every record kind implements [`Hooks`]. The save pipeline
//! ([`run_save_hooks`]) calls `validate` and then `before_save`, mirroring the
//! order a record goes through before it is written:
//!
//! - a blocking [`RuleError`] aborts the save,
//! - an [`Advisory`] is recorded on the [`HookContext`] and the save continues,
//! - derived fields are written straight back into the record.

pub mod capability;
pub mod limits;
pub mod notify;
pub mod populate;
pub mod quality;
pub mod sanity;

use chrono::{DateTime, Local, NaiveDate, Utc};
use miette::Diagnostic;
use std::fmt;
use thiserror::Error;

use crate::core::config::OperatorSettings;
use crate::core::store::RecordStore;

pub use capability::{CapabilityIndices, PLACEHOLDER_CP, PLACEHOLDER_CPK};
pub use limits::{check_limits, LimitKind, Limits};
pub use notify::{get_context, NotificationKind, NotificationRenderer};
pub use populate::fill_from_reference;
pub use quality::{assess, classify, Assessment, QualityStatus, SpecLimits};

/// Blocking rule violations; the record is not saved
#[derive(Debug, Clone, Error, Diagnostic, PartialEq)]
pub enum RuleError {
    #[error("Upper {kind} must be greater than Lower {kind}")]
    #[diagnostic(
        code(sqt::rules::limit_order),
        help("the upper limit must be strictly greater than the lower limit")
    )]
    LimitOrder { kind: LimitKind, upper: f64, lower: f64 },

    #[error("Center Line cannot be greater than Upper {kind}")]
    #[diagnostic(
        code(sqt::rules::center_line),
        help("move the center line inside the control limits")
    )]
    CenterAboveUpper { kind: LimitKind, center: f64, upper: f64 },

    #[error("Center Line cannot be less than Lower {kind}")]
    #[diagnostic(
        code(sqt::rules::center_line),
        help("move the center line inside the control limits")
    )]
    CenterBelowLower { kind: LimitKind, center: f64, lower: f64 },

    #[error("Expiry Date cannot be before Production Date")]
    #[diagnostic(
        code(sqt::rules::expiry_date),
        help("the expiry date must be on or after the production date")
    )]
    ExpiryBeforeProduction {
        production: NaiveDate,
        expiry: NaiveDate,
    },

    #[error("{field} must be a finite number, got {value}")]
    #[diagnostic(
        code(sqt::rules::not_finite),
        help("NaN and infinite values cannot be compared against limits")
    )]
    NotFinite { field: String, value: f64 },

    #[error("Quantity cannot be negative")]
    #[diagnostic(code(sqt::rules::quantity), help("use zero or a positive quantity"))]
    NegativeQuantity { quantity: f64 },

    #[error("{field} must be greater than 0")]
    #[diagnostic(code(sqt::rules::setting), help("fix the value in .sqt/config.yaml"))]
    NonPositiveSetting { field: &'static str, value: f64 },
}

/// Category of a non-blocking advisory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisoryKind {
    PastDue,
    CompletedBeforeTarget,
    Unassigned,
    OutsideLimits,
    LookupFailed,
}

/// A non-blocking message raised while saving a record
#[derive(Debug, Clone, PartialEq)]
pub struct Advisory {
    pub kind: AdvisoryKind,
    pub message: String,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Everything a hook may consult or report into during one save
pub struct HookContext<'a> {
    store: &'a dyn RecordStore,
    now: DateTime<Utc>,
    today: NaiveDate,
    operator_settings: OperatorSettings,
    advisories: Vec<Advisory>,
}

impl<'a> HookContext<'a> {
    /// Context using the wall clock
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self::at(store, Utc::now(), Local::now().date_naive())
    }

    /// Context pinned to an explicit clock
    pub fn at(store: &'a dyn RecordStore, now: DateTime<Utc>, today: NaiveDate) -> Self {
        Self {
            store,
            now,
            today,
            operator_settings: OperatorSettings::default(),
            advisories: Vec::new(),
        }
    }

    pub fn with_operator_settings(mut self, settings: OperatorSettings) -> Self {
        self.operator_settings = settings;
        self
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn operator_settings(&self) -> &OperatorSettings {
        &self.operator_settings
    }

    /// Record a non-blocking advisory
    pub fn advise(&mut self, kind: AdvisoryKind, message: impl Into<String>) {
        let advisory = Advisory {
            kind,
            message: message.into(),
        };
        tracing::info!(kind = ?advisory.kind, "{}", advisory.message);
        self.advisories.push(advisory);
    }

    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    /// Drain the advisories collected so far
    pub fn take_advisories(&mut self) -> Vec<Advisory> {
        std::mem::take(&mut self.advisories)
    }
}

/// Save-time hooks implemented by each record kind
pub trait Hooks {
    /// Check invariants; may also derive fields
    fn validate(&mut self, _cx: &mut HookContext<'_>) -> Result<(), RuleError> {
        Ok(())
    }

    /// Fill defaults and denormalized fields right before writing
    fn before_save(&mut self, _cx: &mut HookContext<'_>) -> Result<(), RuleError> {
        Ok(())
    }
}

/// Run `validate` then `before_save` on a record
pub fn run_save_hooks<R: Hooks>(record: &mut R, cx: &mut HookContext<'_>) -> Result<(), RuleError> {
    record.validate(cx)?;
    record.before_save(cx)
}
