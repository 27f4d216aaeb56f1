//! CHART entity type - Control chart definition

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{default_revision, Entity};
use crate::core::identity::{EntityId, EntityPrefix};
use crate::rules::{check_limits, HookContext, Hooks, LimitKind, Limits, RuleError};

/// Control chart type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    /// X-bar and range
    #[default]
    XbarR,
    /// X-bar and standard deviation
    XbarS,
    /// Individuals and moving range
    ImR,
    /// Proportion defective
    P,
    /// Number defective
    Np,
    /// Defect count
    C,
    /// Defects per unit
    U,
}

impl std::fmt::Display for ChartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartType::XbarR => write!(f, "x-bar/r"),
            ChartType::XbarS => write!(f, "x-bar/s"),
            ChartType::ImR => write!(f, "individuals/moving-range"),
            ChartType::P => write!(f, "p"),
            ChartType::Np => write!(f, "np"),
            ChartType::C => write!(f, "c"),
            ChartType::U => write!(f, "u"),
        }
    }
}

impl std::str::FromStr for ChartType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "x-bar/r" | "xbar_r" | "xbar-r" | "xr" => Ok(ChartType::XbarR),
            "x-bar/s" | "xbar_s" | "xbar-s" | "xs" => Ok(ChartType::XbarS),
            "individuals/moving-range" | "imr" | "i-mr" | "im_r" => Ok(ChartType::ImR),
            "p" => Ok(ChartType::P),
            "np" => Ok(ChartType::Np),
            "c" => Ok(ChartType::C),
            "u" => Ok(ChartType::U),
            _ => Err(format!(
                "Invalid chart type: {}. Use x-bar/r, x-bar/s, imr, p, np, c, or u",
                s
            )),
        }
    }
}

/// Control chart definition for one parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlChart {
    /// Unique identifier (CHART-xxx)
    pub id: EntityId,

    /// Descriptive title
    pub title: String,

    /// Parameter ID (PARAM-xxx)
    pub parameter: String,

    #[serde(default)]
    pub chart_type: ChartType,

    /// Upper control limit (UCL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_control_limit: Option<f64>,

    /// Lower control limit (LCL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_control_limit: Option<f64>,

    /// Center line (CL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center_line: Option<f64>,

    /// Subgroup size for X-bar charts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subgroup_size: Option<u32>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author
    pub author: String,

    /// Entity revision number
    #[serde(default = "default_revision")]
    pub entity_revision: u32,
}

impl Entity for ControlChart {
    const PREFIX: EntityPrefix = EntityPrefix::Chart;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}

impl ControlChart {
    /// Create a new chart for a parameter
    pub fn new(title: String, parameter: String, chart_type: ChartType, author: String) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Chart),
            title,
            parameter,
            chart_type,
            upper_control_limit: None,
            lower_control_limit: None,
            center_line: None,
            subgroup_size: None,
            created: Utc::now(),
            author,
            entity_revision: 1,
        }
    }

    pub fn limits(&self) -> Limits {
        Limits::new(
            self.upper_control_limit,
            self.lower_control_limit,
            self.center_line,
        )
    }
}

impl Hooks for ControlChart {
    fn validate(&mut self, _cx: &mut HookContext<'_>) -> Result<(), RuleError> {
        check_limits(&self.limits(), LimitKind::Control)
    }
}
