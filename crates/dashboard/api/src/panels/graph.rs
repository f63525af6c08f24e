use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::target::Target;

/// A time-series chart.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Graph {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Line colors, in the order of the plotted series
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<Target>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub yaxes: Vec<Yaxis>,
    /// Display as a bar chart
    #[serde(default, skip_serializing_if = "is_false")]
    pub bars: bool,
    /// Display as a line chart
    #[serde(default, skip_serializing_if = "is_false")]
    pub lines: bool,
    /// Display as a stacked chart
    #[serde(default, skip_serializing_if = "is_false")]
    pub stack: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Yaxis {
    /// Limit the decimal numbers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<i64>,
    /// Display unit, e.g. `percent`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}
