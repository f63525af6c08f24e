use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A query whose result series are plotted by the owning panel.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    /// Reference ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<i64>,
    /// Input for fetching metrics
    #[serde(
        default,
        rename = "expr",
        skip_serializing_if = "Option::is_none"
    )]
    pub expression: Option<String>,
    /// Legend format for outputs, e.g. `{{pod}}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend_format: Option<String>,
    /// Query resolution step, e.g. `1m`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
}
