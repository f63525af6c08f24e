use std::{
    ops::{Deref, DerefMut},
    sync::OnceLock,
};

use kube::CustomResource;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::panel::Panel;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, CustomResource)]
#[kube(
    category = "monitoring",
    group = "monitoring.kubesphere.io",
    version = "v1alpha1",
    kind = "Dashboard",
    root = "DashboardCrd",
    derive = "PartialEq",
    namespaced,
    printcolumn = r#"{
        "name": "title",
        "type": "string",
        "description": "dashboard title",
        "jsonPath": ".spec.title"
    }"#,
    printcolumn = r#"{
        "name": "created-at",
        "type": "date",
        "description": "created time",
        "jsonPath": ".metadata.creationTimestamp"
    }"#
)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        rename = "datasource",
        skip_serializing_if = "Option::is_none"
    )]
    pub data_source: Option<String>,
    /// Time range for display
    #[serde(
        default,
        deserialize_with = "deserialize_null_as_default",
        skip_serializing_if = "Time::is_empty"
    )]
    pub time: Time,
    /// Panels in display order
    #[serde(
        default,
        deserialize_with = "deserialize_null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub panels: Vec<Panel>,
    #[serde(
        default,
        deserialize_with = "deserialize_null_as_default",
        rename = "templating",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub templatings: Vec<Templating>,
}

impl DashboardSpec {
    /// Returns the indices of the panels which carry no known variant.
    pub fn empty_panels(&self) -> impl Iterator<Item = usize> + '_ {
        self.panels
            .iter()
            .enumerate()
            .filter(|(_, panel)| panel.is_empty())
            .map(|(index, _)| index)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, CustomResource)]
#[kube(
    category = "monitoring",
    group = "monitoring.kubesphere.io",
    version = "v1alpha1",
    kind = "ClusterDashboard",
    root = "ClusterDashboardCrd",
    derive = "PartialEq",
    printcolumn = r#"{
        "name": "title",
        "type": "string",
        "description": "dashboard title",
        "jsonPath": ".spec.title"
    }"#,
    printcolumn = r#"{
        "name": "created-at",
        "type": "date",
        "description": "created time",
        "jsonPath": ".metadata.creationTimestamp"
    }"#
)]
#[serde(rename_all = "camelCase")]
pub struct ClusterDashboardSpec {
    #[serde(flatten)]
    pub dashboard: DashboardSpec,
}

impl From<DashboardSpec> for ClusterDashboardSpec {
    fn from(dashboard: DashboardSpec) -> Self {
        Self { dashboard }
    }
}

impl From<ClusterDashboardSpec> for DashboardSpec {
    fn from(value: ClusterDashboardSpec) -> Self {
        value.dashboard
    }
}

impl Deref for ClusterDashboardSpec {
    type Target = DashboardSpec;

    fn deref(&self) -> &Self::Target {
        &self.dashboard
    }
}

impl DerefMut for ClusterDashboardSpec {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.dashboard
    }
}

/// Time range of the metrics for display.
///
/// Both bounds are relative to the current time, e.g. `now-1M` for a month
/// ago. Decoding accepts any string; see [`Time::validate`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Time {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(regex(pattern = r"^now([+-][0-9]+[smhdwMy])?$"))]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(regex(pattern = r"^now([+-][0-9]+[smhdwMy])?$"))]
    pub to: Option<String>,
}

impl Time {
    pub const PATTERN: &'static str = r"^now([+-][0-9]+[smhdwMy])?$";

    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn validate(&self) -> Result<(), TimeError> {
        for (field, value) in [("from", &self.from), ("to", &self.to)] {
            match value.as_deref() {
                None | Some("") => continue,
                Some(value) if is_relative_time(value) => continue,
                Some(value) => {
                    return Err(TimeError {
                        field,
                        value: value.into(),
                    })
                }
            }
        }
        Ok(())
    }
}

pub fn is_relative_time(value: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();

    PATTERN
        .get_or_init(|| Regex::new(Time::PATTERN).expect("time pattern should be valid"))
        .is_match(value)
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid time {field:?}: expected a relative time like \"now-1h\", but given {value:?}")]
pub struct TimeError {
    pub field: &'static str,
    pub value: String,
}

/// A variable which can be used as a placeholder in panel queries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Templating {
    /// Variable name
    #[serde(
        default,
        deserialize_with = "deserialize_null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub name: String,
    /// The variable takes the values returned by this query
    #[serde(
        default,
        deserialize_with = "deserialize_null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub query: String,
}

/// Treats an explicit `null` like an absent field.
fn deserialize_null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
