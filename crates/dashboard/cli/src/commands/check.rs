use std::{fmt, fs, path::PathBuf};

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use dashboard_api::dashboard::{ClusterDashboardCrd, DashboardCrd, DashboardSpec};
use kube::{Resource, ResourceExt};
use serde::Deserialize;
use serde_yaml::Value;
use tracing::{error, info, warn};

#[derive(Parser)]
pub(crate) struct Args {
    /// Manifest files in YAML or JSON; a file may hold several documents
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Print the normalized manifests to stdout
    #[arg(long)]
    print: bool,
}

impl Args {
    pub(crate) fn run(self) -> Result<()> {
        let mut num_failed = 0usize;
        let mut num_manifests = 0usize;

        for path in &self.files {
            let content = fs::read_to_string(path)
                .map_err(|error| anyhow!("failed to read {path:?}: {error}"))?;

            for document in ::serde_yaml::Deserializer::from_str(&content) {
                let value = match Value::deserialize(document) {
                    Ok(Value::Null) => continue,
                    Ok(value) => value,
                    Err(e) => {
                        error!("failed to parse {path:?}: {e}");
                        num_failed += 1;
                        continue;
                    }
                };

                let manifest = match Manifest::from_value(value.clone()) {
                    Ok(manifest) => manifest,
                    Err(e) => {
                        error!("failed to decode {path:?}: {e}");
                        num_failed += 1;
                        continue;
                    }
                };
                num_manifests += 1;

                for finding in audit(&value, manifest.spec()) {
                    warn!("{path:?}: {manifest}: {finding}");
                }

                if self.print {
                    let encoded = manifest.to_yaml()?;
                    print!("---\n{encoded}");
                }
            }
        }

        if num_failed > 0 {
            bail!("{num_failed} manifest(s) could not be decoded");
        }
        info!("checked {num_manifests} manifest(s)");
        Ok(())
    }
}

#[derive(Debug)]
enum Manifest {
    Dashboard(DashboardCrd),
    ClusterDashboard(ClusterDashboardCrd),
}

impl fmt::Display for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dashboard(data) => {
                let kind = DashboardCrd::kind(&());
                let namespace = data.namespace().unwrap_or_else(|| "default".into());
                let name = data.name_any();
                write!(f, "{kind} {namespace}/{name}")
            }
            Self::ClusterDashboard(data) => {
                let kind = ClusterDashboardCrd::kind(&());
                let name = data.name_any();
                write!(f, "{kind} {name}")
            }
        }
    }
}

impl Manifest {
    fn from_value(value: Value) -> Result<Self> {
        let kind = match value.get("kind").and_then(Value::as_str) {
            Some(kind) => kind.to_string(),
            None => bail!("missing kind"),
        };

        if kind == DashboardCrd::kind(&()) {
            ::serde_yaml::from_value(value)
                .map(Self::Dashboard)
                .map_err(Into::into)
        } else if kind == ClusterDashboardCrd::kind(&()) {
            ::serde_yaml::from_value(value)
                .map(Self::ClusterDashboard)
                .map_err(Into::into)
        } else {
            bail!("unsupported kind: {kind}")
        }
    }

    fn spec(&self) -> &DashboardSpec {
        match self {
            Self::Dashboard(data) => &data.spec,
            Self::ClusterDashboard(data) => &data.spec,
        }
    }

    fn to_yaml(&self) -> Result<String> {
        let encoded = match self {
            Self::Dashboard(data) => ::serde_yaml::to_string(data),
            Self::ClusterDashboard(data) => ::serde_yaml::to_string(data),
        };
        encoded.map_err(|error| anyhow!("failed to encode {self}: {error}"))
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Finding {
    DroppedPanel {
        index: usize,
        type_: Option<String>,
    },
    InvalidTime(String),
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DroppedPanel {
                index,
                type_: Some(type_),
            } => write!(f, "panel #{index} has an unknown type {type_:?} and is dropped"),
            Self::DroppedPanel { index, type_: None } => {
                write!(f, "panel #{index} has no type and is dropped")
            }
            Self::InvalidTime(error) => f.write_str(error),
        }
    }
}

/// Compares a decoded spec against the document it came from.
fn audit(document: &Value, spec: &DashboardSpec) -> Vec<Finding> {
    let panels = document
        .get("spec")
        .and_then(|spec| spec.get("panels"))
        .and_then(Value::as_sequence);

    let mut findings: Vec<_> = spec
        .empty_panels()
        .map(|index| Finding::DroppedPanel {
            index,
            type_: panels
                .and_then(|panels| panels.get(index))
                .and_then(|panel| panel.get("type"))
                .and_then(Value::as_str)
                .map(Into::into),
        })
        .collect();

    if let Err(error) = spec.time.validate() {
        findings.push(Finding::InvalidTime(error.to_string()));
    }
    findings
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
apiVersion: monitoring.kubesphere.io/v1alpha1
kind: ClusterDashboard
metadata:
  name: overview
spec:
  title: Overview
  time:
    from: now-1h
    to: tomorrow
  panels:
    - type: row
      title: Cluster
    - type: text
      content: hello
    - {}
    - type: singlestat
      format: percent
"#;

    fn load(manifest: &str) -> (Value, Manifest) {
        let value: Value = ::serde_yaml::from_str(manifest).expect("failed to parse yaml");
        let manifest = Manifest::from_value(value.clone()).expect("failed to decode manifest");
        (value, manifest)
    }

    #[test]
    fn audit_findings() {
        let (value, manifest) = load(MANIFEST);
        assert!(matches!(manifest, Manifest::ClusterDashboard(_)));
        assert_eq!(manifest.to_string(), "ClusterDashboard overview");

        let findings = audit(&value, manifest.spec());
        assert_eq!(
            findings,
            [
                Finding::DroppedPanel {
                    index: 1,
                    type_: Some("text".into()),
                },
                Finding::DroppedPanel {
                    index: 2,
                    type_: None,
                },
                Finding::InvalidTime(
                    "invalid time \"to\": expected a relative time like \"now-1h\", but given \"tomorrow\""
                        .into()
                ),
            ],
        );
    }

    #[test]
    fn normalized_output_drops_unknown_panels() {
        let (_, manifest) = load(MANIFEST);
        let encoded = manifest.to_yaml().expect("failed to encode manifest");

        let (value, manifest) = load(&encoded);
        assert_eq!(manifest.spec().panels.len(), 4);
        assert_eq!(value["spec"]["panels"][1], Value::Mapping(Default::default()));
        assert_eq!(value["spec"]["panels"][3]["type"].as_str(), Some("singlestat"));
    }

    #[test]
    fn namespaced_display() {
        let (_, manifest) = load(
            "
apiVersion: monitoring.kubesphere.io/v1alpha1
kind: Dashboard
metadata:
  name: etcd
  namespace: kube-system
spec: {}
",
        );
        assert_eq!(manifest.to_string(), "Dashboard kube-system/etcd");
    }

    #[test]
    fn reject_unsupported_kinds() {
        let value: Value = ::serde_yaml::from_str("kind: ConfigMap").unwrap();
        let error = Manifest::from_value(value).expect_err("a config map is not a dashboard");
        assert_eq!(error.to_string(), "unsupported kind: ConfigMap");

        let value: Value = ::serde_yaml::from_str("spec: {}").unwrap();
        assert!(Manifest::from_value(value).is_err());
    }

    #[test]
    fn reject_malformed_panels() {
        let value: Value = ::serde_yaml::from_str(
            "
apiVersion: monitoring.kubesphere.io/v1alpha1
kind: Dashboard
metadata:
  name: broken
spec:
  panels:
    - 42
",
        )
        .unwrap();
        assert!(Manifest::from_value(value).is_err());
    }
}
