use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::{core::GroupVersionKind, CustomResourceExt, Resource};
use thiserror::Error;
use tracing::debug;

use crate::dashboard::{ClusterDashboardCrd, DashboardCrd};

/// Registers the dashboard kinds and their list kinds into the given registry.
pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register::<DashboardCrd>()?;
    registry.register::<ClusterDashboardCrd>()
}

/// A caller-owned table of the resource kinds known to a process.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    kinds: Vec<GroupVersionKind>,
    crds: Vec<CustomResourceDefinition>,
}

impl Registry {
    /// Registers `K` together with its list kind.
    pub fn register<K>(&mut self) -> Result<(), RegistryError>
    where
        K: CustomResourceExt + Resource<DynamicType = ()>,
    {
        let group = K::group(&());
        let version = K::version(&());
        let kind = K::kind(&());

        let gvk = GroupVersionKind::gvk(&group, &version, &kind);
        let gvk_list = GroupVersionKind::gvk(&group, &version, &format!("{kind}List"));

        if let Some(gvk) = [&gvk, &gvk_list]
            .into_iter()
            .find(|gvk| self.is_registered(gvk))
        {
            return Err(RegistryError::AlreadyRegistered(gvk.clone()));
        }

        debug!("registering kind: {group}/{version}, Kind={kind}");
        self.kinds.push(gvk);
        self.kinds.push(gvk_list);
        self.crds.push(K::crd());
        Ok(())
    }

    pub fn is_registered(&self, gvk: &GroupVersionKind) -> bool {
        self.kinds.contains(gvk)
    }

    pub fn kinds(&self) -> &[GroupVersionKind] {
        &self.kinds
    }

    pub fn crds(&self) -> &[CustomResourceDefinition] {
        &self.crds
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("kind is already registered: {}/{}, Kind={}", .0.group, .0.version, .0.kind)]
    AlreadyRegistered(GroupVersionKind),
}
