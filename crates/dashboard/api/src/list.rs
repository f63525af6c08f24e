use k8s_openapi::apimachinery::pkg::apis::meta::v1::ListMeta;
use kube::{core::TypeMeta, Resource};
use serde::{Deserialize, Serialize};

use crate::dashboard::{ClusterDashboardCrd, DashboardCrd};

pub type DashboardList = List<DashboardCrd>;
pub type ClusterDashboardList = List<ClusterDashboardCrd>;

/// A collection of resources, as returned by a list call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "K: Deserialize<'de>"))]
pub struct List<K> {
    #[serde(flatten)]
    pub types: Option<TypeMeta>,
    #[serde(default)]
    pub metadata: ListMeta,
    #[serde(default)]
    pub items: Vec<K>,
}

impl<K> Default for List<K> {
    fn default() -> Self {
        Self {
            types: None,
            metadata: ListMeta::default(),
            items: Vec::default(),
        }
    }
}

impl<K> List<K>
where
    K: Resource<DynamicType = ()>,
{
    pub fn new(items: Vec<K>) -> Self {
        Self {
            types: Some(Self::types()),
            metadata: ListMeta::default(),
            items,
        }
    }

    pub fn types() -> TypeMeta {
        TypeMeta {
            api_version: K::api_version(&()).into_owned(),
            kind: format!("{}List", K::kind(&())),
        }
    }
}

impl<K> FromIterator<K> for List<K>
where
    K: Resource<DynamicType = ()>,
{
    fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<K> IntoIterator for List<K> {
    type Item = K;
    type IntoIter = ::std::vec::IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
