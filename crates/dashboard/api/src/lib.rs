pub mod dashboard;
pub mod list;
pub mod panel;
pub mod panels;
pub mod registry;

pub use self::registry::register;

pub mod consts {
    pub const GROUP: &str = "monitoring.kubesphere.io";
    pub const VERSION: &str = "v1alpha1";
}
