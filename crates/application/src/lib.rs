//! Application services and ports.

#![forbid(unsafe_code)]

mod access_guard;
mod guards;
mod notification_ports;
mod notification_provider;
mod notification_store;

pub use access_guard::{
    AccessGuard, AccessRequirement, ROLE_INFO_UNAVAILABLE, RoleInfo, RoleOverview,
};
pub use guards::{
    Gate, GateMode, NavLink, NavLinkGate, PermissionGate, RenderedNavLink, RoleGate,
    dashboard_navigation,
};
pub use notification_ports::{LocalStorage, Toast, ToastSink};
pub use notification_provider::NotificationProvider;
pub use notification_store::{DEFAULT_TOAST_DURATION, NOTIFICATION_STORAGE_KEY, NotificationStore};
