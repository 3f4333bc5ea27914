//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod notification;
mod role;
mod security;

pub use notification::{
    NotificationId, NotificationItem, NotificationType, relative_time_label, unread_badge_label,
};
pub use role::{PermissionEntry, RoleCatalog, RoleDefinition};
pub use security::{Feature, Permission, Role};
