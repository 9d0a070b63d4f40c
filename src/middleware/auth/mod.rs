pub mod access;
pub mod policy;

pub use access::{Access, AccessRejection, authorize};
pub use policy::{AccessClass, RouteClass, RoutePolicy, RoutePolicyEntry};
