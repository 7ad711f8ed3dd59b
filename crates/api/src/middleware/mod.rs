//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT (Bearer
//!   header or `access` cookie).
//! - [`rbac::RequireStaff`] -- Requires the `staff` or `admin` role.

pub mod auth;
pub mod rbac;
