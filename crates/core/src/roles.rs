//! Well-known role name constants.
//!
//! Access levels are not a separate table; they are derived from the
//! `is_staff` / `is_superuser` flags on the user row. The derived name is
//! what ends up in JWT claims.

pub const ROLE_USER: &str = "user";
pub const ROLE_STAFF: &str = "staff";
pub const ROLE_ADMIN: &str = "admin";

/// Map the user flags to the role name carried in token claims.
pub fn role_for_flags(is_staff: bool, is_superuser: bool) -> &'static str {
    if is_superuser {
        ROLE_ADMIN
    } else if is_staff {
        ROLE_STAFF
    } else {
        ROLE_USER
    }
}

/// Whether a role name grants staff-level access.
pub fn is_staff_role(role: &str) -> bool {
    role == ROLE_STAFF || role == ROLE_ADMIN
}
