//! Query-string parameter structs shared by handlers.

use serde::Deserialize;

/// The `?include_inactive=true` flag for listings that hide deactivated
/// rows by default. Today that is the schedule listing.
#[derive(Debug, Deserialize)]
pub struct IncludeInactiveParams {
    #[serde(default)]
    pub include_inactive: bool,
}
