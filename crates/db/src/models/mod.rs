//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Modules that feed user-facing listings also carry a joined detail
//! struct with the display names resolved.

pub mod advertisement;
pub mod artist;
pub mod artist_group;
pub mod authority;
pub mod favorite;
pub mod like;
pub mod notification;
pub mod schedule;
pub mod session;
pub mod user;
