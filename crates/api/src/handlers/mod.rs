//! Request handlers, one module per resource.

pub mod account;
pub mod advertisement;
pub mod artist;
pub mod artist_group;
pub mod auth;
pub mod authority;
pub mod favorite;
pub mod like;
pub mod notification;
pub mod oauth;
pub mod schedule;
