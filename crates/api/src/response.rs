//! The `{ "data": ... }` success envelope.

use serde::Serialize;

/// Wrapper every 2xx JSON body goes through.
///
/// Keeping the envelope as a typed struct, rather than ad-hoc
/// `json!({ "data": ... })` at each call site, means a handler cannot
/// misspell the key or skip the envelope by accident.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
