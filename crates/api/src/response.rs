//! Shared response envelope types for API handlers.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// Used for plain confirmations (delete messages, stored filenames) that
/// have no resource shape of their own.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: message }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
