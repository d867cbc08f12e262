use serde::de::DeserializeOwned;
use serde_urlencoded::from_str;

use super::Location;

/// Parse typed props from a location's query string.
#[derive(Debug, Clone)]
pub struct Query<T>(pub T);

impl_deref!(Query);

/// Error returned when a query string does not deserialize into the props
/// type.
#[derive(Debug, thiserror::Error)]
#[error("invalid query string: {0}")]
pub struct QueryError(#[from] serde_urlencoded::de::Error);

impl<T: DeserializeOwned> Query<T> {
    /// Deserialize the location's query string.
    ///
    /// Absent keys fall back to the props type's serde defaults; a malformed
    /// value is an error for the caller to handle.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] when deserialization fails.
    pub fn from_location(location: &Location) -> Result<Self, QueryError> {
        Ok(Self(from_str(location.query())?))
    }
}
