use serde::Deserialize;

use super::{SessionHandle, SharedSession};

/// Configuration for the hosted identity/document backend.
///
/// Field names follow the provider's camelCase convention, so the struct can
/// be deserialized straight from the config object shipped with the
/// application.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendConfig {
    /// API key issued by the provider.
    pub api_key: String,
    /// Domain handling the authentication flow.
    pub auth_domain: String,
    /// Project identifier.
    pub project_id: String,
    /// Document storage bucket, if the project uses one.
    #[serde(default)]
    pub storage_bucket: Option<String>,
    /// Sender id for push messaging, if configured.
    #[serde(default)]
    pub messaging_sender_id: Option<String>,
    /// Application id within the project.
    #[serde(default)]
    pub app_id: Option<String>,
}

impl BackendConfig {
    /// Create the session pair for this backend.
    ///
    /// The identity protocol itself is owned by the provider integration,
    /// which keeps the [`SessionHandle`] and drives restore/sign-in/sign-out
    /// on it; the returned [`SharedSession`] is what the navigator reads.
    #[must_use]
    pub fn into_session(self) -> (SessionHandle, SharedSession) {
        tracing::debug!(project = %self.project_id, "session backend configured");
        SharedSession::restoring()
    }
}
