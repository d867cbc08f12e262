//! Session state is owned by an external identity provider; this module is
//! the read-only seam the navigator consumes it through.
//!
//! [`SessionProvider`] is the injection point: anything that can produce a
//! [`SessionSnapshot`] and signal when restoration has finished. The bundled
//! [`SharedSession`]/[`SessionHandle`] pair mirrors the shape of a hosted
//! identity SDK — the handle lives with the backend integration and moves
//! the state through its lifecycle, the provider side is cheap to clone and
//! hand to a navigator:
//!
//! ```rust
//! use wayfare::{SessionProvider, SharedSession, UserRef};
//!
//! let (handle, session) = SharedSession::restoring();
//! // Still restoring persisted credentials: reads as unauthenticated.
//! assert!(!session.snapshot().is_authenticated());
//!
//! handle.finish_restore(Some(UserRef::new("uid123")));
//! assert!(session.snapshot().is_authenticated());
//! ```
//!
//! Reading the snapshot never fails. A provider that cannot be read (the
//! handle is gone, restoration incomplete) reads as unauthenticated, which
//! keeps protected routes closed rather than erroring.

use std::future::Future;

use tokio::sync::watch;

mod config;
pub use config::BackendConfig;

/// Opaque reference to the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
    uid: String,
}

impl UserRef {
    /// Wrap a provider-issued user id.
    pub fn new(uid: impl Into<String>) -> Self {
        Self { uid: uid.into() }
    }

    /// The provider-issued user id.
    #[must_use]
    pub fn uid(&self) -> &str {
        &self.uid
    }
}

/// Read-only view of the authentication state at one moment in time.
///
/// Absence of a user is a valid state, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    current_user: Option<UserRef>,
}

impl SessionSnapshot {
    /// A snapshot with no signed-in user.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { current_user: None }
    }

    /// A snapshot for the given signed-in user.
    #[must_use]
    pub const fn authenticated(user: UserRef) -> Self {
        Self {
            current_user: Some(user),
        }
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&UserRef> {
        self.current_user.as_ref()
    }

    /// Whether a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }
}

/// Source of session snapshots, injected into a navigator.
///
/// `snapshot` is a synchronous read and may observe a provider that is still
/// restoring persisted state; `resolved` completes once restoration has
/// finished, for callers that want to evaluate against settled state.
pub trait SessionProvider: Send + Sync {
    /// Take a snapshot of the current authentication state.
    fn snapshot(&self) -> SessionSnapshot;

    /// Completes once the provider has settled its initial state.
    fn resolved(&self) -> impl Future<Output = ()> + Send;
}

#[derive(Debug, Clone)]
enum Phase {
    Restoring,
    Ready(SessionSnapshot),
}

/// Cloneable session provider backed by a watch channel.
///
/// Created together with its [`SessionHandle`] via
/// [`SharedSession::restoring`]. Until the handle finishes restoration the
/// snapshot reads as unauthenticated.
#[derive(Debug, Clone)]
pub struct SharedSession {
    rx: watch::Receiver<Phase>,
}

/// Backend side of a [`SharedSession`].
///
/// Owned by the identity-provider integration; drives the session through
/// restore, sign-in and sign-out. Dropping the handle freezes the session in
/// its last state and resolves any pending readiness waits.
#[derive(Debug)]
pub struct SessionHandle {
    tx: watch::Sender<Phase>,
}

impl SharedSession {
    /// Create a session pair in the restoring state.
    #[must_use]
    pub fn restoring() -> (SessionHandle, Self) {
        let (tx, rx) = watch::channel(Phase::Restoring);
        (SessionHandle { tx }, Self { rx })
    }
}

impl SessionHandle {
    /// Conclude restoration of persisted credentials.
    pub fn finish_restore(&self, user: Option<UserRef>) {
        tracing::debug!(authenticated = user.is_some(), "session restored");
        let snapshot = user.map_or_else(SessionSnapshot::anonymous, SessionSnapshot::authenticated);
        self.tx.send_replace(Phase::Ready(snapshot));
    }

    /// Record a completed sign-in. Also concludes restoration.
    pub fn sign_in(&self, user: UserRef) {
        tracing::debug!(uid = user.uid(), "user signed in");
        self.tx
            .send_replace(Phase::Ready(SessionSnapshot::authenticated(user)));
    }

    /// Record a sign-out. Also concludes restoration.
    pub fn sign_out(&self) {
        tracing::debug!("user signed out");
        self.tx
            .send_replace(Phase::Ready(SessionSnapshot::anonymous()));
    }
}

impl SessionProvider for SharedSession {
    fn snapshot(&self) -> SessionSnapshot {
        match &*self.rx.borrow() {
            Phase::Restoring => SessionSnapshot::anonymous(),
            Phase::Ready(snapshot) => snapshot.clone(),
        }
    }

    fn resolved(&self) -> impl Future<Output = ()> + Send {
        let mut rx = self.rx.clone();
        async move {
            // Err means the handle is gone; the snapshot stays as it was.
            let _ = rx.wait_for(|phase| matches!(phase, Phase::Ready(_))).await;
        }
    }
}

/// Provider with a fixed snapshot, always resolved.
#[derive(Debug, Clone)]
pub struct StaticSession(SessionSnapshot);

impl StaticSession {
    /// A provider with no signed-in user.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self(SessionSnapshot::anonymous())
    }

    /// A provider with the given user signed in.
    pub fn signed_in(uid: impl Into<String>) -> Self {
        Self(SessionSnapshot::authenticated(UserRef::new(uid)))
    }
}

impl SessionProvider for StaticSession {
    fn snapshot(&self) -> SessionSnapshot {
        self.0.clone()
    }

    fn resolved(&self) -> impl Future<Output = ()> + Send {
        std::future::ready(())
    }
}
