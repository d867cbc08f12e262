//! Route access control.
//!
//! A guard decides, before a navigation completes, whether the target is
//! permitted for the current session. The policy is declarative: a route
//! carries [`requires_auth`](crate::RouteDef::requires_auth), and the guard
//! is a lookup over that attribute rather than a comparison against any
//! particular path.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use wayfare::{AccessGuard, Decision, RouteDef, SessionSnapshot, UserRef};
//!
//! let login = Arc::new(RouteDef::new("/login", "login"));
//! let stats = RouteDef::new("/stats", "stats").protected();
//! let guard = AccessGuard::new(login);
//!
//! let anonymous = SessionSnapshot::anonymous();
//! assert!(matches!(
//!     guard.evaluate(&stats, &anonymous),
//!     Decision::RedirectTo(_)
//! ));
//!
//! let signed_in = SessionSnapshot::authenticated(UserRef::new("uid123"));
//! assert_eq!(guard.evaluate(&stats, &signed_in), Decision::Proceed);
//! ```
//!
//! Evaluation is a pure function of the target's access attribute and the
//! snapshot: deterministic, side-effect free, and total — an absent user is
//! a valid input, never an error.

use std::sync::Arc;

use crate::routing::{ResolvedRoute, RouteDef};
use crate::session::SessionSnapshot;

/// Outcome of evaluating one navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Complete the navigation to the requested target.
    Proceed,
    /// Abandon the target and navigate to the given route instead.
    RedirectTo(Arc<RouteDef>),
}

/// One pending transition, created per navigation attempt and dropped once
/// decided.
#[derive(Debug)]
pub struct NavigationRequest {
    target: ResolvedRoute,
    origin: Option<Arc<RouteDef>>,
    session: SessionSnapshot,
}

impl NavigationRequest {
    pub(crate) const fn new(
        target: ResolvedRoute,
        origin: Option<Arc<RouteDef>>,
        session: SessionSnapshot,
    ) -> Self {
        Self {
            target,
            origin,
            session,
        }
    }

    /// The route being navigated to.
    #[must_use]
    pub const fn target(&self) -> &ResolvedRoute {
        &self.target
    }

    /// The route being navigated away from, if any.
    #[must_use]
    pub const fn origin(&self) -> Option<&Arc<RouteDef>> {
        self.origin.as_ref()
    }

    /// The session snapshot taken when the request was created.
    #[must_use]
    pub const fn session(&self) -> &SessionSnapshot {
        &self.session
    }

    pub(crate) fn into_target(self) -> ResolvedRoute {
        self.target
    }
}

/// Hook consulted before a navigation commits.
///
/// Hooks run in registration order; the first [`Decision::RedirectTo`] wins.
/// Each request receives exactly one decision — the decision is the return
/// value, so producing zero or two is unrepresentable.
pub trait NavigationHook: Send + Sync {
    /// Decide whether the pending navigation may proceed.
    fn before(&self, request: &NavigationRequest) -> Decision;
}

/// The access-control policy: protected routes require a signed-in user.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    login: Arc<RouteDef>,
}

impl AccessGuard {
    /// Create a guard that redirects unauthenticated access to `login`.
    pub const fn new(login: Arc<RouteDef>) -> Self {
        Self { login }
    }

    /// Evaluate one target against one session snapshot.
    ///
    /// Pure in both inputs: the same pair always yields the same decision,
    /// and nothing is mutated along the way.
    #[must_use]
    pub fn evaluate(&self, target: &RouteDef, session: &SessionSnapshot) -> Decision {
        if target.requires_auth() && !session.is_authenticated() {
            Decision::RedirectTo(Arc::clone(&self.login))
        } else {
            Decision::Proceed
        }
    }
}

impl NavigationHook for AccessGuard {
    fn before(&self, request: &NavigationRequest) -> Decision {
        self.evaluate(request.target().route(), request.session())
    }
}
