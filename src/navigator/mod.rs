//! The dispatch cycle.
//!
//! A [`Navigator`] owns the compiled route table, the injected session
//! provider and the guard hooks. Every call to [`Navigator::navigate`] runs
//! one complete cycle — resolve, snapshot, decide, commit — synchronously on
//! the calling thread and yields exactly one [`NavigationOutcome`]. There is
//! no failure path at runtime: an unmatched path is an outcome, not an
//! error, and guards are total functions.
//!
//! The session snapshot is taken once per cycle. [`Navigator::navigate`]
//! reads it immediately, so a navigation racing the provider's initial
//! restore can observe "unauthenticated" and redirect spuriously;
//! [`Navigator::navigate_when_ready`] awaits the provider's readiness signal
//! first and is the recommended entry point on application start-up.

use std::{fmt, sync::Arc};

use smallvec::SmallVec;

use crate::guard::{AccessGuard, Decision, NavigationHook, NavigationRequest};
use crate::history::History;
use crate::routing::{Location, Params, RouteDef, RouteTable};
use crate::session::{SessionProvider, SessionSnapshot};

/// The destination a navigation committed to.
#[derive(Debug, Clone)]
pub struct ActiveRoute {
    route: Arc<RouteDef>,
    location: Location,
    params: Params,
}

impl ActiveRoute {
    /// The committed route declaration.
    #[must_use]
    pub const fn route(&self) -> &Arc<RouteDef> {
        &self.route
    }

    /// The committed location, including its query string.
    #[must_use]
    pub const fn location(&self) -> &Location {
        &self.location
    }

    /// Parameters captured from the path.
    #[must_use]
    pub const fn params(&self) -> &Params {
        &self.params
    }
}

/// Result of one navigation attempt. Every attempt yields exactly one.
#[derive(Debug, Clone)]
pub enum NavigationOutcome {
    /// The requested target was committed.
    Done(ActiveRoute),
    /// A guard intervened; the redirect target was committed instead.
    Redirected {
        /// The route originally requested.
        from: Arc<RouteDef>,
        /// The destination actually committed.
        to: ActiveRoute,
    },
    /// No route matched the requested path; nothing was committed.
    NotFound {
        /// The path that matched nothing.
        path: String,
    },
}

/// Error raised while wiring guards onto a navigator.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SetupError {
    /// The named route is not declared in the table.
    #[error("unknown route `{name}`")]
    UnknownRoute {
        /// The name that matched nothing.
        name: String,
    },
    /// The redirect target itself requires authentication and would redirect
    /// into itself.
    #[error("redirect target `{name}` requires authentication")]
    ProtectedRedirectTarget {
        /// The name of the offending route.
        name: String,
    },
}

/// Client-side navigator: route table, session seam, guard hooks, history.
pub struct Navigator<P> {
    table: RouteTable,
    provider: P,
    hooks: SmallVec<[Box<dyn NavigationHook>; 2]>,
    history: History,
    current: Option<ActiveRoute>,
}

impl<P> fmt::Debug for Navigator<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("routes", &self.table.len())
            .field("hooks", &self.hooks.len())
            .field("current", &self.current)
            .finish()
    }
}

impl<P: SessionProvider> Navigator<P> {
    /// Create a navigator over the given table and session provider.
    ///
    /// No guards are installed yet; see [`with_access_guard`](Self::with_access_guard).
    #[must_use]
    pub fn new(table: RouteTable, provider: P) -> Self {
        Self {
            table,
            provider,
            hooks: SmallVec::new(),
            history: History::new(),
            current: None,
        }
    }

    /// Install the standard access guard, redirecting unauthenticated access
    /// to the route named `login_name`.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::UnknownRoute`] when no route carries that name,
    /// and [`SetupError::ProtectedRedirectTarget`] when the named route is
    /// itself protected.
    pub fn with_access_guard(self, login_name: &str) -> Result<Self, SetupError> {
        let login = self
            .table
            .find(login_name)
            .ok_or_else(|| SetupError::UnknownRoute {
                name: login_name.to_owned(),
            })?;

        if login.requires_auth() {
            return Err(SetupError::ProtectedRedirectTarget {
                name: login_name.to_owned(),
            });
        }

        Ok(self.with_hook(AccessGuard::new(login)))
    }

    /// Append a guard hook. Hooks run in registration order.
    #[must_use]
    pub fn with_hook(mut self, hook: impl NavigationHook + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Navigate to `target`, reading the session snapshot synchronously.
    ///
    /// This is the compatibility behavior: a provider still restoring its
    /// persisted state reads as unauthenticated, so a protected target can
    /// redirect even though a valid session is about to become available.
    pub fn navigate(&mut self, target: &str) -> NavigationOutcome {
        let session = self.provider.snapshot();
        self.dispatch(target, session)
    }

    /// Navigate to `target` after the session provider has settled.
    ///
    /// Awaits [`SessionProvider::resolved`] before taking the snapshot,
    /// closing the restore race of [`navigate`](Self::navigate).
    pub async fn navigate_when_ready(&mut self, target: &str) -> NavigationOutcome {
        self.provider.resolved().await;
        let session = self.provider.snapshot();
        self.dispatch(target, session)
    }

    /// Re-dispatch the previously committed location through the guards.
    ///
    /// Returns `None` when there is no earlier entry. The target is
    /// re-evaluated, so a route that became unreachable since (for example
    /// after a sign-out) redirects instead of being restored blindly.
    pub fn back(&mut self) -> Option<NavigationOutcome> {
        if self.history.len() < 2 {
            return None;
        }

        self.history.pop();
        let previous = self.history.pop()?;
        Some(self.navigate(&previous.to_string()))
    }

    /// The currently committed destination, if any navigation succeeded yet.
    #[must_use]
    pub const fn current(&self) -> Option<&ActiveRoute> {
        self.current.as_ref()
    }

    /// History of committed navigations.
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    fn dispatch(&mut self, target: &str, session: SessionSnapshot) -> NavigationOutcome {
        let location = Location::parse(target);
        tracing::info!(path = location.path(), "navigation started");

        let Some(resolved) = self.table.resolve(location.path()) else {
            tracing::warn!(path = location.path(), "no route matched");
            return NavigationOutcome::NotFound {
                path: location.path().to_owned(),
            };
        };

        let origin = self.current.as_ref().map(|active| Arc::clone(&active.route));
        let request = NavigationRequest::new(resolved, origin, session);

        // First RedirectTo wins; a request receives exactly one decision.
        let mut decision = Decision::Proceed;
        for hook in &self.hooks {
            match hook.before(&request) {
                Decision::Proceed => {}
                redirect => {
                    decision = redirect;
                    break;
                }
            }
        }

        let (route, params) = request.into_target().into_parts();

        match decision {
            Decision::Proceed => {
                tracing::info!(route = route.name(), "navigation committed");
                let active = ActiveRoute {
                    route,
                    location,
                    params,
                };
                self.commit(active.clone());
                NavigationOutcome::Done(active)
            }
            Decision::RedirectTo(redirect) => {
                tracing::info!(
                    from = route.path(),
                    to = redirect.path(),
                    "navigation redirected"
                );
                let location = Location::parse(redirect.path());
                let params = self
                    .table
                    .resolve(location.path())
                    .map_or_else(Params::empty, |resolved| resolved.into_parts().1);
                let active = ActiveRoute {
                    route: redirect,
                    location,
                    params,
                };
                self.commit(active.clone());
                NavigationOutcome::Redirected { from: route, to: active }
            }
        }
    }

    fn commit(&mut self, active: ActiveRoute) {
        self.history.push(active.location.clone());
        self.current = Some(active);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{NavigationOutcome, Navigator, SetupError};
    use crate::guard::{Decision, NavigationHook, NavigationRequest};
    use crate::routing::{build, RouteDef, RouteTable};
    use crate::session::{SharedSession, StaticSession, UserRef};

    fn table() -> RouteTable {
        build(vec![
            RouteDef::new("/", "home"),
            RouteDef::new("/stats", "stats").protected(),
            RouteDef::new("/login", "login"),
        ])
        .unwrap()
    }

    fn navigator<P: crate::session::SessionProvider>(provider: P) -> Navigator<P> {
        Navigator::new(table(), provider)
            .with_access_guard("login")
            .unwrap()
    }

    #[test]
    fn commits_public_route_for_anonymous_session() {
        let mut navigator = navigator(StaticSession::anonymous());
        match navigator.navigate("/") {
            NavigationOutcome::Done(active) => assert_eq!(active.route().name(), "home"),
            other => panic!("expected Done, got {other:?}"),
        }
        assert_eq!(navigator.current().unwrap().route().name(), "home");
        assert_eq!(navigator.history().len(), 1);
    }

    #[test]
    fn redirects_protected_route_for_anonymous_session() {
        let mut navigator = navigator(StaticSession::anonymous());
        match navigator.navigate("/stats?time=42") {
            NavigationOutcome::Redirected { from, to } => {
                assert_eq!(from.name(), "stats");
                assert_eq!(to.route().name(), "login");
            }
            other => panic!("expected Redirected, got {other:?}"),
        }
        // Only the redirect target is committed.
        assert_eq!(navigator.history().len(), 1);
        assert_eq!(navigator.current().unwrap().route().name(), "login");
    }

    #[test]
    fn commits_protected_route_for_signed_in_session() {
        let mut navigator = navigator(StaticSession::signed_in("uid123"));
        match navigator.navigate("/stats?time=42") {
            NavigationOutcome::Done(active) => {
                assert_eq!(active.route().name(), "stats");
                assert_eq!(active.location().query(), "time=42");
            }
            other => panic!("expected Done, got {other:?}"),
        }
    }

    #[test]
    fn reports_unmatched_paths_without_committing() {
        let mut navigator = navigator(StaticSession::anonymous());
        match navigator.navigate("/nowhere") {
            NavigationOutcome::NotFound { path } => assert_eq!(path, "/nowhere"),
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert!(navigator.current().is_none());
        assert!(navigator.history().is_empty());
    }

    #[test]
    fn snapshot_navigation_redirects_during_restore() {
        let (handle, session) = SharedSession::restoring();
        let mut navigator = navigator(session);

        // The synchronous read observes the provider mid-restore.
        assert!(matches!(
            navigator.navigate("/stats"),
            NavigationOutcome::Redirected { .. }
        ));

        handle.sign_in(UserRef::new("uid123"));
        assert!(matches!(
            navigator.navigate("/stats"),
            NavigationOutcome::Done(_)
        ));
    }

    #[tokio::test]
    async fn ready_navigation_waits_out_the_restore() {
        let (handle, session) = SharedSession::restoring();
        let mut navigator = navigator(session);

        handle.finish_restore(Some(UserRef::new("uid123")));
        assert!(matches!(
            navigator.navigate_when_ready("/stats").await,
            NavigationOutcome::Done(_)
        ));
    }

    #[test]
    fn back_redispatches_through_the_guards() {
        let mut navigator = navigator(StaticSession::signed_in("uid123"));
        assert!(matches!(
            navigator.navigate("/stats"),
            NavigationOutcome::Done(_)
        ));
        assert!(matches!(navigator.navigate("/"), NavigationOutcome::Done(_)));

        match navigator.back() {
            Some(NavigationOutcome::Done(active)) => assert_eq!(active.route().name(), "stats"),
            other => panic!("expected Done, got {other:?}"),
        }
        assert_eq!(navigator.history().len(), 1);
    }

    #[test]
    fn back_without_earlier_entry_is_none() {
        let mut navigator = navigator(StaticSession::anonymous());
        assert!(navigator.back().is_none());
        navigator.navigate("/");
        assert!(navigator.back().is_none());
    }

    #[test]
    fn custom_hooks_run_in_order_and_first_redirect_wins() {
        struct DenyStats(Arc<RouteDef>);

        impl NavigationHook for DenyStats {
            fn before(&self, request: &NavigationRequest) -> Decision {
                if request.target().route().name() == "stats" {
                    Decision::RedirectTo(Arc::clone(&self.0))
                } else {
                    Decision::Proceed
                }
            }
        }

        let table = table();
        let home = table.find("home").unwrap();
        let mut navigator = Navigator::new(table, StaticSession::signed_in("uid123"))
            .with_hook(DenyStats(home))
            .with_access_guard("login")
            .unwrap();

        match navigator.navigate("/stats") {
            NavigationOutcome::Redirected { to, .. } => assert_eq!(to.route().name(), "home"),
            other => panic!("expected Redirected, got {other:?}"),
        }
    }

    #[test]
    fn guard_wiring_validates_the_login_route() {
        let navigator = Navigator::new(table(), StaticSession::anonymous());
        assert!(matches!(
            navigator.with_access_guard("signup"),
            Err(SetupError::UnknownRoute { .. })
        ));

        let protected_login = build(vec![
            RouteDef::new("/stats", "stats").protected(),
            RouteDef::new("/login", "login").protected(),
        ])
        .unwrap();
        let navigator = Navigator::new(protected_login, StaticSession::anonymous());
        assert!(matches!(
            navigator.with_access_guard("login"),
            Err(SetupError::ProtectedRedirectTarget { .. })
        ));
    }
}
