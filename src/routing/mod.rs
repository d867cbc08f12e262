//! Route table and location model.
//!
//! Destinations are declared up front as [`RouteDef`]s and compiled into an
//! immutable [`RouteTable`]:
//! ```rust
//! use wayfare::{routing, RouteDef};
//!
//! let table = routing::build(vec![
//!     RouteDef::new("/", "home"),
//!     RouteDef::new("/stats", "stats").protected(),
//!     RouteDef::new("/login", "login"),
//! ])
//! .unwrap();
//!
//! assert_eq!(table.resolve("/stats").unwrap().route().name(), "stats");
//! ```
//!
//! Named parameters use matchit's `{name}` segments and are captured into
//! [`Params`] during resolution:
//! ```rust
//! # use wayfare::{routing, RouteDef};
//! let table = routing::build(vec![RouteDef::new("/user/{name}", "user")]).unwrap();
//! let resolved = table.resolve("/user/alice").unwrap();
//! assert_eq!(resolved.params().get("name").unwrap(), "alice");
//! ```
//!
//! Access policy is part of the declaration: a route marked with
//! [`RouteDef::protected`] is only reachable with an authenticated session
//! (see [`crate::guard`]).

use std::{collections::HashSet, fmt, sync::Arc};

mod param;
pub use param::{MissingParam, Params};

mod query;
pub use query::{Query, QueryError};

/// Declaration of a single navigable destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDef {
    path: String,
    name: String,
    requires_auth: bool,
}

impl RouteDef {
    /// Declare a route. Routes are publicly reachable unless marked
    /// [`protected`](Self::protected).
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            requires_auth: false,
        }
    }

    /// Require an authenticated session to reach this route.
    #[must_use]
    pub const fn protected(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    /// The path pattern this route matches.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The symbolic name of the route.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the route requires an authenticated session.
    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        self.requires_auth
    }
}

/// A parsed navigation target, such as `/stats?time=42`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    query: String,
}

impl Location {
    /// Split a raw target into path and query. Never fails; a bare path has
    /// an empty query.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.split_once('?') {
            Some((path, query)) => Self {
                path: path.to_owned(),
                query: query.to_owned(),
            },
            None => Self {
                path: raw.to_owned(),
                query: String::new(),
            },
        }
    }

    /// The path component.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The query component, without the leading `?`.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.query.is_empty() {
            f.write_str(&self.path)
        } else {
            write!(f, "{}?{}", self.path, self.query)
        }
    }
}

/// A route matched against a concrete path, with its captured parameters.
#[derive(Debug, Clone)]
pub struct ResolvedRoute {
    route: Arc<RouteDef>,
    params: Params,
}

impl ResolvedRoute {
    /// The matched route declaration.
    #[must_use]
    pub const fn route(&self) -> &Arc<RouteDef> {
        &self.route
    }

    /// Parameters captured from the path.
    #[must_use]
    pub const fn params(&self) -> &Params {
        &self.params
    }

    pub(crate) fn into_parts(self) -> (Arc<RouteDef>, Params) {
        (self.route, self.params)
    }
}

/// Error raised while compiling a route table.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RouteBuildError {
    /// Two route declarations share the same path.
    #[error("duplicate route path `{path}`")]
    DuplicatePath {
        /// The offending path.
        path: String,
    },
    /// The matcher rejected a path pattern.
    #[error(transparent)]
    Insert(#[from] matchit::InsertError),
}

/// An immutable route table.
/// `RouteTable` uses `Arc` internally, so it can safely be cloned and shared.
#[derive(Clone)]
pub struct RouteTable {
    inner: Arc<matchit::Router<Arc<RouteDef>>>,
    routes: Vec<Arc<RouteDef>>,
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("routes", &self.routes)
            .finish()
    }
}

impl RouteTable {
    /// Match a concrete path against the table.
    ///
    /// The lookup is pure: no side effects, no interior mutability. A path
    /// that matches nothing yields `None`; query strings never participate
    /// in matching.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute> {
        self.inner.at(path).ok().map(|matched| ResolvedRoute {
            route: Arc::clone(matched.value),
            params: Params::new(
                matched
                    .params
                    .iter()
                    .map(|(key, value)| (key.to_owned(), value.to_owned()))
                    .collect(),
            ),
        })
    }

    /// Look up a route declaration by its symbolic name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<Arc<RouteDef>> {
        self.routes
            .iter()
            .find(|route| route.name() == name)
            .cloned()
    }

    /// Number of declared routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table declares no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Compile route declarations into a [`RouteTable`].
///
/// # Errors
///
/// Returns [`RouteBuildError::DuplicatePath`] when two declarations share a
/// path, or [`RouteBuildError::Insert`] when the matcher rejects a pattern.
pub fn build(routes: Vec<RouteDef>) -> Result<RouteTable, RouteBuildError> {
    let mut seen = HashSet::new();
    let mut inner = matchit::Router::new();
    let mut table = Vec::with_capacity(routes.len());

    for route in routes {
        if !seen.insert(route.path().to_owned()) {
            return Err(RouteBuildError::DuplicatePath {
                path: route.path().to_owned(),
            });
        }

        let route = Arc::new(route);
        inner.insert(route.path().to_owned(), Arc::clone(&route))?;
        table.push(route);
    }

    Ok(RouteTable {
        inner: Arc::new(inner),
        routes: table,
    })
}
