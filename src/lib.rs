#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

//! A small navigation core for single-page applications.
//!
//! Wayfare bundles the three pieces a client-side application needs before it
//! can render anything: a declarative route table, a dispatch cycle, and an
//! access-control guard that decides per navigation whether the target is
//! permitted for the current session.
//!
//! ```rust
//! use wayfare::{routing, Navigator, NavigationOutcome, RouteDef, StaticSession};
//!
//! let table = routing::build(vec![
//!     RouteDef::new("/", "home"),
//!     RouteDef::new("/stats", "stats").protected(),
//!     RouteDef::new("/login", "login"),
//! ])
//! .unwrap();
//!
//! let mut navigator = Navigator::new(table, StaticSession::anonymous())
//!     .with_access_guard("login")
//!     .unwrap();
//!
//! assert!(matches!(
//!     navigator.navigate("/stats"),
//!     NavigationOutcome::Redirected { .. }
//! ));
//! ```
//!
//! Session state is owned by an external identity provider; the navigator only
//! reads it through the [`SessionProvider`] seam. See [`session`] for the
//! bundled watch-channel provider mirroring a hosted identity SDK.

#[macro_use]
mod macros;

pub mod routing;

pub mod session;

pub mod guard;

pub mod navigator;

/// Linear history of committed navigations.
pub mod history;

#[doc(inline)]
pub use routing::{Location, Query, RouteDef, RouteTable};

#[doc(inline)]
pub use session::{
    BackendConfig, SessionHandle, SessionProvider, SessionSnapshot, SharedSession, StaticSession,
    UserRef,
};

#[doc(inline)]
pub use guard::{AccessGuard, Decision, NavigationHook, NavigationRequest};

#[doc(inline)]
pub use navigator::{ActiveRoute, NavigationOutcome, Navigator, SetupError};

pub use history::History;
