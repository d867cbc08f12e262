//! End-to-end navigation scenarios against the public API.

use wayfare::{
    routing, NavigationOutcome, Navigator, RouteDef, RouteTable, SessionProvider, SharedSession,
    StaticSession, UserRef,
};

fn app_table() -> RouteTable {
    routing::build(vec![
        RouteDef::new("/", "home"),
        RouteDef::new("/stats", "stats").protected(),
        RouteDef::new("/login", "login"),
    ])
    .unwrap()
}

fn app<P: SessionProvider>(provider: P) -> Navigator<P> {
    Navigator::new(app_table(), provider)
        .with_access_guard("login")
        .unwrap()
}

#[test]
fn home_is_reachable_without_a_session() {
    let mut navigator = app(StaticSession::anonymous());
    match navigator.navigate("/") {
        NavigationOutcome::Done(active) => assert_eq!(active.route().path(), "/"),
        other => panic!("expected Done, got {other:?}"),
    }
}

#[test]
fn stats_bounces_to_login_without_a_session() {
    let mut navigator = app(StaticSession::anonymous());
    match navigator.navigate("/stats") {
        NavigationOutcome::Redirected { from, to } => {
            assert_eq!(from.path(), "/stats");
            assert_eq!(to.route().path(), "/login");
        }
        other => panic!("expected Redirected, got {other:?}"),
    }
}

#[test]
fn stats_is_reachable_once_signed_in() {
    let mut navigator = app(StaticSession::signed_in("uid123"));
    match navigator.navigate("/stats") {
        NavigationOutcome::Done(active) => assert_eq!(active.route().path(), "/stats"),
        other => panic!("expected Done, got {other:?}"),
    }
}

#[test]
fn login_is_reachable_without_a_session() {
    let mut navigator = app(StaticSession::anonymous());
    match navigator.navigate("/login") {
        NavigationOutcome::Done(active) => assert_eq!(active.route().path(), "/login"),
        other => panic!("expected Done, got {other:?}"),
    }
}

#[test]
fn decisions_are_stable_across_repeated_attempts() {
    let mut navigator = app(StaticSession::anonymous());
    for _ in 0..2 {
        assert!(matches!(
            navigator.navigate("/stats"),
            NavigationOutcome::Redirected { .. }
        ));
    }
}

#[tokio::test]
async fn restore_race_settles_with_navigate_when_ready() {
    let (auth, session) = SharedSession::restoring();
    let mut navigator = app(session);

    // A navigation racing the restore observes "unauthenticated".
    assert!(matches!(
        navigator.navigate("/stats"),
        NavigationOutcome::Redirected { .. }
    ));

    auth.finish_restore(Some(UserRef::new("uid123")));
    assert!(matches!(
        navigator.navigate_when_ready("/stats").await,
        NavigationOutcome::Done(_)
    ));
}

#[test]
fn signing_out_closes_the_protected_route_again() {
    let (auth, session) = SharedSession::restoring();
    let mut navigator = app(session);

    auth.sign_in(UserRef::new("uid123"));
    assert!(matches!(
        navigator.navigate("/stats"),
        NavigationOutcome::Done(_)
    ));

    auth.sign_out();
    assert!(matches!(
        navigator.navigate("/stats"),
        NavigationOutcome::Redirected { .. }
    ));
}
