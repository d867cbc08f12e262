//! Application bootstrap: backend config, session restore, guarded navigation.
//!
//! Run with: `cargo run --example app`

use serde::Deserialize;
use wayfare::{routing, BackendConfig, NavigationOutcome, Navigator, Query, RouteDef, UserRef};

#[derive(Debug, Deserialize)]
struct StatsProps {
    #[serde(default)]
    time: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config: BackendConfig = serde_json::from_str(
        r#"{
            "apiKey": "YOUR_API_KEY",
            "authDomain": "xxx.firebaseapp.com",
            "projectId": "xxx",
            "storageBucket": "xxx.appspot.com"
        }"#,
    )?;
    let (auth, session) = config.into_session();

    let table = routing::build(vec![
        RouteDef::new("/", "home"),
        RouteDef::new("/stats", "stats").protected(),
        RouteDef::new("/login", "login"),
    ])?;

    let mut navigator = Navigator::new(table, session).with_access_guard("login")?;

    // Cold start: restoration has not settled, so the protected route bounces.
    let outcome = navigator.navigate("/stats?time=42");
    println!("before restore: {outcome:?}");

    auth.sign_in(UserRef::new("uid123"));

    let outcome = navigator.navigate_when_ready("/stats?time=42").await;
    if let NavigationOutcome::Done(active) = &outcome {
        let Query(props) = Query::<StatsProps>::from_location(active.location())?;
        println!("stats over {} sessions", props.time);
    }

    Ok(())
}
