use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,biometric_auth=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let authenticator = biometric_auth::init().await;
    tracing::info!("Using {} backend", authenticator.backend());

    // Print every state change the way a UI binding would receive it
    let mut rx = authenticator.subscribe();
    println!("{}", serde_json::to_string(&*rx.borrow_and_update())?);
    let watcher = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            match serde_json::to_string(&state) {
                Ok(json) => println!("{json}"),
                Err(e) => tracing::error!("Failed to serialize state: {}", e),
            }
        }
    });

    if let Some(reason) = std::env::args().nth(1) {
        authenticator.change_localized_reason(reason);
    }

    println!("{}", authenticator.localized_reason());
    let authenticated = authenticator.authenticate().await;

    if authenticated {
        println!("Authenticated");
    } else {
        let description = authenticator
            .error_description()
            .unwrap_or_else(|| "unexpected platform failure, see log".to_string());
        println!("Authentication failed: {description}");
    }

    drop(authenticator);
    watcher.await?;

    Ok(if authenticated {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
