use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use timetable_client::models::Credentials;
use timetable_client::{ApiClient, ApiRequest, ClientConfig};

const USAGE: &str = "usage: timetable-client <login USER PASSWORD | logout | status | get PATH | progress TERM>";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "timetable_client=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::new_from_env()?;
    let client = ApiClient::from_config(&config).await?;

    client.logout_signal().subscribe(|_| {
        warn!("session rejected by the server, log in again");
    });

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["login", username, password] => {
            let credentials = Credentials {
                username: username.to_string(),
                password: password.to_string(),
            };
            let response = client.auth().login(&credentials).await?;
            if response.token().is_some() {
                info!("session stored");
            } else {
                warn!("server accepted the login but returned no token");
            }
        }
        ["logout"] => {
            client.auth().logout().await?;
        }
        ["status"] => {
            let authenticated = client.auth().is_authenticated().await?;
            println!(
                "{} ({})",
                if authenticated { "logged in" } else { "logged out" },
                config.api_base_url
            );
        }
        ["get", path] => {
            let payload = client.dispatcher().send(ApiRequest::get(*path)).await?;
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        ["progress", term] => {
            let progress = client.timetable().get_progress(term).await?;
            println!("{}", serde_json::to_string_pretty(&progress)?);
        }
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }

    Ok(())
}
