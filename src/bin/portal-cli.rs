use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::redirect::Policy;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "portal-cli")]
#[command(about = "Query a running portal gateway with a session token", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Session token sent as the session cookie.
    #[arg(short, long, env = "PORTAL_SESSION_TOKEN")]
    token: Option<String>,

    #[arg(long, default_value = "session-token")]
    cookie_name: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show whether the token is accepted as a session
    Session,
    /// List semesters with a payment ledger
    Semesters,
    /// Show the payment ledger for a semester
    Ledger { semester: String },
    /// Show results for a semester
    Results { semester: String },
    /// List registered courses
    Courses,
    /// List notices
    Notices,
    /// Show the student profile
    Profile,
    /// Check where the gate sends a path (pass or redirect)
    Gate { path: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut headers = HeaderMap::new();
    if let Some(token) = &cli.token {
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("{}={}", cli.cookie_name, token))?,
        );
    }

    let client = reqwest::Client::builder()
        .default_headers(headers)
        .redirect(Policy::none())
        .build()?;

    let path = match &cli.command {
        Commands::Session => "/api/auth/session".to_string(),
        Commands::Semesters => "/api/portal/semesters".to_string(),
        Commands::Ledger { semester } => format!("/api/portal/ledger/{semester}"),
        Commands::Results { semester } => format!("/api/portal/results/{semester}"),
        Commands::Courses => "/api/portal/courses".to_string(),
        Commands::Notices => "/api/portal/notices".to_string(),
        Commands::Profile => "/api/portal/profile".to_string(),
        Commands::Gate { path } => path.clone(),
    };

    let res = client.get(format!("{}{}", cli.url, path)).send().await?;

    if let Commands::Gate { .. } = cli.command {
        print_gate(res);
        return Ok(());
    }
    print_response(res).await
}

fn print_gate(res: reqwest::Response) {
    let status = res.status();
    match res.headers().get(reqwest::header::LOCATION) {
        Some(location) if status.is_redirection() => {
            println!("{} redirect → {}", status, location.to_str().unwrap_or("<invalid>"));
        }
        _ => println!("{} pass", status),
    }
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if status.is_redirection() {
        eprintln!("Not signed in: gateway redirected ({})", status);
        return Ok(());
    }
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
