//! orderlink - command line front end for the OrderLink backend.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use secrecy::{ExposeSecret, SecretString};

use orderlink_auth::{Capability, SessionManager, SessionStatus};
use orderlink_client::{
    ApiClient, CepClient, ClientConfig, KeyringCredentialStore, count_by_status, sign_in,
};
use orderlink_core::{Cep, DocumentKind, TaxDocument};

type Session = SessionManager<KeyringCredentialStore, ApiClient>;

#[derive(Parser, Debug)]
#[command(name = "orderlink")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Backend base URL (overrides ORDERLINK_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Session(SessionCommand),

    /// Look up the address of a CEP
    Cep { cep: String },

    /// Check a CPF or CNPJ
    ValidateDocument { kind: DocumentKind, value: String },
}

/// Commands that talk to the backend on behalf of the stored session.
#[derive(Subcommand, Debug)]
enum SessionCommand {
    /// Show whether a stored session is still valid
    Status,

    /// Sign in with an e-mail or CPF
    Login {
        identifier: String,

        #[arg(long, env = "ORDERLINK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out and erase the stored credential
    Logout,

    /// List menu categories
    Categories,

    /// List menu items
    Items,

    /// List orders
    Orders {
        /// Hide delivered orders
        #[arg(long)]
        open: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    orderlink_observability::init();
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(api_url) = cli.api_url {
        config = config.with_api_url(api_url);
    }

    match cli.command {
        Commands::ValidateDocument { kind, value } => validate_document(kind, &value),
        Commands::Cep { cep } => lookup_cep(&config, &cep).await,
        Commands::Session(command) => {
            let api = ApiClient::new(&config).context("failed to build HTTP client")?;
            let session = SessionManager::with_service_key(
                KeyringCredentialStore::new(),
                api.clone(),
                config.credential_service.clone(),
            );
            run_session_command(command, &api, &session).await
        }
    }
}

async fn run_session_command(command: SessionCommand, api: &ApiClient, session: &Session) -> Result<()> {
    match command {
        SessionCommand::Login {
            identifier,
            password,
        } => {
            let password = SecretString::from(password);
            let profile = sign_in(api, session, &identifier, password.expose_secret()).await?;
            println!("Signed in as {}", profile.display_name);
        }
        SessionCommand::Logout => {
            session.logout().await;
            println!("Signed out");
        }
        SessionCommand::Status => match session.check_status().await {
            SessionStatus::Authenticated => {
                if let Some(profile) = session.profile() {
                    println!("Signed in as {}", profile.display_name);
                    for capability in [
                        Capability::CreateItems,
                        Capability::ManageItems,
                        Capability::ManageCompany,
                    ] {
                        println!("  {capability}: {}", profile.can(capability));
                    }
                }
            }
            _ => println!("Not signed in"),
        },
        SessionCommand::Categories => {
            let token = require_session(session).await?;
            for category in api.authorized(&token).list_categories().await? {
                let state = if category.active { "active" } else { "inactive" };
                let description = category.description.unwrap_or_default();
                println!("{}\t{}\t{state}\t{description}", category.id, category.name);
            }
        }
        SessionCommand::Items => {
            let token = require_session(session).await?;
            for item in api.authorized(&token).list_items().await? {
                let marker = if item.available { "" } else { " (unavailable)" };
                println!("{}\t{}\t{:.2}{marker}", item.id, item.name, item.price);
            }
        }
        SessionCommand::Orders { open } => {
            let token = require_session(session).await?;
            let client = api.authorized(&token);
            let orders = if open {
                client.open_orders().await?
            } else {
                client.list_orders().await?
            };
            for order in &orders {
                println!(
                    "{}\ttable {}\t{}\t{:.2}\t{}",
                    order.id,
                    order.table,
                    order.status,
                    order.total,
                    order.created_at.format("%Y-%m-%d %H:%M")
                );
            }
            let summary: Vec<String> = count_by_status(&orders)
                .into_iter()
                .map(|(status, count)| format!("{status}={count}"))
                .collect();
            println!("{}", summary.join(" "));
        }
    }
    Ok(())
}

/// Restore the stored session and return its token.
async fn require_session(session: &Session) -> Result<orderlink_auth::BearerToken> {
    if session.check_status().await != SessionStatus::Authenticated {
        bail!("not signed in; run `orderlink login <identifier>` first");
    }
    session
        .authorization()
        .context("session is authenticated but has no token installed")
}

fn validate_document(kind: DocumentKind, value: &str) -> Result<()> {
    let document = TaxDocument::parse(kind, value)?;
    println!("{document} is a valid {kind}");
    Ok(())
}

async fn lookup_cep(config: &ClientConfig, raw: &str) -> Result<()> {
    let cep = Cep::parse(raw)?;
    let client = CepClient::new(config).context("failed to build HTTP client")?;
    match client.lookup(&cep).await? {
        Some(address) => println!(
            "{cep}: {}, {} - {}/{}",
            address.street, address.neighborhood, address.city, address.state
        ),
        None => bail!("CEP {cep} not found"),
    }
    Ok(())
}
