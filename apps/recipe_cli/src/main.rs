use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use client_core::{
    build_form_handler, load_settings, ClientSettings, CredentialProvider, FormField,
    HttpRecipeApi, RecipeApi, StaticCredentials, SubmitOutcome, TokenStore,
};
use tracing::info;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long)]
    server_url: Option<String>,
    /// Storage file holding the session token.
    #[arg(long)]
    token_path: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit the create-recipe form once.
    Create(RecipeFields),
    /// Log in and store the issued token.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Remove the stored token.
    Logout,
}

/// Raw form inputs. Values are sent as typed, without validation.
#[derive(Args, Debug)]
struct RecipeFields {
    #[arg(long, default_value = "")]
    title: String,
    /// Comma-separated list.
    #[arg(long, default_value = "")]
    ingredients: String,
    #[arg(long, default_value = "")]
    instructions: String,
    #[arg(long, default_value = "")]
    cooking_time: String,
    #[arg(long, default_value = "")]
    category: String,
    /// Use this token instead of the stored one.
    #[arg(long)]
    token: Option<String>,
}

impl RecipeFields {
    fn values(&self) -> [(FormField, &str); 5] {
        [
            (FormField::Title, self.title.as_str()),
            (FormField::Ingredients, self.ingredients.as_str()),
            (FormField::Instructions, self.instructions.as_str()),
            (FormField::CookingTime, self.cooking_time.as_str()),
            (FormField::Category, self.category.as_str()),
        ]
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings();
    if let Some(server_url) = cli.server_url {
        settings.server_url = server_url;
    }
    if let Some(token_path) = cli.token_path {
        settings.token_path = token_path;
    }
    let store = TokenStore::new(settings.token_path.clone());

    match cli.command {
        Command::Create(fields) => create(&settings, store, fields).await,
        Command::Login { username, password } => {
            let api = HttpRecipeApi::new(&settings.server_url, Arc::new(store.clone()))?;
            let token = api.login(&username, &password).await?;
            store
                .set_token(&token)
                .context("failed to persist session token")?;
            info!(path = %store.path().display(), "session token stored");
            println!("Logged in as {username}");
            Ok(ExitCode::SUCCESS)
        }
        Command::Logout => {
            if store.clear_token()? {
                println!("Logged out");
            } else {
                println!("No stored session");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn create(
    settings: &ClientSettings,
    store: TokenStore,
    fields: RecipeFields,
) -> Result<ExitCode> {
    let credentials: Arc<dyn CredentialProvider> = match &fields.token {
        Some(token) => Arc::new(StaticCredentials::new(token.clone())),
        None => Arc::new(store),
    };
    let handler = build_form_handler(settings, credentials)?;
    for (field, value) in fields.values() {
        handler.set_field(field, value).await;
    }

    let outcome = handler.submit().await;
    let page = handler.snapshot().await;
    println!(
        "[{}] {}",
        page.notification.css_class().unwrap_or("message"),
        page.notification.text()
    );

    Ok(match outcome {
        SubmitOutcome::Created => ExitCode::SUCCESS,
        SubmitOutcome::Rejected { .. } | SubmitOutcome::Unreachable | SubmitOutcome::Busy => {
            ExitCode::FAILURE
        }
    })
}
