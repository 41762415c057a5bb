//! snaplook: CLI client for the Snaplook visual product search API.

mod session;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use snaplook_api_client::endpoints::images::{guess_content_type, MAX_UPLOAD_BYTES};
use snaplook_api_client::endpoints::products::SearchParams;
use snaplook_api_client::{ClientConfig, SnaplookClient};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snaplook")]
#[command(about = "Visual product search from the command line")]
#[command(version)]
struct Cli {
    /// Override the API base URL
    #[arg(long, env = "SNAPLOOK_API_URL", global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session token
    Login {
        /// Account email
        email: String,
        /// Account password
        password: String,
    },
    /// Register a new account
    Register {
        /// Account email
        email: String,
        /// Account password
        password: String,
    },
    /// Show the logged-in user's profile
    Me {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Upload an image
    Upload {
        /// Path to image file
        path: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Extract features for an uploaded image
    Process {
        /// Image ID returned by upload
        image_id: String,
    },
    /// Search products by uploaded image
    Search {
        /// Image ID returned by upload
        image_id: String,
        /// Maximum number of matches (1-20)
        #[arg(long)]
        limit: Option<u32>,
        /// Similarity threshold (0.0-1.0)
        #[arg(long)]
        threshold: Option<f64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show details for a product
    Product {
        /// Product ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show recent search history
    History {
        /// Maximum number of entries (1-50)
        #[arg(long)]
        limit: Option<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Forget the stored session token
    Logout,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config = config.with_base_url(url);
    }
    let client = SnaplookClient::with_config(config)?;

    let session_path = session::default_path()?;

    // The client never applies tokens on its own; re-apply the stored one
    // for commands that may run authenticated.
    if !matches!(
        cli.command,
        Commands::Login { .. } | Commands::Register { .. } | Commands::Logout
    ) {
        if let Some(stored) = session::load(&session_path)? {
            client.set_auth_token(stored.access_token);
        }
    }

    match cli.command {
        Commands::Login { email, password } => {
            let session = client.auth().login(&email, &password).await?;
            session::save(
                &session_path,
                &session::Session {
                    access_token: session.access_token,
                    email: email.clone(),
                },
            )?;
            println!("{} Logged in as {email}", "✓".green());
        }

        Commands::Register { email, password } => {
            let profile = client.auth().register(&email, &password).await?;
            println!(
                "{} Registered {} (user #{}). Run `snaplook login` to start a session.",
                "✓".green(),
                profile.email,
                profile.id
            );
        }

        Commands::Me { json } => match client.auth().me().await {
            Ok(profile) => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&profile)?);
                } else {
                    println!("#{} {}", profile.id, profile.email);
                }
            }
            Err(e) if e.is_auth_error() => {
                eprintln!(
                    "{} Not logged in. Run `snaplook login <email> <password>` first.",
                    "✗".red()
                );
                std::process::exit(1);
            }
            Err(e) => return Err(e.into()),
        },

        Commands::Upload { path, json } => {
            let data = std::fs::read(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            if data.len() > MAX_UPLOAD_BYTES {
                bail!(
                    "{} exceeds the {} MiB upload limit",
                    path.display(),
                    MAX_UPLOAD_BYTES / (1024 * 1024)
                );
            }

            let content_type = guess_content_type(&path)
                .context("unsupported image type (expected jpg, png, webp, or gif)")?;
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .context("path has no usable file name")?;

            let spinner = upload_spinner();
            let result = client
                .images()
                .upload(file_name, content_type, data)
                .await;
            spinner.finish_and_clear();
            let result = result?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{} {}", "✓".green(), result.message);
                println!(
                    "Image ID: {}\nNext: snaplook search {}",
                    result.image_id, result.image_id
                );
            }
        }

        Commands::Process { image_id } => {
            let result = client.images().process(&image_id).await?;
            println!(
                "{} {} ({}-dimensional feature vector)",
                "✓".green(),
                result.message,
                result.vector_dimension
            );
        }

        Commands::Search {
            image_id,
            limit,
            threshold,
            json,
        } => {
            let mut params = SearchParams::new();
            if let Some(limit) = limit {
                params = params.with_limit(limit);
            }
            if let Some(threshold) = threshold {
                params = params.with_threshold(threshold);
            }

            let results = client.products().search_by_image(&image_id, &params).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                println!("{}", results.message);
                for m in &results.matches {
                    println!(
                        "  [{:>3.0}%] {} {} #{} ({} {:.2})",
                        m.similarity_score * 100.0,
                        m.brand,
                        m.name,
                        m.product_id,
                        m.currency,
                        m.price
                    );
                }
            }
        }

        Commands::Product { id, json } => {
            let details = client.products().get(&id).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&details)?);
            } else {
                println!("{} {}", details.brand, details.name);
                println!("Category: {}", details.category);
                println!("Price:    {} {:.2}", details.currency, details.price);
                println!("Link:     {}", details.product_url);
                if !details.description.is_empty() {
                    println!("\n{}", details.description);
                }
            }
        }

        Commands::History { limit, json } => match client.products().history(limit).await {
            Ok(history) => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&history)?);
                } else if history.is_empty() {
                    println!("No searches yet.");
                } else {
                    for item in &history {
                        println!(
                            "#{:<5} {}  {}  ({} results)",
                            item.id, item.search_date, item.image_path, item.result_count
                        );
                    }
                }
            }
            Err(e) if e.is_auth_error() => {
                eprintln!(
                    "{} Not logged in. Run `snaplook login <email> <password>` first.",
                    "✗".red()
                );
                std::process::exit(1);
            }
            Err(e) => return Err(e.into()),
        },

        Commands::Logout => {
            client.clear_auth_token();
            if session::clear(&session_path)? {
                println!("{} Logged out", "✓".green());
            } else {
                println!("No stored session.");
            }
        }
    }

    Ok(())
}

fn upload_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Uploading image...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
