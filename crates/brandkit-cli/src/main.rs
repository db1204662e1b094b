use anyhow::{Context, anyhow};
use brandkit_core::{App, Config, Thesaurus, generator, logging};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "brandkit")]
#[command(about = "Business listings with company-name, hashtag and QR code tools")]
#[command(version)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true, conflicts_with = "pretty_logs")]
    json_logs: bool,

    /// Multi-line, human-friendly logs with source locations
    #[arg(long, global = true)]
    pretty_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve,
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbCommands,
    },
    /// Create a login account
    CreateUser {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Print company names for comma-separated keywords
    Names {
        keywords: String,
    },
    /// Print hashtags for comma-separated keywords
    Hashtags {
        keywords: String,
    },
    /// Write a QR code PNG for some text
    Qr {
        text: String,
        #[arg(long, short, default_value = "qr.png")]
        output: String,
    },
}

#[derive(Subcommand)]
enum DbCommands {
    /// Run pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.json_logs {
        logging::init_logging_json();
    } else if cli.pretty_logs {
        logging::init_logging_pretty();
    } else {
        logging::init_logging();
    }

    match cli.command {
        Commands::Serve => {
            let app = App::new().await.map_err(|e| anyhow!("{e}"))?;
            app.run().await.map_err(|e| anyhow!("{e}"))?;
        }
        Commands::Db { action } => match action {
            DbCommands::Migrate => {
                let config = load_config()?;
                App::migrate(&config).await.map_err(|e| anyhow!("{e}"))?;
            }
        },
        Commands::CreateUser { username, password } => {
            let config = load_config()?;
            let db = brandkit_core::db::connect(&config)
                .await
                .context("connecting to the database")?;
            brandkit_core::db::migrate(&db)
                .await
                .context("running migrations")?;

            let user = brandkit_core::auth::create_user(
                &db,
                &username,
                &password,
                config.security.min_password_length,
            )
            .await?;
            println!("Created user {} (id {})", user.username, user.id);
        }
        Commands::Names { keywords } => {
            let thesaurus = load_thesaurus()?;
            let names =
                generator::company_names_for(&thesaurus, &keywords, &mut rand::thread_rng());
            for name in names {
                println!("{name}");
            }
        }
        Commands::Hashtags { keywords } => {
            let thesaurus = load_thesaurus()?;
            let hashtags =
                generator::hashtags_for(&thesaurus, &keywords, &mut rand::thread_rng());
            println!("{}", hashtags.into_iter().collect::<Vec<_>>().join(" "));
        }
        Commands::Qr { text, output } => {
            let png = brandkit_core::qr::encode_png(&text)?;
            std::fs::write(&output, png).with_context(|| format!("writing {output}"))?;
            tracing::info!("QR code written to {output}");
        }
    }

    Ok(())
}

fn load_config() -> anyhow::Result<Config> {
    Config::from_env().map_err(|e| anyhow!("invalid configuration: {e}"))
}

fn load_thesaurus() -> anyhow::Result<Thesaurus> {
    let config = load_config()?;
    Ok(Thesaurus::from_config(&config)?)
}
