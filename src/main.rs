//! # Senryu CLI
//!
//! Command-line interface for rendering senryu cards.
//!
//! ## Usage
//!
//! ```bash
//! # Render a card to a PNG file
//! senryu render "ふるいけや" "かわずとびこむ" "みずのおと" "ばしょう" --out card.png
//!
//! # Print the PNG as base64 instead
//! senryu render "a" "b" "c" "d" --base64
//!
//! # Serve cards over HTTP
//! senryu serve --listen 0.0.0.0:3000 --config card.json
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use senryu::{RenderConfig, Senryu, SenryuError, composer, server};

/// Senryu - vertical poem card renderer
#[derive(Parser, Debug)]
#[command(name = "senryu")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render one card
    Render {
        first_sentence: String,
        second_sentence: String,
        third_sentence: String,
        author_name: String,

        /// Output PNG path (defaults to a fresh <uuid>.png)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Print the PNG as base64 to stdout instead of writing a file
        #[arg(long, conflicts_with = "out")]
        base64: bool,

        #[command(flatten)]
        card: CardArgs,

        /// Caption drawn along the bottom border
        #[arg(long)]
        caption: Option<String>,
    },

    /// Serve cards over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:3000")]
        listen: String,

        #[command(flatten)]
        card: CardArgs,
    },
}

#[derive(clap::Args, Debug)]
struct CardArgs {
    /// JSON file with card configuration overrides
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Font file (overrides the config file)
    #[arg(long, value_name = "PATH")]
    font: Option<String>,
}

impl CardArgs {
    fn load(&self) -> Result<RenderConfig, SenryuError> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::from_json_file(path)?,
            None => RenderConfig::default(),
        };
        if let Some(font) = &self.font {
            config.font_path = Some(font.clone());
        }
        Ok(config)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), SenryuError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            first_sentence,
            second_sentence,
            third_sentence,
            author_name,
            out,
            base64,
            card,
            caption,
        } => {
            let senryu = Senryu::new(first_sentence, second_sentence, third_sentence, author_name)?;
            let mut config = card.load()?;
            if caption.is_some() {
                config.service_name = caption;
            }

            let canvas = composer::render(&senryu, &config)?;

            if base64 {
                println!("{}", canvas.to_base64_png()?);
            } else {
                let path = out.unwrap_or_else(|| PathBuf::from(format!("{}.png", uuid::Uuid::new_v4())));
                canvas.save_png(&path)?;
                println!("Saved to {}", path.display());
            }
        }
        Commands::Serve { listen, card } => {
            let config = server::ServerConfig {
                listen_addr: listen,
                render: card.load()?,
            };
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(config))?;
        }
    }

    Ok(())
}
