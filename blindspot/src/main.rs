use anyhow::Result;
use blindspot::{
    config,
    logic::{detect, highlight},
};
use clap::{Parser, Subcommand};
use color_detect::{palette, parse_highlight_color};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "blindspot")]
#[command(version, about = "Color detection and highlighting for colorblind users", long_about = None)]
struct Cli {
    /// Config file, defaults to the platform config directory
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Override server.listen_addr
        #[arg(short, long, value_name = "ADDR")]
        listen: Option<String>,
    },

    /// Print the color at the center of an image as JSON
    Detect {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Keep one color and desaturate the rest of an image
    Highlight {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// red, green or blue (Spanish names accepted)
        #[arg(short, long)]
        color: Option<String>,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// List the detectable and highlightable colors
    Colors,
}

#[tokio::main]
async fn main() -> Result<()> {
    blindspot::init_logger();

    let cli = Cli::parse();
    config::init(cli.config)?;
    let mut config = config::all();
    log::debug!("config file {}", config.path().display());

    match cli.command.unwrap_or(Commands::Serve { listen: None }) {
        Commands::Serve { listen } => {
            if let Some(listen) = listen {
                config.server.listen_addr = listen;
            }
            blindspot::start_server(config).await?;
        }
        Commands::Detect { file } => {
            let report = detect::detect_file(&config.detection.to_detection_config(), &file)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Highlight {
            file,
            color,
            output,
        } => {
            let color = match color {
                Some(name) => parse_highlight_color(&name)?,
                None => config.highlight.default_color,
            };
            let highlight_config = config.highlight.to_highlight_config(color);
            highlight::highlight_file(&highlight_config, &file, &output)?;
            log::info!("saved {}", output.display());
        }
        Commands::Colors => {
            println!("detect:    {}", palette::palette_names().join(", "));
            println!("highlight: {}", palette::highlight_names().join(", "));
        }
    }

    Ok(())
}
