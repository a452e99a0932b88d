use clap::{Parser, Subcommand};
use dialer::config;
use dialer::gui::app::{AppInit, AppModel};
use dialer::sys::runtime;
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dialer", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file to use instead of the one in the user config directory
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Write the default config file (unless one exists) and print its path
    InitConfig,
    /// Load and validate the config, then print the effective settings
    CheckConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => config::get_config_path()?,
    };

    match cli.command {
        Some(Commands::InitConfig) => {
            let path = config::write_default_config(&config_path)?;
            println!("{}", path.display());
            Ok(())
        }
        Some(Commands::CheckConfig) => {
            let config = config::load_config(&config_path)?;
            println!("{:#?}", config);
            Ok(())
        }
        None => {
            run(config_path);
            Ok(())
        }
    }
}

fn run(config_path: PathBuf) {
    let config = config::load_or_default(&config_path);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(config_path.clone(), tx);

    let app = RelmApp::new("org.example.dialer");

    app.run::<AppModel>(AppInit {
        config,
        config_path,
        events: rx,
    });
}
