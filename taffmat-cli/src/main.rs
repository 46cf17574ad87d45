use std::path::PathBuf;

use clap::Parser;
use log::{error, LevelFilter};
use taffmat_cli::{inspect, InfoConfig, OutputFormat};

#[derive(Parser, Debug)]
#[command(
    name = "taffmat",
    version = env!("CARGO_PKG_VERSION"),
    about = "Inspect TAFFmat (.HDR/.DAT) recordings from TEAC LX recorders",
    long_about = None,
)]
struct Cli {
    /// Базовое имя записи или путь к .HDR
    path: PathBuf,
    /// Формат вывода: text, json
    #[arg(long, default_value = "text")]
    format: String,
    /// Вывести первые N кадров .DAT в инженерных единицах
    #[arg(short, long, default_value = "0")]
    samples: u64,
    /// Тихий режим (только ошибки)
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .format_timestamp_secs()
        .init();

    let format: OutputFormat = match cli.format.parse() {
        Ok(f) => f,
        Err(e) => {
            error!("--format: {e}");
            std::process::exit(1);
        }
    };

    let config = InfoConfig {
        path: cli.path,
        format,
        samples: cli.samples,
    };

    match inspect(&config) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            error!("{:?}: {e}", config.path);
            std::process::exit(1);
        }
    }
}
