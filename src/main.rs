use clap::Parser;
use menu_cli::core::command::command_registry;
use menu_cli::core::config::{config_path, load_config};
use menu_cli::{ConfigError, ConfigSource, MenuCli, MenuConfig, MenuError};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "menu-cli", about = "Browse a menu defined in a TOML file")]
struct Args {
    /// Menu file (default: ~/.menu-cli/menu.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Hide all chrome and skip "press any key" prompts
    #[arg(long)]
    no_interface: bool,

    /// Where to write the log; stdout belongs to the menu
    #[arg(long, default_value = "menu-cli.log")]
    log_file: PathBuf,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> Result<(), MenuError> {
    let args = Args::parse();

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    let path = args
        .config
        .or_else(config_path)
        .ok_or_else(|| {
            ConfigError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no home directory; pass --config",
            ))
        })?;
    log::info!("menu-cli starting with {}", path.display());

    let no_interface = args.no_interface;
    // Re-read on every reload so edits to the file show up.
    let source = ConfigSource::producer(move || {
        let file = load_config(&path)?;
        let actions = command_registry(&file.actions);
        let mut config = MenuConfig::from_file(file, actions)?;
        if no_interface {
            config.show_interface = false;
        }
        Ok(config)
    });

    MenuCli::start(source).await
}
