//! json-files - expand directive files into one page per data record.

use anyhow::{Result, bail};
use clap::Parser;
use json_files::{
    build::{build_site, list_files},
    cli::{Cli, Commands},
    config::Config,
    log,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let result = match &cli.command {
        Commands::Build { clean, .. } => build_site(&config, *clean).map(|_| ()),
        Commands::List => list_files(&config).map(|keys| {
            for key in keys {
                println!("{key}");
            }
        }),
    };

    if let Err(err) = &result {
        log!("error"; "{:#}", err);
    }
    result
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<Config> {
    let root = cli.root.clone().unwrap_or_else(|| "./".into());
    let config_path = root.join(&cli.config);

    if !config_path.exists() {
        bail!("Config file not found: {}", config_path.display());
    }

    let mut config = Config::from_path(&config_path)?;
    config.update_with_cli(cli);
    config.validate()?;
    // only script data sources need it
    if let Err(err) = config.check_interpreter_installed() {
        log!("warn"; "{:#}", err);
    }

    log!("config"; "{}", config.config_path.display());
    Ok(config)
}
