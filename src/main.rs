use anyhow::{anyhow, Context, Result};
use clap::Parser;

use keybinds::cli::{self, CliArgs, Command};
use keybinds::{InputConfig, JsonFileStore};

fn main() -> Result<()> {
    keybinds::tracing::init();

    let args = CliArgs::parse();
    match args.command {
        Command::List => {
            let path = match args.store {
                Some(path) => path,
                None => InputConfig::load()
                    .store_path()
                    .context("No config directory available for the bind store")?,
            };
            let store = JsonFileStore::load(&path)
                .with_context(|| format!("Failed to open bind store {}", path.display()))?;
            let lines = cli::list(&store);
            if lines.is_empty() {
                eprintln!("No binds saved in {}", path.display());
            }
            for line in lines {
                println!("{}", line);
            }
        }
        Command::Encode { chord } => println!("{}", cli::encode(&chord).map_err(|e| anyhow!(e))?),
        Command::Decode { data } => println!("{}", cli::decode(&data).map_err(|e| anyhow!(e))?),
        Command::Config(changes) => {
            let path = keybinds::config_paths::config_file()
                .context("No config directory available")?;
            print!("{}", cli::configure(&path, &changes).map_err(|e| anyhow!(e))?);
        }
    }

    Ok(())
}
