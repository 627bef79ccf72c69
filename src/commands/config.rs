//! Config subcommands handler

use anyhow::Result;

use failprompt::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    print!("{}", render(&config)?);
    Ok(())
}

/// Print where the config file is read from.
#[cfg(not(tarpaulin_include))]
pub fn handle_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}

pub(crate) fn render(config: &Config) -> Result<String> {
    Ok(toml::to_string_pretty(config)?)
}
