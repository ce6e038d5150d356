use anyhow::{Context, Result};
use chatpdf_config::Config;

pub fn handle_config(config: &Config) -> Result<()> {
    let rendered = toml::to_string_pretty(config).context("failed to render configuration")?;
    print!("{}", rendered);
    Ok(())
}
