use anyhow::Result;

use folio_core::AppConfig;

pub fn show(config: &AppConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

pub fn path() -> Result<()> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}

pub fn init(force: bool) -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() && !force {
        println!("Configuration already exists at {}", path.display());
        println!("Use --force to overwrite it with the defaults.");
        return Ok(());
    }

    AppConfig::default().save()?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
