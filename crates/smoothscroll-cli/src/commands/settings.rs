use anyhow::Result;
use tracing::info;

use smoothscroll_core::{
    schema::{Section, SETTINGS},
    FileStore, Settings,
};

pub async fn show(store: &FileStore) -> Result<()> {
    let settings = Settings::load(store).await?;

    println!("Settings ({}):", store.path().display());

    let mut section: Option<Section> = None;
    for def in SETTINGS {
        if section != Some(def.section) {
            section = Some(def.section);
            println!("\n  {}", def.section.title());
        }
        println!("    {:<34} {}", def.key, settings.get(def.key)?);
    }

    Ok(())
}

pub async fn get(store: &FileStore, key: &str) -> Result<()> {
    let settings = Settings::load(store).await?;
    println!("{}", settings.get(key)?);
    Ok(())
}

pub async fn set(store: &FileStore, key: &str, value: &str) -> Result<()> {
    let mut settings = Settings::load(store).await?;
    settings.set(key, value)?;
    settings.save(store).await?;

    info!(key, "Setting saved");
    println!("{} = {}", key, settings.get(key)?);
    Ok(())
}

pub async fn reset(store: &FileStore) -> Result<()> {
    Settings::default().save(store).await?;
    println!("Settings reset to defaults in {}", store.path().display());
    Ok(())
}
