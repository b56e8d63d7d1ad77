use anyhow::Result;

use smoothscroll_core::{style::scrollbar_css, FileStore, Settings};

pub async fn run(store: &FileStore) -> Result<()> {
    let settings = Settings::load(store).await?;

    match scrollbar_css(&settings) {
        Some(css) => println!("{}", css),
        None => println!("/* host default scrollbars: nothing to inject */"),
    }

    Ok(())
}
