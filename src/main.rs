mod analysis;
mod app;
mod color;
mod config;
mod data;
mod figure;
mod ui;

use anyhow::Result;

use analysis::{correlation, european, sweetness};
use config::EUROPEAN_QUALITY;

fn main() -> Result<()> {
    env_logger::init();

    let dataset = data::loader::load()?;

    sweetness::run(&dataset)?;
    correlation::run(&dataset)?;
    european::run(&dataset, &EUROPEAN_QUALITY)?;

    Ok(())
}
