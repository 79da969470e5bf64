//! Flamingo - Entry Point
//!
//! Loads the asset PNGs, registers them into the PPU tables, and starts
//! the SDL2 game loop.

use std::env;
use std::process;

use anyhow::{anyhow, Result};

use flamingo::game::{Game, GameAssets};
use flamingo::ui::Ui;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let asset_dir = args.get(1).map(String::as_str).unwrap_or("assets");

    if let Err(e) = run(asset_dir) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(asset_dir: &str) -> Result<()> {
    let assets = GameAssets::load(asset_dir)?;
    let mut game = Game::new(&assets)?;
    let mut ui = Ui::new().map_err(|e| anyhow!(e))?;
    ui.run(&mut game).map_err(|e| anyhow!(e))?;
    Ok(())
}
