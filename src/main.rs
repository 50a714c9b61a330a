// Entry point for the Minesweeper TUI application
// Loads persisted settings, validates the startup configuration, runs the UI

use std::error::Error;
use std::process;

use xsaper::xsp_config::load_or_create;
use xsaper::xsp_lang::Lang;
use xsaper::xsp_ui;

fn main() -> Result<(), Box<dyn Error>> {
    // Load or create user settings (board dimensions, mine count, language)
    let mut settings = load_or_create();

    // Initialize language resources based on saved or system language
    let lang = Lang::new(&settings.language);

    // A settings file edited to out-of-range dimensions aborts startup
    if let Err(e) = settings.board_config() {
        eprintln!("{}: {}", lang.assets.err_startup, e);
        process::exit(1);
    }

    // Launch the main UI loop
    xsp_ui::run(&mut settings, &lang)
}
