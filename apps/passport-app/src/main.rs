//! # Museum Passport Cart Shell
//!
//! Drives the boutique cart from stdin, one command per line, printing the
//! JSON payloads the mobile UI would receive.
//!
//! ```text
//! $ passport-app [config.toml]
//! add 1 2
//! {"items":[...],"totals":{"itemCount":1,"totalQuantity":2,...},"isOpen":false,...}
//! currency XOF
//! ...
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use passport_app::config::AppConfig;
use passport_app::shell::{self, HELP};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    passport_app::init_tracing();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::load_or_default(config_path);
    let app = passport_app::bootstrap(config)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", HELP)?;

    for line in stdin.lock().lines() {
        let line = line?;
        match shell::run_line(&line, &app.catalog, &app.cart) {
            Some(output) => writeln!(stdout, "{}", output)?,
            None if is_quit(&line) => break,
            None => {}
        }
        stdout.flush()?;
    }

    info!("Shell closed");
    Ok(())
}

fn is_quit(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "quit" | "exit")
}
