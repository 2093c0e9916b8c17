//! Shows the debug log of the core while commands run, including filter
//! faults that LIST swallows.

use xbase::logging::LogConfig;
use xbase::{Config, Session};

fn main() -> xbase::Result<()> {
    // debug level to stderr, listings stay on stdout
    let _guard = LogConfig::debug().init()?;

    println!("=== xbase Logging Demo ===\n");

    let mut session = Session::new(&Config::new().with_autosave(false));
    for line in [
        "USE PARTS",
        "ADD FIELD SKU C 6",
        "ADD FIELD QTY N 4",
        "ADD RECORD A-100 12",
        "ADD RECORD A-200 many",
        "LIST ALL FOR QTY > 5",
        "LIST ALL FOR QTY >",
    ] {
        println!(". {}", line);
        for out in session.execute(line).lines {
            println!("{}", out);
        }
    }

    println!("\n=== Demo Complete ===");
    println!("The debug lines on stderr show the skipped records.");
    Ok(())
}
