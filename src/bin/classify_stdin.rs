//! Reads markup from stdin and prints the extraction report as JSON.
//!
//! Usage: `classify_stdin <address> [final-address] < page.html`
//!
//! Logs go to stderr; set `RUST_LOG` to change the level.

use std::io::{self, Read};

use rs_adaptive_extract::pipeline::{self, FetchedPage};
use rs_adaptive_extract::{encoding, Options, Registry};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rs_adaptive_extract=info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(address) = args.next() else {
        eprintln!("usage: classify_stdin <address> [final-address] < page.html");
        std::process::exit(2);
    };
    let final_address = args.next();

    let mut bytes = Vec::new();
    if io::stdin().read_to_end(&mut bytes).is_err() {
        eprintln!("Failed to read from stdin");
        std::process::exit(1);
    }
    let markup = encoding::decode_markup(&bytes);

    let mut page = FetchedPage::new(&address, &markup);
    if let Some(final_address) = final_address.as_deref() {
        page = page.with_final_address(final_address);
    }

    match pipeline::process_with(&page, None, Registry::builtin(), &Options::default()) {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("Failed to serialize report: {err}");
                std::process::exit(1);
            }
        },
        Err(err) => {
            println!("{}", serde_json::json!({ "error": err.to_string() }));
            std::process::exit(1);
        }
    }
}
