/// Native demo entry point: mounts the configured page into an in-memory document,
/// replays a short session and prints the resulting markup.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;
    use tally::PageConfig;

    let path = std::env::args().nth(1).map(PathBuf::from);
    let config = match PageConfig::load_or_default(path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load page config: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = tally::init_logging(config.log_level) {
        eprintln!("{}", e);
    }

    match tally::run_demo(&config) {
        Ok(markup) => println!("{}", markup),
        Err(e) => {
            log::error!("Demo failed: {}", e);
            std::process::exit(1);
        }
    }
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}
