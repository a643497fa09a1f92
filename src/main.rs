mod app;
mod ui;

use std::sync::Arc;

use eframe::egui;
use folio_view::config::{Anchor, LoadMode};
use folio_view::net::HttpFetcher;
use folio_view::Config;

use app::FolioApp;

const USAGE: &str =
    "usage: folio-view [--eager] [--top-edge] [--manifest PATH] [BASE_URL[#FRAGMENT]]";

fn main() {
    env_logger::init();

    let (config, fragment) = match parse_args(std::env::args().skip(1)) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    let fetcher = match HttpFetcher::new() {
        Ok(fetcher) => Arc::new(fetcher),
        Err(e) => {
            log::error!("cannot start: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("site {} (start at #{})", config.base_url, fragment);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1024.0, 768.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "folio-view",
        options,
        Box::new(move |_cc| Ok(Box::new(FolioApp::new(config, fetcher, &fragment)))),
    );
    if let Err(e) = result {
        log::error!("eframe exited with an error: {}", e);
        std::process::exit(1);
    }
}

/// Build the session config and starting fragment from the command line.
fn parse_args(args: impl IntoIterator<Item = String>) -> Result<(Config, String), String> {
    let mut config = Config::default();
    let mut fragment = String::new();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--eager" => config = config.with_load_mode(LoadMode::Eager),
            "--top-edge" => config = config.with_anchor(Anchor::TopEdge),
            "--manifest" => {
                let path = args.next().ok_or("--manifest needs a path")?;
                config = config.with_manifest_path(path);
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option {}", flag)),
            address => {
                let (base, frag) = split_location(address);
                config = config.with_base_url(base);
                fragment = frag.to_string();
            }
        }
    }
    Ok((config, fragment))
}

/// Split a page address into the site base and its fragment.
fn split_location(arg: &str) -> (&str, &str) {
    arg.split_once('#').unwrap_or((arg, ""))
}
