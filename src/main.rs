use std::env;
use std::path::Path;

use cuda_bench_utils::query::{QuerySettings, SETTINGS_FILE};
use cuda_bench_utils::run_device_query;

fn main() {
    let settings = load_settings();
    if let Err(e) = run_device_query(&settings) {
        eprintln!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

fn load_settings() -> QuerySettings {
    let mut settings = match QuerySettings::load(Path::new(SETTINGS_FILE)) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Fatal error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = settings.apply_args(env::args().skip(1)) {
        eprintln!("{}", e);
        eprintln!("Usage: cuda_bench_utils [device_index] [--json] [--no-host-info]");
        std::process::exit(2);
    }

    settings
}
