use std::{thread, time::Duration};

use clap::Parser;
use log::{error, info};

mod app;

use app::App;

/// Replicates the demo arena between a host and its clients over TCP
#[derive(Parser, Debug)]
#[command(name = "canopy-basic-demo", version)]
struct Args {
    /// Host the session instead of joining one
    #[arg(long)]
    host: bool,

    /// Stop after this many frames, run forever when unset
    #[arg(long, env = "CANOPY_TICKS")]
    ticks: Option<u64>,

    /// Frame length in milliseconds
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let frame = Duration::from_millis(args.frame_ms);

    let mut app = match App::new(args.host) {
        Ok(app) => app,
        Err(err) => {
            error!("{}", err);
            std::process::exit(1);
        }
    };

    let mut frames = 0u64;
    while app.is_running() && args.ticks.map_or(true, |limit| frames < limit) {
        app.update(frame);
        frames += 1;
        thread::sleep(frame);
    }

    info!("Stopped after {} frames\n{}", frames, app.outline());
}
