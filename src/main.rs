use dotenv::dotenv;
use log::error;
use marktrack::config::Config;
use marktrack::display::WindowGuard;
use marktrack::error::Result;
use marktrack::{crop, track};
use opencv::highgui;

fn main() {
    // Initialize the logger
    dotenv().ok();
    env_logger::init();

    let cfg = Config::from_env();
    if let Err(e) = run(&cfg) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cfg: &Config) -> Result<()> {
    let _windows = WindowGuard;

    crop::run(cfg)?;
    track::run(cfg)?;

    // Keep the crop windows up until a final key press.
    highgui::wait_key(0)?;
    Ok(())
}
