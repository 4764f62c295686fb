use dotenv::dotenv;
use log::error;
use marktrack::config::Config;
use marktrack::crop;
use marktrack::display::WindowGuard;
use marktrack::error::Result;
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
    highgui::wait_key(0)?;
    Ok(())
}
