use clap::Parser;
use sketchboard_app::{AppError, Cli};

fn main() -> Result<(), AppError> {
    env_logger::init();
    log::info!("Starting sketchboard");
    sketchboard_app::execute(Cli::parse())
}
