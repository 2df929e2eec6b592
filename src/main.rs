use clap::Parser;
use cvgen::app::{self, args::Arguments};

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let args = Arguments::parse();

    if let Err(e) = app::run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
