use clap::Parser;
use env_logger::{Builder, Env};
use log::error;
use ssg_paginate::cli::Args;

fn init_logger() {
    // RUST_LOG=debug shows every registered page
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    match ssg_paginate::run(Args::parse()) {
        Ok(output) if output.is_empty() => {}
        Ok(output) => println!("{output}"),
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    }
}
