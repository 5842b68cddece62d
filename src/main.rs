use std::process;

fn main() {
    // Parse first: usage errors and --help never touch the logger or files.
    let config = match filter_records::parse_args(std::env::args_os()) {
        Ok(config) => config,
        Err(e) => e.exit(),
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = filter_records::run(&config) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
