use tvlux_plugin::{cli, logging, Cli};

fn main() {
    let logging_ready = match logging::init_logging() {
        Ok(()) => true,
        Err(err) => {
            eprintln!("tvlux-plugin: {:#}", err);
            false
        }
    };

    if let Err(err) = Cli::run_from_args() {
        if logging_ready {
            tracing::error!("{:#}", err);
        } else {
            eprintln!("tvlux-plugin error: {:#}", err);
        }
        std::process::exit(cli::exit_code(&err));
    }
}
