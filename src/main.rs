// src/main.rs

use hybrid_polisher::{cli, logging, run};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = cli::parse();

    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("hybrid-polisher error: {err:?}");
        std::process::exit(1);
    }

    if let Err(err) = run(args).await {
        eprintln!("hybrid-polisher error: {err}");
        std::process::exit(err.exit_code());
    }
}
