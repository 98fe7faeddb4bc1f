use tracing_subscriber::EnvFilter;

fn main() {
    // Setup logging (set RUST_LOG=debug for per-action output)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = autocreator::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
