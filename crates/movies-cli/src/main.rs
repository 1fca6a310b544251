#[tokio::main]
async fn main() {
    if let Err(e) = movies_cli::run(std::env::args().collect()).await {
        eprintln!("{e:#}");
        std::process::exit(movies_cli::exit_code(&e));
    }
}
