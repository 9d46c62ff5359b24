use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = keylight::cli::Cli::parse();
    let exit_code = keylight::run(cli).await;
    std::process::exit(exit_code);
}
