#[tokio::main]
async fn main() {
    if let Err(e) = medipredict_lib::run().await {
        tracing::error!("{e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
