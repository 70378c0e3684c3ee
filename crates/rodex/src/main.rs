#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rodex_lib::main().await
}
