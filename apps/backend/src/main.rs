#[tokio::main]
async fn main() -> anyhow::Result<()> {
    listening_hub_backend::run().await
}
