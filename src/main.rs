#[tokio::main]
async fn main() -> anyhow::Result<()> {
    timesheets_lib::run().await
}
