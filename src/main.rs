#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    pitch_booking::run().await
}
