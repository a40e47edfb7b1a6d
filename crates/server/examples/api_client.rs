//! Minimal client for the tunetag HTTP API.
//!
//! Run the server, then:
//!
//! ```text
//! cargo run -p tunetag-server --example api_client -- clip.mp3
//! ```

use reqwest::Client;

const SERVER_URL: &str = "http://127.0.0.1:3737";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: api_client <audio-file>"))?;

    let client = Client::new();

    let resp = client.get(format!("{SERVER_URL}/health")).send().await?;
    println!("health: {} {}", resp.status(), resp.text().await?);

    let audio = std::fs::read(&path)?;
    let resp = client
        .post(format!("{SERVER_URL}/recognize"))
        .header("Content-Type", "application/octet-stream")
        .body(audio)
        .send()
        .await?;

    println!("recognize: {}", resp.status());
    println!("{}", resp.text().await?);

    Ok(())
}
