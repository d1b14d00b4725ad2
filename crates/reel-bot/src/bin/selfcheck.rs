use std::path::Path;

use reel_bot::BotConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = BotConfig::from_env()?;

    println!(
        "reel-selfcheck: starting with download_dir={}",
        config.download_dir.display()
    );
    ensure_download_dir(&config.download_dir).await?;

    println!("reel-selfcheck: ok");
    Ok(())
}

async fn ensure_download_dir<P: AsRef<Path>>(path: P) -> anyhow::Result<()> {
    let path = path.as_ref();
    tokio::fs::create_dir_all(path).await?;

    let marker = path.join(".reel-selfcheck");
    tokio::fs::write(&marker, b"ok")
        .await
        .map_err(|e| anyhow::anyhow!("download dir {} is not writable: {}", path.display(), e))?;
    tokio::fs::remove_file(&marker).await?;
    Ok(())
}
