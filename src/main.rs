use {color_eyre::eyre::Result, e6finder::app::FinderApp};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    if let Some(app) = FinderApp::init().await? {
        app.run().await?;
    }

    Ok(())
}
