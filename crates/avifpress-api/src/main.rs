use avifpress_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    avifpress_api::telemetry::init_telemetry();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (directories, converter, reaper, routes)
    let (_state, router, reaper_handle) = avifpress_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    avifpress_api::setup::server::start_server(&config, router).await?;

    // The reaper is owned by the process lifecycle: stop it on shutdown.
    reaper_handle.abort();

    Ok(())
}
