use anyhow::Result;

mod api;
mod app;
mod features;
mod shared;
mod ui;
mod widgets;

#[cfg(test)]
mod widgets_tests;

#[tokio::main]
async fn main() -> Result<()> {
    // Silent failures (unreachable server, rejected calls) only show up in
    // the log, so enable it when asked; stderr would garble the alternate
    // screen if it were always on.
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    // Initialize the application
    let mut app = app::App::new()?;

    // Run the TUI
    app.run().await?;

    Ok(())
}
