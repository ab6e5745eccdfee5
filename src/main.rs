use anyhow::Context;
use chrono::Utc;

use bitrise_build_analytics::analytics::summarize;
use bitrise_build_analytics::client::BitriseApi;
use bitrise_build_analytics::config::Config;
use bitrise_build_analytics::window::DateWindow;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    log::debug!("Using {config:?}");
    let api = BitriseApi::new(config)?;

    let mut histories = vec![];
    for window in DateWindow::last_three_months(Utc::now()) {
        let history = api
            .get_builds(&window)
            .await
            .with_context(|| format!("Cannot download builds after {}", window.after))?;
        log::info!(
            "Downloaded {} builds between {} and {}",
            history.builds.len(),
            window.after,
            window.before
        );
        histories.push(history);
    }

    for history in &histories {
        match summarize(history) {
            Ok(Some(report)) => println!("{report}"),
            Ok(None) => {}
            Err(error) => log::warn!("Skipping report: {error}"),
        }
    }

    Ok(())
}
