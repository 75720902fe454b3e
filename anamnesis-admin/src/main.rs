// Anamnesis Admin - management client for anamnesis intake forms
// Entry point and application setup

use anamnesis_admin::app::{self, Route};
use anamnesis_admin::config::AppConfig;
use anamnesis_admin::table::{anamnesis_columns, TablePagination};
use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "anamnesis_admin=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Anamnesis Admin");

    let config = AppConfig::from_env().context("invalid configuration")?;
    let state = app::setup(config).context("failed to initialize application")?;

    // Open the list view, the application's landing route
    let mut list = state.list_view();
    list.load()
        .await
        .context("failed to load anamnesis forms")?;

    let table = TablePagination::new(anamnesis_columns(), list.filtered());
    tracing::info!(
        "{} anamnesis forms, page {} of {}",
        table.row_count(),
        table.page_index() + 1,
        table.page_count()
    );

    for form in table.page() {
        tracing::info!(
            "{} | {} | {}",
            form.title,
            form.description,
            Route::Detail(form.id).path()
        );
    }

    list.unmount();
    Ok(())
}
