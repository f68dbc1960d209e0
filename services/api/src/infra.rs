use metrics_exporter_prometheus::PrometheusHandle;
use placement::candidates::CsvPersistence;
use placement::config::AppConfig;
use placement::error::AppError;
use placement::PlacementSession;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Opens the CSV-backed session named by the configuration.
pub(crate) fn open_session(
    config: &AppConfig,
) -> Result<PlacementSession<CsvPersistence>, AppError> {
    let path = &config.storage.data_path;
    info!(path = %path.display(), "loading candidates");
    let session = PlacementSession::open(CsvPersistence::new(path))?;
    Ok(session)
}
