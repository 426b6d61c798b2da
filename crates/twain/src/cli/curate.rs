//! Dashboard commands.

use super::commands::OutputFormat;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use twain::{
    AuthSession, ConnectionState, Dashboard, DashboardSettings, DashboardView, GenerationClient,
    QuestionGroup, QuestionGroupStore, RetryPolicy, StaticTokenSource, StoreBackend, StoreError,
    StoreErrorKind, StoreSettings, TwainConfig, TwainResult, build_store,
};

/// Logged when a curation command opens a process-local store.
pub const MEMORY_STORE_WARNING: &str = "store.backend is \"memory\": this command sees an empty \
     store private to this process, not the service's groups; set backend = \"firestore\"";

/// The warning a curation command should log for these store settings.
pub fn memory_store_warning(settings: &StoreSettings) -> Option<&'static str> {
    match settings.backend {
        StoreBackend::Memory => Some(MEMORY_STORE_WARNING),
        StoreBackend::Firestore => None,
    }
}

fn open_store(config: &TwainConfig) -> TwainResult<Arc<dyn QuestionGroupStore>> {
    if let Some(message) = memory_store_warning(&config.store) {
        warn!("{}", message);
    }
    build_store(&config.store)
}

/// Retry policy from `[dashboard]`.
pub fn retry_policy(settings: &DashboardSettings) -> RetryPolicy {
    RetryPolicy {
        max_retries: settings.max_retries,
        base_delay: Duration::from_millis(settings.base_delay_ms),
    }
}

/// Wire a dashboard from configuration.
pub fn open_dashboard(config: &TwainConfig) -> TwainResult<Dashboard> {
    let settings = &config.dashboard;
    if settings.token.is_none() {
        warn!("No dashboard.token configured; generation requests will be rejected");
    }
    let source = StaticTokenSource::new(settings.token.clone().unwrap_or_default());
    let session = AuthSession::new(settings.user_id.clone(), Arc::new(source));
    Ok(Dashboard::new(
        open_store(config)?,
        session,
        GenerationClient::new(settings.endpoint.clone())?,
        retry_policy(settings),
    ))
}

/// Connect and wait for the first snapshot.
async fn connect_live(dashboard: &Dashboard) -> TwainResult<DashboardView> {
    let mut rx = dashboard.watch();
    dashboard.connect();
    let view = match rx
        .wait_for(|view| view.state == ConnectionState::Live || view.state.is_errored())
        .await
    {
        Ok(view) => view.clone(),
        Err(e) => {
            warn!(error = %e, "Live view closed");
            return Err(StoreError::new(StoreErrorKind::Cancelled).into());
        }
    };
    match view.state {
        ConnectionState::Errored(message) => {
            Err(StoreError::new(StoreErrorKind::Unavailable(message)).into())
        }
        _ => Ok(view),
    }
}

fn print_groups(groups: &[QuestionGroup], format: OutputFormat) -> TwainResult<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(groups)
                .map_err(|e| StoreError::new(StoreErrorKind::InvalidDocument(e.to_string())))?;
            println!("{}", json);
        }
        OutputFormat::Human => {
            for group in groups {
                println!("[{}] {} ({})", group.order, group.title, group.id);
                println!("    {} / {}", group.theme, group.difficulty);
                for question in &group.questions {
                    println!("    - {}", question);
                }
                println!("{:-<80}", "");
            }
            println!("Total: {} question groups", groups.len());
        }
    }
    Ok(())
}

/// `twain generate`.
pub async fn generate(config: &TwainConfig) -> TwainResult<()> {
    let dashboard = open_dashboard(config)?;
    let group = dashboard.generate().await?;
    print_groups(std::slice::from_ref(&group), OutputFormat::Human)
}

/// `twain batch`.
pub async fn batch(config: &TwainConfig, count: usize) -> TwainResult<()> {
    let dashboard = open_dashboard(config)?;
    let groups = dashboard.generate_batch(count).await?;
    if groups.len() < count {
        warn!(requested = count, produced = groups.len(), "Batch came back short");
    }
    print_groups(&groups, OutputFormat::Human)
}

/// `twain list`.
pub async fn list(config: &TwainConfig, format: OutputFormat) -> TwainResult<()> {
    let store = open_store(config)?;
    let groups = store.list_ordered().await?;
    print_groups(&groups, format)
}

/// `twain move`.
pub async fn move_group(config: &TwainConfig, id: &str, position: usize) -> TwainResult<()> {
    let dashboard = open_dashboard(config)?;
    let view = connect_live(&dashboard).await?;

    let Some(from) = view.groups.iter().position(|group| group.id == id) else {
        return Err(StoreError::new(StoreErrorKind::NotFound(id.to_string())).into());
    };
    let to = position.min(view.groups.len().saturating_sub(1));

    let report = dashboard.reorder(from, to).await;
    dashboard.disconnect();
    if report.is_complete() {
        info!(group_id = %id, position = to, writes = report.attempted, "Group moved");
    } else {
        warn!(failed = ?report.failed, "Some order writes failed; run the move again to repair");
    }
    Ok(())
}

/// `twain delete`.
pub async fn delete(config: &TwainConfig, id: &str) -> TwainResult<()> {
    let dashboard = open_dashboard(config)?;
    dashboard.delete(id).await?;
    info!(group_id = %id, "Group deleted");
    Ok(())
}

/// `twain probe`.
pub async fn probe(config: &TwainConfig) -> TwainResult<()> {
    let dashboard = open_dashboard(config)?;
    let id = dashboard.test_write().await?;
    println!("Test write succeeded: {}", id);
    Ok(())
}

/// `twain watch`: print the view on every change until Ctrl-C or the
/// connection gives up.
pub async fn watch(config: &TwainConfig) -> TwainResult<()> {
    let dashboard = open_dashboard(config)?;
    let mut rx = dashboard.watch();
    dashboard.connect();

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = rx.borrow_and_update().clone();
                match &view.state {
                    ConnectionState::Live => {
                        println!("{}", "=".repeat(80));
                        print_groups(&view.groups, OutputFormat::Human)?;
                    }
                    ConnectionState::Errored(message) => {
                        eprintln!("{}", message);
                        break;
                    }
                    other => info!(state = %other, "Connection state changed"),
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    dashboard.disconnect();
    Ok(())
}
