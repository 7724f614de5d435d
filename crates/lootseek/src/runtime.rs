//! Process plumbing shared by the binaries: logging, Ctrl+C, exit codes.

use std::process::ExitCode;

use lootseek_search::{SearchError, StopFlag};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// Logs go to stderr so a stdout hit sink stays machine-readable. The
/// filter comes from `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Raises `stop` on the first Ctrl+C.
///
/// Signal delivery runs on a small current-thread runtime in a
/// background thread; the search itself never touches async code.
///
/// # Errors
///
/// Returns an error if the runtime or its thread cannot be created.
pub fn spawn_interrupt_handler(stop: StopFlag) -> std::io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    std::thread::Builder::new()
        .name("ctrl-c".into())
        .spawn(move || {
            runtime.block_on(async move {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        warn!("interrupt received, finishing in-flight seeds");
                        stop.request_stop();
                    }
                    Err(err) => warn!(error = %err, "cannot listen for Ctrl+C"),
                }
            });
        })?;
    Ok(())
}

/// Exit code for a failed run: the [`SearchError`] code if one is in the
/// chain, 1 otherwise.
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<SearchError>())
        .map_or(1, |e| e.exit_code() as u8)
}

/// Logs `err` and converts it to a process exit code.
#[must_use]
pub fn report_failure(err: &anyhow::Error) -> ExitCode {
    error!("{err:#}");
    ExitCode::from(exit_code_for(err))
}
