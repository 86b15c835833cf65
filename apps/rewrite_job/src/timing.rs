use std::fmt::Display;
use std::future::Future;
use std::time::Instant;

use tracing::Instrument;

/// Runs `operation` inside its own span and logs how long it took, whether
/// it succeeded or not.
pub async fn timed<F, T, E>(name: &'static str, operation: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    tracing::info!("Starting {}", name);
    let started = Instant::now();

    let result = operation
        .instrument(tracing::info_span!("operation", name))
        .await;

    let elapsed = started.elapsed().as_secs_f64();
    match &result {
        Ok(_) => tracing::info!("Completed {} in {:.3} seconds", name, elapsed),
        Err(e) => tracing::error!("{} failed after {:.3} seconds: {}", name, elapsed, e),
    }

    result
}
