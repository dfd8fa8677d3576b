use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const SPINNER_TICK_MS: u64 = 80;

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}")
        .expect("Failed to create spinner style template")
}

/// Runs a fallible step behind a stderr spinner.
///
/// The spinner finishes with a check mark on success and is abandoned with a
/// cross on failure; the closure's result passes through untouched.
pub fn run_with_spinner<T, E, F>(message: &str, f: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
{
    let pb = ProgressBar::new_spinner()
        .with_style(spinner_style())
        .with_message(message.to_string());
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));

    let result = f();
    match &result {
        Ok(_) => pb.finish_and_clear(),
        Err(_) => pb.abandon_with_message(format!("✗ {message}")),
    }
    result
}
