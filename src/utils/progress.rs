/// Progress indicators for the long-running load and scan phases.
///
/// Bars draw on stderr so they never mix with the primary output stream.
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Create a line counter for streams of unknown length
pub fn create_counter(message: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg} {human_pos} lines ({per_sec}, {elapsed})")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb
}
