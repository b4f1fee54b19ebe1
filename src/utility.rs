use indicatif::{ProgressBar, ProgressStyle};
use tracing::Level;

use crate::graphs::Distance;

pub fn get_progressbar(job_name: &str, len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_message(job_name.to_string());
    bar.set_style(
        ProgressStyle::with_template(" {msg} {wide_bar} estimated remaining: {eta_precise}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

/// Installs the fmt subscriber used by all binaries.
pub fn init_tracing(debug: bool) {
    tracing_subscriber::fmt()
        .with_max_level(if debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();
}

/// Renders a distance for table output, `inf` for unreachable pairs.
pub fn format_distance(distance: Distance) -> String {
    if distance.is_finite() {
        format!("{}", distance)
    } else {
        "inf".to_string()
    }
}
