//! Log setup and end-of-run console output.

use super::job::RunSummary;

/// Installs the global tracing subscriber on stderr.
///
/// `RUST_LOG` wins over `default_level`. A second call is a no-op.
pub(crate) fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

/// One line per list plus the destination folder.
pub(crate) fn format_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    for batch in summary.batches() {
        out.push_str(&format!(
            "{}: {}/{} downloaded",
            batch.prefix,
            batch.completed(),
            batch.attempted
        ));
        if batch.failed > 0 {
            out.push_str(&format!(", {} failed", batch.failed));
        }
        out.push('\n');
    }
    out.push_str(&format!("Saved to {}", summary.output_dir.display()));
    out
}

pub(crate) fn print_summary(summary: &RunSummary) {
    println!("{}", format_summary(summary));
}
