use colored::{ColoredString, Colorize};
use env_logger::{Builder, Env};
use std::io::Write;
use std::time::Duration;

/// Target whose records are printed without timestamp and target prefix.
pub const SKIP_FORMAT: &str = "SKIP_FORMAT";

/// Install the global logger: `HH:MM:SS target message`, filter from
/// `RUST_LOG` (default `info`).
pub fn init_logging(quiet: bool) {
    let logging_env = Env::default().filter_or("RUST_LOG", if quiet { "warn" } else { "info" });
    Builder::from_env(logging_env)
        .format(|buf, record| {
            if record.target() == SKIP_FORMAT {
                return writeln!(buf, "{}", record.args());
            }

            let target = record.target().to_ascii_lowercase();
            let target = match record.level() {
                log::Level::Error => target.bold().red(),
                log::Level::Warn => target.bold().yellow(),
                _ => target.bold().bright_yellow(),
            };
            writeln!(
                buf,
                "{} {} {}",
                chrono::Local::now().format("%H:%M:%S").to_string().dimmed(),
                target,
                record.args()
            )
        })
        .init();
}

/// Human-readable duration, yellow past 100ms and red past 500ms.
pub fn format_elapsed_time(elapsed: Duration) -> ColoredString {
    match elapsed.as_secs() {
        secs if secs > 2 => format!("{}m {}s", secs / 60, secs % 60).red(),
        secs if secs > 0 => format!("{}s", secs).yellow(),
        _ => match elapsed.as_millis() {
            millis if millis > 500 => format!("{}ms", millis).red(),
            millis if millis > 100 => format!("{}ms", millis).yellow(),
            millis if millis > 0 => format!("{}ms", millis).normal(),
            _ => format!("{}μs", elapsed.as_micros()).normal(),
        },
    }
}
