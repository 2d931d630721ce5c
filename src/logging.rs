use std::io::{self, Write};

use flexi_logger::{DeferredNow, FlexiLoggerError, Logger, LoggerHandle};
use log::Record;

/// Start the stderr logger. Keep the handle alive for the whole run.
pub fn init_logger(spec: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_str(spec)?
        .log_to_stderr()
        .format(log_format)
        .start()
}

fn log_format(write: &mut dyn Write, _now: &mut DeferredNow, record: &Record) -> io::Result<()> {
    write!(
        write,
        "{:5} [{}] {}",
        record.level(),
        record.module_path().unwrap_or("<unknown>"),
        &record.args()
    )
}
