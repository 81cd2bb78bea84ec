//! Write-only sink for request/response dumps.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Shared destination for traffic dumps. Cloning shares the writer.
#[derive(Clone)]
pub struct TraceSink {
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl TraceSink {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Write one dump followed by a blank line and flush.
    pub fn write_dump(&self, dump: &str) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| io::Error::other("trace sink lock poisoned"))?;
        writeln!(writer, "{dump}")?;
        writeln!(writer)?;
        writer.flush()
    }
}

impl fmt::Debug for TraceSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceSink").finish_non_exhaustive()
    }
}
