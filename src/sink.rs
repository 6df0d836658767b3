use std::io::Write;

use crate::error::ThinkingResult;

/// Destination for rendered thought blocks
#[cfg_attr(test, mockall::automock)]
pub trait ThoughtSink: Send + Sync {
    fn emit(&self, rendered: &str) -> ThinkingResult<()>;
}

/// Writes rendered thoughts to stderr. Stdout belongs to the MCP transport.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl ThoughtSink for StderrSink {
    fn emit(&self, rendered: &str) -> ThinkingResult<()> {
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "{}", rendered)?;
        Ok(())
    }
}
