use super::{check_length, PublishError, Publisher};
use async_trait::async_trait;
use std::io::Write;

/// Dry-run publisher: prints each message to stdout instead of posting it
pub struct ConsolePublisher {
    max_length: usize,
}

impl ConsolePublisher {
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }
}

#[async_trait]
impl Publisher for ConsolePublisher {
    fn max_length(&self) -> usize {
        self.max_length
    }

    async fn publish(&self, text: &str) -> Result<(), PublishError> {
        check_length(text, self.max_length)?;

        let mut out = std::io::stdout().lock();
        writeln!(out, "{text}")?;
        writeln!(out, "{}", "-".repeat(40))?;
        out.flush()?;
        Ok(())
    }
}
