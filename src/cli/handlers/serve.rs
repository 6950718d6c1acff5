//! Serve command handler
//!
//! Handles the serve command including dry-run validation and server startup.

use crate::config::Settings;
use crate::server::Server;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Run the server, or only validate when `dry_run` is set.
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Server startup errors (if not dry-run)
    pub async fn execute(self, dry_run: bool) -> anyhow::Result<()> {
        if dry_run {
            let summary = self.validate_only()?;
            println!("{}", summary);
            return Ok(());
        }

        Server::new(self.config).run().await
    }

    /// Validate configuration and describe what the server would do.
    pub fn validate_only(&self) -> anyhow::Result<String> {
        self.config.validate()?;

        Ok(format!(
            "✓ Configuration is valid\n\
             ✓ Server would bind to: {}\n\
             ✓ Request ids generated with: {}\n\
             ✓ Log level: {}",
            self.config.server.address(),
            self.config.request_id.generator,
            self.config.logger.level,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dry_run_succeeds_with_defaults() {
        let handler = ServeCommandHandler::new(Settings::default());
        assert!(handler.execute(true).await.is_ok());
    }

    #[test]
    fn test_summary_mentions_address_and_generator() {
        let handler = ServeCommandHandler::new(Settings::default());
        let summary = handler.validate_only().unwrap();
        assert!(summary.contains("127.0.0.1:3000"));
        assert!(summary.contains("uuid-v4"));
    }

    #[tokio::test]
    async fn test_dry_run_rejects_invalid_config() {
        let mut config = Settings::default();
        config.server.port = 0;

        let result = ServeCommandHandler::new(config).execute(true).await;
        assert!(result.is_err());
    }
}
