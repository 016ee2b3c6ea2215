//! Console interaction during manual login.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};

/// The one recognized control token during the manual-login wait.
pub fn is_skip_token(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("skip")
}

/// Blocking user interaction, abstracted so the orchestrator's skip/verify
/// branches can be driven from tests.
#[async_trait]
pub trait UserPrompt: Send {
    /// Show `message` and block until one line of input arrives.
    async fn read_line(&mut self, message: &str) -> std::io::Result<String>;

    /// Yes/no question; anything but an explicit yes is a no.
    async fn confirm(&mut self, message: &str) -> std::io::Result<bool> {
        let line = self.read_line(message).await?;
        let answer = line.trim().to_lowercase();
        Ok(answer == "y" || answer == "yes")
    }
}

/// Production prompt: messages to stderr, input from stdin.
///
/// The read blocks indefinitely; manual login has no fixed duration, so the
/// only ways out are a line of input or process exit.
pub struct StdinPrompt;

#[async_trait]
impl UserPrompt for StdinPrompt {
    async fn read_line(&mut self, message: &str) -> std::io::Result<String> {
        eprintln!("{message}");
        let mut line = String::new();
        BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_token_variants() {
        assert!(is_skip_token("skip"));
        assert!(is_skip_token("SKIP"));
        assert!(is_skip_token("  skip\n"));
        assert!(is_skip_token("Skip"));
    }

    #[test]
    fn test_non_skip_inputs() {
        assert!(!is_skip_token(""));
        assert!(!is_skip_token("done"));
        assert!(!is_skip_token("skipped"));
        assert!(!is_skip_token("s kip"));
    }
}
