use std::time::Duration;

/// Per-call context: the timeout going in, failure details coming out.
///
/// A controller is used for exactly one call and then dropped.
#[derive(Debug, Clone)]
pub struct Controller {
    timeout: Duration,
    log_id: u64,
    error: Option<(i32, String)>,
}

impl Controller {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(500);

    /// A controller with the default timeout and a random log id.
    pub fn new() -> Self {
        Self {
            timeout: Self::DEFAULT_TIMEOUT,
            log_id: rand::random(),
            error: None,
        }
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn set_log_id(&mut self, log_id: u64) {
        self.log_id = log_id;
    }

    /// Identifier sent with the request so client and server logs can be joined.
    pub fn log_id(&self) -> u64 {
        self.log_id
    }

    /// Mark the call as failed at the RPC level. The first failure wins.
    pub fn set_failed(&mut self, code: i32, text: impl Into<String>) {
        if self.error.is_none() {
            self.error = Some((code, text.into()));
        }
    }

    pub fn failed(&self) -> bool {
        self.error.is_some()
    }

    /// Errno-style code of the failure, 0 if the call did not fail.
    pub fn error_code(&self) -> i32 {
        self.error.as_ref().map_or(0, |(code, _)| *code)
    }

    pub fn error_text(&self) -> &str {
        self.error.as_ref().map_or("", |(_, text)| text.as_str())
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_controller() {
        let cntl = Controller::new();
        assert!(!cntl.failed());
        assert_eq!(cntl.error_code(), 0);
        assert_eq!(cntl.error_text(), "");
        assert_eq!(cntl.timeout(), Controller::DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_first_failure_wins() {
        let mut cntl = Controller::new();
        cntl.set_failed(111, "connection refused");
        cntl.set_failed(110, "timeout");
        assert!(cntl.failed());
        assert_eq!(cntl.error_code(), 111);
        assert_eq!(cntl.error_text(), "connection refused");
    }

    #[test]
    fn test_setters() {
        let mut cntl = Controller::new();
        cntl.set_timeout(Duration::from_secs(3));
        cntl.set_log_id(42);
        assert_eq!(cntl.timeout(), Duration::from_secs(3));
        assert_eq!(cntl.log_id(), 42);
    }
}
