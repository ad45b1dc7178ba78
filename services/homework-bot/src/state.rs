//! In-memory polling state: watermark, last notification and failure streak

/// Number of consecutive failed cycles that triggers a warning
pub const FAILURE_WARN_THRESHOLD: u32 = 5;

/// State carried from one polling cycle to the next
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    pub watermark: i64,
    pub last_notification: Option<String>,
    pub consecutive_failures: u32,
}

impl PollState {
    pub fn new(watermark: i64) -> Self {
        Self {
            watermark,
            last_notification: None,
            consecutive_failures: 0,
        }
    }

    /// True when `message` is the one delivered most recently
    pub fn is_duplicate(&self, message: &str) -> bool {
        self.last_notification.as_deref() == Some(message)
    }

    pub fn remember(&mut self, message: String) {
        self.last_notification = Some(message);
    }

    /// Move the watermark to the server-reported date, keeping it when absent
    pub fn advance_watermark(&mut self, current_date: Option<i64>) {
        if let Some(date) = current_date {
            self.watermark = date;
        }
    }

    /// Count a failed cycle, returning the new streak length
    pub fn record_failure(&mut self) -> u32 {
        self.consecutive_failures += 1;
        self.consecutive_failures
    }

    pub fn record_success(&mut self) {
        self.consecutive_failures = 0;
    }
}
