//! Incremental rendering of cumulative relay output.
//!
//! The relay yields the whole reply so far with every item. A terminal can
//! only append, so [`StreamPrinter`] turns each item into the text that still
//! needs writing.

use tutor_runtime::relay::is_notice;

#[derive(Debug, Default)]
pub struct StreamPrinter {
    shown: String,
    reply: String,
}

impl StreamPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text to write for the next cumulative item.
    ///
    /// When `item` extends what is already on screen only the new suffix is
    /// returned; otherwise (a notice, or a retry restarting the reply) the
    /// item starts on a fresh line.
    pub fn update(&mut self, item: &str) -> String {
        let delta = match item.strip_prefix(self.shown.as_str()) {
            Some(suffix) => suffix.to_string(),
            None => format!("\n{item}"),
        };

        if !is_notice(item) {
            self.reply = item.to_string();
        }
        self.shown = item.to_string();
        delta
    }

    /// Latest reply text, ignoring status notices.
    pub fn reply(&self) -> &str {
        &self.reply
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_runtime::relay::{CANCELLED_NOTICE, retry_notice};

    #[test]
    fn test_cumulative_items_become_deltas() {
        let mut printer = StreamPrinter::new();
        assert_eq!(printer.update("I'm "), "I'm ");
        assert_eq!(printer.update("I'm good, thanks!"), "good, thanks!");
        assert_eq!(printer.reply(), "I'm good, thanks!");
    }

    #[test]
    fn test_repeated_item_writes_nothing() {
        let mut printer = StreamPrinter::new();
        printer.update("Hello");
        assert_eq!(printer.update("Hello"), "");
    }

    #[test]
    fn test_notice_starts_new_line() {
        let mut printer = StreamPrinter::new();
        printer.update("Hel");
        assert_eq!(
            printer.update(CANCELLED_NOTICE),
            format!("\n{CANCELLED_NOTICE}")
        );
        assert_eq!(printer.reply(), "Hel");
    }

    #[test]
    fn test_restart_after_retry() {
        let notice = retry_notice(&"connection refused");
        let mut printer = StreamPrinter::new();

        assert_eq!(printer.update(&notice), notice);
        assert_eq!(printer.update("Hi"), "\nHi");
        assert_eq!(printer.update("Hi there"), " there");
        assert_eq!(printer.reply(), "Hi there");
    }

    #[test]
    fn test_notice_only_leaves_reply_empty() {
        let mut printer = StreamPrinter::new();
        assert_eq!(printer.update(CANCELLED_NOTICE), CANCELLED_NOTICE);
        assert_eq!(printer.reply(), "");
    }
}
