use chrono::{DateTime, Utc};
use crossterm::{
    cursor::MoveToColumn,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::fmt;
use std::io::{self, stdout, Write};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MessageType {
    Error,
    Warning,
    Info,
    Priority,
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message_type_str = match self {
            MessageType::Error => "Error",
            MessageType::Warning => "Warning",
            MessageType::Info => "Info",
            MessageType::Priority => "Priority",
        };
        f.pad(message_type_str)
    }
}

impl MessageType {
    fn color(&self) -> &'static str {
        match self {
            MessageType::Error => "\x1b[31m",
            MessageType::Warning => "\x1b[33m",
            MessageType::Info => "\x1b[0m",
            MessageType::Priority => "\x1b[32m",
        }
    }
}

#[derive(Clone, Debug)]
pub struct StatusMessage {
    pub timestamp: DateTime<Utc>,
    pub message_type: MessageType,
    pub content: String,
}

impl StatusMessage {
    pub fn new(message_type: MessageType, content: String) -> Self {
        StatusMessage {
            timestamp: Utc::now(),
            message_type,
            content,
        }
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {:^8} | {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.message_type,
            self.content
        )
    }
}

/// Bounded log of operator messages.
///
/// In headless mode every message is also printed, colored by type. A live
/// statistics line drawn with [MessageLog::live] is moved out of the way first.
#[derive(Debug)]
pub struct MessageLog {
    messages: Vec<StatusMessage>,
    headless: bool,
    max_size: usize,
    live_line: bool,
}

impl MessageLog {
    pub fn new(headless: bool, max_size: Option<usize>) -> Self {
        MessageLog {
            messages: Vec::new(),
            headless,
            max_size: max_size.unwrap_or(500),
            live_line: false,
        }
    }

    pub fn add_message(&mut self, message: StatusMessage) {
        if self.messages.len() == self.max_size {
            self.messages.remove(0);
        }

        if self.headless {
            if self.live_line {
                println!();
                self.live_line = false;
            }
            let white = "\x1b[0m";
            println!("{}{}{}", message.message_type.color(), message, white);
        }

        self.messages.push(message);
    }

    pub fn info(&mut self, content: impl Into<String>) {
        self.add_message(StatusMessage::new(MessageType::Info, content.into()));
    }

    pub fn warning(&mut self, content: impl Into<String>) {
        self.add_message(StatusMessage::new(MessageType::Warning, content.into()));
    }

    pub fn error(&mut self, content: impl Into<String>) {
        self.add_message(StatusMessage::new(MessageType::Error, content.into()));
    }

    pub fn priority(&mut self, content: impl Into<String>) {
        self.add_message(StatusMessage::new(MessageType::Priority, content.into()));
    }

    /// Redraw the in-place status line. Not stored in the log.
    pub fn live(&mut self, line: &str) -> io::Result<()> {
        if !self.headless {
            return Ok(());
        }
        let mut out = stdout();
        queue!(
            out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(line)
        )?;
        out.flush()?;
        self.live_line = true;
        Ok(())
    }

    /// Terminate a pending live line so following output starts on a fresh line.
    pub fn finish_live(&mut self) {
        if self.live_line {
            println!();
            self.live_line = false;
        }
    }

    pub fn get_all_messages(&self) -> Vec<StatusMessage> {
        self.messages.clone()
    }

    pub fn count(&self, message_type: MessageType) -> usize {
        self.messages
            .iter()
            .filter(|message| message.message_type == message_type)
            .count()
    }

    pub fn size(&self) -> usize {
        self.messages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_is_bounded() {
        let mut log = MessageLog::new(false, Some(3));
        for idx in 0..5 {
            log.info(format!("message {idx}"));
        }
        assert_eq!(log.size(), 3);
        assert_eq!(log.get_all_messages()[0].content, "message 2");
    }

    #[test]
    fn test_count_by_type() {
        let mut log = MessageLog::new(false, None);
        log.info("starting");
        log.error("first");
        log.error("second");
        log.warning("careful");
        assert_eq!(log.count(MessageType::Error), 2);
        assert_eq!(log.count(MessageType::Priority), 0);
    }

    #[test]
    fn test_message_format() {
        let message = StatusMessage::new(MessageType::Warning, "Low rate".to_string());
        let rendered = message.to_string();
        assert!(rendered.ends_with("| Warning  | Low rate"));
        assert!(rendered.contains(" UTC | "));
    }
}
