use std::{
    collections::VecDeque,
    fmt::{self, Display, Formatter},
    sync::{Mutex, MutexGuard, OnceLock},
    time::Instant,
};

use log::{Log, Metadata, Record};

/// Most recent log lines, oldest dropped first
#[derive(Default)]
pub struct LogBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl LogBuffer {
    pub const fn new() -> Self {
        Self { lines: VecDeque::new(), capacity: 0 }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { lines: VecDeque::with_capacity(capacity), capacity }
    }

    pub fn push(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        while self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

impl Display for LogBuffer {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for line in self.lines.iter() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

static LOG_BUFFER: Mutex<LogBuffer> = Mutex::new(LogBuffer::new());
static START: OnceLock<Instant> = OnceLock::new();

pub struct Logger;

impl Log for Logger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let millis = START.get_or_init(Instant::now).elapsed().as_millis() as u32;
        let line = format!("[{:5}.{:03}] {}", millis / 1000, millis % 1000, record.args());
        println!("{}", line);
        get().push(line);
    }

    fn flush(&self) {}
}

pub fn get() -> MutexGuard<'static, LogBuffer> {
    LOG_BUFFER.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn init(capacity: usize) {
    START.get_or_init(Instant::now);
    *get() = LogBuffer::with_capacity(capacity);
    log::set_max_level(log::LevelFilter::Trace);
    log::set_logger(&Logger).ok();
}

mod test {
    #[test]
    fn test_log_buffer() {
        use super::LogBuffer;

        let mut buffer = LogBuffer::with_capacity(2);
        for line in ["a", "b", "c"] {
            buffer.push(line.to_string());
        }
        assert_eq!(buffer.lines().collect::<Vec<_>>(), vec!["b", "c"]);
        assert_eq!(buffer.to_string(), "b\nc\n");

        let mut disabled = LogBuffer::new();
        disabled.push("a".to_string());
        assert_eq!(disabled.lines().count(), 0);
    }

    #[test]
    #[serial]
    fn test_logger() {
        use super::{get, init};

        init(256);
        info!("Logger ready {}", 42);
        let buffer = get();
        let line = buffer.lines().find(|line| line.ends_with("] Logger ready 42"));
        assert!(line.map(|line| line.starts_with('[')).unwrap_or(false));
    }
}
