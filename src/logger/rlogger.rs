use colored::*;
use log::{Level, LevelFilter, Metadata, Record};
use std::collections::HashMap;
use std::io::Write;
use std::sync::Mutex;

/// 带级别标签的终端日志，输出到 stderr，结果数据走 stdout
pub struct Logger {
    use_colors: bool,
    max_level: LevelFilter,
    labels: HashMap<Level, &'static str>,
    mutex: Mutex<()>,
}

impl Logger {
    pub fn new(max_level: LevelFilter, use_colors: bool) -> Self {
        let mut labels = HashMap::new();
        labels.insert(Level::Error, "ERR");
        labels.insert(Level::Warn, "WRN");
        labels.insert(Level::Info, "INF");
        labels.insert(Level::Debug, "DBG");
        labels.insert(Level::Trace, "VER");

        Logger {
            use_colors,
            max_level,
            labels,
            mutex: Mutex::new(()),
        }
    }

    pub fn max_level(&self) -> LevelFilter {
        self.max_level
    }

    fn wrap(&self, label: &str, level: Level) -> String {
        if !self.use_colors {
            return label.to_string();
        }

        match level {
            Level::Error => label.red().bold().to_string(),
            Level::Warn => label.yellow().to_string(),
            Level::Info => label.blue().to_string(),
            Level::Debug => label.magenta().to_string(),
            Level::Trace => label.normal().to_string(),
        }
    }

    /// 拼出一行日志，不含换行
    pub fn format(&self, level: Level, args: &std::fmt::Arguments) -> String {
        let label = self.labels.get(&level).copied().unwrap_or("???");
        format!("[{}] {}", self.wrap(label, level), args)
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = self.format(record.level(), record.args());
        // 锁住只为了避免多行交错
        let _guard = self.mutex.lock().unwrap_or_else(|e| e.into_inner());
        let _ = writeln!(std::io::stderr(), "{}", line);
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
