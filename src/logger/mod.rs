pub mod rlogger;

use log::{LevelFilter, SetLoggerError};

pub use rlogger::Logger;

/// 与命令行参数对应的日志级别: `--silent` 只保留错误，`-v` 打开全部输出
pub fn level_for(verbose: bool, silent: bool) -> LevelFilter {
    if silent {
        LevelFilter::Error
    } else if verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    }
}

/// 安装全局 logger，进程内只能调用一次
pub fn init_logger(max_level: LevelFilter, use_colors: bool) -> Result<(), SetLoggerError> {
    if !use_colors {
        colored::control::set_override(false);
    }
    log::set_boxed_logger(Box::new(Logger::new(max_level, use_colors)))?;
    log::set_max_level(max_level);
    Ok(())
}
