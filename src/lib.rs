//! # rshuffledns
//!
//! massdns 子域名枚举工具的前置配置层：把命令行参数和管道输入协商成一份
//! 经过校验、互不冲突的运行配置，交给后续的枚举引擎。
//!
//! ## 流程
//!
//! 1. [`input::Opts`] 声明全部参数并解析命令行
//! 2. [`stdin::InputAvailabilityProbe`] 探测是否有管道输入（进程内只探测一次）
//! 3. [`resolve::resolve_input`] 决定目标域名来自参数还是管道，必要时读空管道
//! 4. [`validate::validate`] 校验并生成 [`validate::RunConfig`]
//!
//! ## 示例
//!
//! ```rust,no_run
//! use std::io::Cursor;
//! use rshuffledns::{configure, parse_flags, FixedProbe, Mode, Outcome};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 等价于 `echo example.com | rshuffledns -w words.txt -r resolvers.txt`
//!     let opts = parse_flags(["rshuffledns", "-w", "words.txt", "-r", "resolvers.txt"])?;
//!     let mut stdin = Cursor::new(b"example.com\n".to_vec());
//!
//!     if let Outcome::Run(config) = configure(opts, &FixedProbe(true), &mut stdin)? {
//!         if let Mode::BruteForce { domain, .. } = &config.mode {
//!             println!("目标域名: {}", domain);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

// 内部模块
pub mod error;
pub mod input;
pub mod logger;
pub mod options;
pub mod resolve;
pub mod runner;
pub mod stdin;
pub mod validate;

// 重新导出主要的公共API
pub use error::ConfigError;
pub use input::{normalize_args, Opts};
pub use options::Options;
pub use resolve::{resolve_input, StdinDisposition};
pub use runner::{configure, parse_flags, Outcome, VERSION};
pub use stdin::{FixedProbe, InputAvailabilityProbe, TerminalProbe};
pub use validate::{
    assess_flag_modes, assess_modes, validate, ListSource, Mode, ModeKind, ModeReport, RunConfig,
    Unsatisfied,
};
