use std::io::BufRead;

use clap::Parser;
use log::debug;

use crate::error::ConfigError;
use crate::input::{normalize_args, Opts};
use crate::options::Options;
use crate::resolve::resolve_input;
use crate::stdin::InputAvailabilityProbe;
use crate::validate::{validate, RunConfig};

/// 版本号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 前置流程的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `--version`: 打印版本后退出，不触碰 stdin
    ShowVersion,
    Run(RunConfig),
}

/// 把原始命令行解析成 [`Opts`]，先做单横线别名的改写
pub fn parse_flags<I, S>(args: I) -> Result<Opts, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Opts::try_parse_from(normalize_args(args))
}

/// 参数 -> stdin 协商 -> 校验。
///
/// 出错即返回，调用方负责打印并退出。
pub fn configure(
    opts: Opts,
    probe: &dyn InputAvailabilityProbe,
    stdin: &mut dyn BufRead,
) -> Result<Outcome, ConfigError> {
    if opts.version {
        return Ok(Outcome::ShowVersion);
    }

    let mut options = Options::from(opts);
    let disposition = resolve_input(&mut options, probe, stdin)?;
    debug!("stdin disposition: {:?}", disposition);

    let config = validate(&options)?;
    if let Ok(dump) = serde_json::to_string(&config) {
        debug!("resolved configuration: {}", dump);
    }
    Ok(Outcome::Run(config))
}
