use std::io::{self, BufRead, Read};

use log::debug;
use serde::Serialize;

use crate::error::ConfigError;
use crate::options::Options;
use crate::stdin::InputAvailabilityProbe;
use crate::validate::assess_flag_modes;

/// stdin 协商之后的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StdinDisposition {
    /// 没有管道输入
    NotPiped,
    /// 参数已经给齐，管道中的数据被读空丢弃
    Drained { bytes: u64 },
    /// 管道内容被当作目标域名
    ReadDomain,
    /// 保持原样，留给后续的枚举引擎读取
    Deferred,
    /// 管道只能作为子域名列表来源，但已经关闭且没有数据
    Empty,
}

/// 协调命令行参数和管道输入，结果直接写回 `options`。
///
/// `input` 只会被线性读取一次。参数全部给齐时读空管道并丢弃，
/// 避免上游进程阻塞在未读的管道上。
///
/// 只有在没有任何模式能由参数单独满足、管道成为唯一的列表来源时，
/// 才用 `fill_buf` 预读确认管道里有数据；预读不消耗字节。
pub fn resolve_input(
    options: &mut Options,
    probe: &dyn InputAvailabilityProbe,
    input: &mut dyn BufRead,
) -> Result<StdinDisposition, ConfigError> {
    options.record_stdin(probe.has_stdin());

    if !options.stdin_available() {
        debug!("no piped input detected");
        return Ok(StdinDisposition::NotPiped);
    }

    if options.all_inputs_from_flags() {
        // 没有超时，管道的生产者必须自己结束
        let bytes = io::copy(input, &mut io::sink())?;
        options.record_stdin(false);
        debug!("all inputs given as flags, discarded {} bytes of piped input", bytes);
        return Ok(StdinDisposition::Drained { bytes });
    }

    if options.wordlist.is_some() && options.domain.is_none() {
        let mut buffer = String::new();
        input.read_to_string(&mut buffer)?;
        options.mark_stdin_consumed();
        options.domain = domain_from_stdin(&buffer);
        match &options.domain {
            Some(domain) => debug!("read target domain {} from stdin", domain),
            None => debug!("piped input was empty, no domain read"),
        }
        return Ok(StdinDisposition::ReadDomain);
    }

    if assess_flag_modes(options).satisfied.is_empty() && input.fill_buf()?.is_empty() {
        options.record_stdin(false);
        debug!("piped input closed without data");
        return Ok(StdinDisposition::Empty);
    }

    debug!("leaving piped input for the enumeration engine");
    Ok(StdinDisposition::Deferred)
}

/// 去掉末尾的 `\r`/`\n`，只剩空白时视为没有域名
pub fn domain_from_stdin(raw: &str) -> Option<String> {
    let domain = raw.trim_end_matches(['\r', '\n']);
    if domain.trim().is_empty() {
        None
    } else {
        Some(domain.to_string())
    }
}
