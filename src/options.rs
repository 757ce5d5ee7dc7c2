use serde::Serialize;

use crate::input::Opts;

/// 一次运行的完整配置。
///
/// 生命周期: 默认值 -> 命令行参数 -> stdin 协商，之后交给
/// [`crate::validate::validate`] 校验一次。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Options {
    /// 要枚举的目标域名
    pub domain: Option<String>,
    /// 待解析的子域名列表文件
    pub subdomains_list: Option<String>,
    /// 解析器列表文件
    pub resolvers_file: Option<String>,
    /// 暴破字典
    pub wordlist: Option<String>,
    /// 已有的 massdns 原始输出，只做泛解析过滤
    pub massdns_raw: Option<String>,
    pub massdns_path: Option<String>,
    pub massdns_cmd: Option<String>,
    pub directory: Option<String>,
    pub output: Option<String>,
    pub wildcard_output: Option<String>,
    pub json: bool,
    pub threads: i64,
    pub retries: i64,
    pub wildcard_threads: i64,
    pub strict_wildcard: bool,
    pub silent: bool,
    pub verbose: bool,
    pub no_color: bool,
    pub version: bool,

    #[serde(rename = "stdin_available")]
    stdin: bool,
    stdin_consumed: bool,
}

impl Options {
    /// 启动时是否检测到可读的管道输入；参数全部给齐时会被置为 false
    pub fn stdin_available(&self) -> bool {
        self.stdin
    }

    /// stdin 是否已经被当作域名读走
    pub fn stdin_consumed(&self) -> bool {
        self.stdin_consumed
    }

    /// 暴破所需的三个参数是否全部由命令行给出
    pub fn all_inputs_from_flags(&self) -> bool {
        self.domain.is_some() && self.resolvers_file.is_some() && self.wordlist.is_some()
    }

    pub(crate) fn record_stdin(&mut self, available: bool) {
        self.stdin = available;
    }

    pub(crate) fn mark_stdin_consumed(&mut self) {
        self.stdin_consumed = true;
    }
}

impl From<Opts> for Options {
    fn from(opts: Opts) -> Self {
        Options {
            domain: non_empty(opts.domain),
            subdomains_list: non_empty(opts.list),
            resolvers_file: non_empty(opts.resolver),
            wordlist: non_empty(opts.wordlist),
            massdns_raw: non_empty(opts.raw_input),
            massdns_path: non_empty(opts.massdns),
            massdns_cmd: non_empty(opts.massdns_cmd),
            directory: non_empty(opts.directory),
            output: non_empty(opts.output),
            wildcard_output: non_empty(opts.wildcard_output),
            json: opts.json,
            threads: opts.threads,
            retries: opts.retries,
            wildcard_threads: opts.wildcard_threads,
            strict_wildcard: opts.strict_wildcard,
            silent: opts.silent,
            verbose: opts.verbose,
            no_color: opts.no_color,
            version: opts.version,
            stdin: false,
            stdin_consumed: false,
        }
    }
}

// `-d ""` 与未传参数等价
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn empty_flag_values_are_absent() {
        let opts = Opts::try_parse_from(["rshuffledns", "-d", "", "-w", "words.txt", "-r", " "]).unwrap();
        let options = Options::from(opts);
        assert!(options.domain.is_none());
        assert!(options.resolvers_file.is_none());
        assert_eq!(options.wordlist.as_deref(), Some("words.txt"));
        assert!(!options.stdin_available());
        assert!(!options.all_inputs_from_flags());
    }

    #[test]
    fn flags_override_defaults() {
        let opts = Opts::try_parse_from([
            "rshuffledns", "-d", "example.com", "-t", "200", "--retries", "2", "--wt", "5", "-j",
        ])
        .unwrap();
        let options = Options::from(opts);
        assert_eq!(options.domain.as_deref(), Some("example.com"));
        assert_eq!(options.threads, 200);
        assert_eq!(options.retries, 2);
        assert_eq!(options.wildcard_threads, 5);
        assert!(options.json);
    }
}
