use std::fmt;
use std::fs::File;
use std::path::Path;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use serde::Serialize;

use crate::error::ConfigError;
use crate::options::Options;

lazy_static! {
    static ref DOMAIN_RE: Regex = Regex::new(
        r"^(?:[A-Za-z0-9_](?:[A-Za-z0-9_-]{0,61}[A-Za-z0-9_])?\.)*[A-Za-z0-9_](?:[A-Za-z0-9_-]{0,61}[A-Za-z0-9_])?\.?$"
    )
    .unwrap();
}

/// 三种互斥的运行模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModeKind {
    BruteForce,
    ListResolution,
    RawValidation,
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModeKind::BruteForce => "bruteforce",
            ModeKind::ListResolution => "list resolution",
            ModeKind::RawValidation => "raw input validation",
        };
        f.write_str(name)
    }
}

/// 某个模式缺少的参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unsatisfied {
    pub mode: ModeKind,
    pub missing: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ModeReport {
    pub satisfied: Vec<ModeKind>,
    pub unsatisfied: Vec<Unsatisfied>,
}

/// 子域名列表的来源
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ListSource {
    File(String),
    /// 由枚举引擎自己从 stdin 读取
    Stdin,
}

/// 校验后的运行模式，每个变体只携带自己需要的参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Mode {
    BruteForce {
        domain: String,
        wordlist: String,
        resolvers: String,
    },
    ListResolution {
        source: ListSource,
        resolvers: String,
    },
    RawValidation {
        raw_input: String,
    },
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::BruteForce { .. } => ModeKind::BruteForce,
            Mode::ListResolution { .. } => ModeKind::ListResolution,
            Mode::RawValidation { .. } => ModeKind::RawValidation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputSettings {
    pub path: Option<String>,
    /// 输出 ndjson
    pub json: bool,
    pub wildcard_output: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MassdnsSettings {
    /// 未指定时由引擎在 PATH 中查找
    pub path: Option<String>,
    /// 透传给 massdns 的额外参数
    pub extra_args: Vec<String>,
    pub directory: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tuning {
    pub threads: usize,
    pub retries: usize,
    pub wildcard_threads: usize,
    pub strict_wildcard: bool,
}

/// 交给枚举引擎的最终配置，构造后不再修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunConfig {
    pub mode: Mode,
    pub output: OutputSettings,
    pub massdns: MassdnsSettings,
    pub tuning: Tuning,
    pub silent: bool,
    pub verbose: bool,
    pub no_color: bool,
}

/// 根据已填写的参数判断各模式是否满足。
///
/// 管道输入只在没有任何模式能由参数单独满足时，才作为子域名列表的来源。
pub fn assess_modes(options: &Options) -> ModeReport {
    let mut report = assess_flag_modes(options);
    let stdin_list = options.stdin_available()
        && !options.stdin_consumed()
        && options.resolvers_file.is_some();

    if report.satisfied.is_empty() && stdin_list {
        report
            .unsatisfied
            .retain(|u| u.mode != ModeKind::ListResolution);
        report.satisfied.push(ModeKind::ListResolution);
    }
    report
}

/// 只看命令行参数，不考虑管道输入
pub fn assess_flag_modes(options: &Options) -> ModeReport {
    let mut report = ModeReport::default();

    let mut record = |mode: ModeKind, missing: Vec<&'static str>| {
        if missing.is_empty() {
            report.satisfied.push(mode);
        } else {
            report.unsatisfied.push(Unsatisfied { mode, missing });
        }
    };

    let mut missing = Vec::new();
    if options.domain.is_none() {
        missing.push("domain");
    }
    if options.wordlist.is_none() {
        missing.push("wordlist");
    }
    if options.resolvers_file.is_none() {
        missing.push("resolver");
    }
    record(ModeKind::BruteForce, missing);

    let mut missing = Vec::new();
    if options.subdomains_list.is_none() {
        missing.push("list");
    }
    if options.resolvers_file.is_none() {
        missing.push("resolver");
    }
    record(ModeKind::ListResolution, missing);

    let mut missing = Vec::new();
    if options.massdns_raw.is_none() {
        missing.push("raw-input");
    }
    record(ModeKind::RawValidation, missing);

    report
}

/// 校验协商后的配置并生成 [`RunConfig`]。
///
/// 检查顺序: 模式 -> 域名格式 -> 文件 -> 参数冲突 -> 数值范围，遇到第一个错误即返回。
pub fn validate(options: &Options) -> Result<RunConfig, ConfigError> {
    let report = assess_modes(options);
    match report.satisfied.len() {
        0 => return Err(ConfigError::InsufficientInput(report.unsatisfied)),
        1 => {}
        _ => return Err(ConfigError::AmbiguousInput(report.satisfied)),
    }
    for unsatisfied in &report.unsatisfied {
        debug!("{} mode not selected (missing {:?})", unsatisfied.mode, unsatisfied.missing);
    }

    let mode = build_mode(report.satisfied[0], options)?;

    if let Mode::BruteForce { domain, .. } = &mode {
        if !DOMAIN_RE.is_match(domain) {
            return Err(ConfigError::InvalidDomain(domain.clone()));
        }
    }

    let files = [
        ("resolver", &options.resolvers_file),
        ("wordlist", &options.wordlist),
        ("list", &options.subdomains_list),
        ("raw-input", &options.massdns_raw),
        ("massdns", &options.massdns_path),
    ];
    for (field, path) in files {
        if let Some(path) = path {
            check_readable_file(field, path)?;
        }
    }
    if let Some(directory) = &options.directory {
        if !Path::new(directory).is_dir() {
            return Err(ConfigError::NotADirectory {
                field: "directory",
                path: directory.clone(),
            });
        }
    }

    if options.silent && options.verbose {
        return Err(ConfigError::ConflictingFlags("--silent", "-v"));
    }

    let tuning = Tuning {
        threads: at_least("threads", options.threads, 1)?,
        retries: at_least("retries", options.retries, 0)?,
        wildcard_threads: at_least("wildcard-threads", options.wildcard_threads, 1)?,
        strict_wildcard: options.strict_wildcard,
    };

    Ok(RunConfig {
        mode,
        output: OutputSettings {
            path: options.output.clone(),
            json: options.json,
            wildcard_output: options.wildcard_output.clone(),
        },
        massdns: MassdnsSettings {
            path: options.massdns_path.clone(),
            extra_args: options
                .massdns_cmd
                .as_deref()
                .map(|cmd| cmd.split_whitespace().map(String::from).collect())
                .unwrap_or_default(),
            directory: options.directory.clone(),
        },
        tuning,
        silent: options.silent,
        verbose: options.verbose,
        no_color: options.no_color,
    })
}

fn build_mode(kind: ModeKind, options: &Options) -> Result<Mode, ConfigError> {
    // assess_modes 已经确认必需字段齐全
    let required = |value: &Option<String>| {
        value
            .clone()
            .ok_or_else(|| ConfigError::InsufficientInput(assess_modes(options).unsatisfied))
    };

    let mode = match kind {
        ModeKind::BruteForce => Mode::BruteForce {
            domain: required(&options.domain)?,
            wordlist: required(&options.wordlist)?,
            resolvers: required(&options.resolvers_file)?,
        },
        ModeKind::ListResolution => Mode::ListResolution {
            source: match &options.subdomains_list {
                Some(path) => ListSource::File(path.clone()),
                None => ListSource::Stdin,
            },
            resolvers: required(&options.resolvers_file)?,
        },
        ModeKind::RawValidation => Mode::RawValidation {
            raw_input: required(&options.massdns_raw)?,
        },
    };
    Ok(mode)
}

fn check_readable_file(field: &'static str, path: &str) -> Result<(), ConfigError> {
    let target = Path::new(path);
    let meta = match target.metadata() {
        Ok(meta) => meta,
        Err(_) if !target.exists() => {
            return Err(ConfigError::MissingPath {
                field,
                path: path.to_string(),
            })
        }
        Err(source) => {
            return Err(ConfigError::UnreadablePath {
                field,
                path: path.to_string(),
                source,
            })
        }
    };
    if !meta.is_file() {
        return Err(ConfigError::NotAFile {
            field,
            path: path.to_string(),
        });
    }
    File::open(target).map_err(|source| ConfigError::UnreadablePath {
        field,
        path: path.to_string(),
        source,
    })?;
    Ok(())
}

fn at_least(field: &'static str, value: i64, min: i64) -> Result<usize, ConfigError> {
    if value < min {
        return Err(ConfigError::OutOfRange { field, value, min });
    }
    usize::try_from(value).map_err(|_| ConfigError::OutOfRange { field, value, min })
}
