use clap::Parser;

/// 默认 massdns 并发数
pub const DEFAULT_THREADS: i64 = 10000;
/// 默认重试次数
pub const DEFAULT_RETRIES: i64 = 5;
/// 默认泛解析检测并发数
pub const DEFAULT_WILDCARD_THREADS: i64 = 25;

#[derive(Parser, Debug, Clone)]
#[command(name = "rshuffledns")]
#[command(disable_version_flag = true)]
#[command(
    about = "A wrapper around massdns that enumerates valid subdomains using active bruteforce as well as resolves subdomains with wildcard handling and easy input-output support.",
    long_about = None
)]
pub struct Opts {
    /// Domain to find or resolve subdomains for
    #[arg(short, long, help_heading = "INPUT")]
    pub domain: Option<String>,

    /// File containing list of subdomains to resolve
    #[arg(short, long, help_heading = "INPUT")]
    pub list: Option<String>,

    /// File containing words to bruteforce for domain
    #[arg(short, long, help_heading = "INPUT")]
    pub wordlist: Option<String>,

    /// File containing list of resolvers for enumeration
    #[arg(short, long, help_heading = "INPUT")]
    pub resolver: Option<String>,

    /// Validate raw full massdns output
    #[arg(long = "raw-input", visible_alias = "ri", help_heading = "INPUT")]
    pub raw_input: Option<String>,

    /// Number of concurrent massdns resolves
    #[arg(short = 't', default_value_t = DEFAULT_THREADS, allow_negative_numbers = true, help_heading = "RATE-LIMIT")]
    pub threads: i64,

    /// File to write output to (optional)
    #[arg(short, long, help_heading = "OUTPUT")]
    pub output: Option<String>,

    /// Make output format as ndjson
    #[arg(short, long, help_heading = "OUTPUT")]
    pub json: bool,

    /// Dump wildcard ips to output file
    #[arg(long = "wildcard-output", visible_alias = "wo", help_heading = "OUTPUT")]
    pub wildcard_output: Option<String>,

    /// Path to the massdns binary
    #[arg(short, long, help_heading = "CONFIGURATIONS")]
    pub massdns: Option<String>,

    /// Optional massdns commands to run (example '-i 10')
    #[arg(long = "massdns-cmd", visible_alias = "mcmd", allow_hyphen_values = true, help_heading = "CONFIGURATIONS")]
    pub massdns_cmd: Option<String>,

    /// Temporary directory for enumeration
    #[arg(long, help_heading = "CONFIGURATIONS")]
    pub directory: Option<String>,

    /// Number of retries for dns enumeration
    #[arg(long, default_value_t = DEFAULT_RETRIES, allow_negative_numbers = true, help_heading = "OPTIMIZATIONS")]
    pub retries: i64,

    /// Perform wildcard check on all found subdomains
    #[arg(long = "strict-wildcard", visible_alias = "sw", help_heading = "OPTIMIZATIONS")]
    pub strict_wildcard: bool,

    /// Number of concurrent wildcard checks
    #[arg(long = "wt", default_value_t = DEFAULT_WILDCARD_THREADS, allow_negative_numbers = true, help_heading = "OPTIMIZATIONS")]
    pub wildcard_threads: i64,

    /// Show only subdomains in output
    #[arg(long, help_heading = "DEBUG")]
    pub silent: bool,

    /// Show version of rshuffledns
    #[arg(long, help_heading = "DEBUG")]
    pub version: bool,

    /// Show Verbose output
    #[arg(short, help_heading = "DEBUG")]
    pub verbose: bool,

    /// Don't Use colors in output
    #[arg(long = "no-color", visible_alias = "nc", help_heading = "DEBUG")]
    pub no_color: bool,
}

// 单横线多字母别名 -> 规范长参数名
const SHORT_ALIASES: &[(&str, &str)] = &[
    ("ri", "raw-input"),
    ("wo", "wildcard-output"),
    ("mcmd", "massdns-cmd"),
    ("sw", "strict-wildcard"),
    ("nc", "no-color"),
];

// 接受单横线写法的长参数名，以及它们是否带值
const LONG_FLAGS: &[(&str, bool)] = &[
    ("domain", true),
    ("list", true),
    ("wordlist", true),
    ("resolver", true),
    ("raw-input", true),
    ("output", true),
    ("json", false),
    ("wildcard-output", true),
    ("massdns", true),
    ("massdns-cmd", true),
    ("directory", true),
    ("retries", true),
    ("strict-wildcard", false),
    ("wt", true),
    ("silent", false),
    ("version", false),
    ("no-color", false),
];

// 带值的单字母短参数
const SHORT_VALUE_FLAGS: &[char] = &['d', 'l', 'w', 'r', 't', 'o', 'm'];

fn canonical_long(name: &str) -> Option<&'static str> {
    SHORT_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, long)| *long)
        .or_else(|| {
            LONG_FLAGS
                .iter()
                .find(|(long, _)| *long == name)
                .map(|(long, _)| *long)
        })
}

fn takes_value(long: &str) -> bool {
    LONG_FLAGS
        .iter()
        .any(|(name, value)| *name == long && *value)
}

/// 把 `-ri`、`-domain` 这类单横线写法改写成 clap 能识别的 `--raw-input`、`--domain`。
///
/// 第一个元素视为程序名原样保留；遇到 `--` 后不再改写；
/// 紧跟在带值参数后面的值不会被当成参数改写。
pub fn normalize_args<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut normalized = Vec::new();
    let mut expect_value = false;
    let mut passthrough = false;

    for (index, arg) in args.into_iter().enumerate() {
        let arg: String = arg.into();
        if index == 0 || passthrough {
            normalized.push(arg);
            continue;
        }
        if expect_value {
            expect_value = false;
            normalized.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            normalized.push(arg);
            continue;
        }

        if let Some(long) = arg.strip_prefix("--") {
            let (name, inline) = split_inline(long);
            expect_value = inline.is_none() && takes_value(name);
            normalized.push(arg);
            continue;
        }

        if let Some(short) = arg.strip_prefix('-') {
            let (name, inline) = split_inline(short);
            if name.chars().count() > 1 {
                if let Some(long) = canonical_long(name) {
                    expect_value = inline.is_none() && takes_value(long);
                    normalized.push(match inline {
                        Some(value) => format!("--{}={}", long, value),
                        None => format!("--{}", long),
                    });
                    continue;
                }
            } else if let Some(flag) = name.chars().next() {
                expect_value = inline.is_none() && SHORT_VALUE_FLAGS.contains(&flag);
            }
        }

        normalized.push(arg);
    }

    normalized
}

fn split_inline(flag: &str) -> (&str, Option<&str>) {
    match flag.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (flag, None),
    }
}
