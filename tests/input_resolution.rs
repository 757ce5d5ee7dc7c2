mod common;

use std::io::{self, BufRead, Read};

use common::{flags, piped, Fixture};
use rshuffledns::{
    configure, resolve_input, ConfigError, FixedProbe, ListSource, Mode, Options, Outcome,
    StdinDisposition,
};

/// 读取即失败，用来证明 stdin 没有被碰过
struct Untouchable;

impl Read for Untouchable {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        panic!("stdin must not be read");
    }
}

impl BufRead for Untouchable {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        panic!("stdin must not be read");
    }

    fn consume(&mut self, _amt: usize) {
        panic!("stdin must not be read");
    }
}

#[test]
fn test_flags_take_precedence_and_stdin_is_drained() {
    let fx = Fixture::new();
    let opts = flags(&["-d", "flag.com", "-w", &fx.wordlist, "-r", &fx.resolvers]);
    let mut options = Options::from(opts);
    let mut stdin = piped("ignored.com");

    let disposition = resolve_input(&mut options, &FixedProbe(true), &mut stdin).unwrap();

    assert_eq!(disposition, StdinDisposition::Drained { bytes: 11 });
    assert_eq!(options.domain.as_deref(), Some("flag.com"));
    assert!(!options.stdin_available());
    // 管道已经读到末尾
    assert_eq!(stdin.position(), 11);
}

#[test]
fn test_domain_read_from_stdin_with_crlf() {
    let fx = Fixture::new();
    let opts = flags(&["-w", &fx.wordlist, "-r", &fx.resolvers]);
    let mut stdin = piped("example.com\r\n");

    let outcome = configure(opts, &FixedProbe(true), &mut stdin).unwrap();

    match outcome {
        Outcome::Run(config) => match config.mode {
            Mode::BruteForce { domain, wordlist, resolvers } => {
                assert_eq!(domain, "example.com");
                assert_eq!(wordlist, fx.wordlist);
                assert_eq!(resolvers, fx.resolvers);
            }
            other => panic!("unexpected mode {:?}", other),
        },
        Outcome::ShowVersion => panic!("unexpected version outcome"),
    }
}

#[test]
fn test_empty_stdin_is_insufficient_input() {
    let fx = Fixture::new();
    let opts = flags(&["-w", &fx.wordlist, "-r", &fx.resolvers]);
    let mut stdin = piped("");

    let err = configure(opts, &FixedProbe(true), &mut stdin).unwrap_err();

    match err {
        ConfigError::InsufficientInput(unsatisfied) => {
            let brute = unsatisfied
                .iter()
                .find(|u| u.mode == rshuffledns::ModeKind::BruteForce)
                .expect("bruteforce reported");
            assert_eq!(brute.missing, vec!["domain"]);
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_whitespace_only_stdin_leaves_domain_unset() {
    let mut options = Options::from(flags(&["-w", "words.txt"]));
    let mut stdin = piped(" \r\n");

    let disposition = resolve_input(&mut options, &FixedProbe(true), &mut stdin).unwrap();

    assert_eq!(disposition, StdinDisposition::ReadDomain);
    assert!(options.domain.is_none());
    assert!(options.stdin_consumed());
}

#[test]
fn test_no_stdin_leaves_everything_alone() {
    let mut options = Options::from(flags(&["-w", "words.txt"]));

    let disposition = resolve_input(&mut options, &FixedProbe(false), &mut Untouchable).unwrap();

    assert_eq!(disposition, StdinDisposition::NotPiped);
    assert!(options.domain.is_none());
    assert!(!options.stdin_available());
}

#[test]
fn test_stdin_deferred_for_list_resolution() {
    let fx = Fixture::new();
    let opts = flags(&["-r", &fx.resolvers]);
    let mut options = Options::from(opts.clone());
    let mut stdin = piped("www.example.com\n");

    let disposition = resolve_input(&mut options, &FixedProbe(true), &mut stdin).unwrap();
    assert_eq!(disposition, StdinDisposition::Deferred);
    assert_eq!(stdin.position(), 0);
    assert!(options.stdin_available());

    let outcome = configure(opts, &FixedProbe(true), &mut stdin).unwrap();
    match outcome {
        Outcome::Run(config) => assert_eq!(
            config.mode,
            Mode::ListResolution {
                source: ListSource::Stdin,
                resolvers: fx.resolvers.clone(),
            }
        ),
        Outcome::ShowVersion => panic!("unexpected version outcome"),
    }
}

#[test]
fn test_domain_flag_without_resolvers_does_not_read_stdin() {
    let mut options = Options::from(flags(&["-d", "example.com", "-w", "words.txt"]));
    let mut stdin = piped("other.com\n");

    let disposition = resolve_input(&mut options, &FixedProbe(true), &mut stdin).unwrap();

    assert_eq!(disposition, StdinDisposition::Deferred);
    assert_eq!(options.domain.as_deref(), Some("example.com"));
    // 预读不消耗数据
    assert_eq!(stdin.position(), 0);
}

#[test]
fn test_raw_input_with_resolvers_ignores_open_pipe() {
    // cron/ssh/CI 下 stdin 不是终端，但参数已经足够，不能等待或读取管道
    let fx = Fixture::new();
    let opts = flags(&["-ri", &fx.raw, "-r", &fx.resolvers]);

    let outcome = configure(opts, &FixedProbe(true), &mut Untouchable).unwrap();

    match outcome {
        Outcome::Run(config) => {
            assert_eq!(config.mode, Mode::RawValidation { raw_input: fx.raw.clone() })
        }
        Outcome::ShowVersion => panic!("unexpected version outcome"),
    }

    let outcome = configure(
        flags(&["-ri", &fx.raw, "-r", &fx.resolvers]),
        &FixedProbe(true),
        &mut piped(""),
    )
    .unwrap();
    assert!(matches!(outcome, Outcome::Run(ref c) if c.mode.kind() == rshuffledns::ModeKind::RawValidation));
}

#[test]
fn test_empty_pipe_does_not_count_as_list() {
    let fx = Fixture::new();
    let mut options = Options::from(flags(&["-d", "example.com", "-r", &fx.resolvers]));
    let mut stdin = piped("");

    let disposition = resolve_input(&mut options, &FixedProbe(true), &mut stdin).unwrap();
    assert_eq!(disposition, StdinDisposition::Empty);
    assert!(!options.stdin_available());

    let err = configure(
        flags(&["-d", "example.com", "-r", &fx.resolvers]),
        &FixedProbe(true),
        &mut piped(""),
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::InsufficientInput(_)), "{:?}", err);
}

#[test]
fn test_piped_list_with_domain_flag() {
    let fx = Fixture::new();
    let opts = flags(&["-d", "example.com", "-r", &fx.resolvers]);
    let mut stdin = piped("www.example.com\n");

    let outcome = configure(opts, &FixedProbe(true), &mut stdin).unwrap();

    match outcome {
        Outcome::Run(config) => assert_eq!(
            config.mode,
            Mode::ListResolution {
                source: ListSource::Stdin,
                resolvers: fx.resolvers.clone(),
            }
        ),
        Outcome::ShowVersion => panic!("unexpected version outcome"),
    }
    assert_eq!(stdin.position(), 0);
}

#[test]
fn test_invalid_utf8_on_stdin_is_reported() {
    let mut options = Options::from(flags(&["-w", "words.txt"]));
    let mut stdin = std::io::Cursor::new(vec![0xff, 0xfe, b'\n']);

    let err = resolve_input(&mut options, &FixedProbe(true), &mut stdin).unwrap_err();

    assert!(matches!(err, ConfigError::Stdin(_)));
}

#[test]
fn test_resolution_is_idempotent() {
    let fx = Fixture::new();
    let bytes = "example.com\n";
    let run = || {
        let opts = flags(&["-w", &fx.wordlist, "-r", &fx.resolvers, "-t", "500"]);
        let mut stdin = piped(bytes);
        configure(opts, &FixedProbe(true), &mut stdin).unwrap()
    };

    let first = run();
    let second = run();
    assert_eq!(first, second);

    let resolve_once = || {
        let mut options = Options::from(flags(&["-w", &fx.wordlist, "-r", &fx.resolvers]));
        resolve_input(&mut options, &FixedProbe(true), &mut piped(bytes)).unwrap();
        options
    };
    assert_eq!(resolve_once(), resolve_once());
}

#[test]
fn test_version_skips_stdin_resolution() {
    let opts = flags(&["--version", "-w", "words.txt"]);

    let outcome = configure(opts, &FixedProbe(true), &mut Untouchable).unwrap();

    assert_eq!(outcome, Outcome::ShowVersion);
}
