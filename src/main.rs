use std::io;
use std::process;

use log::{error, info};
use rshuffledns::logger;
use rshuffledns::runner::{configure, parse_flags, Outcome, VERSION};
use rshuffledns::stdin::TerminalProbe;
use rshuffledns::validate::{ListSource, Mode};

fn main() {
    let opts = match parse_flags(std::env::args()) {
        Ok(opts) => opts,
        // --help 与用法错误交给 clap 处理，退出码也沿用 clap 的
        Err(e) => e.exit(),
    };

    if let Err(e) = logger::init_logger(logger::level_for(opts.verbose, opts.silent), !opts.no_color) {
        eprintln!("failed to initialise logger: {}", e);
    }

    let stdin = io::stdin();
    let mut handle = stdin.lock();
    let config = match configure(opts, &TerminalProbe, &mut handle) {
        Ok(Outcome::ShowVersion) => {
            println!("Current Version: {}", VERSION);
            process::exit(0);
        }
        Ok(Outcome::Run(config)) => config,
        Err(e) => {
            error!("Program exiting: {}", e);
            process::exit(1);
        }
    };

    match &config.mode {
        Mode::BruteForce { domain, wordlist, resolvers } => {
            info!("Bruteforcing {} with wordlist {} using resolvers {}", domain, wordlist, resolvers)
        }
        Mode::ListResolution { source: ListSource::File(list), resolvers } => {
            info!("Resolving subdomains from {} using resolvers {}", list, resolvers)
        }
        Mode::ListResolution { source: ListSource::Stdin, resolvers } => {
            info!("Resolving subdomains from stdin using resolvers {}", resolvers)
        }
        Mode::RawValidation { raw_input } => {
            info!("Filtering wildcards from massdns output {}", raw_input)
        }
    }
    info!(
        "threads={} retries={} wildcard-threads={} strict-wildcard={}",
        config.tuning.threads,
        config.tuning.retries,
        config.tuning.wildcard_threads,
        config.tuning.strict_wildcard
    );
}
