// Copyright (c) 2025, Joe Drago <joedrago@gmail.com>
// SPDX-License-Identifier: BSD-2-Clause

use clap::error::ErrorKind;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use fragmenter::config::{Args, Config};
use fragmenter::debug_log;
use fragmenter::driver;
use fragmenter::error::Result;
use fragmenter::logger::init_logger;
use fragmenter::policy::Policy;

fn main() {
    let args = Args::try_parse().unwrap_or_else(|e| match e.kind() {
        // --help and --version are not errors; keep their exit code 0
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => e.exit(),
        // clap's usage-error exit code is 2; this tool has always exited 1
        _ => {
            let _ = e.print();
            std::process::exit(1);
        }
    });

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    init_logger(args.debug_log.as_deref())?;
    debug_log!("Starting fragmenter");

    let config = Config::from_args(args)?;
    debug_log!(
        "Config: mode={:?}, path={}, prng_seed={}",
        config.mode,
        config.path.display(),
        config.prng_seed
    );

    let policy = Policy::for_config(&config);
    let mut rng = StdRng::seed_from_u64(config.prng_seed);

    let stats = driver::run(&config.path, &policy, &mut rng)?;
    println!("{}", stats.summary());

    Ok(())
}
