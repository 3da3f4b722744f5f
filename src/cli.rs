use std::env;
use std::path::PathBuf;
use std::process;

use getopts::{Matches, Options};

use bjiff_ics::{CONCURRENCY, OUTPUT_DIR};

pub struct Args {
    pub output_dir: PathBuf,
    pub concurrency: usize,
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt(
        "o",
        "output-dir",
        "Directory to empty and write the calendar into [Default: ./dist]",
        "DIR",
    );
    opts.optopt(
        "c",
        "concurrency",
        "Maximum number of schedule requests in flight [Default: 5]",
        "COUNT",
    );
    opts
}

pub fn parse(args: Vec<String>) -> Args {
    let opts = opts();

    let matches = match opts.parse(args) {
        Ok(matches) => matches,
        Err(fail) => {
            eprintln!("{fail}");
            process::exit(1);
        }
    };

    if matches.opt_present("help") {
        println!("{}", opts.usage(&opts.short_usage(env!("CARGO_PKG_NAME"))));
        process::exit(0);
    }

    match args_from(&matches) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

fn args_from(matches: &Matches) -> Result<Args, String> {
    let output_dir = matches
        .opt_str("output-dir")
        .map_or_else(|| PathBuf::from(OUTPUT_DIR), PathBuf::from);

    let concurrency = match matches.opt_get_default("concurrency", CONCURRENCY) {
        Ok(0) => return Err("Provided value for option 'concurrency' must be at least 1".into()),
        Ok(concurrency) => concurrency,
        Err(err) => return Err(format!("Provided value for option 'concurrency' is invalid: {err}")),
    };

    Ok(Args {
        output_dir,
        concurrency,
    })
}
