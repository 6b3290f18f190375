extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate term_grid;
extern crate simplec;

use clap::{Arg, ArgMatches, App};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use simplec::compiler::lexer;
use simplec::{CompileError, Listing, Options, PseudoAsm};

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

fn main() {
    let args = process_arguments();
    initialize_logging(args.occurrences_of("verbose"));

    debug!("Arguments:\n\tVerbosity: {}\n\tStrict: {}\n\tMax token length: {}\n\tOutfile: {}\n\tInfile: {}",
        verbosity_filter(args.occurrences_of("verbose")),
        args.is_present("strict"),
        args.value_of("max-token-len").unwrap_or("None"),
        args.value_of("output").unwrap_or("STDOUT"),
        args.value_of("INPUT").unwrap_or("None")
    );

    // INPUT is required, clap refuses to get this far without it.
    let ipath = Path::new(args.value_of("INPUT").unwrap_or_default());

    let source = match fs::read_to_string(&ipath) {
        Err(err) => {
            error!("fatal: unable to read input file `{}`: {}", ipath.display(), err);
            std::process::exit(1);
        },
        Ok(source) => source,
    };
    debug!("read {} byte(s), {} token(s)", source.len(), lexer::tokenize(&source).len());

    let options = Options {
        // Validated by clap.
        max_token_len: args.value_of("max-token-len").and_then(|v| v.parse().ok()),
        strict: args.is_present("strict"),
    };

    let quiet = args.is_present("quiet");
    if !quiet {
        println!("--- Simple Compiler ---");
        println!("Compiling file: {}\n", ipath.display());
    }

    let out: Box<dyn Write> = if let Some(filename) = args.value_of("output") {
        match File::create(filename) {
            Err(err) => {
                error!("fatal: unable to open output file `{}`: {}", filename, err);
                std::process::exit(1);
            },
            Ok(file) => Box::new(file),
        }
    } else {
        Box::new(io::stdout())
    };

    let mut asm = PseudoAsm::new(out);
    let mut listing = if args.is_present("print-debug") {
        Some(Listing::new())
    } else {
        None
    };
    let result = match listing.as_mut() {
        Some(listing) => simplec::compile(&source, (&mut asm, listing), options),
        None => simplec::compile(&source, &mut asm, options),
    };

    // Whatever was emitted before a failure is still listed.
    if let Some(listing) = &listing {
        print_listing(listing);
    }

    match result {
        Ok(count) => info!("translated {} statement(s)", count),
        Err(CompileError::Syntax(err)) => {
            // The bare message follows the instructions on STDOUT.
            println!("{}", err);
            error!("{}", err.detail());
            std::process::exit(1);
        },
        Err(CompileError::Io(err)) => {
            error!("fatal: unable to write to output `{}`: {}",
                args.value_of("output").unwrap_or("STDOUT"), err);
            std::process::exit(1);
        },
    }

    if !quiet {
        println!("\n--- Compilation Complete ---");
    }
}

fn print_listing(listing: &Listing) {
    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    });

    for (idx, block) in listing.blocks().iter().enumerate() {
        let instructions: Vec<String> = block.instructions.iter()
            .map(|ins| ins.to_string())
            .collect();
        grid.add(Cell::from(format!("0x{:04X}:", idx)));
        grid.add(Cell::from(block.source.clone()));
        grid.add(Cell::from("=>".to_string()));
        grid.add(Cell::from(instructions.join("; ")));
    }

    eprintln!("{}", grid.fit_into_columns(4));
}

fn process_arguments() -> ArgMatches<'static> {
    App::new(option_env!("CARGO_PKG_NAME").unwrap_or("simplec"))
        .version(option_env!("CARGO_PKG_VERSION").unwrap_or("unknown"))
        .author(option_env!("CARGO_PKG_AUTHORS").unwrap_or(""))
        .about(option_env!("CARGO_PKG_DESCRIPTION").unwrap_or(""))
        .arg(Arg::with_name("INPUT")
            .help("Sets the input file to use")
            .required(true)
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("output")
            .short("o")
            .takes_value(true)
            .help("write instructions to an outfile instead of STDOUT"))
        .arg(Arg::with_name("strict")
            .long("strict")
            .takes_value(false)
            .help("reject unknown symbols between statements instead of skipping them"))
        .arg(Arg::with_name("max-token-len")
            .short("t")
            .long("max-token-len")
            .takes_value(true)
            .validator(|v| match v.parse::<usize>() {
                Ok(0) => Err("the limit must be at least 1".to_string()),
                Ok(_) => Ok(()),
                Err(e) => Err(e.to_string()),
            })
            .help("truncate identifiers and numbers to this many characters"))
        .arg(Arg::with_name("quiet")
            .short("q")
            .long("quiet")
            .takes_value(false)
            .help("do not print the banner lines"))
        .arg(Arg::with_name("print-debug")
            .short("d")
            .long("print-debug")
            .alias("show")
            .takes_value(false)
            .help("prints each statement alongside its instructions to STDERR"))
        .get_matches()
}

fn verbosity_filter(verbosity: u64) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

// Logs go to STDERR; STDOUT carries the instructions.
fn initialize_logging(verbosity: u64) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(verbosity_filter(verbosity))
        .chain(std::io::stderr())
        .apply().ok();
}
