#[macro_use]
extern crate bitflags;

use std::fs;

extern crate clap;
use clap::{App, Arg, ArgMatches, SubCommand};

extern crate log;
use log::{info, Level};
extern crate simple_logger;

extern crate minic_lib;
use minic_lib::*;
use minic_lib::listing;
use minic_lib::listing::row_words;

bitflags! {
    /// Which intermediates `dev` prints
    struct Listings: u32 {
        const TOKENS  = 0b0000001;
        const AST     = 0b0000010;
        const SYMBOLS = 0b0000100;
        const HISTORY = 0b0001000;
        const ASM     = 0b0010000;
        const MACHINE = 0b0100000;
        const DIGEST  = 0b1000000;
    }
}

impl Listings {
    fn from_matches(matches: &ArgMatches) -> Listings {
        let mut listings = Listings::empty();
        for (name, flag) in &[("tokens", Listings::TOKENS), ("ast", Listings::AST),
                              ("symbols", Listings::SYMBOLS), ("history", Listings::HISTORY),
                              ("asm", Listings::ASM), ("machine", Listings::MACHINE),
                              ("digest", Listings::DIGEST)] {
            if matches.is_present(name) {
                listings |= *flag;
            }
        }
        if listings.is_empty() { Listings::all() } else { listings }
    }
}

fn config_from_matches(matches: &ArgMatches) -> Config {
    Config {
        preinit_data: matches.is_present("preinit"),
        emit_exit: !matches.is_present("no-exit"),
        emit_comments: matches.is_present("comments"),
        ..Config::default()
    }
}

fn log_level(occurrences: u64) -> Level {
    match occurrences {
        0 => Level::Warn,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    }
}

fn print_machine(assembly: &str, listings: Listings) {
    let rows = binhex(assembly);
    if listings.contains(Listings::MACHINE) {
        print!("{}", listing::machine_table(&rows));
    }
    if listings.contains(Listings::DIGEST) {
        print!("{}", listing::digest(&row_words(&rows)));
    }
}

fn print_tokens(text: &str) {
    println!("== Tokenizer Output Started ==");
    for (i, line) in text.lines().enumerate() {
        match Lexer::at_line(line, i + 1).tokenize() {
            Ok(tokens) => for tok in tokens { println!("{:?}", tok); },
            Err(e) => println!("LINE {}: {}", i + 1, e),
        }
    }
    println!("== Tokenizer Output Finished ==");
}

fn print_ast(build: &Build) {
    println!("== AST Output Started ==");
    for op in &build.session.history {
        match op.expr {
            Some(ref expr) => println!("{:<4} {} = {}", op.line, op.target, expr),
            None => println!("{:<4} {}", op.line, op.target),
        }
    }
    println!("== AST Output Finished ==");
}

fn main() -> std::io::Result<()> {
    let matches = App::new("minic")
        .version("0.1a")
        .about("Compiles int/char arithmetic statements to MIPS64 for EduMips64")
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .global(true)
            .help("Raises the log level, repeat for more"))
        .subcommand(SubCommand::with_name("build")
            .args_from_usage(
                "-o --output=[FILE] 'Sets the assembly file to write (default output.txt)'
                 --preinit          'Initialise data directives with declared values'
                 --no-exit          'Do not finish the program with a syscall'
                 --comments         'Prefix each statement with its source line'
                 <INPUT>            'Sets the input file to use'")
        )
        .subcommand(SubCommand::with_name("dev")
            .args_from_usage(
                "--tokens           'Get the output of the tokenizer'
                 --ast              'Print the parsed expression of every statement'
                 --symbols          'Print the symbol table'
                 --history          'Print the operation history'
                 --asm              'Print the generated assembly'
                 --machine          'Print the machine code table'
                 --digest           'Print the merged binary and hex'
                 <INPUT>            'Sets the input file to use'")
        )
        .subcommand(SubCommand::with_name("binhex")
            .args_from_usage("<ASM> 'Assembly file to convert'")
        )
        .get_matches();

    if let Err(e) = simple_logger::init_with_level(log_level(matches.occurrences_of("verbose"))) {
        eprintln!("Couldn't install the logger: {}", e);
    }

    match matches.subcommand() {
        ("build", Some(sub_matches)) => {
            let filename = sub_matches.value_of("INPUT").unwrap_or_default();
            let output = sub_matches.value_of("output").unwrap_or("output.txt");
            let text = fs::read_to_string(filename)?;
            let config = config_from_matches(sub_matches);

            let build = build(&text, &config);
            print!("{}", listing::symbol_table(&build.session.symbols));
            print!("{}", listing::history(&build.session.history));
            if let Some(ref assembly) = build.assembly {
                fs::write(output, assembly)?;
                info!("Wrote {}", output);
                println!("\n=== MIPS64 Code Generated Successfully ===");
                print_machine(assembly, Listings::MACHINE | Listings::DIGEST);
            }
            print!("{}", listing::errors(&build.session.errors));

            if !build.session.errors.is_empty() {
                std::process::exit(1);
            }
        },
        ("dev", Some(sub_matches)) => {
            let filename = sub_matches.value_of("INPUT").unwrap_or_default();
            let text = fs::read_to_string(filename)?;
            let listings = Listings::from_matches(sub_matches);

            if listings.contains(Listings::TOKENS) {
                print_tokens(&text);
            }
            // every later step needs the earlier ones so the whole build
            // always runs, the flags only pick what gets printed
            let build = build(&text, &Config::default());
            if listings.contains(Listings::AST) {
                print_ast(&build);
            }
            if listings.contains(Listings::SYMBOLS) {
                print!("{}", listing::symbol_table(&build.session.symbols));
            }
            if listings.contains(Listings::HISTORY) {
                print!("{}", listing::history(&build.session.history));
            }
            if let Some(ref assembly) = build.assembly {
                if listings.contains(Listings::ASM) {
                    println!("== Assembly Output Started ==");
                    print!("{}", assembly);
                    println!("== Assembly Output Finished ==");
                }
                print_machine(assembly, listings);
            }
            print!("{}", listing::errors(&build.session.errors));
        },
        ("binhex", Some(sub_matches)) => {
            let filename = sub_matches.value_of("ASM").unwrap_or_default();
            let text = fs::read_to_string(filename)?;
            print_machine(&text, Listings::MACHINE | Listings::DIGEST);
        },
        _ => {
            println!("{}", matches.usage());
        }
    }

    Ok(())
}
