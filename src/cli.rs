//! Command-line front end: read a file or stdin, repair, write the result.

use crate::{Options, repair};
use std::env;
use std::fs;
use std::io::{self, Read, Write};

fn print_help(program: &str) {
    eprintln!(
        "Usage: {prog} [OPTIONS] [INPUT]\n\
         \n\
         INPUT: optional input file. When omitted, reads from stdin.\n\
         \n\
         Options:\n\
           -o, --output PATH    Write output to PATH (default stdout)\n\
               --inline         Rewrite INPUT in place\n\
               --ensure_ascii   Escape non-ASCII as \\uXXXX\n\
               --indent N       Pretty-print with N-space indentation\n\
               --strict         Fail on the first repair instead of applying it\n\
           -h, --help           Show this help\n",
        prog = program
    );
}

struct CliMode {
    input: Option<String>,
    output: Option<String>,
    inline: bool,
}

fn parse_args() -> (Options, CliMode) {
    let mut args: Vec<String> = env::args().collect();
    let program = args
        .first()
        .cloned()
        .unwrap_or_else(|| "jsonmend".to_string());
    args.remove(0);

    let mut opts = Options::default();
    let mut input: Option<String> = None;
    let mut output: Option<String> = None;
    let mut inline = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help(&program);
                std::process::exit(0);
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Missing PATH for --output");
                    std::process::exit(2);
                }
                output = Some(args[i].clone());
            }
            "--inline" => {
                inline = true;
            }
            "--ensure_ascii" | "--ensure-ascii" => {
                opts.ensure_ascii = true;
            }
            "--indent" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Missing N for --indent");
                    std::process::exit(2);
                }
                match args[i].parse::<usize>() {
                    Ok(n) => opts.indent = Some(n),
                    Err(_) => {
                        eprintln!("Invalid indent width: {}", args[i]);
                        std::process::exit(2);
                    }
                }
            }
            "--strict" => {
                opts.strict = true;
            }
            s if s.starts_with('-') => {
                eprintln!("Unknown option: {}", s);
                std::process::exit(2);
            }
            path => {
                input = Some(path.to_string());
            }
        }
        i += 1;
    }

    (
        opts,
        CliMode {
            input,
            output,
            inline,
        },
    )
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (opts, mode) = parse_args();

    if mode.inline {
        let Some(path) = mode.input.as_ref() else {
            eprintln!("--inline requires INPUT");
            std::process::exit(2);
        };
        let content = fs::read_to_string(path)?;
        let fixed = repair(&content, &opts)?;
        fs::write(path, fixed)?;
        return Ok(());
    }

    let content = match &mode.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut s = String::new();
            io::stdin().read_to_string(&mut s)?;
            s
        }
    };
    let fixed = repair(&content, &opts)?;

    match &mode.output {
        Some(path) => fs::write(path, fixed)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(fixed.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
