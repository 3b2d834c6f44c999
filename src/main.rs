pub mod grammar;

use std::{
    fs,
    io::{self, BufRead, Write},
};

pub use grammar::Grammar;
use grammar::{ParseTable, TableDrivenParser};

fn print_help() {
    println!("Usage: bnf-predictive-parser outputs [options] [grammar file]");
    println!("outputs:");
    println!("  prod: Productions");
    println!("  ff: First and follow sets");
    println!("  table: LL(1) predictive parse table");
    println!("  run: Read input strings and report accept/reject");
    println!("options:");
    println!("  -h: Print this help");
    println!("  -l: Print in LaTeX format");
    println!("  -j: Print in JSON format");
    println!();
    println!("The grammar is read from the file argument, or from stdin otherwise.");
}

fn run_parser(g: &Grammar) {
    let mut parser = match TableDrivenParser::new(g) {
        Ok(parser) => parser,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    println!("Predictive parser ready, one input string per line (Ctrl-D to quit)");
    print!("> ");
    io::stdout().flush().unwrap();
    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        match parser.parse(&line) {
            Ok(()) => println!("Valid input"),
            Err(e) => {
                println!("Syntax error.");
                println!("{}", e);
                println!();
            }
        }
        print!("> ");
        io::stdout().flush().unwrap();
    }
}

fn main() {
    let mut outputs: Vec<&str> = Vec::new();
    let args = std::env::args().skip(1).collect::<Vec<String>>();
    let mut i: usize = 0;
    while i < args.len() && ["prod", "ff", "table", "run"].contains(&args[i].as_str()) {
        outputs.push(args[i].as_str());
        i += 1;
    }

    enum OutputFormat {
        Plain,
        LaTeX,
        Json,
    }
    let mut output_format = OutputFormat::Plain;

    while i < args.len() && ["-h", "--help", "-l", "-j"].contains(&args[i].as_str()) {
        if args[i] == "-h" || args[i] == "--help" {
            print_help();
            return;
        } else if args[i] == "-l" {
            output_format = OutputFormat::LaTeX;
        } else if args[i] == "-j" {
            output_format = OutputFormat::Json;
        }
        i += 1;
    }

    if i + 1 < args.len() || outputs.is_empty() {
        print_help();
        return;
    }

    let input: String = if i == args.len() {
        io::stdin()
            .lock()
            .lines()
            .map(|l| l.unwrap())
            .collect::<Vec<String>>()
            .join("\n")
    } else {
        fs::read_to_string(args[i].as_str()).expect("Failed to read file")
    };

    let g = match Grammar::parse(&input) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    for output in outputs {
        if output == "prod" {
            let t = g.to_production_output_vec();
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::Json => t.to_json(),
                }
            );
        }
        if output == "ff" {
            match g.to_first_follow_output_vec() {
                Ok(t) => println!(
                    "{}",
                    match output_format {
                        OutputFormat::Plain => t.to_plaintext(),
                        OutputFormat::LaTeX => t.to_latex(),
                        OutputFormat::Json => t.to_json(),
                    }
                ),
                Err(e) => {
                    eprintln!("{}", e);
                    return;
                }
            }
        }
        if output == "table" {
            match ParseTable::build(&g) {
                Ok(table) => {
                    let t = table.to_output(&g);
                    println!(
                        "{}",
                        match output_format {
                            OutputFormat::Plain => t.to_plaintext(),
                            OutputFormat::LaTeX => t.to_latex(),
                            OutputFormat::Json => t.to_json(),
                        }
                    );
                }
                Err(e) => {
                    eprintln!("{}", e);
                    return;
                }
            }
        }
        if output == "run" {
            run_parser(&g);
        }
    }
}
