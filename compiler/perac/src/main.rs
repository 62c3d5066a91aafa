//! Pera CLI.

use perac::commands::{eval_source, lex_file, parse_file, run_file};

fn main() {
    perac::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "run" => {
            let stats = args.iter().skip(2).any(|arg| arg == "--stats");
            let Some(path) = args.iter().skip(2).find(|arg| !arg.starts_with("--")) else {
                eprintln!("Usage: pera run <file> [--stats]");
                std::process::exit(1);
            };
            run_file(path, stats);
        }
        "eval" => {
            if args.len() < 3 {
                eprintln!("Usage: pera eval <source>");
                std::process::exit(1);
            }
            eval_source(&args[2], false);
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: pera lex <file>");
                std::process::exit(1);
            }
            lex_file(&args[2]);
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: pera parse <file>");
                std::process::exit(1);
            }
            parse_file(&args[2]);
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("pera {}", env!("CARGO_PKG_VERSION"));
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Pera, a prefix-notation scripting language");
    println!();
    println!("Usage: pera <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file>       Run a program and print its result");
    println!("  eval <source>    Run source text given on the command line");
    println!("  lex <file>       Tokenize and display tokens");
    println!("  parse <file>     Parse and display the form tree");
    println!("  help             Show this help message");
    println!("  version          Show version information");
    println!();
    println!("Run options:");
    println!("  --stats          Report evaluator counters on stderr");
    println!();
    println!("Environment:");
    println!("  PERA_LOG         Log filter, e.g. PERA_LOG=pera_eval=trace");
}
