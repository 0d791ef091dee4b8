//! `mx` - format and inspect markup documents.

use mxc::commands::{parse_file, run_format};

fn main() {
    mxc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "fmt" => run_format(&args[2..]),
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: mx parse <file.xml>");
                std::process::exit(1);
            }
            parse_file(&args[2]);
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("mx {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("mx - markup formatter");
    println!();
    println!("Usage: mx <command> [options]");
    println!();
    println!("Commands:");
    println!("  fmt [paths...]   Format documents in place (see 'mx fmt --help')");
    println!("  parse <file>     Print the document tree and parse problems");
    println!("  help             Show this message");
    println!("  version          Show version information");
    println!();
    println!("Environment:");
    println!("  RUST_LOG         Enable tracing, e.g. RUST_LOG=mx_fmt=trace");
}
