use std::path::Path;
use std::process::ExitCode;

use lamcalc::eval::Context;
use lamcalc::repl;

fn main() -> ExitCode {
    env_logger::init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        return help();
    }
    let mut ctx = Context::new();
    // Any arguments are files to preload before the REPL starts.
    for path in &args {
        if let Err(e) = repl::load(&mut ctx, Path::new(path)) {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    }
    match repl::run(&mut ctx) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn help() -> ExitCode {
    println!("Untyped lambda calculus interpreter");
    println!("Usage: lamcalc [files...]");
    println!();
    println!("Each file is evaluated line by line before the REPL starts.");
    println!("Inside the REPL, :help lists the available directives.");
    ExitCode::SUCCESS
}
