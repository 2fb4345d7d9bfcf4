use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::error::Error;
use crate::eval::{alpha_equivalent, evaluate, Context};
use crate::flags::Flags;
use crate::parser::parse_line;
use crate::print;
use crate::term::Term;
use crate::trace::ConsoleSink;

/// Run the read-eval-print loop until `:q` or end of input.
pub fn run(ctx: &mut Context) -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            return Ok(()); // EOF
        }
        let line = input.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(directive) = line.strip_prefix(':') {
            if !dispatch(ctx, directive) {
                return Ok(());
            }
            continue;
        }
        eval_line(ctx, line);
    }
}

/// Handle one `:` directive. Returns false when the REPL should quit.
fn dispatch(ctx: &mut Context, directive: &str) -> bool {
    let mut words = directive.split_whitespace();
    match words.next().unwrap_or("") {
        "q" => return false,
        "p" => toggle(ctx, Flags::NO_PRINT, "quiet mode"),
        "c" => toggle(
            ctx,
            Flags::ABBREV_LAMBDA | Flags::ABBREV_PARENS,
            "compact printing",
        ),
        "h" => toggle(ctx, Flags::HASKELL_STYLE, "haskell style"),
        "t" => toggle(ctx, Flags::TRACE, "trace"),
        "ft" => toggle(ctx, Flags::FULL_TRACE, "full trace"),
        "v" => toggle(ctx, Flags::VAR_REPLACEMENT, "definition replacement"),
        "load" => match words.next() {
            Some(path) => {
                if let Err(e) = load(ctx, Path::new(path)) {
                    eprintln!("{e}");
                }
            }
            None => eprintln!("usage: :load <file>"),
        },
        "env" => {
            for (name, term) in &ctx.definitions {
                println!("{name} = {}", print::render(term, ctx.flags));
            }
        }
        "help" => help(),
        other => eprintln!("unknown directive :{other}, try :help"),
    }
    true
}

fn toggle(ctx: &mut Context, flag: Flags, what: &str) {
    ctx.flags.toggle(flag);
    let state = if ctx.flags.contains(flag) { "on" } else { "off" };
    println!("{what} {state}");
}

fn help() {
    println!("Directives:");
    println!("  :q             quit");
    println!("  :p             toggle result printing");
    println!("  :c             toggle compact printing (λx y.B, minimal parens)");
    println!("  :h             toggle haskell-style printing (\\x -> B)");
    println!("  :t             toggle the reduction trace");
    println!("  :ft            toggle highlighted before/after snapshots");
    println!("  :v             toggle reporting α-equivalent definitions");
    println!("  :load <file>   evaluate a file line by line");
    println!("  :env           list the current definitions");
    println!("  :help          this message");
    println!();
    println!("Definitions inline one layer per evaluation; chains of");
    println!("definitions must be defined before the terms that use them.");
}

/// Parse and evaluate one REPL line, reporting parse errors and moving on.
fn eval_line(ctx: &mut Context, line: &str) {
    match parse_line(line) {
        Ok(Some(term)) => eval_term(ctx, &term),
        Ok(None) => {}
        Err(e) => eprintln!("{e}"),
    }
}

/// Evaluate every non-blank, non-comment line of `path`. Loading stops at
/// the first parse error, reporting how many lines went unevaluated; an
/// unreadable file is the only error the caller sees.
pub fn load(ctx: &mut Context, path: &Path) -> Result<(), Error> {
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let lines: Vec<&str> = content.lines().collect();
    for (index, raw) in lines.iter().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_line(line) {
            Ok(Some(term)) => eval_term(ctx, &term),
            Ok(None) => {}
            Err(e) => {
                eprintln!("{}:{}: {e}", path.display(), index + 1);
                eprintln!(
                    "warning: stopped loading {}, {} line(s) skipped",
                    path.display(),
                    lines.len() - index
                );
                return Ok(());
            }
        }
    }
    Ok(())
}

fn eval_term(ctx: &mut Context, term: &Term) {
    let flags = ctx.flags;
    let mut sink = ConsoleSink::new(flags);
    let result = evaluate(ctx, term, flags, &mut sink);
    if matches!(term, Term::Let { .. }) || flags.contains(Flags::NO_PRINT) {
        return;
    }
    if flags.contains(Flags::VAR_REPLACEMENT) {
        let replacer = |t: &Term| {
            ctx.definitions
                .iter()
                .find(|(_, def)| alpha_equivalent(ctx, t, def))
                .map(|(name, _)| name.clone())
        };
        println!("{}", print::pretty_print(&result, flags, Some(&replacer)));
    } else {
        println!("{}", print::pretty_print(&result, flags, None));
    }
}
