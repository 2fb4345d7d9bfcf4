use crate::flags::Flags;
use crate::term::Term;

const YELLOW: &str = "\x1b[33m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Render `term` according to the printing flags, with the optional
/// term-to-name replacer applied to the whole term: when it yields a name,
/// `= NAME` is appended on its own line.
pub fn pretty_print(
    term: &Term,
    flags: Flags,
    replacer: Option<&dyn Fn(&Term) -> Option<String>>,
) -> String {
    let mut out = render(term, flags);
    if let Some(replace) = replacer {
        if let Some(name) = replace(term) {
            out.push_str("\n= ");
            out.push_str(&name);
        }
    }
    out
}

/// Plain rendering under the printing flags.
pub fn render(term: &Term, flags: Flags) -> String {
    render_highlighted(term, flags, &[], &[])
}

/// Rendering for trace snapshots: `binders` get their parameter painted,
/// `sites` get the variable painted. Targets are matched by node identity
/// against this exact tree.
pub fn render_highlighted(term: &Term, flags: Flags, binders: &[&Term], sites: &[&Term]) -> String {
    let mut out = String::new();
    write_term(term, flags, binders, sites, true, &mut out);
    out
}

fn is_target(t: &Term, targets: &[&Term]) -> bool {
    targets.iter().any(|x| std::ptr::eq::<Term>(*x, t))
}

fn write_term(
    t: &Term,
    flags: Flags,
    binders: &[&Term],
    sites: &[&Term],
    tail: bool,
    out: &mut String,
) {
    match t {
        Term::Var { name, .. } => {
            if is_target(t, sites) {
                out.push_str(GREEN);
                out.push_str(name);
                out.push_str(RESET);
            } else {
                out.push_str(name);
            }
        }
        Term::Lambda { .. } => write_lambda(t, flags, binders, sites, out),
        Term::Apply { fun, arg, .. } => {
            if flags.contains(Flags::ABBREV_PARENS) {
                // left-associated chains stay flat, binders get fenced
                match &**fun {
                    Term::Lambda { .. } => {
                        out.push('(');
                        write_term(fun, flags, binders, sites, true, out);
                        out.push(')');
                    }
                    _ => write_term(fun, flags, binders, sites, false, out),
                }
                out.push(' ');
                match &**arg {
                    Term::Var { .. } => write_term(arg, flags, binders, sites, false, out),
                    Term::Lambda { .. } if tail => write_term(arg, flags, binders, sites, true, out),
                    _ => {
                        out.push('(');
                        write_term(arg, flags, binders, sites, true, out);
                        out.push(')');
                    }
                }
            } else {
                out.push('(');
                if matches!(&**fun, Term::Lambda { .. }) {
                    out.push('(');
                    write_term(fun, flags, binders, sites, true, out);
                    out.push(')');
                } else {
                    write_term(fun, flags, binders, sites, false, out);
                }
                out.push(' ');
                write_term(arg, flags, binders, sites, true, out);
                out.push(')');
            }
        }
        Term::Let { name, value, .. } => {
            out.push_str("let ");
            out.push_str(name);
            out.push_str(" = ");
            write_term(value, flags, binders, sites, true, out);
        }
    }
}

fn write_lambda(t: &Term, flags: Flags, binders: &[&Term], sites: &[&Term], out: &mut String) {
    let haskell = flags.contains(Flags::HASKELL_STYLE);
    out.push_str(if haskell { "\\" } else { "λ" });
    let mut cur = t;
    loop {
        let Term::Lambda { param, body, .. } = cur else {
            unreachable!("write_lambda is only called on binders");
        };
        if is_target(cur, binders) {
            out.push_str(YELLOW);
            out.push_str(param);
            out.push_str(RESET);
        } else {
            out.push_str(param);
        }
        if flags.contains(Flags::ABBREV_LAMBDA) {
            if let Term::Lambda { .. } = &**body {
                out.push(' ');
                cur = body;
                continue;
            }
        }
        out.push_str(if haskell { " -> " } else { "." });
        write_term(body, flags, binders, sites, true, out);
        break;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_line;
    use crate::term::Term;

    fn parse(input: &str) -> Term {
        parse_line(input).unwrap().unwrap()
    }

    #[test]
    fn default_rendering_is_fully_parenthesised() {
        assert_eq!(render(&parse("f x y"), Flags::empty()), "((f x) y)");
        assert_eq!(render(&parse(r"(\x -> x) a"), Flags::empty()), "((λx.x) a)");
        assert_eq!(render(&parse(r"\x.\y.x y"), Flags::empty()), "λx.λy.(x y)");
    }

    #[test]
    fn abbrev_lambda_groups_parameters() {
        let t = parse(r"\x.\y.\z.x");
        assert_eq!(render(&t, Flags::ABBREV_LAMBDA), "λx y z.x");
        assert_eq!(render(&t, Flags::empty()), "λx.λy.λz.x");
    }

    #[test]
    fn haskell_style_uses_backslash_and_arrow() {
        let t = parse(r"\x.\y.x");
        assert_eq!(render(&t, Flags::HASKELL_STYLE), r"\x -> \y -> x");
        assert_eq!(
            render(&t, Flags::HASKELL_STYLE | Flags::ABBREV_LAMBDA),
            r"\x y -> x"
        );
    }

    #[test]
    fn abbrev_parens_drops_variable_argument_parens() {
        assert_eq!(render(&parse("f x y"), Flags::ABBREV_PARENS), "f x y");
        assert_eq!(render(&parse("f (g x) y"), Flags::ABBREV_PARENS), "f (g x) y");
        assert_eq!(render(&parse(r"(\x.x) a"), Flags::ABBREV_PARENS), "(λx.x) a");
        // a trailing lambda argument needs no fence
        assert_eq!(render(&parse(r"f (\x.x)"), Flags::ABBREV_PARENS), "f λx.x");
    }

    #[test]
    fn replacer_appends_the_matched_name() {
        let t = parse(r"\x.x");
        let replace = |_: &Term| Some("I".to_string());
        assert_eq!(
            pretty_print(&t, Flags::HASKELL_STYLE, Some(&replace)),
            "\\x -> x\n= I"
        );
        assert_eq!(pretty_print(&t, Flags::HASKELL_STYLE, None), "\\x -> x");
    }

    #[test]
    fn highlights_paint_exactly_the_target_nodes() {
        let t = parse(r"(\x.x x) y");
        let Term::Apply { fun, .. } = &t else { unreachable!() };
        let painted = render_highlighted(&t, Flags::empty(), &[fun.as_ref()], &[]);
        assert!(painted.contains("\u{1b}[33mx\u{1b}[0m"));
        // only the binder parameter is painted, not the body occurrences
        assert_eq!(painted.matches('\u{1b}').count(), 2);
    }
}
