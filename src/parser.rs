use pest::{iterators::Pair, Parser};
use pest_derive::Parser;

use crate::error::Error;
use crate::term::{Loc, Term};

/// Lambda calculus parser using pest
#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct LambdaParser;

fn loc_of(pair: &Pair<Rule>) -> Loc {
    let span = pair.as_span();
    Loc::new(span.start(), span.end() - span.start())
}

fn span_over(lhs: &Term, rhs: &Term) -> Loc {
    let begin = lhs.loc().begin;
    Loc::new(begin, rhs.loc().begin + rhs.loc().len - begin)
}

/// Parse one line of input. Blank and comment-only lines yield `Ok(None)`.
pub fn parse_line(input: &str) -> Result<Option<Term>, Error> {
    let mut pairs =
        LambdaParser::parse(Rule::line, input).map_err(|e| Error::Parse(Box::new(e)))?;
    let line = pairs.next().expect("the grammar always yields a line");
    for pair in line.into_inner() {
        match pair.as_rule() {
            Rule::EOI => break,
            Rule::binding => {
                let loc = loc_of(&pair);
                let mut inner = pair.into_inner();
                let name = inner
                    .find(|p| p.as_rule() == Rule::ident)
                    .expect("binding has a name");
                let value = parse_term(inner.next().expect("binding has a value"));
                return Ok(Some(Term::let_(name.as_str(), value, loc)));
            }
            _ => return Ok(Some(parse_term(pair))),
        }
    }
    Ok(None)
}

/// Transform a pest pair into our own AST node format.
fn parse_term(pair: Pair<Rule>) -> Term {
    match pair.as_rule() {
        Rule::variable => Term::var(pair.as_str(), loc_of(&pair)),
        Rule::lambda => {
            let loc = loc_of(&pair);
            let mut params = Vec::new();
            let mut body = None;
            for inner in pair.into_inner() {
                match inner.as_rule() {
                    Rule::ident => params.push((inner.as_str().to_string(), loc_of(&inner))),
                    _ => body = Some(parse_term(inner)),
                }
            }
            // Syntax sugar: λx y z.B is λx.λy.λz.B
            let mut term = body.expect("lambda has a body");
            for (param, param_loc) in params.into_iter().rev() {
                term = Term::lambda(param, param_loc, term, loc);
            }
            term
        }
        Rule::term => {
            // Application by juxtaposition, folded left-associatively
            let mut inner = pair.into_inner();
            let mut lhs = parse_term(inner.next().expect("term is never empty"));
            for next in inner {
                let rhs = parse_term(next);
                let loc = span_over(&lhs, &rhs);
                lhs = Term::apply(lhs, rhs, loc);
            }
            lhs
        }
        r => unreachable!("Rule {:?} not expected", r),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Term {
        parse_line(input).unwrap().unwrap()
    }

    fn var(name: &str) -> Term {
        Term::var(name, Loc::default())
    }

    fn lam(param: &str, body: Term) -> Term {
        Term::lambda(param, Loc::default(), body, Loc::default())
    }

    fn app(fun: Term, arg: Term) -> Term {
        Term::apply(fun, arg, Loc::default())
    }

    #[test]
    fn application_is_left_associative() {
        assert_eq!(parse("a b c"), app(app(var("a"), var("b")), var("c")));
        assert_eq!(parse("a (b c)"), app(var("a"), app(var("b"), var("c"))));
    }

    #[test]
    fn both_lambda_spellings_parse_alike() {
        let expected = lam("x", app(var("x"), var("y")));
        assert_eq!(parse("λx.x y"), expected);
        assert_eq!(parse(r"\x -> x y"), expected);
    }

    #[test]
    fn multi_parameter_lambdas_curry() {
        assert_eq!(
            parse(r"\x y z -> x"),
            lam("x", lam("y", lam("z", var("x"))))
        );
    }

    #[test]
    fn lambda_body_extends_to_the_right() {
        assert_eq!(parse(r"\x -> x x"), lam("x", app(var("x"), var("x"))));
        assert_eq!(
            parse(r"(\x -> x) y"),
            app(lam("x", var("x")), var("y"))
        );
    }

    #[test]
    fn let_binds_at_top_level() {
        assert_eq!(
            parse(r"let I = \x -> x"),
            Term::let_("I", lam("x", var("x")), Loc::default())
        );
    }

    #[test]
    fn blank_and_comment_lines_are_empty() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("# a comment").unwrap(), None);
    }

    #[test]
    fn identifiers_allow_digits_and_primes() {
        assert_eq!(parse("x1 y'"), app(var("x1"), var("y'")));
    }

    #[test]
    fn let_prefix_does_not_swallow_identifiers() {
        assert_eq!(parse("lettuce"), var("lettuce"));
    }

    #[test]
    fn unbalanced_parens_are_reported() {
        assert!(parse_line("(x").is_err());
        assert!(parse_line(r"\x").is_err());
    }

    #[test]
    fn locations_record_byte_spans() {
        // λ is two bytes wide
        let t = parse("λx.y");
        let Term::Lambda { param_loc, body, .. } = &t else {
            unreachable!()
        };
        assert_eq!(*param_loc, Loc::new(2, 1));
        assert_eq!(body.loc(), Loc::new(4, 1));
    }
}
