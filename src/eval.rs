use std::ptr;

use indexmap::IndexMap;
use log::debug;

use crate::analysis::{bound_variables, find_occurrences, free_variables};
use crate::equiv::alpha_eq;
use crate::flags::Flags;
use crate::print;
use crate::term::Term;
use crate::trace::{SilentSink, TraceEvent, TraceSink};

/// Interpreter state: the named definitions and the user-toggled flags.
/// Created at startup, mutated by `let` evaluation and REPL directives,
/// never shared between threads.
#[derive(Debug, Default)]
pub struct Context {
    pub definitions: IndexMap<String, Term>,
    pub flags: Flags,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Evaluate one parsed line. A `let` mutates the context; anything else is
/// inlined against it and reduced to normal form, one trace event per step.
pub fn evaluate(ctx: &mut Context, term: &Term, flags: Flags, sink: &mut dyn TraceSink) -> Term {
    match term {
        Term::Let { name, value, .. } => {
            let redefined = ctx.definitions.contains_key(name);
            sink.event(TraceEvent::Defined {
                name: name.clone(),
                redefined,
            });
            // Stored unreduced: a recursive combinator must not be
            // evaluated until it is applied.
            ctx.definitions.insert(name.clone(), (**value).clone());
            (**value).clone()
        }
        _ => reduce(inline_context(term, ctx), flags, sink),
    }
}

/// α-equivalence against the context. The candidate `b` is evaluated first;
/// the caller passes an already-reduced `a`.
pub fn alpha_equivalent(ctx: &Context, a: &Term, b: &Term) -> bool {
    let reduced = reduce(inline_context(b, ctx), Flags::empty(), &mut SilentSink);
    alpha_eq(a, &reduced)
}

/// Replace every free occurrence of a defined name with a clone of its
/// definition. A single pass: replacements are spliced in verbatim and not
/// rescanned, so chained definitions inline one layer per evaluation.
pub fn inline_context(term: &Term, ctx: &Context) -> Term {
    fn walk<'a>(t: &'a Term, ctx: &Context, bound: &mut Vec<&'a str>) -> Term {
        match t {
            Term::Var { name, .. } => {
                if !bound.iter().any(|b| b == name) {
                    if let Some(def) = ctx.definitions.get(name) {
                        return def.clone();
                    }
                }
                t.clone()
            }
            Term::Apply { fun, arg, loc } => {
                Term::apply(walk(fun, ctx, bound), walk(arg, ctx, bound), *loc)
            }
            Term::Lambda {
                param,
                param_loc,
                body,
                loc,
            } => {
                bound.push(param);
                let body = walk(body, ctx, bound);
                bound.pop();
                Term::lambda(param.clone(), *param_loc, body, *loc)
            }
            Term::Let { .. } => unreachable!("definitions are not expressions"),
        }
    }
    walk(term, ctx, &mut Vec::new())
}

/// Reduce to normal form. Diverging terms run until the caller interrupts;
/// use [`reduce_limit`] to bound the work.
pub fn reduce(term: Term, flags: Flags, sink: &mut dyn TraceSink) -> Term {
    reduce_limit(term, flags, sink, usize::MAX).0
}

/// Reduce for at most `limit` steps. Returns the (possibly unfinished) term
/// and the number of steps taken.
pub fn reduce_limit(
    mut term: Term,
    flags: Flags,
    sink: &mut dyn TraceSink,
    limit: usize,
) -> (Term, usize) {
    let mut steps = 0;
    while steps < limit {
        let Some((next, kind)) = try_step(&term) else {
            break;
        };
        steps += 1;
        sink.event(trace_step(&term, &next, kind, flags));
        term = next;
    }
    debug!("reduction stopped after {steps} step(s)");
    (term, steps)
}

/// What a single driver step did, holding the participating nodes of the
/// pre-step tree so the trace can highlight them.
enum StepKind<'a> {
    Alpha {
        binder: &'a Term,
        old_name: String,
        new_name: String,
    },
    Beta {
        fun: &'a Term,
        sites: Vec<&'a Term>,
    },
}

/// Find and perform the leftmost-outermost step: the redex at the root if
/// any, else down the function side, else the argument, else under the
/// binder. Returns the rewritten whole term, or `None` in normal form.
fn try_step(t: &Term) -> Option<(Term, StepKind<'_>)> {
    match t {
        Term::Var { .. } => None,
        Term::Lambda {
            param,
            param_loc,
            body,
            loc,
        } => {
            let (next, kind) = try_step(body)?;
            Some((Term::lambda(param.clone(), *param_loc, next, *loc), kind))
        }
        Term::Apply { fun, arg, loc } => {
            if let Term::Lambda { param, body, .. } = &**fun {
                // A redex. One colliding binder is renamed per step so that
                // every α-conversion shows up in the trace on its own.
                if let Some((old_name, binder)) = first_collision(fun, arg) {
                    let new_name = prime(&old_name);
                    let renamed = convert_at(fun, binder, &new_name);
                    return Some((
                        Term::apply(renamed, (**arg).clone(), *loc),
                        StepKind::Alpha {
                            binder,
                            old_name,
                            new_name,
                        },
                    ));
                }
                let sites = find_occurrences(body, param);
                let result = substitute(body, param, arg);
                Some((result, StepKind::Beta { fun, sites }))
            } else {
                if let Some((next, kind)) = try_step(fun) {
                    return Some((Term::apply(next, (**arg).clone(), *loc), kind));
                }
                let (next, kind) = try_step(arg)?;
                Some((Term::apply((**fun).clone(), next, *loc), kind))
            }
        }
        Term::Let { .. } => unreachable!("definitions are not expressions"),
    }
}

/// The first free variable of `arg` (in traversal order) whose name is
/// bound inside `fun`, with the innermost binder of that name. Substituting
/// before renaming it away would capture the occurrence.
fn first_collision<'a>(fun: &'a Term, arg: &Term) -> Option<(String, &'a Term)> {
    let bound = bound_variables(fun);
    for occurrence in free_variables(arg) {
        let Term::Var { name, .. } = occurrence else {
            unreachable!("free occurrences are variables");
        };
        if let Some(binder) = bound.get(name.as_str()).copied() {
            return Some((name.clone(), binder));
        }
    }
    None
}

/// Fresh names append a prime: x, x', x'', …  Each collision is with a name
/// carrying fewer primes, so one more always escapes.
fn prime(name: &str) -> String {
    format!("{name}'")
}

/// Rename `binder`'s parameter and its free occurrences in the body to
/// `fresh`. An inner binder that already uses `fresh` is itself converted
/// to a further-primed name first, so the rename cannot capture.
pub fn alpha_convert(binder: &Term, fresh: &str) -> Term {
    let Term::Lambda {
        param,
        param_loc,
        body,
        loc,
    } = binder
    else {
        unreachable!("α-conversion applies to binders only");
    };
    Term::lambda(fresh, *param_loc, rename_free(body, param, fresh), *loc)
}

fn rename_free(t: &Term, old: &str, new: &str) -> Term {
    match t {
        Term::Var { name, loc } if name == old => Term::var(new, *loc),
        Term::Var { .. } => t.clone(),
        Term::Apply { fun, arg, loc } => Term::apply(
            rename_free(fun, old, new),
            rename_free(arg, old, new),
            *loc,
        ),
        // occurrences below a re-binder of `old` are not free
        Term::Lambda { param, .. } if param == old => t.clone(),
        Term::Lambda { param, .. } if param == new => {
            // the fresh name collides with this binder: push it one prime
            // further out of the way, then carry on renaming inside
            let Term::Lambda {
                param,
                param_loc,
                body,
                loc,
            } = alpha_convert(t, &prime(new))
            else {
                unreachable!("α-conversion preserves the binder");
            };
            Term::Lambda {
                param,
                param_loc,
                body: Box::new(rename_free(&body, old, new)),
                loc,
            }
        }
        Term::Lambda {
            param,
            param_loc,
            body,
            loc,
        } => Term::lambda(param.clone(), *param_loc, rename_free(body, old, new), *loc),
        Term::Let { .. } => unreachable!("definitions are not expressions"),
    }
}

/// Rebuild `t` with the binder at `target` (matched by identity) renamed.
fn convert_at(t: &Term, target: &Term, fresh: &str) -> Term {
    if ptr::eq(t, target) {
        return alpha_convert(t, fresh);
    }
    match t {
        Term::Var { .. } => t.clone(),
        Term::Apply { fun, arg, loc } => Term::apply(
            convert_at(fun, target, fresh),
            convert_at(arg, target, fresh),
            *loc,
        ),
        Term::Lambda {
            param,
            param_loc,
            body,
            loc,
        } => Term::lambda(
            param.clone(),
            *param_loc,
            convert_at(body, target, fresh),
            *loc,
        ),
        Term::Let { .. } => unreachable!("definitions are not expressions"),
    }
}

/// Substitute a clone of `value` for every free occurrence of `name`.
/// Capture is impossible by the time this runs: colliding binders have
/// already been renamed away.
///
/// See https://en.wikipedia.org/wiki/Lambda_calculus#Substitution.
fn substitute(body: &Term, name: &str, value: &Term) -> Term {
    match body {
        Term::Var { name: n, .. } if n == name => value.clone(),
        Term::Var { .. } => body.clone(),
        Term::Apply { fun, arg, loc } => Term::apply(
            substitute(fun, name, value),
            substitute(arg, name, value),
            *loc,
        ),
        // the inner binder shadows `name`; nothing to substitute below
        Term::Lambda { param, .. } if param == name => body.clone(),
        Term::Lambda {
            param,
            param_loc,
            body: inner,
            loc,
        } => Term::lambda(
            param.clone(),
            *param_loc,
            substitute(inner, name, value),
            *loc,
        ),
        Term::Let { .. } => unreachable!("definitions are not expressions"),
    }
}

fn trace_step(before: &Term, after: &Term, kind: StepKind<'_>, flags: Flags) -> TraceEvent {
    match kind {
        StepKind::Alpha {
            binder,
            old_name,
            new_name,
        } => TraceEvent::Alpha {
            old_name,
            new_name,
            before: print::render_highlighted(before, flags, &[binder], &[]),
            after: print::render(after, flags),
        },
        StepKind::Beta { fun, sites } => TraceEvent::Beta {
            before: print::render_highlighted(before, flags, &[fun], &sites),
            after: print::render(after, flags),
        },
    }
}
