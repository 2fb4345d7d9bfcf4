use std::collections::{HashMap, HashSet};

use crate::term::Term;

/// Collect the free variable occurrences in a term, in traversal order
/// (`fun` before `arg`). The same name at two positions yields two entries.
///
/// See https://en.wikipedia.org/wiki/Lambda_calculus#Free_and_bound_variables.
pub fn free_variables(e: &Term) -> Vec<&Term> {
    let mut out = Vec::new();
    collect_free(e, None, &mut Vec::new(), &mut out);
    out
}

/// Like [`free_variables`], but stops descending into `Lambda` bodies once
/// `limit` binder levels have been entered. The α-equivalence oracle uses
/// `limit = 1` to reason one binder at a time.
pub fn free_variables_bounded(e: &Term, limit: usize) -> Vec<&Term> {
    let mut out = Vec::new();
    collect_free(e, Some(limit), &mut Vec::new(), &mut out);
    out
}

fn collect_free<'a>(
    e: &'a Term,
    remaining: Option<usize>,
    bound: &mut Vec<&'a str>,
    out: &mut Vec<&'a Term>,
) {
    match e {
        Term::Var { name, .. } => {
            if !bound.iter().any(|b| b == name) {
                out.push(e);
            }
        }
        Term::Apply { fun, arg, .. } => {
            collect_free(fun, remaining, bound, out);
            collect_free(arg, remaining, bound, out);
        }
        Term::Lambda { param, body, .. } => {
            if remaining == Some(0) {
                return;
            }
            bound.push(param);
            collect_free(body, remaining.map(|r| r - 1), bound, out);
            bound.pop();
        }
        Term::Let { .. } => unreachable!("definitions are not expressions"),
    }
}

/// The names occurring free in `e`.
pub fn free_names(e: &Term) -> HashSet<&str> {
    free_variables(e).into_iter().map(var_name).collect()
}

/// The names occurring free in `e`, traversal bounded as in
/// [`free_variables_bounded`].
pub fn free_names_bounded(e: &Term, limit: usize) -> HashSet<&str> {
    free_variables_bounded(e, limit)
        .into_iter()
        .map(var_name)
        .collect()
}

fn var_name(t: &Term) -> &str {
    match t {
        Term::Var { name, .. } => name,
        _ => unreachable!("free occurrences are variables"),
    }
}

/// Map each name bound at least once in `e` to the innermost `Lambda`
/// binding it. β-reduction consults this to decide which binders need
/// α-renaming before an argument is substituted in.
pub fn bound_variables(e: &Term) -> HashMap<&str, &Term> {
    let mut map = HashMap::new();
    collect_bound(e, &mut map);
    map
}

fn collect_bound<'a>(e: &'a Term, map: &mut HashMap<&'a str, &'a Term>) {
    match e {
        Term::Var { .. } => {}
        Term::Apply { fun, arg, .. } => {
            collect_bound(fun, map);
            collect_bound(arg, map);
        }
        Term::Lambda { param, body, .. } => {
            // Preorder: a deeper binder of the same name overwrites this one.
            map.insert(param.as_str(), e);
            collect_bound(body, map);
        }
        Term::Let { .. } => unreachable!("definitions are not expressions"),
    }
}

/// The `Var` nodes in `e` that a β-step substituting for `name` would
/// replace: free occurrences of `name`, stopping at any `Lambda` that
/// re-binds it.
pub fn find_occurrences<'a>(e: &'a Term, name: &str) -> Vec<&'a Term> {
    let mut out = Vec::new();
    collect_occurrences(e, name, &mut out);
    out
}

fn collect_occurrences<'a>(e: &'a Term, name: &str, out: &mut Vec<&'a Term>) {
    match e {
        Term::Var { name: n, .. } => {
            if n == name {
                out.push(e);
            }
        }
        Term::Apply { fun, arg, .. } => {
            collect_occurrences(fun, name, out);
            collect_occurrences(arg, name, out);
        }
        Term::Lambda { param, body, .. } => {
            if param != name {
                collect_occurrences(body, name, out);
            }
        }
        Term::Let { .. } => unreachable!("definitions are not expressions"),
    }
}
