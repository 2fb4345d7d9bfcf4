use std::collections::HashSet;

use crate::analysis::free_names_bounded;
use crate::term::Term;

/// Decide whether two terms differ only by a consistent renaming of bound
/// variables.
///
/// Both trees are walked in lock-step with parallel scope stacks; a bound
/// name resolves to the depth of the binder that introduced it, so the
/// comparison survives cloning (nothing depends on node identity). Free
/// names must match verbatim.
pub fn alpha_eq(a: &Term, b: &Term) -> bool {
    eq_under(a, b, &mut Vec::new(), &mut Vec::new())
}

fn eq_under<'a>(
    a: &'a Term,
    b: &'a Term,
    scope_a: &mut Vec<&'a str>,
    scope_b: &mut Vec<&'a str>,
) -> bool {
    // One-binder-deep free-name slices must agree before anything else;
    // this prunes mismatched subtrees without a full walk.
    if free_slice(a, scope_a) != free_slice(b, scope_b) {
        return false;
    }
    match (a, b) {
        (Term::Var { name: na, .. }, Term::Var { name: nb, .. }) => {
            match (
                scope_a.iter().rposition(|s| s == na),
                scope_b.iter().rposition(|s| s == nb),
            ) {
                // both bound: same binder depth required
                (Some(da), Some(db)) => da == db,
                // both free: same name required
                (None, None) => na == nb,
                _ => false,
            }
        }
        (
            Term::Apply {
                fun: fa, arg: aa, ..
            },
            Term::Apply {
                fun: fb, arg: ab, ..
            },
        ) => eq_under(fa, fb, scope_a, scope_b) && eq_under(aa, ab, scope_a, scope_b),
        (
            Term::Lambda {
                param: pa,
                body: ba,
                ..
            },
            Term::Lambda {
                param: pb,
                body: bb,
                ..
            },
        ) => {
            scope_a.push(pa);
            scope_b.push(pb);
            let equal = eq_under(ba, bb, scope_a, scope_b);
            scope_a.pop();
            scope_b.pop();
            equal
        }
        _ => false,
    }
}

/// Free names of `t` down to one binder level, minus the names the
/// enclosing scope already binds.
fn free_slice<'a>(t: &'a Term, scope: &[&str]) -> HashSet<&'a str> {
    free_names_bounded(t, 1)
        .into_iter()
        .filter(|name| !scope.iter().any(|s| s == name))
        .collect()
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
    fn bound_names_do_not_matter() {
        assert!(alpha_eq(&parse(r"\x.x"), &parse(r"\y.y")));
        assert!(alpha_eq(&parse(r"\x y.x y"), &parse(r"\a b.a b")));
    }

    #[test]
    fn free_names_do_matter() {
        assert!(!alpha_eq(&parse("x"), &parse("y")));
        assert!(!alpha_eq(&parse(r"\x.y"), &parse(r"\x.z")));
        // bound on one side, free on the other
        assert!(!alpha_eq(&parse(r"\x.x"), &parse(r"\y.x")));
    }

    #[test]
    fn binder_depths_must_line_up() {
        assert!(alpha_eq(&parse(r"\x.\y.x"), &parse(r"\a.\b.a")));
        assert!(!alpha_eq(&parse(r"\x.\y.x"), &parse(r"\a.\b.b")));
    }

    #[test]
    fn shadowing_resolves_to_the_nearest_binder() {
        assert!(alpha_eq(&parse(r"\x.\x.x"), &parse(r"\a.\b.b")));
        assert!(!alpha_eq(&parse(r"\x.\x.x"), &parse(r"\a.\b.a")));
    }

    #[test]
    fn structure_must_match() {
        assert!(!alpha_eq(&parse(r"\x.x"), &parse(r"\x.x x")));
        assert!(!alpha_eq(&parse("x y"), &parse(r"\x.y")));
    }

    #[test]
    fn is_an_equivalence_relation() {
        let a = parse(r"\x.\y.x (y y)");
        let b = parse(r"\u.\v.u (v v)");
        let c = parse(r"\p.\q.p (q q)");
        assert!(alpha_eq(&a, &a));
        assert!(alpha_eq(&a, &b) && alpha_eq(&b, &a));
        assert!(alpha_eq(&a, &b) && alpha_eq(&b, &c) && alpha_eq(&a, &c));
    }
}
