/// Byte span of a node in its source line, kept for diagnostics only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Loc {
    pub begin: usize,
    pub len: usize,
}

impl Loc {
    pub fn new(begin: usize, len: usize) -> Self {
        Self { begin, len }
    }
}

/// AST for our lambda calculus
///
/// See https://en.wikipedia.org/wiki/Lambda_calculus#Definition.
#[derive(Debug, Clone)]
pub enum Term {
    Var {
        name: String,
        loc: Loc,
    },
    Apply {
        fun: Box<Term>,
        arg: Box<Term>,
        loc: Loc,
    },
    Lambda {
        param: String,
        param_loc: Loc,
        body: Box<Term>,
        loc: Loc,
    },
    /// Top-level definition. Not a real expression: never reducible, and
    /// intercepted before the rewriter ever sees it.
    Let {
        name: String,
        value: Box<Term>,
        loc: Loc,
    },
}

impl Term {
    pub fn var(name: impl Into<String>, loc: Loc) -> Term {
        Term::Var {
            name: name.into(),
            loc,
        }
    }

    pub fn apply(fun: Term, arg: Term, loc: Loc) -> Term {
        Term::Apply {
            fun: Box::new(fun),
            arg: Box::new(arg),
            loc,
        }
    }

    pub fn lambda(param: impl Into<String>, param_loc: Loc, body: Term, loc: Loc) -> Term {
        Term::Lambda {
            param: param.into(),
            param_loc,
            body: Box::new(body),
            loc,
        }
    }

    pub fn let_(name: impl Into<String>, value: Term, loc: Loc) -> Term {
        Term::Let {
            name: name.into(),
            value: Box::new(value),
            loc,
        }
    }

    pub fn loc(&self) -> Loc {
        match self {
            Term::Var { loc, .. }
            | Term::Apply { loc, .. }
            | Term::Lambda { loc, .. }
            | Term::Let { loc, .. } => *loc,
        }
    }
}

/// Syntactic equality: same tag, same names, same children. Locations are
/// diagnostics only and do not participate, so two parses of the same text
/// at different offsets compare equal.
impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Term::Var { name: a, .. }, Term::Var { name: b, .. }) => a == b,
            (
                Term::Apply {
                    fun: f1, arg: a1, ..
                },
                Term::Apply {
                    fun: f2, arg: a2, ..
                },
            ) => f1 == f2 && a1 == a2,
            (
                Term::Lambda {
                    param: p1,
                    body: b1,
                    ..
                },
                Term::Lambda {
                    param: p2,
                    body: b2,
                    ..
                },
            ) => p1 == p2 && b1 == b2,
            (
                Term::Let {
                    name: n1,
                    value: v1,
                    ..
                },
                Term::Let {
                    name: n2,
                    value: v2,
                    ..
                },
            ) => n1 == n2 && v1 == v2,
            _ => false,
        }
    }
}

impl Eq for Term {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_is_deep_and_equal() {
        let t = Term::apply(
            Term::lambda("x", Loc::default(), Term::var("x", Loc::default()), Loc::default()),
            Term::var("y", Loc::default()),
            Loc::default(),
        );
        let c = t.clone();
        assert_eq!(t, c);
        // Distinct allocations: mutating the clone must not touch the original.
        let Term::Apply { fun, .. } = &t else { unreachable!() };
        let Term::Apply { fun: cfun, .. } = &c else { unreachable!() };
        assert!(!std::ptr::eq(&**fun, &**cfun));
    }

    #[test]
    fn equality_ignores_locations() {
        let a = Term::var("x", Loc::new(0, 1));
        let b = Term::var("x", Loc::new(7, 1));
        assert_eq!(a, b);
        assert_ne!(a, Term::var("y", Loc::new(0, 1)));
    }

    #[test]
    fn equality_is_syntactic_not_alpha() {
        let a = Term::lambda("x", Loc::default(), Term::var("x", Loc::default()), Loc::default());
        let b = Term::lambda("y", Loc::default(), Term::var("y", Loc::default()), Loc::default());
        assert_ne!(a, b);
    }
}
