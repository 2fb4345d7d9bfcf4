//! Interactive interpreter for the untyped lambda calculus.
//!
//! Terms are reduced as owned syntax trees by leftmost-outermost
//! (normal-order) β-reduction. Bound variables are α-converted exactly when
//! a substitution would otherwise capture a free variable, and every rewrite
//! step can be observed through a trace sink.
//!
//! Modules:
//! - term: the term representation
//! - analysis: free/bound-variable queries over terms
//! - eval: context substitution, α-conversion, β-reduction and the driver
//! - equiv: the α-equivalence oracle
//! - parser, print, repl: the surface layers around the evaluator

pub mod analysis;
pub mod equiv;
pub mod error;
pub mod eval;
pub mod flags;
pub mod parser;
pub mod print;
pub mod repl;
pub mod term;
pub mod trace;
