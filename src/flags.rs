use bitflags::bitflags;

bitflags! {
    /// User-toggled printing and evaluation options, flipped from the REPL.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Flags: u8 {
        /// Print `λx y.B` instead of `λx.λy.B`.
        const ABBREV_LAMBDA = 1;
        /// Minimal parenthesisation: application arguments that are plain
        /// variables (and trailing lambdas) lose their parentheses.
        const ABBREV_PARENS = 1 << 1;
        /// Print `\x -> B` instead of `λx.B`.
        const HASKELL_STYLE = 1 << 2;
        /// Suppress result printing.
        const NO_PRINT = 1 << 3;
        /// Print the numbered list of reduction steps.
        const TRACE = 1 << 4;
        /// Additionally print a highlighted before/after pair per step.
        const FULL_TRACE = 1 << 5;
        /// Report definitions α-equivalent to the result as `= NAME`.
        const VAR_REPLACEMENT = 1 << 6;
    }
}

impl Default for Flags {
    fn default() -> Self {
        Flags::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Flags;

    #[test]
    fn toggling_is_involutive() {
        let mut flags = Flags::default();
        flags.toggle(Flags::TRACE);
        assert!(flags.contains(Flags::TRACE));
        flags.toggle(Flags::TRACE);
        assert!(!flags.contains(Flags::TRACE));
    }

    #[test]
    fn compact_pair_toggles_together() {
        let mut flags = Flags::default();
        flags.toggle(Flags::ABBREV_LAMBDA | Flags::ABBREV_PARENS);
        assert!(flags.contains(Flags::ABBREV_LAMBDA));
        assert!(flags.contains(Flags::ABBREV_PARENS));
    }
}
