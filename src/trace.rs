use crate::flags::Flags;

/// One observed rewrite, in reduction order. Snapshots are materialised as
/// strings by the printer, with the participating nodes highlighted in the
/// `before` rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    /// A `let` entered the context.
    Defined { name: String, redefined: bool },
    /// A binder was renamed to avoid capture.
    Alpha {
        old_name: String,
        new_name: String,
        before: String,
        after: String,
    },
    /// A redex was contracted.
    Beta { before: String, after: String },
}

/// Consumes the driver's trace. The rewriter takes the sink as a parameter;
/// there is no global observer state.
pub trait TraceSink {
    fn event(&mut self, event: TraceEvent);
}

/// Collects events for inspection; used by tests.
impl TraceSink for Vec<TraceEvent> {
    fn event(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

/// Discards everything. Used when evaluating definitions for back-substitution.
pub struct SilentSink;

impl TraceSink for SilentSink {
    fn event(&mut self, _event: TraceEvent) {}
}

/// Numbered step printer for the REPL, honouring `TRACE` and `FULL_TRACE`.
pub struct ConsoleSink {
    flags: Flags,
    step: usize,
}

impl ConsoleSink {
    pub fn new(flags: Flags) -> Self {
        Self { flags, step: 0 }
    }
}

impl TraceSink for ConsoleSink {
    fn event(&mut self, event: TraceEvent) {
        let full = self.flags.contains(Flags::FULL_TRACE);
        if !full && !self.flags.contains(Flags::TRACE) {
            return;
        }
        match event {
            TraceEvent::Defined { name, redefined } => {
                if redefined {
                    println!("{name} redefined");
                } else {
                    println!("{name} defined");
                }
            }
            TraceEvent::Alpha {
                old_name,
                new_name,
                before,
                after,
            } => {
                self.step += 1;
                println!("{:>3}. α  {old_name} → {new_name}", self.step);
                if full {
                    println!("     {before}");
                    println!("   ⇒ {after}");
                }
            }
            TraceEvent::Beta { before, after } => {
                self.step += 1;
                if full {
                    println!("{:>3}. β", self.step);
                    println!("     {before}");
                    println!("   ⇒ {after}");
                } else {
                    println!("{:>3}. β  {after}", self.step);
                }
            }
        }
    }
}
