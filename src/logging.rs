/// One repair performed by the parser: which heuristic fired, where, and a
/// window of the surrounding input for diagnostic display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairLogEntry {
    /// Character offset at which the repair was applied.
    pub position: usize,
    /// Static identifier of the heuristic, e.g.
    /// `"string missing its closing quote at end of input"`.
    pub message: &'static str,
    /// Input text around `position`, `Options::log_window` characters on
    /// each side.
    pub context: String,
}
