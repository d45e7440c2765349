/// Quote characters treated as string delimiters in addition to `"` and `'`.
///
/// Curly quotes pair left-with-right; the backtick pairs with itself.
pub const DEFAULT_FANCY_QUOTES: &[char] = &['\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}', '`'];

#[derive(Clone, Debug)]
pub struct Options {
    /// Skip the initial conformant decode. By default every entry point first
    /// tries a strict JSON parse and returns that result unchanged when it
    /// succeeds, so valid input never touches the repair engine.
    pub skip_initial_validation: bool,
    /// Refuse repairs: the first anomaly raises a fatal error with position
    /// and reason instead of being fixed up.
    pub strict: bool,
    /// When the input contains several top-level values, return only the
    /// first complete one and discard the rest. This keeps the output of a
    /// growing stream stable across repeated calls.
    pub stream_stable: bool,
    /// Escape non-ASCII characters as `\uXXXX` in serialized output.
    pub ensure_ascii: bool,
    /// Indentation width for serialized output. `None` means compact.
    pub indent: Option<usize>,
    /// Collect repair log entries while parsing. Retrieve them through
    /// [`repair_with_log`](crate::repair_with_log).
    pub logging: bool,
    /// Characters captured on each side of a repair position when building
    /// the log entry's context window.
    pub log_window: usize,
    /// Extra characters accepted as string delimiters, equivalent to the
    /// ASCII quotes. Defaults to [`DEFAULT_FANCY_QUOTES`].
    pub fancy_quotes: Vec<char>,
    /// Maximum container nesting depth. Beyond it, non-strict parses close
    /// the container with what was built; strict parses fail.
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            skip_initial_validation: false,
            strict: false,
            stream_stable: false,
            ensure_ascii: false,
            indent: None,
            logging: false,
            log_window: 10,
            fancy_quotes: DEFAULT_FANCY_QUOTES.to_vec(),
            max_depth: 512,
        }
    }
}
