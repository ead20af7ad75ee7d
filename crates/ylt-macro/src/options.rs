//! Processing options.

/// Default limit on context nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options controlling a processing pass.
///
/// # Example
///
/// ```rust
/// use ylt_macro::ProcessOptions;
///
/// let options = ProcessOptions {
///     max_depth: 64,
///     ..Default::default()
/// };
/// assert!(!options.collect_errors);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Maximum context depth (default: 256).
    ///
    /// Processing fails with `ErrorKind::NestingTooDeep` at the first node
    /// whose context is deeper than this. The root context has depth 0 and
    /// each document, sequence element, key and value adds one level.
    pub max_depth: usize,

    /// Keep going after a document fails (default: false).
    ///
    /// Failing documents are dropped from the output and their errors are
    /// returned together once every document has been processed.
    pub collect_errors: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            collect_errors: false,
        }
    }
}
