//! Result of driving a fetch through to display state.

/// What happened to a refresh once its responses came back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Responses were applied to display state.
    Applied,
    /// A newer request was issued meanwhile; the responses were discarded.
    Superseded,
    /// A call failed. The error was logged and display state is unchanged.
    Failed,
}
