use std::fmt;

/// Errors raised by route edits and segment access.
///
/// Every route operation is a pure function from the old route to a new one,
/// so an error never leaves a half-edited route behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// `remove(count)` with `count` greater than the number of segments.
    OutOfRange { count: usize, len: usize },
    /// The terminal segment has no back-navigation defined (dialogs).
    UnsupportedOperation(String),
    /// A code path touched something the model does not define yet.
    NotImplemented(&'static str),
    /// A data instance is not directly preceded by the name instance that anchors it.
    MisplacedDataSegment { index: usize },
    /// A breadcrumb index past the end of the navigatable segments.
    NavigatableIndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::OutOfRange { count, len } => {
                write!(f, "cannot remove {count} segments from a route of length {len}")
            }
            RouteError::UnsupportedOperation(msg) => write!(f, "unsupported operation: {msg}"),
            RouteError::NotImplemented(what) => write!(f, "not implemented: {what}"),
            RouteError::MisplacedDataSegment { index } => write!(
                f,
                "data segment at index {index} is not preceded by its anchoring name segment"
            ),
            RouteError::NavigatableIndexOutOfRange { index, len } => write!(
                f,
                "navigatable index {index} out of range for {len} navigatable segments"
            ),
        }
    }
}

impl std::error::Error for RouteError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = RouteError::OutOfRange { count: 5, len: 2 };
        assert_eq!(
            err.to_string(),
            "cannot remove 5 segments from a route of length 2"
        );
    }

    #[test]
    fn test_not_implemented_message() {
        let err = RouteError::NotImplemented("dialog segments");
        assert_eq!(err.to_string(), "not implemented: dialog segments");
    }
}
