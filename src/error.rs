pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{element} has no anchor named {anchor:?}")]
    UnknownAnchor { element: String, anchor: String },

    #[error("{element} defines anchor {anchor:?} more than once")]
    DuplicateAnchor { element: String, anchor: String },

    #[error("{element} needs a target point (use `.to(..)`)")]
    MissingTarget { element: String },

    #[error("invalid wave character {ch:?} in signal {signal:?}")]
    Wave { signal: String, ch: char },

    #[error("signal {signal:?} has {given} async times, expected {expected}")]
    AsyncTimes { signal: String, given: usize, expected: usize },

    #[error("bad edge annotation {spec:?}: {reason}")]
    Edge { spec: String, reason: String },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn unknown_anchor(element: impl ToString, anchor: impl ToString) -> Self {
        Self::UnknownAnchor { element: element.to_string(), anchor: anchor.to_string() }
    }

    pub fn edge(spec: impl ToString, reason: impl ToString) -> Self {
        Self::Edge { spec: spec.to_string(), reason: reason.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_culprit() {
        let err = Error::unknown_anchor("Ic", "VCC");
        assert_eq!(err.to_string(), "Ic has no anchor named \"VCC\"");

        let err = Error::edge("[0^:1", "unterminated node");
        assert!(err.to_string().contains("unterminated node"));

        let err = Error::Wave { signal: "clk".into(), ch: 'q' };
        assert!(err.to_string().contains("'q'"));
    }

    #[test]
    fn io_preserves_source() {
        let err = Error::from(std::io::Error::other("disk full"));
        assert!(err.to_string().contains("disk full"));
    }
}
