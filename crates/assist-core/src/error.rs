/// Failure of a backend round trip.
///
/// `Aborted` marks a request that was superseded before it resolved. It is
/// never shown to the user and never changes visible state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("backend unreachable: {msg}")]
    Network { msg: String },
    #[error("backend returned HTTP {status}")]
    Status { status: u16 },
    #[error("malformed backend response: {msg}")]
    Decode { msg: String },
    #[error("request aborted")]
    Aborted,
}

impl FetchError {
    pub fn is_abort(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode { msg: e.to_string() }
    }
}
