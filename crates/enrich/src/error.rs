use billsync_legistar::LegistarError;

#[derive(Debug)]
pub enum EnrichError {
    /// One or more requested file numbers had no upstream record.
    /// Carries the full missing list, in input order.
    Incomplete(Vec<String>),
    /// A resolved record lacks a field the pipeline needs downstream.
    MissingField { file: String, field: &'static str },
    /// Upstream client failure (token, network, HTTP, parse).
    Source(LegistarError),
}

impl std::fmt::Display for EnrichError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnrichError::Incomplete(files) => {
                write!(f, "no upstream record for: {}", files.join(", "))
            }
            EnrichError::MissingField { file, field } => {
                write!(f, "matter '{}' is missing field '{}'", file, field)
            }
            EnrichError::Source(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for EnrichError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EnrichError::Source(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LegistarError> for EnrichError {
    fn from(err: LegistarError) -> Self {
        EnrichError::Source(err)
    }
}
