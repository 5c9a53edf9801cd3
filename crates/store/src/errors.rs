use thiserror::Error;

/// Failures surfaced by `ConfigurationStore::load`.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The document could not be fetched or answered with a non-2xx status.
    #[error("{location} could not be loaded: {}", describe_failure(.status_code, .reason))]
    Unreachable {
        location: String,
        status_code: Option<u16>,
        reason: String,
    },
    /// The document was fetched but is not a JSON object.
    #[error("{location} is not a valid JSON object: {cause}")]
    InvalidFormat { location: String, cause: String },
}

fn describe_failure(status_code: &Option<u16>, reason: &str) -> String {
    match status_code {
        Some(status) => status.to_string(),
        None => reason.to_string(),
    }
}

impl LoadError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            LoadError::Unreachable { .. } => 1001,
            LoadError::InvalidFormat { .. } => 1002,
        }
    }

    /// Short label used as a metrics dimension.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::Unreachable { .. } => "unreachable",
            LoadError::InvalidFormat { .. } => "invalid_format",
        }
    }

    pub fn location(&self) -> &str {
        match self {
            LoadError::Unreachable { location, .. } | LoadError::InvalidFormat { location, .. } => location,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            LoadError::Unreachable { status_code, .. } => *status_code,
            LoadError::InvalidFormat { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_with_status_names_location_and_status() {
        let err = LoadError::Unreachable {
            location: "unknown.json".into(),
            status_code: Some(404),
            reason: "Not Found".into(),
        };
        assert_eq!(err.to_string(), "unknown.json could not be loaded: 404");
        assert_eq!(err.code(), 1001);
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn unreachable_without_status_falls_back_to_reason() {
        let err = LoadError::Unreachable {
            location: "http://10.0.0.1/settings.json".into(),
            status_code: None,
            reason: "connection refused".into(),
        };
        assert_eq!(
            err.to_string(),
            "http://10.0.0.1/settings.json could not be loaded: connection refused"
        );
        assert_eq!(err.kind(), "unreachable");
    }

    #[test]
    fn invalid_format_reports_cause() {
        let err = LoadError::InvalidFormat { location: "settings.txt".into(), cause: "expected value".into() };
        assert_eq!(err.to_string(), "settings.txt is not a valid JSON object: expected value");
        assert_eq!(err.location(), "settings.txt");
        assert_eq!(err.code(), 1002);
        assert_eq!(err.status_code(), None);
    }
}
