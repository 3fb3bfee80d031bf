use thiserror::Error;

/// Enumerates high-level errors returned by this library.
#[derive(Debug, Error)]
pub enum FichaError {
    /// Represents an error with the request.
    #[error("Bad request")]
    BadRequest,

    /// Represents a submission without an interviewee name.
    #[error("Missing interviewee name")]
    NameMissing,

    /// Represents a failure to render an embedded template.
    #[error("Failed to render template")]
    Template { source: tera::Error },

    /// Represents a download filename that cannot be carried in a header.
    #[error("Invalid download filename")]
    InvalidFilename {
        source: warp::http::header::InvalidHeaderValue,
    },

    /// Represents a failure to construct the HTTP response.
    #[error("Failed to build response")]
    Http { source: warp::http::Error },
}
