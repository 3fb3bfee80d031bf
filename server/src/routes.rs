use std::sync::Arc;

use log::{error, Logger};
use warp::http::StatusCode;
use warp::reject;
use warp::reply::{json, with_status, Json, WithStatus};

use crate::errors::FichaError;

mod handlers;
mod rejection;
mod response;

pub use internal::*;

/// The maximum form submission size to accept. This should be enforced
/// by the HTTP gateway, so on the Rust side it’s set to an unreasonably
/// large number.
const MAX_CONTENT_LENGTH: u64 = 2 * 1024 * 1024 * 1024;

pub async fn format_rejection(
    logger: Arc<Logger>,
    rej: reject::Rejection,
) -> Result<WithStatus<Json>, reject::Rejection> {
    if let Some(r) = rej.find::<rejection::Rejection>() {
        let e = &r.error;
        error!(logger, "Request failed"; "context" => ?r.context, "error" => ?r.error, "status" => %status_code_for(e), "message" => %r.error);
        let flattened = r.flatten();

        return Ok(with_status(json(&flattened), status_code_for(e)));
    }

    Err(rej)
}

fn status_code_for(e: &FichaError) -> StatusCode {
    use FichaError::*;

    match e {
        BadRequest | NameMissing => StatusCode::BAD_REQUEST,
        Template { .. } | InvalidFilename { .. } | Http { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

mod internal {
    use std::sync::Arc;

    use log::Logger;
    use warp::filters::BoxedFilter;
    use warp::path::end;
    use warp::Filter;
    use warp::Reply;
    use warp::{get as g, path as p, path::param as par, post};

    use super::{handlers, MAX_CONTENT_LENGTH};
    use crate::document::Variant;
    use crate::record::InterviewRecord;

    type Route = BoxedFilter<(Box<dyn Reply>,)>;

    /// `GET /` serves the data-entry form.
    pub fn make_form_route(logger: Arc<Logger>) -> Route {
        warp::any()
            .map(move || logger.clone())
            .and(end())
            .and(g())
            .and_then(handlers::form)
            .boxed()
    }

    /// `POST /fichas/:variant` renders a submission into a download.
    pub fn make_submission_route(logger: Arc<Logger>) -> Route {
        warp::any()
            .map(move || logger.clone())
            .and(p("fichas"))
            .and(par::<Variant>())
            .and(end())
            .and(post())
            .and(warp::body::content_length_limit(MAX_CONTENT_LENGTH))
            .and(warp::body::form::<InterviewRecord>())
            .and_then(handlers::submit)
            .boxed()
    }

    /// `GET /healthz` reports build information.
    pub fn make_healthz_route() -> Route {
        p("healthz")
            .and(end())
            .and(g())
            .and_then(handlers::healthz)
            .boxed()
    }
}
