use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, Logger};
use time::OffsetDateTime;
use warp::{
    http::{header::HeaderValue, Response, StatusCode},
    reject,
    reply::{html, json, with_header, Reply},
};

use crate::document::{self, Variant};
use crate::errors::FichaError;
use crate::filename::download_filename;
use crate::form;
use crate::record::InterviewRecord;
use crate::routes::rejection::{Context, Rejection};
use crate::routes::response::SuccessResponse;

const SERVER_TIMING_HEADER: &str = "server-timing";
type RouteResult = Result<Box<dyn Reply>, reject::Rejection>;

macro_rules! timed {
    ($($expression:stmt);+) => {
        let start = Instant::now();

        // TODO when `try` blocks are stabilized, we can wrap the body
        // and return the headers even on errors
        let result = { $($expression)+ };

        Ok(Box::new(with_header(
            result,
            SERVER_TIMING_HEADER,
            format_server_timing(start.elapsed()),
        )) as Box<dyn Reply>)
    };
}

pub async fn form(logger: Arc<Logger>) -> RouteResult {
    timed! {
        debug!(logger, "Rendering form page...");
        let page = form::page().map_err(|e| Rejection::new(Context::form(), e))?;

        html(page)
    }
}

pub async fn submit(
    logger: Arc<Logger>,
    variant: Variant,
    record: InterviewRecord,
) -> RouteResult {
    timed! {
        let error_handler = |e: FichaError| Rejection::new(Context::submission(variant), e);

        ensure_name(&record).map_err(&error_handler)?;

        debug!(logger, "Rendering document..."; "variant" => variant.extension(), "name" => &record.name);
        let document = document::render(&record, variant).map_err(&error_handler)?;

        let filename = download_filename(&record.name, OffsetDateTime::now_utc().date(), variant);

        debug!(logger, "Sending document..."; "filename" => &filename, "bytes" => document.len());
        download_response(document, &filename, variant).map_err(&error_handler)?
    }
}

pub async fn healthz() -> RouteResult {
    timed! {
        json(&SuccessResponse::Healthz {
            revision: log::REVISION,
            timestamp: log::BUILD_TIMESTAMP,
            version: log::VERSION,
        })
    }
}

/// Checks the submission precondition: the record must carry a name.
fn ensure_name(record: &InterviewRecord) -> Result<(), FichaError> {
    if record.has_name() {
        Ok(())
    } else {
        Err(FichaError::NameMissing)
    }
}

/// Wraps a rendered document in a response that browsers treat as a
/// file download under the suggested filename.
fn download_response(
    document: String,
    filename: &str,
    variant: Variant,
) -> Result<Response<String>, FichaError> {
    // the sanitized name may contain non-ASCII characters, which
    // `HeaderValue::from_str` rejects
    let disposition =
        HeaderValue::from_bytes(format!("attachment; filename=\"{}\"", filename).as_bytes())
            .map_err(|source| FichaError::InvalidFilename { source })?;

    Response::builder()
        .status(StatusCode::OK)
        .header("content-type", variant.media_type().as_ref())
        .header("content-disposition", disposition)
        .body(document)
        .map_err(|source| FichaError::Http { source })
}

fn format_server_timing(seconds: Duration) -> String {
    format!("handler;dur={}", seconds.as_secs_f64() * 1000.0)
}
