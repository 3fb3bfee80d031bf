use serde::Serialize;
use warp::reject;

use crate::errors::FichaError;

#[derive(Debug)]
pub struct Rejection {
    pub(crate) context: Context,
    pub(crate) error: FichaError,
}

impl Rejection {
    pub fn new(context: Context, error: FichaError) -> Self {
        Rejection { context, error }
    }

    pub fn flatten(&self) -> FlattenedRejection {
        FlattenedRejection {
            context: self.context.clone(),
            message: format!("{}", self.error),
        }
    }
}

impl reject::Reject for Rejection {}

#[derive(Debug, Serialize)]
pub struct FlattenedRejection {
    #[serde(flatten)]
    pub(crate) context: Context,
    pub(crate) message: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum Context {
    Form { page: &'static str },
    Submission { variant: &'static str },
}

impl Context {
    pub fn form() -> Context {
        Context::Form { page: "form" }
    }

    pub fn submission(variant: crate::document::Variant) -> Context {
        Context::Submission {
            variant: variant.extension(),
        }
    }
}
