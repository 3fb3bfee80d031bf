use tera::Context;

use crate::document::TEMPLATES;
use crate::errors::FichaError;
use crate::record::RECORDING_MEDIA;

/// Renders the data-entry form page.
pub fn page() -> Result<String, FichaError> {
    let mut context = Context::new();
    context.insert("media", &RECORDING_MEDIA);

    TEMPLATES
        .render("form.html", &context)
        .map_err(|source| FichaError::Template { source })
}
