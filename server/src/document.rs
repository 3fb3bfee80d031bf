use std::str::FromStr;

use lazy_static::lazy_static;
use mime::Mime;
use tera::{Context, Tera};

use crate::errors::FichaError;
use crate::record::InterviewRecord;

lazy_static! {
    /// The compiled document and form templates.
    pub(crate) static ref TEMPLATES: Tera = {
        let mut templates = Tera::default();

        templates
            .add_raw_templates(vec![
                ("ficha.txt", include_str!("templates/ficha.txt")),
                ("ficha.html", include_str!("templates/ficha.html")),
                ("form.html", include_str!("templates/form.html")),
            ])
            .expect("parse embedded templates");

        // Values are escaped before they reach the template; the engine
        // must not escape them a second time.
        templates.autoescape_on(vec![]);

        templates
    };
}

/// The output format of a rendered ficha.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Variant {
    PlainText,
    Html,
}

impl Variant {
    /// The file extension for downloads of this variant.
    pub fn extension(self) -> &'static str {
        match self {
            Variant::PlainText => "txt",
            Variant::Html => "html",
        }
    }

    /// The media type for downloads of this variant.
    pub fn media_type(self) -> Mime {
        match self {
            Variant::PlainText => mime::TEXT_PLAIN_UTF_8,
            Variant::Html => mime::TEXT_HTML_UTF_8,
        }
    }

    fn template(self) -> &'static str {
        match self {
            Variant::PlainText => "ficha.txt",
            Variant::Html => "ficha.html",
        }
    }
}

impl FromStr for Variant {
    type Err = FichaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "txt" => Ok(Variant::PlainText),
            "html" => Ok(Variant::Html),
            _ => Err(FichaError::BadRequest),
        }
    }
}

/// Renders the given record as a downloadable document.
///
/// The output is deterministic: the same record and variant always
/// produce the same bytes.
pub fn render(record: &InterviewRecord, variant: Variant) -> Result<String, FichaError> {
    let context = match variant {
        Variant::PlainText => text_context(record),
        Variant::Html => html_context(record),
    };

    TEMPLATES
        .render(variant.template(), &context)
        .map_err(|source| FichaError::Template { source })
}

/// Builds the template context for the plain-text layout. Values are
/// inserted verbatim, line breaks included.
fn text_context(record: &InterviewRecord) -> Context {
    let mut context = Context::new();

    context.insert("name", &record.name);
    context.insert("email", &record.email);
    context.insert("occupation", &record.occupation);
    context.insert("age", &record.age);
    context.insert("recording_medium", &record.recording_medium);
    context.insert("start_end_time", &record.start_end_time);
    context.insert("recording_link", &record.recording_link);
    context.insert("location", &record.location);
    context.insert("field_notes", &record.field_notes);
    context.insert("key_questions", &record.key_questions);
    context.insert("relevant_quotes", &record.relevant_quotes);
    context.insert("identified_problems", &record.identified_problems);
    context.insert("most_relevant_problem", &record.most_relevant_problem);

    context
}

/// Builds the template context for the HTML layout. Every value is
/// escaped; the free-text sections additionally get their line breaks
/// converted to `<br>` tags.
fn html_context(record: &InterviewRecord) -> Context {
    let mut context = Context::new();

    context.insert("name", &escape(&record.name));
    context.insert("email", &escape(&record.email));
    context.insert("occupation", &escape(&record.occupation));
    context.insert("age", &escape(&record.age));
    context.insert("recording_medium", &escape(&record.recording_medium));
    context.insert("start_end_time", &escape(&record.start_end_time));
    context.insert("recording_link", &escape(&record.recording_link));
    context.insert("location", &escape(&record.location));
    context.insert("field_notes", &escape_multiline(&record.field_notes));
    context.insert("key_questions", &escape_multiline(&record.key_questions));
    context.insert("relevant_quotes", &escape_multiline(&record.relevant_quotes));
    context.insert(
        "identified_problems",
        &escape_multiline(&record.identified_problems),
    );
    context.insert(
        "most_relevant_problem",
        &escape_multiline(&record.most_relevant_problem),
    );

    context
}

/// Escapes markup characters in a field value.
fn escape(value: &str) -> String {
    tera::escape_html(value)
}

/// Escapes a multi-line field value and converts its line breaks to
/// `<br>` tags. Escaping runs first; the inserted tags must survive.
fn escape_multiline(value: &str) -> String {
    escape(value).replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{render, Variant};
    use crate::record::InterviewRecord;

    fn example_record() -> InterviewRecord {
        InterviewRecord {
            name: "Ana Pérez".to_owned(),
            email: "ana@x.com".to_owned(),
            ..InterviewRecord::default()
        }
    }

    #[test]
    fn text_layout_matches_the_ficha_format() {
        let text = render(&example_record(), Variant::PlainText).expect("render text");

        assert!(text.contains("FICHA ENTREVISTA"));
        assert!(text.contains("Nombre entrevistado:      Ana Pérez\n"));
        assert!(text.contains("Mail de contacto:         ana@x.com\n"));
        // empty fields render as the bare label
        assert!(text.contains("Ocupación:                \n"));
        assert!(text.contains("Edad:                     \n"));
        assert!(!text.contains("None"));
    }

    #[test]
    fn html_layout_contains_the_table_fields() {
        let html = render(&example_record(), Variant::Html).expect("render html");

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<b>Nombre entrevistado:</b> Ana Pérez"));
        assert!(html.contains("<b>Mail de contacto:</b> ana@x.com"));
        assert!(html.contains("<title>Ficha Entrevista - Ana Pérez</title>"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let record = example_record();

        for &variant in &[Variant::PlainText, Variant::Html] {
            let first = render(&record, variant).expect("render once");
            let second = render(&record, variant).expect("render twice");

            assert_eq!(first, second);
        }
    }

    #[test]
    fn empty_records_render_in_both_variants() {
        let record = InterviewRecord::default();

        let text = render(&record, Variant::PlainText).expect("render text");
        let html = render(&record, Variant::Html).expect("render html");

        assert!(text.contains("Nombre entrevistado:"));
        assert!(html.contains("<pre></pre>"));
        assert!(!html.contains("None"));
    }

    #[test]
    fn html_output_escapes_markup_in_field_values() {
        let record = InterviewRecord {
            name: "Ana".to_owned(),
            email: "<script>&".to_owned(),
            field_notes: "<script>&".to_owned(),
            ..InterviewRecord::default()
        };

        let html = render(&record, Variant::Html).expect("render html");

        assert!(html.contains("&lt;script&gt;&amp;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn free_text_line_breaks_become_br_tags() {
        let record = InterviewRecord {
            name: "Ana".to_owned(),
            key_questions: "line1\nline2".to_owned(),
            ..InterviewRecord::default()
        };

        let html = render(&record, Variant::Html).expect("render html");
        let text = render(&record, Variant::PlainText).expect("render text");

        assert!(html.contains("line1<br>line2"));
        assert!(!html.contains("line1\nline2"));
        assert!(text.contains("line1\nline2"));
    }

    #[test]
    fn table_fields_keep_their_line_breaks_unconverted() {
        let record = InterviewRecord {
            name: "Ana".to_owned(),
            location: "aquí\nallá".to_owned(),
            ..InterviewRecord::default()
        };

        let html = render(&record, Variant::Html).expect("render html");

        assert!(html.contains("aquí\nallá"));
        assert!(!html.contains("aquí<br>allá"));
    }

    #[test]
    fn variants_parse_from_path_segments() {
        assert_eq!("txt".parse::<Variant>().ok(), Some(Variant::PlainText));
        assert_eq!("html".parse::<Variant>().ok(), Some(Variant::Html));
        assert!("pdf".parse::<Variant>().is_err());
    }

    fn count(haystack: &str, needle: char) -> usize {
        haystack.chars().filter(|&c| c == needle).count()
    }

    proptest! {
        #[test]
        fn markup_characters_never_leak_into_html(value in "[a-z<>&\"' ]{0,40}") {
            let record = InterviewRecord {
                name: "Ana".to_owned(),
                email: value.clone(),
                field_notes: value.clone(),
                ..InterviewRecord::default()
            };

            let html = render(&record, Variant::Html).expect("render html");
            let baseline = render(
                &InterviewRecord {
                    name: "Ana".to_owned(),
                    ..InterviewRecord::default()
                },
                Variant::Html,
            )
            .expect("render baseline");

            // every `<` and `>` in the output belongs to the fixed markup
            prop_assert_eq!(count(&html, '<'), count(&baseline, '<'));
            prop_assert_eq!(count(&html, '>'), count(&baseline, '>'));
        }

        #[test]
        fn rendering_never_fails(name in "\\PC{0,20}", notes in "(\\PC|\\n){0,40}") {
            let record = InterviewRecord {
                name,
                field_notes: notes,
                ..InterviewRecord::default()
            };

            render(&record, Variant::PlainText).expect("render text");
            render(&record, Variant::Html).expect("render html");
        }
    }
}
