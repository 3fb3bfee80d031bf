use time::Date;

use crate::document::Variant;

/// The base used when sanitization leaves nothing of the name.
const FALLBACK_BASE: &str = "Entrevista";

/// Builds the suggested filename for a document download:
/// `Resumen_<name>_<YYYYMMDD>.<ext>`.
pub fn download_filename(name: &str, date: Date, variant: Variant) -> String {
    let base = sanitize(name, variant);
    let base = if base.is_empty() {
        FALLBACK_BASE.to_owned()
    } else {
        base
    };

    format!(
        "Resumen_{}_{}.{}",
        base,
        date.format("%Y%m%d"),
        variant.extension()
    )
}

/// Sanitizes the interviewee name for use in a filename.
///
/// The plain-text variant only turns spaces into underscores; the HTML
/// variant keeps alphanumeric characters alone.
fn sanitize(name: &str, variant: Variant) -> String {
    match variant {
        Variant::PlainText => name.replace(' ', "_"),
        Variant::Html => name.chars().filter(|c| c.is_alphanumeric()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use time::Date;

    use super::download_filename;
    use crate::document::Variant;

    fn example_date() -> Date {
        Date::try_from_ymd(2024, 5, 1).expect("construct date")
    }

    #[test]
    fn text_filenames_keep_underscored_names() {
        let filename = download_filename("Ana Pérez", example_date(), Variant::PlainText);

        assert_eq!(filename, "Resumen_Ana_Pérez_20240501.txt");
    }

    #[test]
    fn html_filenames_strip_non_alphanumerics() {
        let filename = download_filename("Ana Pérez", example_date(), Variant::Html);

        assert_eq!(filename, "Resumen_AnaPérez_20240501.html");
    }

    #[test]
    fn unusable_names_fall_back_to_a_generic_base() {
        let filename = download_filename("¡¿?!", example_date(), Variant::Html);

        assert_eq!(filename, "Resumen_Entrevista_20240501.html");
    }

    proptest! {
        #[test]
        fn text_bases_never_contain_spaces(name in "[a-zA-Z ]{1,30}") {
            let filename = download_filename(&name, example_date(), Variant::PlainText);

            prop_assert!(!filename.contains(' '), "{:?} contains no spaces", filename);
        }

        #[test]
        fn html_bases_are_alphanumeric(name in "\\PC{0,30}") {
            let filename = download_filename(&name, example_date(), Variant::Html);
            let base = filename
                .strip_prefix("Resumen_")
                .and_then(|rest| rest.strip_suffix("_20240501.html"))
                .expect("filename follows the fixed shape");

            prop_assert!(base.chars().all(char::is_alphanumeric), "{:?} is alphanumeric", base);
        }
    }
}
