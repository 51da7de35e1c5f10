//! Name normalization shared by the doctor lookup and the mock directory

use lazy_static::lazy_static;
use regex::Regex;

/// Literal prefix every directory key starts with
pub const DOCTOR_PREFIX: &str = "Dr.";

lazy_static! {
    static ref RE_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Title-case: first letter of every alphabetic run upper, the rest lower.
/// "o'brien" becomes "O'Brien", "dr.smith" becomes "Dr.Smith".
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if in_word {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
        in_word = ch.is_alphabetic();
    }
    out
}

/// Directory key for a user-supplied doctor name: trimmed, title-cased,
/// "Dr. " inserted unless the name already starts with "Dr.".
pub fn doctor_key(raw: &str) -> String {
    let name = title_case(raw.trim());
    if name.starts_with(DOCTOR_PREFIX) {
        name
    } else {
        format!("{DOCTOR_PREFIX} {name}")
    }
}

/// Directory-side canonical form: "Dr.Taylor" and "dr.  taylor" both become "Dr. Taylor"
pub fn directory_key(raw: &str) -> String {
    let spaced = raw.replace(DOCTOR_PREFIX, "Dr. ");
    let collapsed = RE_WHITESPACE.replace_all(spaced.trim(), " ");
    title_case(&collapsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("smith"), "Smith");
        assert_eq!(title_case("JOHN SMITH"), "John Smith");
        assert_eq!(title_case("o'brien"), "O'Brien");
        assert_eq!(title_case("cardiology"), "Cardiology");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_doctor_key_adds_prefix() {
        assert_eq!(doctor_key("smith"), "Dr. Smith");
        assert_eq!(doctor_key("  adams "), "Dr. Adams");
    }

    #[test]
    fn test_doctor_key_keeps_existing_prefix() {
        assert_eq!(doctor_key("Dr. Smith"), "Dr. Smith");
        assert_eq!(doctor_key("dr. taylor"), "Dr. Taylor");
        // Title-casing happens first, so the glued form keeps its prefix too
        assert_eq!(doctor_key("dr.brown"), "Dr.Brown");
    }

    #[test]
    fn test_doctor_key_prefix_needs_the_dot() {
        assert_eq!(doctor_key("dr smith"), "Dr. Dr Smith");
    }

    #[test]
    fn test_directory_key() {
        assert_eq!(directory_key("Dr.Taylor"), "Dr. Taylor");
        assert_eq!(directory_key("Dr. Taylor"), "Dr. Taylor");
        assert_eq!(directory_key("Dr.brown"), "Dr. Brown");
        assert_eq!(directory_key("Dr. nobody"), "Dr. Nobody");
    }
}
