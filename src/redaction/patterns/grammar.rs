//! Regular expression sources for the structured PII categories
//!
//! These are assembled once when the [`PatternLibrary`](super::PatternLibrary)
//! is built.

const WEEKDAY: &str = r"(Sun|Mon|Tue|Wed|Thu|Fri|Sat)";
const MONTH_DAY: &str = r"((0?[1-9]|[1-2][0-9]|3[01])(st|nd|rd|th)?)";
const NUMBERED_MONTH: &str = r"((0?[1-9]|1[0-2]))";
const YEAR: &str = r"(19[0-9]{2}|[2-9][0-9]{3}|[0-9]{2})";
const TIME: &str = r"(\s+(2[0-3]|[0-1]?[0-9]):([0-5][0-9])(:(60|[0-5][0-9]))?)";
const TIMEZONE: &str = r"(([-\\+][0-9]{2}[0-5][0-9]|(?:UT|GMT|(?:E|C|M|P)(?:ST|DT)|[A-IK-Z])))";

const WORDED_MONTH: &str = "((Jan(uary)?)|(Feb(ruary)?)|(Mar(ch)?)|(Apr(il)?)|May|(Jun(e)?)|(Jul(y)?)|(Aug(ust)?)|(Sep(tember)?)|(Oct(ober)?)|(Nov(ember)?)|(Dec(ember)?))";

const STREET_ABBREVIATIONS: [&str; 22] = [
    "Ave", "Blvd", "Bdwy", "Cir", "Cl", "Ct", "Cr", "Dr", "Gdn", "Gdns", "Gn", "Gr", "Ln", "Mt",
    "Pl", "Pk", "Rdg", "Rd", "Sq", "St", "Ter", "Val",
];

/// Month names, title case or upper case, abbreviated or full
///
/// Lower case is deliberately not matched. "may", "march" and "mar" are
/// ordinary words in report text, and the month-year grammar accepts a
/// two-digit year, so "patient may 12 hours later" would lose "may 12".
fn worded_month() -> String {
    format!("({}|{})", WORDED_MONTH, WORDED_MONTH.to_uppercase())
}

/// Date and date-time grammars, joined into one alternation
///
/// In order: numeric D/M/Y, D-WordedMonth-Y, numeric M/Y, WordedMonth-D-Y
/// and WordedMonth-Y. Each may carry a 24 hour time and a timezone.
pub fn date_time() -> String {
    let wm = worded_month();
    let formats = [
        format!(
            r"\s*{WEEKDAY}?{MONTH_DAY}[.\\/-]\s*{NUMBERED_MONTH}[.\\/-]\s*{YEAR}{TIME}?{TIMEZONE}?"
        ),
        format!(r"\s*{WEEKDAY}?{MONTH_DAY}[ .\\/-]{wm}[ .\\/-]{YEAR}{TIME}?{TIMEZONE}?"),
        format!(r"\s*{WEEKDAY}?{NUMBERED_MONTH}[.\\/-]{YEAR}[ .\\/-]{TIME}?{TIMEZONE}?"),
        format!(r"\s*{WEEKDAY}?{wm}[ .\\/-]{MONTH_DAY}[ .\\/-]{TIME}?{TIMEZONE}?\s+{YEAR}"),
        format!(r"\s*{wm}\s*{YEAR}([ .\\/-]{TIME}{TIMEZONE}?)?"),
    ];
    formats.join("|")
}

/// UK telephone numbers with a leading 0 or an international prefix
pub fn phone() -> &'static str {
    r"(([0]|((\+|00)[0-9]{1,3}))[0-9][0-9][0-9]\s*[0-9]\s*[0-9][0-9]\s*[0-9]\s*[0-9][0-9][0-9])"
}

/// NHS-number-shaped digit groups: 3-3-4 (separators optional) and 3-4-3
pub fn nhs_number_like() -> [&'static str; 2] {
    [
        r"([0-9][0-9][0-9][ -]?[0-9][0-9][0-9][ -]?[0-9][0-9][0-9][0-9])",
        r"([0-9][0-9][0-9][ -][0-9][0-9][0-9][0-9][ -][0-9][0-9][0-9])",
    ]
}

/// Email addresses, including quoted local parts and IP-literal domains
pub fn email() -> &'static str {
    r#"((?:[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*|"(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21\x23-\x5b\x5d-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])*")@(?:(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?|\[(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?|[a-z0-9-]*[a-z0-9]:(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21-\x5a\x53-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])+)\]))"#
}

/// `(\s[Aa][Vv][Ee].)` style alternative for one street abbreviation
fn street_type(abbreviation: &str) -> String {
    let letters: String = abbreviation
        .chars()
        .map(|c| format!("[{}{}]", c.to_ascii_uppercase(), c.to_ascii_lowercase()))
        .collect();
    format!(r"(\s{letters}.)")
}

/// UK postcodes, optionally preceded by the comma-separated address run
/// leading up to them (street abbreviations such as "Ave." may appear in it)
pub fn postcode() -> String {
    let streets: Vec<String> = STREET_ABBREVIATIONS.iter().map(|s| street_type(s)).collect();
    let address = format!(r"(([,\sa-zA-Z0-9]|{})*[,]\s)?", streets.join("|"));
    let code = concat!(
        r"(([gG][iI][rR] {0,}0[aA]{2})|",
        r"((([a-pr-uwyzA-PR-UWYZ][a-hk-yA-HK-Y]?[0-9][0-9]?)|",
        r"(([a-pr-uwyzA-PR-UWYZ][0-9][a-hjkstuwA-HJKSTUW])|",
        r"([a-pr-uwyzA-PR-UWYZ][a-hk-yA-HK-Y][0-9O][abehmnprv-yABEHMNPRV-Y])))",
        r"\s*[0-9O][abd-hjlnp-uw-zABD-HJLNP-UW-Z]{2}))"
    );
    format!("{address}{code}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_street_type() {
        assert_eq!(street_type("Ave"), r"(\s[Aa][Vv][Ee].)");
    }

    #[test]
    fn test_worded_month_has_both_cases() {
        let wm = worded_month();
        assert!(wm.contains("(Dec(ember)?)"));
        assert!(wm.contains("(DEC(EMBER)?)"));
    }

    #[test]
    fn test_lower_case_month_words_are_not_dates() {
        let dates = regex::Regex::new(&date_time()).unwrap();
        assert!(dates.is_match("Scanned March 2020"));
        assert!(dates.is_match("Scanned MARCH 2020"));
        assert!(!dates.is_match("the patient may 12 hours later"));
        assert!(!dates.is_match("scanned march 2020"));
    }

    #[test]
    fn test_date_time_has_five_grammars() {
        // Each grammar starts with optional leading whitespace
        assert_eq!(date_time().matches(r"|\s*").count(), 4);
    }
}
