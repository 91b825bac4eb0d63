//! Address normalizer — converts raw Romanian addresses to canonical form
//!
//! The canonical form is the single string used both for geocoding lookups
//! and as the key of every address cache:
//!
//! `StreetType StreetName[, Number][, Sector N], Bucuresti`
//!
//! # Pipeline
//!
//! `raw → transliterate → separate_markers → normalize_tokens → clean_separators → extract`
//!
//! Each stage is a pure `&str -> String` function and is public so it can be
//! tested on its own.
//!
//! # Guarantees
//!
//! - **Total**: every input produces a string ending in `, Bucuresti`
//! - **Idempotent**: `normalize(normalize(x)) == normalize(x)`
//! - **Deterministic**: same input always produces same output
//! - **Diacritic-agnostic**: `normalize(x) == normalize(transliterate(x))`

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use unidecode::unidecode;

use crate::rules::{self, StreetType, CITY, NUMBER_MARKER, SECTOR_MARKER};

// ── Canonical model ────────────────────────────────────────

/// Recognized street: canonical type word plus free-text name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Street {
    pub street_type: StreetType,
    pub name: String,
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.street_type, self.name)
    }
}

/// Structured result of normalization
///
/// `number` is only ever set when `street` is. `sector` is extracted
/// independently, but is dropped from the rendered form when no street was
/// recognized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalAddress {
    pub street: Option<Street>,
    pub number: Option<String>,
    pub sector: Option<u32>,
}

impl CanonicalAddress {
    /// True when no street type was recognized and the address renders as
    /// the bare `, Bucuresti` fallback.
    pub fn is_degraded(&self) -> bool {
        self.street.is_none()
    }
}

impl fmt::Display for CanonicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Some(street) = &self.street else {
            // A sector alone is not rendered.
            return write!(f, ", {}", CITY);
        };

        write!(f, "{}", street)?;
        if let Some(number) = &self.number {
            write!(f, ", {}", number)?;
        }
        if let Some(sector) = self.sector {
            write!(f, ", {} {}", SECTOR_MARKER, sector)?;
        }
        write!(f, ", {}", CITY)
    }
}

/// Output of every pipeline stage for a single input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationTrace {
    pub input: String,
    pub transliterated: String,
    pub separated: String,
    pub tokens: String,
    pub cleaned: String,
    pub address: CanonicalAddress,
    pub canonical: String,
}

// ── Public API ─────────────────────────────────────────────

/// Normalize a raw address to its canonical string
///
/// Never fails: input without a recognized street type yields `", Bucuresti"`.
pub fn normalize(raw: &str) -> String {
    parse_address(raw).to_string()
}

/// Normalize an address field that may be absent
pub fn normalize_opt(raw: Option<&str>) -> String {
    normalize(raw.unwrap_or_default())
}

/// Run the full pipeline and return the structured address
pub fn parse_address(raw: &str) -> CanonicalAddress {
    let cleaned = clean_separators(&normalize_tokens(&separate_markers(&transliterate(raw))));
    let address = extract(&cleaned);
    if address.is_degraded() {
        tracing::debug!(input = raw, "no street type recognized, using fallback");
    }
    address
}

/// Run the pipeline keeping every intermediate result
pub fn explain(raw: &str) -> NormalizationTrace {
    let transliterated = transliterate(raw);
    let separated = separate_markers(&transliterated);
    let tokens = normalize_tokens(&separated);
    let cleaned = clean_separators(&tokens);
    let address = extract(&cleaned);
    let canonical = address.to_string();

    NormalizationTrace {
        input: raw.to_string(),
        transliterated,
        separated,
        tokens,
        cleaned,
        address,
        canonical,
    }
}

// ── Stage 1: transliteration ───────────────────────────────

/// Fold the input to ASCII: `ș`/`ş` → `s`, `ț`/`ţ` → `t`, `ă`/`â` → `a`, `î` → `i`
///
/// Diacritics are stripped after compatibility decomposition; whatever has no
/// decomposition (en dashes, typographic quotes) is then transliterated, so
/// `B–dul` reads as `B-dul`.
pub fn transliterate(input: &str) -> String {
    let stripped: String = input.nfkd().filter(|c| !is_combining_mark(*c)).collect();
    if stripped.is_ascii() {
        return stripped;
    }
    unidecode(&stripped)
}

// ── Stage 2: marker spacing ────────────────────────────────

static GLUED_NUMBER_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([a-z])(nr(?:ul)?)([^a-z]|$)").unwrap());

static MARKER_BEFORE_DIGIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(numarul\.?|nr(?:ul)?\.?|sect(?:orul|or)?\.?)(\d)").unwrap()
});

/// Detach number markers from surrounding text
///
/// `Testnr 5` → `Test, nr 5`: a `nr` glued to a preceding letter gets a
/// comma so the street name stops before it. A `nr` at the start of the
/// string has no preceding letter and is left alone. Markers glued to a
/// following digit (`nr5`, `Numarul5`, `Sect4`) get a space so the token
/// rules see a whole word.
pub fn separate_markers(input: &str) -> String {
    // A match consumes the character after `nr`, so `Anrnr` needs a second pass.
    let mut detached = input.to_string();
    loop {
        let next = GLUED_NUMBER_MARKER.replace_all(&detached, "${1}, ${2}${3}");
        if next == detached {
            break;
        }
        detached = next.into_owned();
    }
    MARKER_BEFORE_DIGIT
        .replace_all(&detached, "${1} ${2}")
        .into_owned()
}

// ── Stage 3: token normalization ───────────────────────────

/// Rewrite every known abbreviation to its canonical word, in table order
pub fn normalize_tokens(input: &str) -> String {
    rules::token_rules()
        .iter()
        .fold(input.to_string(), |acc, rule| rule.apply(&acc))
}

// ── Stage 4: separators ────────────────────────────────────

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static COMMA_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*,[\s,]*").unwrap());

/// Collapse whitespace and comma runs; the separator becomes a bare `,`
pub fn clean_separators(input: &str) -> String {
    let spaced = WHITESPACE_RUN.replace_all(input, " ");
    COMMA_RUN.replace_all(&spaced, ",").trim().to_string()
}

// ── Stage 5: extraction ────────────────────────────────────

static STREET: Lazy<Regex> = Lazy::new(|| {
    let types: Vec<&str> = StreetType::ALL.iter().map(|t| t.as_str()).collect();
    Regex::new(&format!(
        r"\b({}) (.*?)(,|\b{}\b|\b{} \d|$)",
        types.join("|"),
        NUMBER_MARKER,
        SECTOR_MARKER
    ))
    .unwrap()
});

static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\b{} ([^,]*)", NUMBER_MARKER)).unwrap());

static NUMBER_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\b{}\b", NUMBER_MARKER)).unwrap());

static SECTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\b{} (\d+)", SECTOR_MARKER)).unwrap());

static SECTOR_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\b{} \d", SECTOR_MARKER)).unwrap());

/// Extract street, number and sector from a cleaned string
///
/// Expects the output of [`clean_separators`]: canonical tokens, single
/// spaces, bare commas.
pub fn extract(cleaned: &str) -> CanonicalAddress {
    let sector = find_sector(cleaned);

    let Some((street, end, comma_terminated)) = find_street(cleaned) else {
        return CanonicalAddress {
            street: None,
            number: None,
            sector,
        };
    };

    let number = if NUMBER_TOKEN.is_match(cleaned) {
        find_marked_number(cleaned)
    } else if comma_terminated {
        // Canonical output carries the number bare, right after the street.
        cleaned[end..]
            .split(',')
            .next()
            .and_then(house_number)
    } else {
        None
    };

    CanonicalAddress {
        street: Some(street),
        number,
        sector,
    }
}

/// First street-type token followed by a non-empty name.
///
/// Returns the street, the offset just past its terminator, and whether the
/// terminator was a comma.
fn find_street(cleaned: &str) -> Option<(Street, usize, bool)> {
    STREET.captures_iter(cleaned).find_map(|caps| {
        let name = caps.get(2)?.as_str().trim();
        if name.is_empty() {
            return None;
        }
        let street_type = caps.get(1)?.as_str().parse::<StreetType>().ok()?;
        let terminator = caps.get(3)?;
        Some((
            Street {
                street_type,
                name: name.to_string(),
            },
            terminator.end(),
            terminator.as_str() == ",",
        ))
    })
}

fn find_marked_number(cleaned: &str) -> Option<String> {
    NUMBER.captures_iter(cleaned).find_map(|caps| {
        let value = caps.get(1)?.as_str();
        let value = match NUMBER_TOKEN.find(value) {
            Some(next) => &value[..next.start()],
            None => value,
        };
        house_number(value)
    })
}

/// Accept a segment as a house number.
///
/// The segment is cut at any sector token; what remains must be non-empty,
/// must not be the city and must not start a new street.
fn house_number(segment: &str) -> Option<String> {
    let value = match SECTOR_TOKEN.find(segment) {
        Some(sector) => &segment[..sector.start()],
        None => segment,
    };
    let value = value.trim();

    if value.is_empty() || value.eq_ignore_ascii_case(CITY) {
        return None;
    }
    let starts_street = StreetType::ALL.iter().any(|t| {
        value
            .strip_prefix(t.as_str())
            .is_some_and(|rest| rest.starts_with(' '))
    });
    if starts_street {
        return None;
    }
    Some(value.to_string())
}

fn find_sector(cleaned: &str) -> Option<u32> {
    SECTOR.captures_iter(cleaned).find_map(|caps| {
        caps.get(1)?
            .as_str()
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_idempotent(raw: &str) {
        let once = normalize(raw);
        let twice = normalize(&once);
        assert_eq!(once, twice, "normalize is not idempotent for {:?}", raw);
    }

    // ── Street types ───────────────────────────────────

    #[test]
    fn test_strada_abbreviations() {
        for raw in [
            "Str. Mihai Eminescu, nr 10",
            "Str Mihai Eminescu, nr 10",
            "Stra. Mihai Eminescu, nr 10",
            "Strada Mihai Eminescu, nr 10",
        ] {
            assert_eq!(normalize(raw), "Strada Mihai Eminescu, 10, Bucuresti", "{}", raw);
        }
    }

    #[test]
    fn test_bulevardul_abbreviations() {
        for raw in [
            "Bd. Unirii, nr 5",
            "Bd Unirii, nr 5",
            "Bld. Unirii, nr 5",
            "Bld Unirii, nr 5",
            "Bdul Unirii, nr 5",
            "Bdul. Unirii, nr 5",
            "B-dul Unirii, nr 5",
            "Bulevard Unirii, nr 5",
            "Bulevardul Unirii, nr 5",
        ] {
            assert_eq!(normalize(raw), "Bulevardul Unirii, 5, Bucuresti", "{}", raw);
        }
    }

    #[test]
    fn test_other_street_types() {
        let cases = [
            ("Cal. Victoriei, nr 15", "Calea Victoriei, 15, Bucuresti"),
            ("Cal Victoriei nr 15", "Calea Victoriei, 15, Bucuresti"),
            ("Calea Victoriei, nr 15", "Calea Victoriei, 15, Bucuresti"),
            ("Pta. Unirii, nr 1", "Piata Unirii, 1, Bucuresti"),
            ("Pta Unirii, nr 1", "Piata Unirii, 1, Bucuresti"),
            ("Piata Unirii, nr 1", "Piata Unirii, 1, Bucuresti"),
            ("Drumul Taberei, nr 12", "Drumul Taberei, 12, Bucuresti"),
            ("Sos. Colentina, nr 20", "Soseaua Colentina, 20, Bucuresti"),
            ("Sos Colentina, nr 20", "Soseaua Colentina, 20, Bucuresti"),
            ("Soseaua Colentina, nr 20", "Soseaua Colentina, 20, Bucuresti"),
            ("Spl. Independentei, nr 7", "Splaiul Independentei, 7, Bucuresti"),
            ("Spl Independentei, nr 7", "Splaiul Independentei, 7, Bucuresti"),
            ("Al. Parcului, nr 3", "Aleea Parcului, 3, Bucuresti"),
            ("Aleea Parcului, nr 3", "Aleea Parcului, 3, Bucuresti"),
            ("Int. Florilor, nr 2", "Intrarea Florilor, 2, Bucuresti"),
            ("Intr. Florilor, nr 2", "Intrarea Florilor, 2, Bucuresti"),
            ("Int Florilor nr 2", "Intrarea Florilor, 2, Bucuresti"),
            ("Intr Florilor nr 2", "Intrarea Florilor, 2, Bucuresti"),
            ("Intarea Florilor, nr 2", "Intrarea Florilor, 2, Bucuresti"),
            ("Intrarea Florilor, nr 2", "Intrarea Florilor, 2, Bucuresti"),
        ];
        for (raw, expected) in cases {
            assert_eq!(normalize(raw), expected, "{}", raw);
        }
    }

    #[test]
    fn test_bare_abbreviation_inside_word_is_kept() {
        assert_eq!(
            normalize("Str. Internationala, nr 4"),
            "Strada Internationala, 4, Bucuresti"
        );
        assert_eq!(normalize("Calarasi nr 4"), ", Bucuresti");
    }

    // ── Numbers ────────────────────────────────────────

    #[test]
    fn test_number_variations() {
        for raw in [
            "Str. Test, Nr. 5",
            "Str. Test, Nr 5",
            "Str. Test, nr.5",
            "Str. Test, Numarul 5",
            "Str. Test, Numarul. 5",
            "Str. Test, Nrul 5",
            "Str. Test, Numarul5",
            "Str. Test, nrul5",
        ] {
            assert_eq!(normalize(raw), "Strada Test, 5, Bucuresti", "{}", raw);
        }
    }

    #[test]
    fn test_number_not_separated() {
        assert_eq!(normalize("Str. Testnr 5"), "Strada Test, 5, Bucuresti");
        assert_eq!(normalize("Str. Testnr5"), "Strada Test, 5, Bucuresti");
    }

    #[test]
    fn test_number_without_comma_before_marker() {
        assert_eq!(
            normalize("Str. Spatar Preda Buzescu Nr. 34"),
            "Strada Spatar Preda Buzescu, 34, Bucuresti"
        );
    }

    #[test]
    fn test_no_number() {
        assert_eq!(normalize("Str. Test, Bucuresti"), "Strada Test, Bucuresti");
        assert_eq!(normalize("Str. Test"), "Strada Test, Bucuresti");
    }

    #[test]
    fn test_empty_number_is_omitted() {
        assert_eq!(normalize("Str. Test, nr"), "Strada Test, Bucuresti");
        assert_eq!(normalize("Str. Test, nr , Sector 2"), "Strada Test, Sector 2, Bucuresti");
    }

    #[test]
    fn test_number_stops_at_next_marker() {
        assert_eq!(normalize("Str. Test nr 5 nr 6"), "Strada Test, 5, Bucuresti");
    }

    #[test]
    fn test_number_stops_at_sector() {
        assert_eq!(
            normalize("Str. Test nr 5 sect 3"),
            "Strada Test, 5, Sector 3, Bucuresti"
        );
    }

    #[test]
    fn test_bare_number_after_street() {
        assert_eq!(normalize("Strada Test, 5, Bucuresti"), "Strada Test, 5, Bucuresti");
        assert_eq!(normalize("Strada Test, 12A, Sector 1"), "Strada Test, 12A, Sector 1, Bucuresti");
    }

    // ── Sector ─────────────────────────────────────────

    #[test]
    fn test_sector_variants() {
        for raw in [
            "Str. Spatar Preda Buzescu Nr. 34, Sector 4",
            "Str. Spatar Preda Buzescu Nr. 34, Sect 4",
            "Str. Spatar Preda Buzescu Nr. 34, Sect. 4",
            "Str. Spatar Preda Buzescu Nr. 34, sectorul 4",
            "Str. Spatar Preda Buzescu Nr. 34, Sect4",
        ] {
            assert_eq!(
                normalize(raw),
                "Strada Spatar Preda Buzescu, 34, Sector 4, Bucuresti",
                "{}",
                raw
            );
        }
    }

    #[test]
    fn test_sector_without_number() {
        assert_eq!(normalize("Str. Test, Sector 2"), "Strada Test, Sector 2, Bucuresti");
    }

    #[test]
    fn test_sector_zero_is_ignored() {
        assert_eq!(normalize("Str. Test, Sector 0"), "Strada Test, Bucuresti");
    }

    #[test]
    fn test_sector_leading_zero() {
        assert_eq!(normalize("Str. Test, Sector 03"), "Strada Test, Sector 3, Bucuresti");
    }

    #[test]
    fn test_sector_only_degrades_to_fallback() {
        // Known quirk: a sector without a street is not rendered.
        let address = parse_address("Sector 3, Bucuresti");
        assert_eq!(address.sector, Some(3));
        assert!(address.is_degraded());
        assert_eq!(address.to_string(), ", Bucuresti");
    }

    // ── Punctuation and whitespace ─────────────────────

    #[test]
    fn test_multiple_commas() {
        assert_eq!(normalize("Str. Test,, nr 5"), "Strada Test, 5, Bucuresti");
        assert_eq!(normalize("Str. Test,,, nr 5"), "Strada Test, 5, Bucuresti");
        assert_eq!(normalize("Str. Test, , nr 5"), "Strada Test, 5, Bucuresti");
    }

    #[test]
    fn test_extra_spaces() {
        assert_eq!(normalize("Str.  Test,  nr  5"), "Strada Test, 5, Bucuresti");
        assert_eq!(normalize("Str.   Test,   nr   5"), "Strada Test, 5, Bucuresti");
        assert_eq!(normalize("Str.\tTest,\n nr 5"), "Strada Test, 5, Bucuresti");
    }

    // ── Diacritics and case ────────────────────────────

    #[test]
    fn test_transliteration() {
        assert_eq!(
            normalize("Str. Ștefan cel Mare, nr 10"),
            "Strada Stefan cel Mare, 10, Bucuresti"
        );
        assert_eq!(normalize("Str. Țepeș Vodă, nr 5"), "Strada Tepes Voda, 5, Bucuresti");
        // Cedilla forms
        assert_eq!(normalize("Şos. Ştefan cel Mare"), "Soseaua Stefan cel Mare, Bucuresti");
        assert_eq!(transliterate("ĂÂÎȘȚăâîșțŞŢşţ"), "AAISTaaistSTst");
    }

    #[test]
    fn test_punctuation_folded_to_ascii() {
        assert_eq!(transliterate("B\u{2013}dul"), "B-dul");
        assert_eq!(normalize("B\u{2013}dul Unirii, nr 5"), "Bulevardul Unirii, 5, Bucuresti");
        assert_eq!(normalize("Str. Test, nr 5\u{2013}7"), "Strada Test, 5-7, Bucuresti");
        assert!(transliterate("\u{201e}Test\u{201d}").is_ascii());
    }

    #[test]
    fn test_diacritic_invariance() {
        for raw in [
            "Șos. Colentina, nr 20",
            "Str. Țepeș Vodă, nr 5",
            "Întrarea Florilor, nr 2",
            "Piața Unirii nr. 1, sect 3",
        ] {
            assert_eq!(normalize(raw), normalize(&transliterate(raw)), "{}", raw);
        }
    }

    #[test]
    fn test_case_insensitivity() {
        assert_eq!(normalize("str. test, nr 5"), "Strada test, 5, Bucuresti");
        assert_eq!(normalize("STR. TEST, NR 5"), "Strada TEST, 5, Bucuresti");
        assert_eq!(normalize("Str. Test, Nr 5"), "Strada Test, 5, Bucuresti");
        assert_eq!(normalize("BD. UNIRII NR. 5 SECT. 3"), "Bulevardul UNIRII, 5, Sector 3, Bucuresti");
    }

    // ── Fallback ───────────────────────────────────────

    #[test]
    fn test_no_street() {
        assert_eq!(normalize("Random Address, nr 5"), ", Bucuresti");
        assert_eq!(normalize(""), ", Bucuresti");
        assert_eq!(normalize("   "), ", Bucuresti");
        assert_eq!(normalize_opt(None), ", Bucuresti");
    }

    #[test]
    fn test_street_type_without_name() {
        assert_eq!(normalize("Str."), ", Bucuresti");
        assert_eq!(normalize("Str. , nr 5"), ", Bucuresti");
    }

    #[test]
    fn test_first_named_street_wins() {
        assert_eq!(
            normalize("Str. Numarul 5, Bd. Unirii"),
            "Bulevardul Unirii, 5, Bucuresti"
        );
    }

    // ── End to end ─────────────────────────────────────

    #[test]
    fn test_complex_address() {
        assert_eq!(
            normalize("Bd. Unirii, Numarul 15, Sector 3, Bucuresti"),
            "Bulevardul Unirii, 15, Sector 3, Bucuresti"
        );
    }

    #[test]
    fn test_parse_address_structure() {
        let address = parse_address("Bd. Unirii, Numarul 15, Sector 3, Bucuresti");
        let street = address.street.as_ref().unwrap();
        assert_eq!(street.street_type, StreetType::Bulevardul);
        assert_eq!(street.name, "Unirii");
        assert_eq!(address.number.as_deref(), Some("15"));
        assert_eq!(address.sector, Some(3));
        assert!(!address.is_degraded());
    }

    #[test]
    fn test_explain_stages() {
        let trace = explain("Str. Testnr 5");
        assert_eq!(trace.transliterated, "Str. Testnr 5");
        assert_eq!(trace.separated, "Str. Test, nr 5");
        assert_eq!(trace.tokens, "Strada  Test, Numarul  5");
        assert_eq!(trace.cleaned, "Strada Test,Numarul 5");
        assert_eq!(trace.canonical, "Strada Test, 5, Bucuresti");
        assert_eq!(trace.canonical, normalize("Str. Testnr 5"));
    }

    #[test]
    fn test_separate_markers_requires_preceding_letter() {
        assert_eq!(separate_markers("nr 5"), "nr 5");
        assert_eq!(separate_markers("Henri Coanda"), "Henri Coanda");
        assert_eq!(separate_markers("Testnr. 5"), "Test, nr. 5");
        assert_eq!(separate_markers("Anrnr 5"), "A, nr, nr 5");
        assert_eq!(separate_markers("Numarul5"), "Numarul 5");
        assert_eq!(separate_markers("Numarul.5"), "Numarul. 5");
    }

    #[test]
    fn test_clean_separators() {
        assert_eq!(clean_separators("a ,, b"), "a,b");
        assert_eq!(clean_separators("  a   b , c  "), "a b,c");
    }

    // ── Idempotence and determinism ────────────────────

    #[test]
    fn test_idempotence() {
        for raw in [
            "Bd. Unirii, Numarul 15, Sector 3, Bucuresti",
            "Str. Spatar Preda Buzescu Nr. 34, Sect 4",
            "Str. Testnr 5",
            "Str. Test, Bucuresti",
            "Random Address, nr 5",
            "Sector 2, Str X Sector 3",
            "Str. X, Nr. A5",
            "Str. X nr Sector 3",
            "Str. X, Bd. Y",
            "Str. Al.I.Cuza nr.5 bl.A sc.2",
            "Int. Florilor, nr 2, Bucuresti, Sector 1",
            "Str. Sectorului, 7",
            "Str. Anrnr 5",
            "Str. Test, Numarul5",
            "Cal Int, nr 3",
            "B\u{2013}dul Unirii, nr 5\u{2013}7",
            "",
            ",,,",
        ] {
            assert_idempotent(raw);
        }
    }

    #[test]
    fn test_determinism_100_iterations() {
        let input = "Șos. Ștefan cel Mare nr. 10, sect. 2";
        let first = normalize(input);
        for i in 0..100 {
            assert_eq!(first, normalize(input), "Non-determinism at iteration {}", i);
        }
    }
}

// ── Property tests ─────────────────────────────────────────
