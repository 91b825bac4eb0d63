//! Token rule table — canonical street types and their abbreviations
//!
//! The table is built once per process and never mutated afterwards.
//! Order is significant: the number marker is resolved first, then the
//! nine street types, then the sector marker.
//!
//! Every pattern is case-insensitive and starts at a word boundary. Bare
//! abbreviations end at a word boundary too, so `Bd` never matches the head
//! of `Bdul` and no partial suffix survives a substitution.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// ── Street types ───────────────────────────────────────────

/// Canonical Romanian street-type words, in recognition order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StreetType {
    Calea,
    Piata,
    Drumul,
    Strada,
    Bulevardul,
    Soseaua,
    Splaiul,
    Aleea,
    Intrarea,
}

impl StreetType {
    pub const ALL: [StreetType; 9] = [
        StreetType::Calea,
        StreetType::Piata,
        StreetType::Drumul,
        StreetType::Strada,
        StreetType::Bulevardul,
        StreetType::Soseaua,
        StreetType::Splaiul,
        StreetType::Aleea,
        StreetType::Intrarea,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StreetType::Calea => "Calea",
            StreetType::Piata => "Piata",
            StreetType::Drumul => "Drumul",
            StreetType::Strada => "Strada",
            StreetType::Bulevardul => "Bulevardul",
            StreetType::Soseaua => "Soseaua",
            StreetType::Splaiul => "Splaiul",
            StreetType::Aleea => "Aleea",
            StreetType::Intrarea => "Intrarea",
        }
    }

    /// Accepted spellings as regex alternatives, longest first.
    ///
    /// Full words and bare abbreviations end at `\b`; dotted forms end at
    /// the dot.
    fn variants(self) -> &'static [&'static str] {
        match self {
            StreetType::Calea => &[r"Calea\b", r"Cal\.", r"Cal\b"],
            StreetType::Piata => &[r"Piata\b", r"Pta\b\.?"],
            StreetType::Drumul => &[r"Drumul\b"],
            StreetType::Strada => &[r"Strada\b", r"Stra\.", r"Str\b\.?"],
            StreetType::Bulevardul => &[
                r"Bulevardul\b",
                r"Bulevard\b",
                r"B-dul\b\.?",
                r"Bdul\b\.?",
                r"Bld\b\.?",
                r"Bd\b\.?",
            ],
            StreetType::Soseaua => &[r"Soseaua\b", r"Sos\b\.?"],
            StreetType::Splaiul => &[r"Splaiul\b", r"Spl\b\.?"],
            StreetType::Aleea => &[r"Aleea\b", r"Al\."],
            StreetType::Intrarea => &[
                r"Intrarea\b",
                r"Intarea\b",
                r"Intr\.",
                r"Int\.",
                r"Intr\b",
                r"Int\b",
            ],
        }
    }
}

impl fmt::Display for StreetType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StreetType {
    type Err = String;

    /// Parses a canonical street-type word, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StreetType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown street type: {}", s))
    }
}

// ── Markers ────────────────────────────────────────────────

/// Canonical number marker (without trailing space)
pub const NUMBER_MARKER: &str = "Numarul";

/// Canonical sector marker (without trailing space)
pub const SECTOR_MARKER: &str = "Sector";

/// City suffix carried by every canonical address
pub const CITY: &str = "Bucuresti";

const NUMBER_VARIANTS: &[&str] = &[r"Numarul\b\.?", r"Nrul\b\.?", r"Nr\b\.?"];

const SECTOR_VARIANTS: &[&str] = &[r"Sectorul\b\.?", r"Sector\b\.?", r"Sect\b\.?"];

// ── Rule table ─────────────────────────────────────────────

/// What a rule rewrites to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    Street(StreetType),
    Sector,
}

impl TokenKind {
    pub fn canonical(self) -> &'static str {
        match self {
            TokenKind::Number => NUMBER_MARKER,
            TokenKind::Street(t) => t.as_str(),
            TokenKind::Sector => SECTOR_MARKER,
        }
    }
}

/// One compiled rewrite: every match of `pattern` becomes `replacement`
#[derive(Debug)]
pub struct TokenRule {
    pub kind: TokenKind,
    pub pattern: Regex,
    pub replacement: String,
}

impl TokenRule {
    fn new(kind: TokenKind, variants: &[&str]) -> Self {
        let source = format!(r"(?i)\b(?:{})", variants.join("|"));
        let pattern = match Regex::new(&source) {
            Ok(re) => re,
            Err(e) => panic!("invalid token rule for {:?}: {}", kind, e),
        };
        TokenRule {
            kind,
            pattern,
            replacement: format!("{} ", kind.canonical()),
        }
    }

    /// Rewrite every occurrence of this rule's token
    pub fn apply(&self, input: &str) -> String {
        self.pattern
            .replace_all(input, regex::NoExpand(self.replacement.as_str()))
            .into_owned()
    }
}

static TOKEN_RULES: Lazy<Vec<TokenRule>> = Lazy::new(|| {
    let mut rules = Vec::with_capacity(StreetType::ALL.len() + 2);
    rules.push(TokenRule::new(TokenKind::Number, NUMBER_VARIANTS));
    for street in StreetType::ALL {
        rules.push(TokenRule::new(TokenKind::Street(street), street.variants()));
    }
    rules.push(TokenRule::new(TokenKind::Sector, SECTOR_VARIANTS));
    rules
});

/// The ordered, process-wide rule table
pub fn token_rules() -> &'static [TokenRule] {
    &TOKEN_RULES
}
