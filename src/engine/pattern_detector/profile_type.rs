use super::core::PatternDetector;
use crate::importer::data_cleaner::DataCleaner;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Known vocabulary, matched on normalized text. The first
    // KNOWN_VOCABULARY_COUNT entries are the core cutting-list
    // profiles and earn the extraction confidence bonus.
    static ref PROFILE_PATTERNS: Vec<Regex> = [
        r"\b(kapali|acik)\s*(alt|ust)\b",
        r"\b(closed|open)\s*(top|bottom)\b",
        r"\d+(?:[.,]\d+)?\s*[x*]\s*\d+(?:[.,]\d+)?(?:\s*[x*]\s*\d+(?:[.,]\d+)?)?\s*(kutu|box)\b",
        r"\b(kutu|box)\s*\d+(?:[.,]\d+)?\s*[x*]\s*\d+",
        r"\bkutu\b",
        r"\bbox\b",
        r"\bkaynakli\b",
        r"\bwelded\b",
        r"\brondo(lu)?\b",
        r"\b(yuvarlak|kare|dikdortgen|oval|ucgen|altigen|round|square|rectangular|hexagon)\b",
        r"\blama\b",
        r"\b(kosebent|kose|corner|angle)\b",
        r"\b[ult]\s*(profil|profile)\b",
        r"\b(ayak|stand|leg)\b",
        r"\b(ray|rail|kizak)\b",
        r"\b(kasa|frame|cerceve)\b",
        r"\b(kapi|door|kanat|sash)\b",
        r"\b(braket|bracket|baglanti)\b",
        r"\b(boru|tube|pipe)\b",
        r"\b(kayit|mullion)\b",
        r"\bdikme\b",
        r"\b(tutamak|handle|kulp)\b",
        r"\b(kapak|cover|cap)\b",
        r"\b(cita|baza|pervaz)\b",
        r"\b(profil|profile)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();
}

const KNOWN_VOCABULARY_COUNT: usize = 9;

// Column titles; never profile values
const PROFILE_HEADER_WORDS: [&str; 7] = [
    "profil",
    "profile",
    "profil tipi",
    "profil turu",
    "profil adi",
    "profile type",
    "profiller",
];

const MIN_PROFILE_TYPE_LENGTH: usize = 3;

pub(super) fn is_profile_type(value: &str) -> bool {
    let normalized = DataCleaner::normalize_for_matching(value);
    if normalized.chars().count() < MIN_PROFILE_TYPE_LENGTH
        || PROFILE_HEADER_WORDS.contains(&normalized.as_str())
    {
        return false;
    }
    PROFILE_PATTERNS.iter().any(|p| p.is_match(&normalized))
}

pub(super) fn is_known_profile_vocabulary(value: &str) -> bool {
    let normalized = DataCleaner::normalize_for_matching(value);
    PROFILE_PATTERNS[..KNOWN_VOCABULARY_COUNT]
        .iter()
        .any(|p| p.is_match(&normalized))
}

impl PatternDetector {
    /// `"KAPALI ALT"`, `"25X25 KUTU"`, `"RONDOLU"` are profile types;
    /// `"İş Emri"` and bare numbers are not.
    pub fn is_profile_type(&self, value: &str) -> bool {
        is_profile_type(value)
    }

    /// Core cutting-list vocabulary (closed/open, box, welded, rondo)
    pub fn is_known_profile_vocabulary(&self, value: &str) -> bool {
        is_known_profile_vocabulary(value)
    }
}
