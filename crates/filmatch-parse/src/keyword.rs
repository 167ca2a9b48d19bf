use phf::{phf_map, phf_set};

/// How the normalizer should treat a recognized token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    /// Always kept, even when short (functional words, Roman numerals,
    /// dimension and cut markers).
    Keep,
    /// Release-scene noise carrying no title information; always dropped.
    Junk,
    /// Known shorthand for a multi-word title; replaced by its expansion.
    Abbreviation(&'static str),
}

/// Compile-time junk-word lookup table. All keys are lowercase.
///
/// Anything in here is vocabulary a release name carries *about* the file
/// (quality, codec, audio, language, uploader brand, generic noise) rather
/// than about the title itself.
pub static JUNK_WORDS: phf::Set<&'static str> = phf_set! {
    // ── Quality indicators ───────────────────────────────────────
    "480p", "720p", "1080p", "2160p", "4k", "8k", "hdr", "sdr", "uhd",
    "fhd", "hd", "sd", "10bit", "8bit", "hdr10", "hdr10plus", "dv",
    "dolbyvision", "bluray", "webrip", "webdl", "brrip", "dvdrip", "hdtv",
    "pdtv", "camrip", "ts", "telesync", "tc", "telecine", "scr",
    "screener", "dvdscr", "r5", "remux", "bdrip", "microhd", "complete",
    "full",

    // ── Video codecs ─────────────────────────────────────────────
    "x264", "x265", "h264", "h265", "hevc", "av1", "avc", "divx", "xvid",

    // ── Audio ────────────────────────────────────────────────────
    "aac", "ac3", "dd", "ddp", "dts", "eac3", "atmos", "truehd", "mp3",
    "flac", "ogg",

    // ── Language / subtitles ─────────────────────────────────────
    "sinhala", "sinhalese", "tamil", "telugu", "hindi", "malayalam",
    "kannada", "english", "dubbed", "dubbing", "dual", "multi", "sub",
    "subs", "subtitle", "subtitles", "embedded", "softsubs", "hardsub",
    "subtitled", "eng", "tam", "hin", "mal",

    // ── Channel / uploader brands ────────────────────────────────
    "cinesubz", "royalmovies", "royalseries", "mlwbd", "mkvcinemas",
    "moviezworld", "desiscandal", "khatrimaza", "worldfree4u",
    "bollyshare", "pagalmovies", "tamilrockers", "isaimini",
    "madrasrockers", "todaypk", "moviesda", "tamilyogi", "movieverse",
    "moviezindagi", "hdmovieshub", "skymovieshd", "yts", "rarbg", "ettv",
    "etrg", "ctrlhd", "framestor", "tigole", "team", "upload", "uploaded",
    "by", "from", "with", "latest", "new",

    // ── General noise ────────────────────────────────────────────
    "channel", "episode", "episodes", "season", "seasons", "series",
    "part", "volume", "collection", "edition", "version", "uncut",
    "uncensored", "directors", "extended", "unrated", "final", "movie",
    "film", "theatrical", "cut", "limited", "special", "anniversary",
    "proper", "repack", "rerip", "nf", "amzn", "dsnp", "hulu", "atvp",

    // ── Website / domain parts ───────────────────────────────────
    "www", "com", "net", "org", "lk", "in", "to", "me", "co", "uk", "us",
    "tv", "website",
};

/// Words that are kept even when short or present in the junk table.
/// Checked before `JUNK_WORDS`, so "tv"/"us"/"uk"/"in" survive here.
pub static KEEP_WORDS: phf::Set<&'static str> = phf_set! {
    // Roman numerals II–XII
    "ii", "iii", "iv", "v", "vi", "vii", "viii", "ix", "x", "xi", "xii",
    // Short functional words that do occur in real titles
    "tv", "us", "uk", "eu", "in", "at", "on", "of", "the", "and", "a", "an",
    // Dimension markers
    "3d", "2d", "4d",
    // Director's Cut, Uncut
    "dc", "uc",
};

/// Shorthand → multi-word expansion for franchises commonly abbreviated
/// in channel uploads. Expansions are lowercase and space-separated.
pub static ABBREVIATIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "av" => "avengers",
    "hp" => "harry potter",
    "lotr" => "lord of the rings",
    "sw" => "star wars",
    "st" => "star trek",
    "jw" => "jurassic world",
    "jp" => "jurassic park",
    "mi" => "mission impossible",
    "ind" => "indiana",
    "indy" => "indiana",
    "ff" => "fast furious",
    "tf" => "transformers",
    "xmen" => "x men",
    "got" => "game of thrones",
    "tbbt" => "big bang theory",
    "twd" => "walking dead",
    "gotg" => "guardians of the galaxy",
    "aou" => "age of ultron",
    "cw" => "civil war",
    "iw" => "infinity war",
    "eg" => "endgame",
};

/// Quality tiers with their source-lineage scores, in the order the
/// extraction regex tries them. Order matters: the alternation is built
/// from this slice, so earlier entries win when two tags start at the
/// same position.
pub const QUALITY_TIERS: &[(&str, f64)] = &[
    ("2160p", 1.0),
    ("4k", 1.0),
    ("uhd", 1.0),
    ("1080p", 0.9),
    ("fhd", 0.9),
    ("720p", 0.8),
    ("hd", 0.8),
    ("480p", 0.6),
    ("sd", 0.6),
    ("bluray", 0.95),
    ("remux", 0.97),
    ("webdl", 0.85),
    ("webrip", 0.8),
    ("hdtv", 0.75),
    ("dvdrip", 0.7),
    ("cam", 0.3),
    ("ts", 0.2),
    ("telesync", 0.25),
];

/// Score for an unrecognized quality tag.
pub const QUALITY_SCORE_DEFAULT: f64 = 0.5;

/// Language / dub markers with their ISO-639-1-style codes, in extraction
/// order.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("sinhala", "si"),
    ("sinhalese", "si"),
    ("tamil", "ta"),
    ("telugu", "te"),
    ("hindi", "hi"),
    ("malayalam", "ml"),
    ("kannada", "kn"),
    ("english", "en"),
    ("dubbed", "dub"),
    ("dual", "dual"),
];

/// Classify a normalized (lowercase) token. Returns `None` for ordinary
/// title words. Keep wins over junk so short functional words survive.
pub fn classify(token: &str) -> Option<TokenClass> {
    if KEEP_WORDS.contains(token) {
        return Some(TokenClass::Keep);
    }
    if JUNK_WORDS.contains(token) {
        return Some(TokenClass::Junk);
    }
    ABBREVIATIONS
        .get(token)
        .map(|expansion| TokenClass::Abbreviation(*expansion))
}

/// Source-lineage score for a quality tag, `QUALITY_SCORE_DEFAULT` when
/// the tag is not in the tier table.
pub fn quality_score(tag: &str) -> f64 {
    QUALITY_TIERS
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, score)| *score)
        .unwrap_or(QUALITY_SCORE_DEFAULT)
}

/// ISO-style code for a language tag, if it is a known marker.
pub fn language_code(tag: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keep_wins_over_junk() {
        // "tv" is release noise in most positions but also a real title
        // word ("The Office (US)" vs "V (TV)"), so keep wins.
        assert_eq!(classify("tv"), Some(TokenClass::Keep));
        assert_eq!(classify("the"), Some(TokenClass::Keep));
    }

    #[test]
    fn junk_classification() {
        assert_eq!(classify("x264"), Some(TokenClass::Junk));
        assert_eq!(classify("bluray"), Some(TokenClass::Junk));
        assert_eq!(classify("tamilrockers"), Some(TokenClass::Junk));
    }

    #[test]
    fn abbreviation_classification() {
        assert_eq!(
            classify("mi"),
            Some(TokenClass::Abbreviation("mission impossible"))
        );
        assert_eq!(classify("lotr"), Some(TokenClass::Abbreviation("lord of the rings")));
    }

    #[test]
    fn ordinary_words_unclassified() {
        assert_eq!(classify("avengers"), None);
        assert_eq!(classify("knight"), None);
    }

    #[test]
    fn expansions_are_lowercase_words() {
        for (key, expansion) in ABBREVIATIONS.entries() {
            assert!(!expansion.is_empty(), "empty expansion for {key}");
            assert_eq!(*expansion, expansion.to_lowercase());
            assert!(expansion.split_whitespace().count() >= 1);
        }
    }

    #[test]
    fn quality_scores() {
        assert_eq!(quality_score("2160p"), 1.0);
        assert_eq!(quality_score("720p"), 0.8);
        assert_eq!(quality_score("nonsense"), QUALITY_SCORE_DEFAULT);
    }

    #[test]
    fn language_codes() {
        assert_eq!(language_code("sinhala"), Some("si"));
        assert_eq!(language_code("english"), Some("en"));
        assert_eq!(language_code("dubbed"), Some("dub"));
        assert_eq!(language_code("klingon"), None);
    }

    #[test]
    fn roman_numerals_kept() {
        for numeral in ["ii", "iii", "iv", "v", "ix", "xii"] {
            assert_eq!(classify(numeral), Some(TokenClass::Keep), "{numeral}");
        }
    }
}
