//! Rule-based English part-of-speech tagger
//!
//! Produces Penn Treebank style tags (`NN`, `NNS`, `JJ`, `VBZ`, ...) from a
//! closed-class lexicon, a small verb lexicon and suffix rules. Anything the
//! rules cannot place is tagged as a noun, which is the right default for
//! course titles and descriptions.

use std::collections::{HashMap, HashSet};

lazy_static::lazy_static! {
    static ref CLOSED_CLASS: HashMap<&'static str, &'static str> = {
        let groups: &[(&str, &[&str])] = &[
            ("DT", &[
                "the", "a", "an", "this", "that", "these", "those", "each", "every", "some",
                "any", "no", "all", "both", "another", "either", "neither",
            ]),
            ("IN", &[
                "of", "in", "on", "at", "by", "for", "with", "about", "against", "between",
                "into", "through", "during", "before", "after", "above", "below", "from", "up",
                "down", "out", "off", "over", "under", "within", "without", "across", "along",
                "among", "around", "beyond", "toward", "towards", "upon", "via", "per",
                "including", "throughout", "despite", "than", "like", "because", "if", "while",
                "whether", "since", "until", "although", "though", "unless", "as",
            ]),
            ("TO", &["to"]),
            ("CC", &["and", "or", "but", "nor", "yet", "so", "&"]),
            ("PRP", &[
                "i", "me", "you", "he", "she", "it", "we", "they", "him", "her", "us", "them",
                "myself", "yourself", "itself", "ourselves", "themselves",
            ]),
            ("PRP$", &["my", "your", "his", "its", "our", "their"]),
            ("MD", &["can", "could", "will", "would", "shall", "should", "may", "might", "must"]),
            ("VBZ", &["is", "has", "does"]),
            ("VBP", &["am", "are", "have", "do"]),
            ("VBD", &["was", "were", "had", "did"]),
            ("VB", &["be"]),
            ("VBN", &["been"]),
            ("VBG", &["being"]),
            ("WDT", &["which", "whatever", "whichever"]),
            ("WP", &["who", "whom", "what", "whoever"]),
            ("WP$", &["whose"]),
            ("WRB", &["where", "when", "why", "how"]),
            ("EX", &["there"]),
            ("RB", &[
                "not", "also", "very", "too", "only", "just", "then", "here", "well", "often",
                "always", "never", "again", "further", "however", "therefore", "thus", "soon",
                "already", "still", "even", "rather", "quite", "perhaps", "instead", "together",
            ]),
            ("JJR", &["more", "less", "better", "worse", "greater", "higher", "lower"]),
            ("JJS", &["most", "least", "best", "worst"]),
            ("CD", &[
                "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
                "hundred", "thousand",
            ]),
        ];

        let mut map = HashMap::new();
        for (tag, words) in groups {
            for word in *words {
                map.insert(*word, *tag);
            }
        }
        map
    };

    static ref ADJECTIVES: HashSet<&'static str> = [
        "advanced", "applied", "basic", "introductory", "intermediate", "elementary",
        "fundamental", "modern", "ancient", "new", "old", "major", "minor", "key", "main",
        "core", "common", "general", "special", "specific", "various", "several",
        "different", "essential", "important", "current", "contemporary", "early", "late",
        "human", "open", "free", "short", "long", "young", "native", "foreign", "senior",
        "junior", "upper", "lower", "high", "low", "large", "small", "big", "good", "great",
        "real", "complex", "simple", "first", "second", "third", "final", "primary",
        "secondary", "necessary", "ordinary", "literary", "military", "monetary",
        "interdisciplinary", "integrated", "selected", "quantitative", "qualitative",
        "fine", "hands-on", "deep", "broad", "independent", "relevant", "efficient",
        "sufficient", "recent", "ethical", "urban", "rural", "american", "european",
        "african", "asian", "english", "french", "spanish", "german", "chinese", "japanese",
    ]
    .into_iter()
    .collect();

    static ref NOUN_EXCEPTIONS: HashSet<&'static str> = [
        // -al
        "tutorial", "material", "journal", "proposal", "signal", "terminal", "capital",
        "animal", "interval", "manual", "portal", "festival", "criminal", "principal",
        "potential", "individual", "chemical", "rival", "arrival", "approval", "disposal",
        "renewal", "removal", "survival", "trial", "total", "metal", "hospital",
        // -ic
        "logic", "music", "topic", "clinic", "graphic", "arithmetic", "rhetoric", "fabric",
        "traffic", "mechanic", "panic", "epic", "critic", "republic", "mosaic", "magic",
        // -ive
        "objective", "initiative", "elective", "perspective", "executive", "narrative",
        "alternative", "derivative", "representative", "detective", "directive", "motive",
        "incentive", "archive", "explosive", "adjective",
        // -ly
        "assembly", "family", "supply", "anomaly", "monopoly", "july", "rally", "reply",
        "ally", "italy", "butterfly", "homily",
        // -able / -ible
        "variable", "table", "cable", "syllable", "vegetable", "timetable", "deliverable",
        "receivable", "payable",
        // -ful
        "handful", "mouthful",
    ]
    .into_iter()
    .collect();

    static ref VERB_LEMMAS: HashSet<&'static str> = [
        "cover", "introduce", "explore", "provide", "include", "examine", "teach", "focus",
        "emphasize", "emphasise", "develop", "discuss", "learn", "analyze", "analyse",
        "apply", "use", "create", "understand", "describe", "explain", "present", "address",
        "require", "offer", "prepare", "enable", "help", "allow", "involve", "investigate",
        "consider", "evaluate", "implement", "integrate", "demonstrate", "identify",
        "compare", "gain", "acquire", "complete", "solve", "conduct", "define", "highlight",
        "engage", "utilize", "utilise", "organize", "organise", "continue", "expand",
        "extend", "build", "write", "read", "assess", "survey", "trace",
        "equip", "familiarize", "familiarise", "combine", "span", "cultivate", "encourage",
        "discover", "become", "make", "take", "give", "see", "get", "know",
        "think", "work", "need", "seek", "strengthen", "improve",
        "reinforce", "illustrate", "treat", "touch", "obtain", "master", "perform",
        "participate", "receive", "satisfy", "fulfill", "fulfil", "meet",
    ]
    .into_iter()
    .collect();
}

/// Suffixes that mark adjectives, longest first
const ADJECTIVE_SUFFIXES: [&str; 11] = [
    "ical", "istic", "able", "ible", "less", "ular", "ous", "ful", "ive", "al", "ic",
];

/// Rule-based English tagger
#[derive(Debug, Default, Clone)]
pub struct EnglishTagger;

impl EnglishTagger {
    pub fn new() -> Self {
        Self
    }

    /// Tag a sequence of lowercase tokens. Output length equals input length.
    pub fn tag<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<&'static str> {
        let mut tags: Vec<&'static str> = Vec::with_capacity(tokens.len());
        for token in tokens {
            let prev = tags.last().copied();
            tags.push(tag_word(token.as_ref(), prev));
        }
        tags
    }
}

fn tag_word(word: &str, prev: Option<&'static str>) -> &'static str {
    if let Some(tag) = punctuation_tag(word) {
        return tag;
    }
    if let Some(tag) = CLOSED_CLASS.get(word).copied() {
        return tag;
    }
    if word.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
        return "CD";
    }

    if ADJECTIVES.contains(word) {
        return "JJ";
    }

    // Compounds take the tag of their head; `x-ed` compounds act as adjectives
    if let Some((_, head)) = word.rsplit_once('-') {
        if head.len() > 3 && head.ends_with("ed") {
            return "JJ";
        }
        if !head.is_empty() {
            return tag_word(head, prev);
        }
    }

    if NOUN_EXCEPTIONS.contains(word) {
        return noun_tag(word);
    }
    if let Some(tag) = verb_tag(word, prev) {
        return tag;
    }
    if word.len() > 4 && word.ends_with("ly") {
        return "RB";
    }
    if word.ends_with("ics") {
        return "NNS";
    }
    if ADJECTIVE_SUFFIXES
        .iter()
        .any(|suffix| word.len() > suffix.len() + 2 && word.ends_with(suffix))
    {
        return "JJ";
    }
    noun_tag(word)
}

fn punctuation_tag(word: &str) -> Option<&'static str> {
    if word.chars().any(|c| c.is_alphanumeric()) {
        return None;
    }
    Some(match word {
        "." | "!" | "?" => ".",
        "," => ",",
        _ => ":",
    })
}

fn noun_tag(word: &str) -> &'static str {
    let plural = word.len() > 3
        && word.ends_with('s')
        && !word.ends_with("ss")
        && !word.ends_with("us")
        && !word.ends_with("is");
    if plural {
        "NNS"
    } else {
        "NN"
    }
}

/// Tag inflected forms of known verbs; base forms only after a modal or `to`
fn verb_tag(word: &str, prev: Option<&'static str>) -> Option<&'static str> {
    let after_modal = matches!(prev, Some("MD") | Some("TO") | Some("PRP"));
    let after_nominal_slot = matches!(prev, Some("DT") | Some("JJ") | Some("PRP$"));

    if VERB_LEMMAS.contains(word) {
        return after_modal.then_some("VB");
    }
    if word.ends_with("ing") {
        let verbal_context = match prev {
            None => true,
            Some(tag) => tag.starts_with('V') || tag == "RB" || tag == "IN" || tag == ",",
        };
        return (verbal_context && is_verb_form(word, &["ing"])).then_some("VBG");
    }
    if word.ends_with("ed") && is_verb_form(word, &["ed", "d"]) {
        return Some(if matches!(prev, Some(tag) if tag.starts_with("VB")) {
            "VBN"
        } else {
            "VBD"
        });
    }
    if word.ends_with('s') && !after_nominal_slot && is_verb_form(word, &["es", "s"]) {
        return Some("VBZ");
    }
    None
}

/// Does stripping one of `suffixes` (with common spelling repairs) give a known verb?
fn is_verb_form(word: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|suffix| {
        let Some(stem) = word.strip_suffix(suffix) else {
            return false;
        };
        if stem.len() < 2 {
            return false;
        }
        let mut candidates = vec![stem.to_string(), format!("{}e", stem)];
        if let Some(base) = stem.strip_suffix('i') {
            candidates.push(format!("{}y", base));
        }
        // Doubled final consonant: "spanned" -> "span"
        let mut tail = stem.chars().rev();
        if let (Some(last), Some(prev)) = (tail.next(), tail.next()) {
            if last == prev && last.is_ascii_alphabetic() && stem.chars().count() > 2 {
                candidates.push(stem[..stem.len() - last.len_utf8()].to_string());
            }
        }
        candidates.iter().any(|c| VERB_LEMMAS.contains(c.as_str()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(text: &str) -> Vec<&'static str> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        EnglishTagger::new().tag(&tokens)
    }

    #[test]
    fn test_course_sentence() {
        assert_eq!(
            tags("covers relational algebra , sql , normalization , and transactions ."),
            vec!["VBZ", "JJ", "NN", ",", "NN", ",", "NN", ",", "CC", "NNS", "."]
        );
    }

    #[test]
    fn test_closed_class_and_numbers() {
        assert_eq!(tags("the basics of 101"), vec!["DT", "NNS", "IN", "CD"]);
    }

    #[test]
    fn test_gerund_depends_on_context() {
        assert_eq!(tags("machine learning"), vec!["NN", "NN"]);
        assert_eq!(tags("by analyzing data"), vec!["IN", "VBG", "NN"]);
        assert_eq!(tags("introduction to programming"), vec!["NN", "TO", "NN"]);
    }

    #[test]
    fn test_verb_base_form_needs_modal() {
        assert_eq!(tags("students will learn"), vec!["NNS", "MD", "VB"]);
        assert_eq!(tags("database design"), vec!["NN", "NN"]);
    }

    #[test]
    fn test_suffix_rules() {
        assert_eq!(tags("statistical inference"), vec!["JJ", "NN"]);
        assert_eq!(tags("tutorial"), vec!["NN"]);
        assert_eq!(tags("quickly"), vec!["RB"]);
        assert_eq!(tags("economics"), vec!["NNS"]);
        assert_eq!(tags("object-oriented design"), vec!["JJ", "NN"]);
    }

    #[test]
    fn test_doubled_consonant_repair() {
        assert!(is_verb_form("spanned", &["ed", "d"]));
        assert!(!is_verb_form("co₂ed", &["ed", "d"]));
        assert!(!is_verb_form("丸丸ed", &["ed", "d"]));
        assert!(!is_verb_form("co₂s", &["es", "s"]));
    }

    #[test]
    fn test_multibyte_words_are_tagged() {
        let tokens = ["co₂s", "co₂ed", "丸丸s", "naïve", "café", "emissions"];
        let tagged = EnglishTagger::new().tag(&tokens);
        assert_eq!(tagged.len(), tokens.len());
        assert_eq!(tags("reduction of co₂s"), vec!["NN", "IN", "NNS"]);
    }

    #[test]
    fn test_output_length_matches() {
        let tokens = ["a", "b", "c", "!"];
        assert_eq!(EnglishTagger::new().tag(&tokens).len(), tokens.len());
    }
}
