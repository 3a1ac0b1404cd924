//! Keyphrase candidate generation
//!
//! Text is tokenized and part-of-speech tagged by the linguistic pipeline,
//! then a tag grammar such as `<J.*>*<N.*>+` is matched over the tag
//! sequence. Each match becomes a candidate phrase once stopwords are removed.

use regex::Regex;
use std::collections::HashSet;
use std::ops::Range;

use crate::core::error::{Result, TagGenError};

use super::pos::EnglishTagger;
use super::stopwords;

/// Longest text the pipeline accepts, in characters
pub const MAX_TEXT_CHARS: usize = 1_000_000;

const TOKEN_PATTERN: &str = r"[\p{L}\p{N}]+(?:['\-.+#&][\p{L}\p{N}]+)*[+#]*|[^\s\p{L}\p{N}]";

/// A token with its part-of-speech tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub tag: &'static str,
}

/// Tokenizer plus tagger for one language
pub struct LinguisticPipeline {
    language: String,
    tokenizer: Regex,
    tagger: EnglishTagger,
}

impl LinguisticPipeline {
    /// Load the pipeline for `language`. Only English is bundled.
    pub fn load(language: &str) -> Result<Self> {
        match language.to_lowercase().as_str() {
            "en" | "english" => {}
            other => {
                return Err(TagGenError::ModelLoad(format!(
                    "No linguistic pipeline for language '{}'",
                    other
                )))
            }
        }

        let tokenizer = Regex::new(TOKEN_PATTERN)
            .map_err(|e| TagGenError::ModelLoad(format!("Invalid token pattern: {}", e)))?;

        Ok(Self {
            language: language.to_lowercase(),
            tokenizer,
            tagger: EnglishTagger::new(),
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Tokenize and tag lowercased `text`
    pub fn parse(&self, text: &str) -> Result<Vec<Token>> {
        if let Some(c) = text
            .chars()
            .find(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t'))
        {
            return Err(TagGenError::Extraction(format!(
                "Unsupported character U+{:04X} in text",
                c as u32
            )));
        }

        let char_count = text.chars().count();
        if char_count > MAX_TEXT_CHARS {
            return Err(TagGenError::Extraction(format!(
                "Text of {} characters exceeds the {} character limit",
                char_count, MAX_TEXT_CHARS
            )));
        }

        let lowered = text.to_lowercase();
        let words: Vec<&str> = self
            .tokenizer
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .collect();
        let tags = self.tagger.tag(&words);

        Ok(words
            .into_iter()
            .zip(tags)
            .map(|(text, tag)| Token {
                text: text.to_string(),
                tag,
            })
            .collect())
    }
}

/// A compiled part-of-speech grammar
#[derive(Debug, Clone)]
pub struct PosPattern {
    source: String,
    regex: Regex,
}

impl PosPattern {
    /// Compile an angle-bracket tag pattern. Inside `<...>`, `.` matches any
    /// tag character; outside, regex quantifiers and grouping apply to whole
    /// tags.
    pub fn compile(pattern: &str) -> Result<Self> {
        let mut translated = String::new();
        let mut chars = pattern.chars();

        while let Some(c) = chars.next() {
            match c {
                '<' => {
                    let mut inner = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == '>' {
                            closed = true;
                            break;
                        }
                        inner.push(c);
                    }
                    if !closed || inner.is_empty() {
                        return Err(TagGenError::ModelLoad(format!(
                            "Malformed tag pattern '{}'",
                            pattern
                        )));
                    }
                    translated.push_str("(?:<");
                    for c in inner.chars() {
                        match c {
                            '.' => translated.push_str("[^<>]"),
                            '*' | '+' | '?' | '|' | '(' | ')' => translated.push(c),
                            c if c.is_ascii_alphanumeric() => translated.push(c),
                            c => translated.push_str(&regex::escape(&c.to_string())),
                        }
                    }
                    translated.push_str(">)");
                }
                '>' => {
                    return Err(TagGenError::ModelLoad(format!(
                        "Malformed tag pattern '{}'",
                        pattern
                    )))
                }
                c if c.is_whitespace() => {}
                c => translated.push(c),
            }
        }

        let regex = Regex::new(&translated).map_err(|e| {
            TagGenError::ModelLoad(format!("Invalid tag pattern '{}': {}", pattern, e))
        })?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Token index ranges matched by the grammar, left to right
    pub fn find_spans(&self, tags: &[&str]) -> Vec<Range<usize>> {
        let mut encoded = String::new();
        let mut starts = Vec::with_capacity(tags.len());
        for tag in tags {
            starts.push(encoded.len());
            encoded.push('<');
            encoded.push_str(tag);
            encoded.push('>');
        }

        self.regex
            .find_iter(&encoded)
            .filter(|m| !m.as_str().is_empty())
            .filter_map(|m| {
                let first = starts.binary_search(&m.start()).ok()?;
                let last = match starts.binary_search(&m.end()) {
                    Ok(next) => next,
                    Err(_) if m.end() == encoded.len() => tags.len(),
                    Err(_) => return None,
                };
                Some(first..last)
            })
            .collect()
    }
}

/// Generates deduplicated keyphrase candidates from text
pub struct CandidateGenerator {
    pipeline: LinguisticPipeline,
    pattern: PosPattern,
    stopwords: &'static HashSet<&'static str>,
}

impl CandidateGenerator {
    pub fn new(language: &str, pattern: &str, stopword_language: &str) -> Result<Self> {
        let pipeline = LinguisticPipeline::load(language)?;
        let pattern = PosPattern::compile(pattern)?;
        let stopwords = stopwords::for_language(stopword_language).ok_or_else(|| {
            TagGenError::ModelLoad(format!("No stopword list for '{}'", stopword_language))
        })?;

        Ok(Self {
            pipeline,
            pattern,
            stopwords,
        })
    }

    pub fn pipeline(&self) -> &LinguisticPipeline {
        &self.pipeline
    }

    pub fn pattern(&self) -> &PosPattern {
        &self.pattern
    }

    /// Candidate phrases in order of first appearance
    pub fn candidates(&self, text: &str) -> Result<Vec<String>> {
        let tokens = self.pipeline.parse(text)?;
        let tags: Vec<&str> = tokens.iter().map(|t| t.tag).collect();

        let mut seen = HashSet::new();
        let mut phrases = Vec::new();

        for span in self.pattern.find_spans(&tags) {
            let words: Vec<&str> = tokens[span]
                .iter()
                .map(|t| t.text.as_str())
                .filter(|w| !self.stopwords.contains(w))
                .collect();
            if words.is_empty() {
                continue;
            }

            let phrase = words.join(" ");
            if seen.insert(phrase.clone()) {
                phrases.push(phrase);
            }
        }

        Ok(phrases)
    }
}
