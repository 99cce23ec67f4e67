use regex::Regex;

/// Canonicalizes raw text before tokenization: lowercases it, replaces
/// links and mentions with placeholders and unwraps hashtags.
pub struct Normalizer {
    url: Regex,
    mention: Regex,
    spaces: Regex,
    hashtag: Regex,
}

pub const URL_PLACEHOLDER: &str = "URL";
pub const USER_PLACEHOLDER: &str = "USER";

impl Normalizer {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            url: Regex::new(r"(https?://\S+)|(www\.\S+)")?,
            mention: Regex::new(r"@\S+")?,
            spaces: Regex::new(r"\s+")?,
            hashtag: Regex::new(r"#(\S+)")?,
        })
    }

    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let linked = self.url.replace_all(&lowered, URL_PLACEHOLDER);
        let mentioned = self.mention.replace_all(&linked, USER_PLACEHOLDER);
        let spaced = self.spaces.replace_all(&mentioned, " ");
        let tagged = self.hashtag.replace_all(&spaced, "$1");
        tagged.trim().trim_matches(|c: char| c == '\'' || c == '"').to_string()
    }

    /// Splits normalized text into scoring tokens, dropping placeholders
    /// and anything `is_stop_word` rejects.
    pub fn tokens(&self, normalized: &str, is_stop_word: impl Fn(&str) -> bool) -> Vec<String> {
        normalized
            .split_whitespace()
            .filter(|word| *word != URL_PLACEHOLDER && *word != USER_PLACEHOLDER)
            .map(collapse_repeats)
            .map(|word| {
                word.trim_matches(|c: char| matches!(c, '\'' | '"' | '?' | ',' | '.' | '!'))
                    .to_string()
            })
            .filter(|word| !word.is_empty() && !is_stop_word(word))
            .collect()
    }
}

/// Shortens runs of three or more identical characters to two
/// (`"sooooo"` becomes `"soo"`).
pub fn collapse_repeats(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut previous = None;
    let mut run = 0;
    for c in word.chars() {
        if Some(c) == previous {
            run += 1;
        } else {
            previous = Some(c);
            run = 1;
        }
        if run <= 2 {
            out.push(c);
        }
    }
    out
}
