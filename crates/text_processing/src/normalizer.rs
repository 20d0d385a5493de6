//! Query cleaning
//!
//! Strips conversational noise from a raw question so that only the part
//! carrying meaning is left. The chain runs, in order:
//!
//! 1. lowercase and punctuation/whitespace pre-collapse
//! 2. structural rewrites ("X dekha hai ... uska P", "agar A ho jaye to B")
//! 3. conversational openers and meta-talk about the question
//! 4. "what does X mean" rephrasings, rewritten to "X meaning"
//! 5. step-by-step and politeness fillers, trailing requests
//! 6. final punctuation/whitespace collapse
//!
//! The chain is repeated until the text stops changing, which makes `clean`
//! idempotent. Past `max_clean_passes` a pass is only accepted while it
//! keeps shortening the text.

use once_cell::sync::Lazy;
use qa_match_config::NormalizerSettings;
use regex::Regex;

use crate::{Result, TextProcessingError};

static PRE_COLLAPSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{P}\p{S}]+").unwrap());
static FINAL_COLLAPSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}\p{M}\s]+").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// "tumne X dekha hai, uska matlab kya hai" -> "X matlab kya hota"
static SEEN_PROPERTY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:kya\s+)?(?:(?:tumne|aapne|apne|tum|aap)(?:\s+ne)?\s+)?(?:kabhi\s+)?(?P<entity>.+?)\s+(?:dekha|dekhi|dekhe|suna|suni|sune)(?:\s+(?:hai|hain|h|ho|kabhi|na|kya))*\s+(?:(?:to|toh)\s+)?(?:uska|iska|unka|inka|uski|iski|uske|iske)\s+(?P<property>\S+).*$",
    )
    .unwrap()
});

/// "agar A ho jaye to B" -> "A B"
static CONDITIONAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<pre>.*?)\bagar\s+(?P<cond>.+?)\s+ho\s+(?:jaye|jaaye|jae|jay|gaya|gayi|jata|jaata|jati)(?:\s+hai)?\s+(?:to|toh|tab)\s+(?P<then>.+)$",
    )
    .unwrap()
});

static OPENERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^(?:(?:hi|hello|hey|namaste|namaskar)\s+)+").unwrap(),
        Regex::new(
            r"^(?:(?:tum|aap)\s+)?(?:mujhe|muje|mujhko|hume|humein|hamein|hamko)\s+(?:(?:ye|yeh|zara|thoda)\s+)?(?:batao|bataiye|bataye|bata\s+do|bata\s+dijiye|samjhao|samjhaiye|samjha\s+do)\s+(?:(?:ki|that)\s+)?",
        )
        .unwrap(),
        Regex::new(
            r"^(?:(?:can|could|will|would)\s+you\s+(?:please\s+)?|(?:please|pls|plz|kindly)\s+)(?:tell|explain|describe)(?:\s+(?:me|us))?(?:\s+(?:about|that))?\s+",
        )
        .unwrap(),
        Regex::new(
            r"^(?:i\s+(?:want|would\s+like|wanted)\s+to\s+know|mujhe\s+(?:janna|jaanna|jaanana)\s+(?:hai|tha))\s+(?:(?:about|that|ki)\s+)?",
        )
        .unwrap(),
    ]
});

static META_TALK: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(
            r"^(?:mera|meri|my|ek|one|a)\s+(?:question|sawal|sawaal|doubt|query)\s+(?:hai|is|tha|was)\s+(?:(?:ki|that)\s+)?",
        )
        .unwrap(),
        Regex::new(
            r"^i\s+have\s+(?:a|one|ek)\s+(?:question|doubt|query)\s+(?:(?:about|on|regarding)\s+)?",
        )
        .unwrap(),
        Regex::new(r"^(?:question|sawal|sawaal)\s+(?:ye|yeh|yah)\s+(?:hai\s+)?(?:(?:ki|that)\s+)?")
            .unwrap(),
        Regex::new(
            r"\s+(?:ye|yeh|this\s+is)\s+(?:mera\s+|my\s+)?(?:question|sawal|sawaal)(?:\s+hai)?$",
        )
        .unwrap(),
    ]
});

static MEANING_REWRITES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(
            r"\bwhat\s+(?:does|do)\s+(?:the\s+)?(?:term\s+|word\s+)?(?P<x>.+?)\s+(?:mean|means|stand\s+for)\b",
        )
        .unwrap(),
        Regex::new(
            r"\bwhat\s+is\s+(?:the\s+)?meaning\s+of\s+(?:the\s+)?(?:term\s+|word\s+)?(?P<x>.+)$",
        )
        .unwrap(),
        Regex::new(r"\bwhat\s+is\s+meant\s+by\s+(?P<x>.+)$").unwrap(),
    ]
});

static FILLERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"\b(?:step\s+by\s+step|one\s+by\s+one|ek\s+ek\s+karke)\b").unwrap(),
        Regex::new(r"\bin\s+(?:simple|easy|short)\s+(?:words|language|terms)\b").unwrap(),
        Regex::new(
            r"\b(?:simple|easy|asaan|aasan|saral)\s+(?:words|language|bhasha|shabdon)\s+(?:mein|me|main|in)\b",
        )
        .unwrap(),
        Regex::new(
            r"\b(?:please|pls|plz|kripya|kindly|zara|jara|thoda|actually|basically|bhai|sir|madam|ji|yaar)\b",
        )
        .unwrap(),
    ]
});

static TRAILING_REQUESTS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(
            r"\s+(?:(?:mujhe|hume|humein)\s+)?(?:batao|bataiye|bataye|bata\s+do|bata\s+dijiye|samjhao|samjhaiye|samjha\s+do|explain\s+karo|explain\s+kijiye)(?:\s+(?:na|please|pls))?$",
        )
        .unwrap(),
        Regex::new(r"\s+(?:can\s+you\s+)?tell\s+me$").unwrap(),
    ]
});

/// Query normalizer
#[derive(Debug, Clone)]
pub struct QueryNormalizer {
    max_passes: usize,
}

impl Default for QueryNormalizer {
    fn default() -> Self {
        Self {
            max_passes: NormalizerSettings::default().max_clean_passes,
        }
    }
}

impl QueryNormalizer {
    pub fn new(settings: &NormalizerSettings) -> Result<Self> {
        if settings.max_clean_passes == 0 {
            return Err(TextProcessingError::Normalizer(
                "max_clean_passes must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            max_passes: settings.max_clean_passes,
        })
    }

    /// Lowercase and collapse punctuation and whitespace, nothing else
    pub fn prepare(&self, raw: &str) -> String {
        pre_collapse(&raw.to_lowercase())
    }

    /// Clean a raw query to its meaningful core
    ///
    /// May return an empty string when the query was nothing but noise.
    pub fn clean(&self, raw: &str) -> String {
        let mut text = self.prepare(raw);

        let mut pass = 0;
        loop {
            let next = clean_pass(&text);
            if next == text {
                return text;
            }
            if pass >= self.max_passes && next.len() >= text.len() {
                tracing::debug!(
                    query = raw,
                    passes = pass,
                    "Cleaning stopped shrinking past the pass limit"
                );
                return text;
            }
            tracing::trace!(pass, from = %text, to = %next, "Clean pass changed text");
            text = next;
            pass += 1;
        }
    }
}

fn pre_collapse(text: &str) -> String {
    let stripped = PRE_COLLAPSE.replace_all(text, " ");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

fn final_collapse(text: &str) -> String {
    let stripped = FINAL_COLLAPSE.replace_all(text, " ");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

fn strip_all(text: String, patterns: &[Regex]) -> String {
    patterns.iter().fold(text, |acc, re| {
        // Only allocate when something matched
        if re.is_match(&acc) {
            re.replace_all(&acc, " ").trim().to_string()
        } else {
            acc
        }
    })
}

fn clean_pass(text: &str) -> String {
    let mut text = pre_collapse(text);

    text = SEEN_PROPERTY
        .replace(&text, "${entity} ${property} kya hota")
        .into_owned();
    text = CONDITIONAL
        .replace(&text, "${pre}${cond} ${then}")
        .into_owned();

    text = strip_all(text, &OPENERS);
    text = strip_all(text, &META_TALK);
    text = pre_collapse(&text);

    for re in MEANING_REWRITES.iter() {
        text = re.replace(&text, "${x} meaning").into_owned();
    }

    text = strip_all(text, &FILLERS);
    text = pre_collapse(&text);
    text = strip_all(text, &TRAILING_REQUESTS);

    final_collapse(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(q: &str) -> String {
        QueryNormalizer::default().clean(q)
    }

    #[test]
    fn test_openers_removed() {
        assert_eq!(clean("Tum mujhe batao ki WPS kya hai?"), "wps kya hai");
        assert_eq!(
            clean("Please tell me about heat exchanger working"),
            "heat exchanger working"
        );
        assert_eq!(clean("Hello sir, PQR kya hota hai"), "pqr kya hota hai");
    }

    #[test]
    fn test_meta_talk_removed() {
        assert_eq!(clean("Mera question hai ki PQR kya hai"), "pqr kya hai");
        assert_eq!(
            clean("I have a question about baffle spacing"),
            "baffle spacing"
        );
    }

    #[test]
    fn test_seen_property_rewrite() {
        assert_eq!(
            clean("Tumne heat exchanger dekha hai? Uska matlab kya hai"),
            "heat exchanger matlab kya hota"
        );
        assert_eq!(
            clean("kya aapne WPS suna hai uska use kya hai"),
            "wps use kya hota"
        );
    }

    #[test]
    fn test_conditional_rewrite() {
        assert_eq!(clean("agar tube leak ho jaye to kya kare"), "tube leak kya kare");
    }

    #[test]
    fn test_meaning_rewrite() {
        assert_eq!(clean("What does WPS mean?"), "wps meaning");
        assert_eq!(clean("what is the meaning of porosity"), "porosity meaning");
        assert_eq!(clean("What is meant by PWHT"), "pwht meaning");
    }

    #[test]
    fn test_fillers_and_trailing_requests() {
        assert_eq!(
            clean("please step by step PWHT procedure batao"),
            "pwht procedure"
        );
        assert_eq!(
            clean("simple words mein gasket ka kaam samjhao na"),
            "gasket ka kaam"
        );
    }

    #[test]
    fn test_devanagari_kept() {
        assert_eq!(clean("WPS का मतलब क्या है?"), "wps का मतलब क्या है");
    }

    #[test]
    fn test_noise_only() {
        assert_eq!(clean("   ??? !!"), "");
        assert_eq!(clean(""), "");
    }

    #[test]
    fn test_idempotent() {
        let queries = [
            "Tum mujhe batao ki WPS kya hai?",
            "tumne heat exchanger dekha hai uska matlab kya hai",
            "agar tube leak ho jaye to kya kare",
            "What does PT mean in NDT?",
            "please please tell me, step by step, hydro test procedure",
            "मेरा सवाल: WPS का मतलब क्या है?",
            "my question is that what is meant by porosity",
            "heat excanger kaise kaam karta hai",
        ];
        for q in queries {
            let once = clean(q);
            assert_eq!(clean(&once), once, "not idempotent for {:?}", q);
        }
    }

    #[test]
    fn test_long_noise_chain_settles() {
        let noisy = format!(
            "{} wps kya hai",
            ["tum mujhe batao ki mera question hai ki"; 3].join(" ")
        );
        let short_limit = QueryNormalizer::new(&NormalizerSettings {
            max_variants: 4,
            max_clean_passes: 1,
        })
        .unwrap();

        for normalizer in [QueryNormalizer::default(), short_limit] {
            let once = normalizer.clean(&noisy);
            assert_eq!(once, "wps kya hai");
            assert_eq!(normalizer.clean(&once), once);
        }
    }

    #[test]
    fn test_idempotent_with_repeated_noise() {
        let queries = [
            "hello hello sir mera question hai ki tum mujhe batao ki pqr kya hai",
            "i have a question about mera question hai ki baffle spacing batao",
        ];
        for q in queries {
            let once = clean(q);
            assert_eq!(clean(&once), once, "not idempotent for {:?}", q);
        }
    }

    #[test]
    fn test_prepare_keeps_conditional() {
        let normalizer = QueryNormalizer::default();
        assert_eq!(
            normalizer.prepare("Agar gasket kharab ho jaye, to?"),
            "agar gasket kharab ho jaye to"
        );
    }

    #[test]
    fn test_zero_passes_rejected() {
        let settings = NormalizerSettings {
            max_variants: 4,
            max_clean_passes: 0,
        };
        assert!(QueryNormalizer::new(&settings).is_err());
    }
}
