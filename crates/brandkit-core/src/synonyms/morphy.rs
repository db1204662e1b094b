//! Reduction of inflected word forms to WordNet base forms.
//!
//! A form listed in the part of speech's exception file (`geese goose`)
//! resolves through that list only. Otherwise suffixes are detached by the
//! rules below, repeatedly, until some candidate is a known lemma.

use std::collections::HashMap;

/// The four WordNet syntactic categories, in lookup order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl PartOfSpeech {
    pub const ALL: [PartOfSpeech; 4] = [
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// `(suffix, replacement)` detachment rules.
    pub fn substitutions(self) -> &'static [(&'static str, &'static str)] {
        match self {
            PartOfSpeech::Noun => &[
                ("s", ""),
                ("ses", "s"),
                ("ves", "f"),
                ("xes", "x"),
                ("zes", "z"),
                ("ches", "ch"),
                ("shes", "sh"),
                ("men", "man"),
                ("ies", "y"),
            ],
            PartOfSpeech::Verb => &[
                ("s", ""),
                ("ies", "y"),
                ("es", "e"),
                ("es", ""),
                ("ed", "e"),
                ("ed", ""),
                ("ing", "e"),
                ("ing", ""),
            ],
            PartOfSpeech::Adjective => &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")],
            PartOfSpeech::Adverb => &[],
        }
    }
}

/// Known base forms of `word` for one part of speech.
///
/// `word` itself is returned first when it is known. The result is empty when
/// no candidate passes `is_known`.
pub fn base_forms<F>(
    word: &str,
    pos: PartOfSpeech,
    exceptions: &HashMap<String, Vec<String>>,
    is_known: F,
) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    if let Some(bases) = exceptions.get(word) {
        let candidates = std::iter::once(word.to_string()).chain(bases.iter().cloned());
        return keep_known(candidates, &is_known);
    }

    let mut forms = detach(pos, &[word.to_string()]);
    let found = keep_known(
        std::iter::once(word.to_string()).chain(forms.iter().cloned()),
        &is_known,
    );
    if !found.is_empty() {
        return found;
    }

    while !forms.is_empty() {
        forms = detach(pos, &forms);
        let found = keep_known(forms.iter().cloned(), &is_known);
        if !found.is_empty() {
            return found;
        }
    }

    Vec::new()
}

/// Apply every matching rule once to every form. Rules only shorten a form or
/// swap in an ending no rule matches again, so repeated application ends.
fn detach(pos: PartOfSpeech, forms: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for form in forms {
        for (suffix, ending) in pos.substitutions() {
            if let Some(stem) = form.strip_suffix(suffix) {
                let candidate = format!("{stem}{ending}");
                if !out.contains(&candidate) {
                    out.push(candidate);
                }
            }
        }
    }
    out
}

fn keep_known<I, F>(candidates: I, is_known: &F) -> Vec<String>
where
    I: IntoIterator<Item = String>,
    F: Fn(&str) -> bool,
{
    let mut out: Vec<String> = Vec::new();
    for candidate in candidates {
        if is_known(&candidate) && !out.contains(&candidate) {
            out.push(candidate);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(words: &'static [&'static str]) -> impl Fn(&str) -> bool {
        move |w: &str| words.iter().any(|known| *known == w)
    }

    fn no_exceptions() -> HashMap<String, Vec<String>> {
        HashMap::new()
    }

    #[test]
    fn test_plural_nouns() {
        let lexicon = known(&["dog", "box", "city", "church", "wolf", "fireman"]);
        let cases = [
            ("dogs", "dog"),
            ("boxes", "box"),
            ("cities", "city"),
            ("churches", "church"),
            ("wolves", "wolf"),
            ("firemen", "fireman"),
        ];
        for (inflected, base) in cases {
            assert_eq!(
                base_forms(inflected, PartOfSpeech::Noun, &no_exceptions(), &lexicon),
                vec![base],
                "{inflected}"
            );
        }
    }

    #[test]
    fn test_verb_suffixes() {
        let lexicon = known(&["sprint", "bake", "carry"]);
        let verb = |w: &str| base_forms(w, PartOfSpeech::Verb, &no_exceptions(), &lexicon);
        assert_eq!(verb("sprinting"), vec!["sprint"]);
        assert_eq!(verb("sprinted"), vec!["sprint"]);
        assert_eq!(verb("baking"), vec!["bake"]);
        assert_eq!(verb("carries"), vec!["carry"]);
    }

    #[test]
    fn test_known_word_comes_first() {
        let lexicon = known(&["glasses", "glass"]);
        assert_eq!(
            base_forms("glasses", PartOfSpeech::Noun, &no_exceptions(), &lexicon),
            vec!["glasses", "glass"]
        );
    }

    #[test]
    fn test_exception_list_wins_over_rules() {
        let mut exceptions = no_exceptions();
        exceptions.insert("geese".to_string(), vec!["goose".to_string()]);
        let lexicon = known(&["goose", "geese", "gees"]);

        assert_eq!(
            base_forms("geese", PartOfSpeech::Noun, &exceptions, &lexicon),
            vec!["geese", "goose"]
        );
    }

    #[test]
    fn test_rules_reapply_until_a_match() {
        // neither first-round form is known; a second round strips one more "s"
        let lexicon = known(&["happines"]);
        assert_eq!(
            base_forms("happinesses", PartOfSpeech::Noun, &no_exceptions(), &lexicon),
            vec!["happines"]
        );
    }

    #[test]
    fn test_unknown_word_and_adverbs() {
        let lexicon = known(&["quick"]);
        assert!(base_forms("zorblaxes", PartOfSpeech::Noun, &no_exceptions(), &lexicon).is_empty());
        assert!(base_forms("quickly", PartOfSpeech::Adverb, &no_exceptions(), &lexicon).is_empty());
    }
}
