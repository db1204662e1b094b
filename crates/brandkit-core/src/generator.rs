//! Company-name and hashtag suggestions built on a [`SynonymSource`].
//!
//! Both generators are pure functions of the keyword, the dictionary and
//! the random number generator handed in. Output size is bounded by
//! [`MAX_NAME_DRAWS`] and [`MAX_RELATED_HASHTAGS`], never by the size of the
//! synonym set.

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::synonyms::SynonymSource;

/// Upper bound on random lemma pairings per keyword.
pub const MAX_NAME_DRAWS: usize = 5;

/// Upper bound on synonym hashtags added after the base tag.
pub const MAX_RELATED_HASHTAGS: usize = 3;

/// Title-case a string: the first letter of every run of letters is
/// uppercased and the rest lowercased.
///
/// Anything that is not a letter starts a new run, so `ice_cream` becomes
/// `Ice_Cream` and `o'neil` becomes `O'Neil`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

/// Distinct lemmas for `word`, transformed and sorted.
fn lemma_set<S, F>(source: &S, word: &str, transform: F) -> Vec<String>
where
    S: SynonymSource + ?Sized,
    F: Fn(&str) -> String,
{
    source
        .synsets(word)
        .iter()
        .flat_map(|synset| synset.lemmas.iter())
        .map(|lemma| transform(lemma.as_str()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Suggest company names for one keyword.
///
/// The keyword is looked up lowercased. With fewer than two distinct
/// title-cased lemmas the result is the title-cased keyword alone.
/// Otherwise `min(5, lemmas - 1)` pairs are drawn with replacement and a
/// pair whose halves are identical is dropped, not redrawn, so the result
/// can be smaller than the draw count.
///
/// A blank keyword yields no names.
pub fn generate_company_names<S, R>(source: &S, keyword: &str, rng: &mut R) -> Vec<String>
where
    S: SynonymSource + ?Sized,
    R: Rng,
{
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Vec::new();
    }

    let lemmas = lemma_set(source, &keyword.to_lowercase(), title_case);
    if lemmas.len() < 2 {
        return vec![title_case(keyword)];
    }

    let draws = MAX_NAME_DRAWS.min(lemmas.len() - 1);
    let mut names = BTreeSet::new();
    for _ in 0..draws {
        let first = &lemmas[rng.gen_range(0..lemmas.len())];
        let second = &lemmas[rng.gen_range(0..lemmas.len())];
        if first != second {
            names.insert(format!("{first} {second}"));
        }
    }

    names.into_iter().collect()
}

/// Suggest hashtags for one keyword.
///
/// The first entry is always the base tag `#<keyword>` with spaces replaced
/// by underscores. The base is looked up as is (no case folding); up to three
/// distinct synonyms, with underscores removed and title-cased, are sampled
/// without replacement and appended.
///
/// A blank keyword yields no hashtags.
pub fn generate_hashtags<S, R>(source: &S, keyword: &str, rng: &mut R) -> Vec<String>
where
    S: SynonymSource + ?Sized,
    R: Rng,
{
    let base = keyword.trim().replace(' ', "_");
    if base.is_empty() {
        return Vec::new();
    }

    let related = lemma_set(source, &base, |lemma| title_case(&lemma.replace('_', "")));

    let mut hashtags = Vec::with_capacity(1 + MAX_RELATED_HASHTAGS.min(related.len()));
    hashtags.push(format!("#{base}"));
    hashtags.extend(
        related
            .choose_multiple(rng, MAX_RELATED_HASHTAGS.min(related.len()))
            .map(|tag| format!("#{tag}")),
    );
    hashtags
}

/// Split a comma-separated keyword field into unique, trimmed, lowercase
/// keywords. Empty entries are dropped.
pub fn parse_keywords(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Company names for every keyword in a comma-separated field, merged.
pub fn company_names_for<S, R>(source: &S, raw_keywords: &str, rng: &mut R) -> BTreeSet<String>
where
    S: SynonymSource + ?Sized,
    R: Rng,
{
    parse_keywords(raw_keywords)
        .iter()
        .flat_map(|keyword| generate_company_names(source, keyword, &mut *rng))
        .collect()
}

/// Hashtags for every keyword in a comma-separated field, merged.
pub fn hashtags_for<S, R>(source: &S, raw_keywords: &str, rng: &mut R) -> BTreeSet<String>
where
    S: SynonymSource + ?Sized,
    R: Rng,
{
    parse_keywords(raw_keywords)
        .iter()
        .flat_map(|keyword| generate_hashtags(source, keyword, &mut *rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synonyms::{Synset, Thesaurus};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    fn happy() -> Thesaurus {
        Thesaurus::empty()
            .with_synset("happy", ["glad", "cheerful"])
            .with_synset("happy", ["joyful", "glad"])
    }

    /// Records every word it is asked about.
    #[derive(Default)]
    struct Recording {
        inner: Thesaurus,
        asked: std::sync::Mutex<Vec<String>>,
    }

    impl SynonymSource for Recording {
        fn synsets(&self, word: &str) -> Vec<Synset> {
            self.asked.lock().unwrap().push(word.to_string());
            self.inner.synsets(word)
        }
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("hello"), "Hello");
        assert_eq!(title_case("HELLO wORLD"), "Hello World");
        assert_eq!(title_case("ice_cream"), "Ice_Cream");
        assert_eq!(title_case("o'neil"), "O'Neil");
        assert_eq!(title_case("3d printer"), "3D Printer");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_names_fall_back_without_synonyms() {
        let thesaurus = Thesaurus::empty();
        for seed in 0..20 {
            assert_eq!(
                generate_company_names(&thesaurus, "  acme widgets ", &mut rng(seed)),
                vec!["Acme Widgets"]
            );
        }
    }

    #[test]
    fn test_names_fall_back_with_single_lemma() {
        let thesaurus = Thesaurus::empty().with_synset("xyzzy", ["Xyzzy"]);
        assert_eq!(
            generate_company_names(&thesaurus, "Xyzzy", &mut rng(7)),
            vec!["Xyzzy"]
        );

        // Duplicates across synsets collapse to one lemma.
        let thesaurus = Thesaurus::empty()
            .with_synset("echo", ["echo"])
            .with_synset("echo", ["ECHO", "echo"]);
        assert_eq!(
            generate_company_names(&thesaurus, "echo", &mut rng(7)),
            vec!["Echo"]
        );
    }

    #[test]
    fn test_names_are_pairs_of_distinct_lemmas() {
        let thesaurus = happy();
        let lemmas = ["Glad", "Cheerful", "Joyful"];

        for seed in 0..200 {
            let names = generate_company_names(&thesaurus, "happy", &mut rng(seed));
            // three lemmas: at most two draws
            assert!(names.len() <= 2, "seed {seed}: {names:?}");
            for name in &names {
                let words: Vec<&str> = name.split(' ').collect();
                assert_eq!(words.len(), 2, "seed {seed}: {name}");
                assert_ne!(words[0], words[1]);
                assert!(lemmas.contains(&words[0]) && lemmas.contains(&words[1]));
            }
        }
    }

    #[test]
    fn test_names_capped_at_five_draws() {
        let lemmas: Vec<String> = (b'a'..=b'z').map(|c| format!("{}lemma", c as char)).collect();
        let thesaurus = Thesaurus::empty().with_synset("big", lemmas);

        let mut saw_full = false;
        for seed in 0..100 {
            let names = generate_company_names(&thesaurus, "big", &mut rng(seed));
            assert!(names.len() <= MAX_NAME_DRAWS);
            saw_full |= names.len() == MAX_NAME_DRAWS;
        }
        assert!(saw_full, "26 lemmas should usually yield five names");
    }

    #[test]
    fn test_names_can_come_back_empty() {
        // Two lemmas, one draw: identical picks happen about half the time.
        let thesaurus = Thesaurus::empty().with_synset("duo", ["alpha", "beta"]);
        let sizes: BTreeSet<usize> = (0..100)
            .map(|seed| generate_company_names(&thesaurus, "duo", &mut rng(seed)).len())
            .collect();
        assert_eq!(sizes, BTreeSet::from([0, 1]));
    }

    #[test]
    fn test_names_look_up_lowercase_keyword() {
        let source = Recording {
            inner: happy(),
            ..Default::default()
        };
        generate_company_names(&source, " HaPPy ", &mut rng(1));
        assert_eq!(*source.asked.lock().unwrap(), vec!["happy"]);
    }

    #[test]
    fn test_blank_keyword_yields_nothing() {
        let thesaurus = happy();
        assert!(generate_company_names(&thesaurus, "   ", &mut rng(0)).is_empty());
        assert!(generate_hashtags(&thesaurus, "", &mut rng(0)).is_empty());
    }

    #[test]
    fn test_hashtags_scenario_happy() {
        let thesaurus = happy();
        for seed in 0..50 {
            let tags = generate_hashtags(&thesaurus, "happy", &mut rng(seed));
            assert_eq!(tags.len(), 4);
            assert_eq!(tags[0], "#happy");
            let rest: BTreeSet<&str> = tags[1..].iter().map(String::as_str).collect();
            assert_eq!(rest, BTreeSet::from(["#Cheerful", "#Glad", "#Joyful"]));
        }
    }

    #[test]
    fn test_hashtags_base_only_without_synonyms() {
        let thesaurus = Thesaurus::empty();
        assert_eq!(
            generate_hashtags(&thesaurus, "run", &mut rng(3)),
            vec!["#run"]
        );
    }

    #[test]
    fn test_hashtags_sample_at_most_three() {
        let thesaurus = Thesaurus::empty().with_synset(
            "fast",
            ["quick", "rapid", "speedy", "fleet", "swift", "express"],
        );
        for seed in 0..100 {
            let tags = generate_hashtags(&thesaurus, "fast", &mut rng(seed));
            assert_eq!(tags.len(), 4);
            let unique: BTreeSet<&String> = tags.iter().collect();
            assert_eq!(unique.len(), 4, "sampling is without replacement");
        }
    }

    #[test]
    fn test_hashtags_strip_underscores_and_join_spaces() {
        let thesaurus = Thesaurus::empty().with_synset("ice_cream", ["ice_cream", "frozen_custard"]);
        let tags = generate_hashtags(&thesaurus, "  ice cream ", &mut rng(9));
        assert_eq!(tags[0], "#ice_cream");
        let rest: BTreeSet<&str> = tags[1..].iter().map(String::as_str).collect();
        assert_eq!(rest, BTreeSet::from(["#Frozencustard", "#Icecream"]));
    }

    #[test]
    fn test_hashtags_look_up_keyword_as_given() {
        let source = Recording {
            inner: happy(),
            ..Default::default()
        };
        let tags = generate_hashtags(&source, "Happy", &mut rng(2));
        assert_eq!(*source.asked.lock().unwrap(), vec!["Happy"]);
        assert_eq!(tags, vec!["#Happy"]);
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(
            parse_keywords("cat, dog, cat"),
            BTreeSet::from(["cat".to_string(), "dog".to_string()])
        );
        assert_eq!(
            parse_keywords(" Cat ,,CAT, , dog "),
            BTreeSet::from(["cat".to_string(), "dog".to_string()])
        );
        assert!(parse_keywords(" , ,").is_empty());
    }

    #[test]
    fn test_aggregation_calls_generator_once_per_keyword() {
        let source = Recording {
            inner: happy(),
            ..Default::default()
        };
        let tags = hashtags_for(&source, "happy, HAPPY , cat", &mut rng(4));

        let mut asked = source.asked.lock().unwrap().clone();
        asked.sort();
        assert_eq!(asked, vec!["cat", "happy"]);
        assert!(tags.contains("#happy"));
        assert!(tags.contains("#cat"));
        assert_eq!(tags.len(), 5);
    }

    #[test]
    fn test_company_names_for_merges_results() {
        let thesaurus = happy();
        let names = company_names_for(&thesaurus, "happy, zorblax", &mut rng(11));
        assert!(names.contains("Zorblax"));
        assert!(names.len() <= 3);
        assert!(company_names_for(&thesaurus, " , ", &mut rng(11)).is_empty());
    }

    #[test]
    fn test_generators_accept_trait_objects() {
        let source: Box<dyn SynonymSource> = Box::new(happy());
        let tags = generate_hashtags(source.as_ref(), "happy", &mut rng(5));
        assert_eq!(tags.len(), 4);
    }
}
