//! Reader for the WordNet 3.x database files.
//!
//! The `data.{noun,verb,adj,adv}` files provide the synsets. Each non-header
//! line describes one synset:
//!
//! ```text
//! 02084071 05 n 03 dog 0 domestic_dog 0 Canis_familiaris 0 023 @ 02083346 n 0000 ... | a member of the genus Canis
//! ^offset  ^lex ^type ^w_cnt (hex) then (word lex_id) pairs
//! ```
//!
//! Words are indexed by their lowercase form, which is how WordNet keys its
//! `index.*` files; the stored lemma keeps the file's original casing.
//! Adjective syntactic markers (`long(a)`, `elect(ip)`) are stripped.
//!
//! The `{noun,verb,adj,adv}.exc` files list irregular inflections
//! (`geese goose`); together with the suffix rules in [`super::morphy`] they
//! let `dogs` or `ran` find the synsets of `dog` and `run`.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use super::morphy::{self, PartOfSpeech};
use super::{Synset, SynonymError, Thesaurus};

/// Data files, in [`PartOfSpeech::ALL`] order.
pub const DATA_FILES: [&str; 4] = ["data.noun", "data.verb", "data.adj", "data.adv"];

/// Exception lists, in [`PartOfSpeech::ALL`] order.
pub const EXCEPTION_FILES: [&str; 4] = ["noun.exc", "verb.exc", "adj.exc", "adv.exc"];

/// Per part of speech word index and exception lists of a loaded dictionary.
#[derive(Debug, Default, Clone)]
pub(super) struct Lexicon {
    by_pos: [HashMap<String, Vec<usize>>; 4],
    exceptions: [HashMap<String, Vec<String>>; 4],
}

impl Lexicon {
    /// Synset ids for `word` after morphological reduction, nouns first.
    pub(super) fn lookup(&self, word: &str) -> Vec<usize> {
        let mut ids = Vec::new();
        for pos in PartOfSpeech::ALL {
            let index = &self.by_pos[pos.index()];
            let forms = morphy::base_forms(word, pos, &self.exceptions[pos.index()], |form| {
                index.contains_key(form)
            });
            for form in forms {
                for &id in index.get(&form).into_iter().flatten() {
                    if !ids.contains(&id) {
                        ids.push(id);
                    }
                }
            }
        }
        ids
    }

    fn add(&mut self, pos: PartOfSpeech, word: String, synset_id: usize) {
        let ids = self.by_pos[pos.index()].entry(word).or_default();
        if !ids.contains(&synset_id) {
            ids.push(synset_id);
        }
    }
}

pub(super) fn load(dir: &Path) -> Result<Thesaurus, SynonymError> {
    let mut thesaurus = Thesaurus::empty();
    let mut lexicon = Lexicon::default();

    for (pos, name) in PartOfSpeech::ALL.into_iter().zip(DATA_FILES) {
        let path = dir.join(name);
        let mut synsets = 0usize;

        for_each_line(&path, |number, line| {
            // License header lines start with two spaces.
            if line.starts_with("  ") {
                return Ok(());
            }

            let lemmas = parse_data_line(line).map_err(|message| SynonymError::Parse {
                path: path.clone(),
                line: number,
                message,
            })?;

            let words: Vec<String> = lemmas.iter().map(|lemma| lemma.to_lowercase()).collect();
            let id = thesaurus.push_synset(Synset { lemmas });
            for word in words {
                lexicon.add(pos, word.clone(), id);
                thesaurus.link(word, id);
            }
            synsets += 1;
            Ok(())
        })?;

        tracing::debug!(file = name, synsets, "Parsed WordNet data file");
    }

    for (pos, name) in PartOfSpeech::ALL.into_iter().zip(EXCEPTION_FILES) {
        let path = dir.join(name);
        let exceptions = &mut lexicon.exceptions[pos.index()];

        let result = for_each_line(&path, |number, line| {
            let (form, bases) = parse_exception_line(line).map_err(|message| {
                SynonymError::Parse {
                    path: path.clone(),
                    line: number,
                    message,
                }
            })?;
            exceptions.entry(form).or_default().extend(bases);
            Ok(())
        });

        match result {
            Err(SynonymError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                tracing::warn!("{} missing; irregular {pos:?} forms will not resolve", path.display());
            }
            other => other?,
        }
    }

    thesaurus.lexicon = Some(lexicon);
    Ok(thesaurus)
}

/// Call `f` with the 1-based number and text of every non-blank line.
fn for_each_line<F>(path: &Path, mut f: F) -> Result<(), SynonymError>
where
    F: FnMut(usize, &str) -> Result<(), SynonymError>,
{
    let io_error = |source| SynonymError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_error)?;
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(io_error)?;
        if line.trim().is_empty() {
            continue;
        }
        f(number + 1, &line)?;
    }
    Ok(())
}

/// Split one `*.exc` line into the inflected form and its base forms.
pub fn parse_exception_line(line: &str) -> Result<(String, Vec<String>), String> {
    let mut fields = line.split_ascii_whitespace();
    let form = fields.next().ok_or("missing inflected form")?;
    let bases: Vec<String> = fields.map(str::to_string).collect();
    if bases.is_empty() {
        return Err(format!("no base form for {form:?}"));
    }
    Ok((form.to_string(), bases))
}

/// Extract the lemma names from one `data.*` line.
pub fn parse_data_line(line: &str) -> Result<Vec<String>, String> {
    let mut fields = line.split_ascii_whitespace();

    let offset = fields.next().ok_or("missing synset offset")?;
    if offset.len() != 8 || !offset.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("invalid synset offset {offset:?}"));
    }

    let _lex_filenum = fields.next().ok_or("missing lexicographer file number")?;

    let ss_type = fields.next().ok_or("missing synset type")?;
    if !matches!(ss_type, "n" | "v" | "a" | "s" | "r") {
        return Err(format!("invalid synset type {ss_type:?}"));
    }

    let w_cnt = fields.next().ok_or("missing word count")?;
    let w_cnt = usize::from_str_radix(w_cnt, 16)
        .map_err(|_| format!("invalid hexadecimal word count {w_cnt:?}"))?;
    if w_cnt == 0 {
        return Err("synset without words".to_string());
    }

    let mut lemmas = Vec::with_capacity(w_cnt);
    for _ in 0..w_cnt {
        let word = fields
            .next()
            .ok_or_else(|| format!("expected {w_cnt} words"))?;
        let _lex_id = fields
            .next()
            .ok_or_else(|| format!("missing lex_id after {word:?}"))?;
        lemmas.push(strip_marker(word).to_string());
    }

    Ok(lemmas)
}

fn strip_marker(word: &str) -> &str {
    match word.find('(') {
        Some(pos) if word.ends_with(')') => &word[..pos],
        _ => word,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synonyms::SynonymSource;

    const HEADER: &str = "  1 This software and database is being provided to you, the LICENSEE, by  \n";

    fn write_dict(dir: &Path, noun: &str, verb: &str, adj: &str, adv: &str) {
        for (name, body) in DATA_FILES.iter().zip([noun, verb, adj, adv]) {
            std::fs::write(dir.join(name), format!("{HEADER}{body}")).unwrap();
        }
    }

    fn dog_and_run(dir: &Path) {
        write_dict(
            dir,
            "02084071 05 n 03 dog 0 domestic_dog 0 Canis_familiaris 0 000 | a dog\n\
             01855672 05 n 01 goose 0 000 | a bird\n",
            "01926311 38 v 02 run 0 sprint 0 000 | move fast\n",
            "",
            "",
        );
        std::fs::write(dir.join("noun.exc"), "geese goose\n").unwrap();
        std::fs::write(dir.join("verb.exc"), "ran run\nrunning run\n").unwrap();
        std::fs::write(dir.join("adj.exc"), "").unwrap();
        std::fs::write(dir.join("adv.exc"), "").unwrap();
    }

    #[test]
    fn test_inflected_words_resolve_to_base_synsets() {
        let dir = tempfile::tempdir().unwrap();
        dog_and_run(dir.path());
        let thesaurus = Thesaurus::load_wordnet(dir.path()).unwrap();

        let dog = thesaurus.synsets("dog");
        assert_eq!(dog.len(), 1);
        assert_eq!(thesaurus.synsets("dogs"), dog);

        let run = thesaurus.synsets("run");
        assert_eq!(run[0].lemmas, vec!["run", "sprint"]);
        assert_eq!(thesaurus.synsets("running"), run);
        assert_eq!(thesaurus.synsets("ran"), run);
        assert_eq!(thesaurus.synsets("sprinting"), run);

        assert_eq!(thesaurus.synsets("geese")[0].lemmas, vec!["goose"]);
        assert!(thesaurus.synsets("zorblaxes").is_empty());
    }

    #[test]
    fn test_hashtags_for_inflected_keywords() {
        use crate::generator::generate_hashtags;
        use rand::SeedableRng;
        use rand::rngs::StdRng;
        use std::collections::BTreeSet;

        let dir = tempfile::tempdir().unwrap();
        dog_and_run(dir.path());
        let thesaurus = Thesaurus::load_wordnet(dir.path()).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let tags = generate_hashtags(&thesaurus, "dogs", &mut rng);
        assert_eq!(tags[0], "#dogs");
        let related: BTreeSet<&str> = tags[1..].iter().map(String::as_str).collect();
        assert_eq!(
            related,
            BTreeSet::from(["#Canisfamiliaris", "#Dog", "#Domesticdog"])
        );

        let tags = generate_hashtags(&thesaurus, "running", &mut rng);
        let related: BTreeSet<&str> = tags[1..].iter().map(String::as_str).collect();
        assert_eq!(related, BTreeSet::from(["#Run", "#Sprint"]));
    }

    #[test]
    fn test_parse_exception_line() {
        assert_eq!(
            parse_exception_line("axes ax axis").unwrap(),
            ("axes".to_string(), vec!["ax".to_string(), "axis".to_string()])
        );
        assert!(parse_exception_line("lonely").is_err());
    }

    #[test]
    fn test_bad_exception_line_reports_file() {
        let dir = tempfile::tempdir().unwrap();
        dog_and_run(dir.path());
        std::fs::write(dir.path().join("verb.exc"), "ran run\nbroken\n").unwrap();

        match Thesaurus::load_wordnet(dir.path()) {
            Err(SynonymError::Parse { line, path, .. }) => {
                assert_eq!(line, 2);
                assert!(path.ends_with("verb.exc"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_data_line_reads_hex_word_count() {
        let line = "02084071 05 n 03 dog 0 domestic_dog 0 Canis_familiaris 0 000 | a member of the genus Canis";
        assert_eq!(
            parse_data_line(line).unwrap(),
            vec!["dog", "domestic_dog", "Canis_familiaris"]
        );

        let many = format!(
            "00000001 00 n 0a {} 000 | ten words",
            (0..10).map(|i| format!("w{i} 0")).collect::<Vec<_>>().join(" ")
        );
        assert_eq!(parse_data_line(&many).unwrap().len(), 10);
    }

    #[test]
    fn test_parse_data_line_strips_adjective_markers() {
        let line = "01382086 00 a 02 long(a) 0 elongated(p) 0 000 | primarily spatial sense";
        assert_eq!(parse_data_line(line).unwrap(), vec!["long", "elongated"]);
    }

    #[test]
    fn test_parse_data_line_rejects_garbage() {
        assert!(parse_data_line("hello world").is_err());
        assert!(parse_data_line("02084071 05 x 01 dog 0").is_err());
        assert!(parse_data_line("02084071 05 n zz dog 0").is_err());
        assert!(parse_data_line("02084071 05 n 02 dog 0").is_err());
    }

    #[test]
    fn test_load_indexes_lowercase_words() {
        let dir = tempfile::tempdir().unwrap();
        write_dict(
            dir.path(),
            "02084071 05 n 02 dog 0 Canis_familiaris 0 000 | a dog\n",
            "01926311 38 v 02 run 0 sprint 0 000 | move fast\n",
            "01148283 00 a 03 happy(a) 0 glad 0 felicitous 0 000 | joyful\n",
            "00092135 02 r 01 happily 0 000 | in a happy way\n",
        );

        let thesaurus = Thesaurus::load_wordnet(dir.path()).expect("dictionary loads");
        assert_eq!(thesaurus.synset_count(), 4);

        let dog = thesaurus.synsets("canis_familiaris");
        assert_eq!(dog.len(), 1);
        assert_eq!(dog[0].lemmas, vec!["dog", "Canis_familiaris"]);

        assert!(thesaurus.synsets("Canis_familiaris").is_empty());
        assert_eq!(thesaurus.synsets("glad")[0].lemmas, vec!["happy", "glad", "felicitous"]);
    }

    #[test]
    fn test_load_collects_senses_across_files() {
        let dir = tempfile::tempdir().unwrap();
        write_dict(
            dir.path(),
            "00000001 04 n 02 run 0 tally 0 000 | a score\n00000002 04 n 01 run 0 000 | a trip\n",
            "00000003 38 v 02 run 0 scat 0 000 | flee\n",
            "",
            "",
        );

        let thesaurus = Thesaurus::load_wordnet(dir.path()).unwrap();
        let run = thesaurus.synsets("run");
        assert_eq!(run.len(), 3);
        assert_eq!(run[2].lemmas, vec!["run", "scat"]);
    }

    #[test]
    fn test_load_reports_line_of_bad_entry() {
        let dir = tempfile::tempdir().unwrap();
        write_dict(dir.path(), "not a synset line\n", "", "", "");

        match Thesaurus::load_wordnet(dir.path()) {
            Err(SynonymError::Parse { line, path, .. }) => {
                assert_eq!(line, 2);
                assert!(path.ends_with("data.noun"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Thesaurus::load_wordnet(dir.path()).unwrap_err();
        assert!(matches!(err, SynonymError::Io { .. }));
    }
}
