//! Fixed vocabulary: verbs and their synonyms, filler words, prepositions,
//! and number words.

/// Canonical verbs with every phrase that means them. Multi-word phrases are
/// matched before single words, so "pick up" wins over "pick".
pub const VERBS: &[(&str, &[&str])] = &[
    ("take", &["take", "get", "grab", "pick up", "pick", "carry", "hold"]),
    ("drop", &["drop", "discard", "put down", "throw away", "set down"]),
    (
        "examine",
        &[
            "examine", "x", "inspect", "check", "describe", "study", "search", "look at",
            "look in", "look inside", "look under", "look behind",
        ],
    ),
    ("open", &["open", "unseal"]),
    ("close", &["close", "shut", "seal"]),
    ("read", &["read", "peruse", "skim"]),
    ("wear", &["wear", "don", "put on"]),
    ("remove", &["remove", "doff", "take off"]),
    ("turn on", &["turn on", "switch on", "activate", "light", "power on"]),
    ("turn off", &["turn off", "switch off", "deactivate", "extinguish", "douse", "power off"]),
    ("turn", &["turn", "twist", "rotate", "switch"]),
    ("eat", &["eat", "consume", "devour", "taste", "chew"]),
    ("drink", &["drink", "sip", "quaff", "swallow"]),
    ("smell", &["smell", "sniff"]),
    ("press", &["press", "push", "depress", "hit", "poke"]),
    ("pull", &["pull", "tug", "yank"]),
    ("put", &["put", "place", "insert", "stick", "shove", "stuff", "set"]),
    ("empty", &["empty", "pour", "tip", "spill"]),
    ("type", &["type", "key", "dial", "punch in"]),
    ("enter", &["enter", "get in", "get into", "climb in", "climb into", "board"]),
    ("exit", &["exit", "get out", "get off", "climb out"]),
    ("climb", &["climb", "scale"]),
    ("sleep", &["sleep", "nap", "rest", "doze"]),
    ("attack", &["attack", "kill", "fight", "strike", "punch", "kick"]),
    ("throw", &["throw", "toss", "hurl"]),
    ("unlock", &["unlock"]),
    ("lock", &["lock"]),
    ("talk", &["talk to", "speak to", "talk", "speak", "greet", "ask"]),
    ("listen", &["listen"]),
    ("jump", &["jump", "leap", "hop"]),
    ("yell", &["yell", "shout", "scream"]),
    ("pray", &["pray"]),
    ("wave", &["wave"]),
];

/// Verbs that make sense with no noun at all.
pub const INTRANSITIVE: &[&str] = &[
    "sleep", "listen", "jump", "yell", "pray", "wave", "enter", "exit", "climb", "smell",
];

/// Words dropped from noun phrases.
pub const FILLERS: &[&str] = &[
    "the", "a", "an", "some", "please", "my", "that", "this", "then", "of", "one",
];

/// Words that split a two-noun phrase.
pub const PREPOSITIONS: &[&str] = &[
    "in", "into", "inside", "on", "onto", "under", "beneath", "below", "underneath", "with",
    "from", "to", "at", "behind",
];

/// Multi-word prepositions rewritten to a single word before splitting.
pub const COMPOUND_PREPOSITIONS: &[(&str, &str)] = &[
    ("out of", "from"),
    ("on top of", "on"),
    ("inside of", "inside"),
    ("in to", "into"),
];

/// Trailing particles that change the verb: "turn lamp on", "take cloak off".
pub const PARTICLES: &[(&str, &str, &str)] = &[
    ("turn", "on", "turn on"),
    ("turn", "off", "turn off"),
    ("put", "on", "wear"),
    ("take", "off", "remove"),
    ("take", "up", "take"),
    ("put", "down", "drop"),
];

/// Words that walk in a direction ("go north").
pub const MOTION: &[&str] = &["go", "walk", "run", "head", "move", "travel", "crawl"];

/// Pronouns resolved against the last noun.
pub const PRONOUNS: &[&str] = &["it", "them"];

/// Ordinal answers to a disambiguation prompt.
pub const ORDINALS: &[(&str, usize)] = &[
    ("first", 0),
    ("second", 1),
    ("third", 2),
    ("fourth", 3),
    ("fifth", 4),
    ("sixth", 5),
];

const UNITS: &[(&str, u32)] = &[
    ("zero", 0),
    ("oh", 0),
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
    ("thirteen", 13),
    ("fourteen", 14),
    ("fifteen", 15),
    ("sixteen", 16),
    ("seventeen", 17),
    ("eighteen", 18),
    ("nineteen", 19),
];

const TENS: &[(&str, u32)] = &[
    ("twenty", 20),
    ("thirty", 30),
    ("forty", 40),
    ("fifty", 50),
    ("sixty", 60),
    ("seventy", 70),
    ("eighty", 80),
    ("ninety", 90),
];

/// Canonical verb for a phrase, if the phrase is exactly a known synonym.
pub fn canonical_verb(phrase: &str) -> Option<&'static str> {
    VERBS
        .iter()
        .find(|(_, synonyms)| synonyms.contains(&phrase))
        .map(|(canonical, _)| *canonical)
}

/// Match the longest verb phrase at the start of `words`. Returns the
/// canonical verb and how many words it used.
pub fn leading_verb(words: &[String]) -> Option<(&'static str, usize)> {
    (1..=words.len().min(3)).rev().find_map(|len| {
        let phrase = words[..len].join(" ");
        canonical_verb(&phrase).map(|verb| (verb, len))
    })
}

/// Whether the word is a filler.
pub fn is_filler(word: &str) -> bool {
    FILLERS.contains(&word)
}

/// Whether the word splits a two-noun phrase.
pub fn is_preposition(word: &str) -> bool {
    PREPOSITIONS.contains(&word)
}

/// Words that end in a period without ending a sentence.
const ABBREVIATIONS: &[&str] = &["mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc"];

/// Split a line into separate commands at periods: "take lamp. n" is two
/// commands, "talk to dr. jones" is one. Blank pieces are dropped.
pub fn sentences(raw: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for piece in raw.split('.') {
        if !current.is_empty() {
            current.push_str(". ");
        }
        current.push_str(piece.trim());
        let last = current.split_whitespace().last().map(str::to_lowercase);
        if last.is_some_and(|w| ABBREVIATIONS.contains(&w.as_str())) {
            continue;
        }
        if !current.trim().is_empty() {
            out.push(current.trim().to_string());
        }
        current.clear();
    }
    if !current.trim().is_empty() {
        out.push(current.trim().to_string());
    }
    out
}

/// Lowercase, strip punctuation, split hyphens, collapse whitespace, and
/// turn number words into digits.
pub fn normalize(raw: &str) -> Vec<String> {
    let cleaned: String = raw
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c.is_whitespace() { c } else { ' ' })
        .collect();
    let words: Vec<String> = cleaned.split_whitespace().map(String::from).collect();
    numbers_to_digits(&words)
}

/// Rewrite number words as digits: "twenty three" becomes "23", "three
/// seven two" stays three separate digits.
pub fn numbers_to_digits(words: &[String]) -> Vec<String> {
    let unit = |w: &str| UNITS.iter().find(|(name, _)| *name == w).map(|(_, n)| *n);
    let tens = |w: &str| TENS.iter().find(|(name, _)| *name == w).map(|(_, n)| *n);

    let mut out = Vec::with_capacity(words.len());
    let mut i = 0;
    while i < words.len() {
        let word = words[i].as_str();
        if let Some(t) = tens(word) {
            let next = words.get(i + 1).and_then(|w| unit(w)).filter(|u| (1..10).contains(u));
            match next {
                Some(u) => {
                    out.push((t + u).to_string());
                    i += 2;
                }
                None => {
                    out.push(t.to_string());
                    i += 1;
                }
            }
            continue;
        }
        // "one" and "oh" stay words unless they sit among other numbers.
        if let Some(n) = unit(word) {
            let ambiguous = matches!(word, "one" | "oh");
            let among_numbers = [i.checked_sub(1), Some(i + 1)]
                .into_iter()
                .flatten()
                .filter_map(|j| words.get(j))
                .any(|w| unit(w).is_some() || tens(w).is_some() || w.parse::<u32>().is_ok());
            if !ambiguous || among_numbers {
                out.push(n.to_string());
                i += 1;
                continue;
            }
        }
        out.push(words[i].clone());
        i += 1;
    }
    out
}

/// Rewrite compound prepositions in place.
pub fn fold_compound_prepositions(words: &mut Vec<String>) {
    for (phrase, single) in COMPOUND_PREPOSITIONS {
        let parts: Vec<&str> = phrase.split(' ').collect();
        let mut i = 0;
        while i + parts.len() <= words.len() {
            if words[i..i + parts.len()].iter().zip(&parts).all(|(w, p)| w == p) {
                words.drain(i + 1..i + parts.len());
                words[i] = single.to_string();
            }
            i += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn periods_split_commands() {
        assert_eq!(sentences("take lamp. go north"), ["take lamp", "go north"]);
        assert_eq!(sentences("look.wait.wait"), ["look", "wait", "wait"]);
        assert_eq!(sentences("e. w."), ["e", "w"]);
        assert_eq!(sentences("talk to Dr. Jones"), ["talk to Dr. Jones"]);
        assert_eq!(sentences("take lamp"), ["take lamp"]);
        assert!(sentences("...").is_empty());
        assert!(sentences("   ").is_empty());
    }

    #[test]
    fn longest_verb_phrase_wins() {
        assert_eq!(leading_verb(&words("pick up lantern")), Some(("take", 2)));
        assert_eq!(leading_verb(&words("pick lantern")), Some(("take", 1)));
        assert_eq!(leading_verb(&words("look at flask")), Some(("examine", 2)));
        assert_eq!(leading_verb(&words("xyzzy")), None);
    }

    #[test]
    fn every_synonym_maps_to_one_canonical_verb() {
        let mut seen = std::collections::HashSet::new();
        for (_, synonyms) in VERBS {
            for s in *synonyms {
                assert!(seen.insert(*s), "duplicate synonym {s}");
            }
        }
    }

    #[test]
    fn canonical_verbs_are_their_own_synonyms() {
        for (canonical, _) in VERBS {
            assert_eq!(canonical_verb(canonical), Some(*canonical));
        }
    }

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("  Take the LAMP! "), words("take the lamp"));
        assert_eq!(normalize("north-east"), words("north east"));
    }

    #[test]
    fn number_words_become_digits() {
        assert_eq!(normalize("type three seven two"), words("type 3 7 2"));
        assert_eq!(normalize("press twenty three"), words("press 23"));
        assert_eq!(normalize("press forty"), words("press 40"));
    }

    #[test]
    fn lone_one_stays_a_word() {
        assert_eq!(normalize("take one"), words("take one"));
        assert_eq!(normalize("type one two"), words("type 1 2"));
    }

    #[test]
    fn compound_prepositions_fold() {
        let mut w = words("take fuse out of crate");
        fold_compound_prepositions(&mut w);
        assert_eq!(w, words("take fuse from crate"));
    }
}
