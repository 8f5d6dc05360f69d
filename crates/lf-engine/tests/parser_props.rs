//! Parser property tests.

use lf_engine::{EngineConfig, GameSession, Silent, demo};
use proptest::prelude::*;

fn session() -> GameSession {
    GameSession::new(demo::build().unwrap(), &EngineConfig::default(), Silent).unwrap()
}

const WORDS: &[&str] = &[
    "take", "drop", "it", "them", "the", "red", "blue", "cloak", "lantern", "n", "s", "d", "u",
    "open", "locker", "put", "in", "under", "on", "with", "again", "g", "undo", "all", "wait",
    "one", "three", "seven", "two", "x", "inventory", "but", "and", "then", "press", "button",
];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn arbitrary_text_never_faults(lines in prop::collection::vec("\\PC{0,40}", 1..8)) {
        let mut s = session();
        for line in &lines {
            let turn = s.process(line);
            prop_assert!(turn.is_ok(), "{line:?} -> {turn:?}");
        }
    }

    #[test]
    fn word_salad_keeps_the_clock_honest(
        lines in prop::collection::vec(prop::collection::vec(prop::sample::select(WORDS), 0..5), 1..12)
    ) {
        let mut s = session();
        let mut consumed = 0u64;
        for words in &lines {
            let turn = s.process(&words.join(" ")).unwrap();
            if turn.consumed {
                consumed += 1;
            }
            if s.game().ctx().deaths() > 0 {
                return Ok(());
            }
        }
        prop_assert_eq!(s.game().ctx().moves(), consumed);
    }
}
