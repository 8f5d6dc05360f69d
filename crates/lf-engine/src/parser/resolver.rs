//! Noun phrase resolution against the items in reach.

use lf_core::{Candidate, Context, CoreResult, Item, ItemId, World};
use strsim::jaro_winkler;

use super::lexicon;

/// Minimum similarity score for fuzzy matching (0.0-1.0).
const FUZZY_THRESHOLD: f64 = 0.8;

/// What a noun phrase resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one item.
    One(ItemId),
    /// Several items; the player has to choose.
    Many(Vec<ItemId>),
    /// Nothing in reach.
    Nothing,
}

/// Content words of a noun phrase, fillers removed.
pub fn phrase_words(phrase: &str) -> Vec<&str> {
    phrase
        .split_whitespace()
        .filter(|w| !lexicon::is_filler(w))
        .collect()
}

/// Whether `words` names `item`: the last word must be one of its nouns (or
/// a plural of one), and every earlier word an adjective or noun of it.
pub fn phrase_matches(item: &Item, words: &[&str]) -> bool {
    let Some((head, modifiers)) = words.split_last() else {
        return false;
    };
    let head_matches = item
        .nouns
        .iter()
        .any(|n| n == head || head.strip_suffix('s') == Some(n.as_str()));
    head_matches
        && modifiers
            .iter()
            .all(|m| item.adjectives.iter().any(|a| a == m) || item.nouns.iter().any(|n| n == m))
}

/// Resolve a phrase against everything the player can see.
pub fn resolve(ctx: &Context, phrase: &str) -> CoreResult<Resolution> {
    let pool = ctx.visible_items()?;
    resolve_among(ctx.world(), &pool, phrase)
}

/// Resolve a phrase against a specific pool of items.
pub fn resolve_among(world: &World, pool: &[ItemId], phrase: &str) -> CoreResult<Resolution> {
    let words = phrase_words(phrase);
    if words.is_empty() {
        return Ok(Resolution::Nothing);
    }

    let mut exact = Vec::new();
    for &id in pool {
        if !exact.contains(&id) && phrase_matches(world.item(id)?, &words) {
            exact.push(id);
        }
    }
    match exact.len() {
        0 => {}
        1 => return Ok(Resolution::One(exact[0])),
        _ => {
            // A phrase that spells out one candidate's full name picks it.
            let spelled = words.join(" ");
            let mut named = Vec::new();
            for &id in &exact {
                if world.item(id)?.name.to_lowercase() == spelled {
                    named.push(id);
                }
            }
            if named.len() == 1 {
                return Ok(Resolution::One(named[0]));
            }
            return Ok(Resolution::Many(exact));
        }
    }

    fuzzy(world, pool, &words)
}

fn fuzzy(world: &World, pool: &[ItemId], words: &[&str]) -> CoreResult<Resolution> {
    let Some((head, modifiers)) = words.split_last() else {
        return Ok(Resolution::Nothing);
    };
    // Every word has to look like something the item answers to; the
    // weakest word decides the score.
    let mut scored: Vec<(ItemId, f64)> = Vec::new();
    for &id in pool {
        if scored.iter().any(|(seen, _)| *seen == id) {
            continue;
        }
        let item = world.item(id)?;
        let mut score = similarity(head, item.nouns.iter());
        for m in modifiers {
            score = score.min(similarity(m, item.adjectives.iter().chain(&item.nouns)));
        }
        if score >= FUZZY_THRESHOLD {
            scored.push((id, score));
        }
    }
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let Some(&(best, top)) = scored.first() else {
        return Ok(Resolution::Nothing);
    };
    let tied: Vec<ItemId> = scored
        .iter()
        .filter(|(_, s)| (top - s).abs() < f64::EPSILON)
        .map(|(id, _)| *id)
        .collect();
    if tied.len() > 1 {
        return Ok(Resolution::Many(tied));
    }
    tracing::debug!(phrase = %words.join(" "), item = %best, score = top, "fuzzy noun match");
    Ok(Resolution::One(best))
}

fn similarity<'a>(word: &str, vocab: impl Iterator<Item = &'a String>) -> f64 {
    vocab.map(|v| jaro_winkler(word, v)).fold(0.0, f64::max)
}

/// Build the candidate list for a disambiguation prompt.
///
/// A candidate's distinguishing words are the name words and adjectives it
/// does not share with every other candidate.
pub fn candidates(world: &World, ids: &[ItemId]) -> CoreResult<Vec<Candidate>> {
    let items: Vec<&Item> = ids.iter().map(|id| world.item(*id)).collect::<CoreResult<_>>()?;
    let vocab = |item: &Item| -> Vec<String> {
        let mut words: Vec<String> = item.name.to_lowercase().split_whitespace().map(String::from).collect();
        for adj in &item.adjectives {
            if !words.contains(adj) {
                words.push(adj.clone());
            }
        }
        words
    };

    Ok(items
        .iter()
        .map(|item| {
            let distinguishing = vocab(item)
                .into_iter()
                .filter(|w| !items.iter().all(|other| vocab(other).contains(w)))
                .collect();
            Candidate {
                item: item.id(),
                label: item.name.to_lowercase(),
                distinguishing,
            }
        })
        .collect())
}

/// Pick a candidate from an answer like "red", "the blue one", or "2".
pub fn pick(candidates: &[Candidate], answer: &[String]) -> Option<usize> {
    let words: Vec<&str> = answer
        .iter()
        .map(String::as_str)
        .filter(|w| !lexicon::is_filler(w))
        .collect();

    // "2", "first", or "the second ration bar".
    if let Some((head, tail)) = words.split_first() {
        if let Some(index) = position(head, candidates.len()) {
            let named = tail
                .iter()
                .all(|w| candidates[index].label.split_whitespace().any(|l| l == *w));
            if named {
                return Some(index);
            }
        }
    }
    if words.is_empty() {
        return None;
    }

    let matching: Vec<usize> = candidates
        .iter()
        .enumerate()
        .filter(|(_, c)| {
            let distinguishes = |w: &str| c.distinguishing.iter().any(|d| d == w);
            let known = |w: &str| c.label.split_whitespace().any(|l| l == w) || distinguishes(w);
            words.iter().all(|w| known(w)) && words.iter().any(|w| distinguishes(w))
        })
        .map(|(i, _)| i)
        .collect();
    match matching.as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

fn position(word: &str, len: usize) -> Option<usize> {
    let index = match word.parse::<usize>() {
        Ok(n) => n.checked_sub(1)?,
        Err(_) if word == "last" => len.checked_sub(1)?,
        Err(_) => lexicon::ORDINALS.iter().find(|(w, _)| *w == word)?.1,
    };
    (index < len).then_some(index)
}

/// Prompt text for a set of candidates: "Which cloak do you mean, the red
/// cloak or the blue cloak?"
///
/// Candidates that share a name are told apart by position instead: "the
/// first ration bar or the second ration bar".
pub fn prompt(noun: &str, candidates: &[Candidate]) -> String {
    let shared = candidates
        .iter()
        .enumerate()
        .any(|(i, c)| candidates[..i].iter().any(|other| other.label == c.label));
    let labels: Vec<String> = candidates
        .iter()
        .enumerate()
        .map(|(i, c)| match lexicon::ORDINALS.get(i) {
            Some((ordinal, _)) if shared => format!("the {ordinal} {}", c.label),
            _ if shared => format!("the {} ({})", c.label, i + 1),
            _ => format!("the {}", c.label),
        })
        .collect();
    let list = match labels.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} or {last}", rest.join(", ")),
        Some((last, _)) => last.clone(),
        None => String::new(),
    };
    let head = phrase_words(noun).last().copied().unwrap_or("one").to_string();
    format!("Which {head} do you mean, {list}?")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lf_core::{Location, Owner};

    fn closet() -> (World, Vec<ItemId>) {
        let mut world = World::new();
        let room = world.add_location(Location::new("closet", "Closet")).unwrap();
        let red = world
            .add_item(Item::new("red_cloak", "red cloak"), Owner::Location(room))
            .unwrap();
        let blue = world
            .add_item(Item::new("blue_cloak", "blue cloak"), Owner::Location(room))
            .unwrap();
        let lantern = world
            .add_item(Item::new("lantern", "brass lantern").nouns(["lantern", "lamp"]), Owner::Location(room))
            .unwrap();
        (world, vec![red, blue, lantern])
    }

    #[test]
    fn head_noun_and_adjectives() {
        let (world, pool) = closet();
        assert_eq!(resolve_among(&world, &pool, "lamp").unwrap(), Resolution::One(pool[2]));
        assert_eq!(resolve_among(&world, &pool, "the red cloak").unwrap(), Resolution::One(pool[0]));
        assert_eq!(resolve_among(&world, &pool, "green cloak").unwrap(), Resolution::Nothing);
    }

    #[test]
    fn shared_noun_is_ambiguous() {
        let (world, pool) = closet();
        assert_eq!(
            resolve_among(&world, &pool, "cloak").unwrap(),
            Resolution::Many(vec![pool[0], pool[1]])
        );
    }

    #[test]
    fn fuzzy_fallback_catches_typos() {
        let (world, pool) = closet();
        assert_eq!(resolve_among(&world, &pool, "lantren").unwrap(), Resolution::One(pool[2]));
        assert_eq!(resolve_among(&world, &pool, "bleu cloak").unwrap(), Resolution::One(pool[1]));
        assert_eq!(resolve_among(&world, &pool, "xyzzy").unwrap(), Resolution::Nothing);
    }

    #[test]
    fn candidates_carry_distinguishing_words() {
        let (world, pool) = closet();
        let cands = candidates(&world, &pool[..2]).unwrap();
        assert_eq!(cands[0].distinguishing, vec!["red"]);
        assert_eq!(cands[1].distinguishing, vec!["blue"]);
        assert_eq!(
            prompt("cloak", &cands),
            "Which cloak do you mean, the red cloak or the blue cloak?"
        );
    }

    #[test]
    fn answers_pick_candidates() {
        let (world, pool) = closet();
        let cands = candidates(&world, &pool[..2]).unwrap();
        let answer = |s: &str| s.split_whitespace().map(String::from).collect::<Vec<_>>();
        assert_eq!(pick(&cands, &answer("blue")), Some(1));
        assert_eq!(pick(&cands, &answer("the red one")), Some(0));
        assert_eq!(pick(&cands, &answer("red cloak")), Some(0));
        assert_eq!(pick(&cands, &answer("2")), Some(1));
        assert_eq!(pick(&cands, &answer("first")), Some(0));
        assert_eq!(pick(&cands, &answer("cloak")), None);
        assert_eq!(pick(&cands, &answer("green")), None);
        assert_eq!(pick(&cands, &answer("3")), None);
    }
}
