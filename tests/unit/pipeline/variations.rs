use std::sync::Mutex;

use super::*;
use crate::foundation::error::SlideglowError;

/// Replays a fixed script of responses, then repeats the last one.
struct Scripted {
    script: Vec<Result<&'static str, &'static str>>,
    calls: Mutex<usize>,
}

impl Scripted {
    fn new(script: Vec<Result<&'static str, &'static str>>) -> Self {
        Self {
            script,
            calls: Mutex::new(0),
        }
    }

    fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl TextVariationGenerator for Scripted {
    fn paraphrase(&self, _original: &str, _avoid: &[String]) -> SlideglowResult<String> {
        let mut calls = self.calls.lock().unwrap();
        let idx = (*calls).min(self.script.len() - 1);
        *calls += 1;
        match self.script[idx] {
            Ok(s) => Ok(s.to_owned()),
            Err(e) => Err(SlideglowError::validation(e)),
        }
    }
}

/// Suffixes the original with a counter, so every call is unique.
struct Counting(Mutex<usize>);

impl TextVariationGenerator for Counting {
    fn paraphrase(&self, original: &str, _avoid: &[String]) -> SlideglowResult<String> {
        let mut n = self.0.lock().unwrap();
        *n += 1;
        Ok(format!("{original} #{n}"))
    }
}

#[test]
fn duplicates_empties_and_the_original_are_rejected() {
    let g = Scripted::new(vec![
        Ok("same"),
        Ok("  a  "),
        Ok("a"),
        Ok(""),
        Ok("b"),
        Ok("c"),
    ]);
    let out = collect_unique_variations(&g, "same", 3, 10);
    assert_eq!(out, vec!["a", "b", "c"]);
    assert_eq!(g.calls(), 6);
}

#[test]
fn loop_stops_at_the_attempt_cap() {
    let g = Scripted::new(vec![Ok("only")]);
    let out = collect_unique_variations(&g, "orig", 3, 5);
    assert_eq!(out, vec!["only"]);
    assert_eq!(g.calls(), 5);
}

#[test]
fn generator_errors_consume_attempts() {
    let g = Scripted::new(vec![Err("rate limited"), Err("rate limited"), Ok("x")]);
    let out = collect_unique_variations(&g, "orig", 1, 2);
    assert!(out.is_empty());
    assert_eq!(g.calls(), 2);
}

#[test]
fn zero_count_makes_no_calls() {
    let g = Scripted::new(vec![Ok("x")]);
    assert!(collect_unique_variations(&g, "orig", 0, 10).is_empty());
    assert_eq!(g.calls(), 0);
}

#[test]
fn carousel_sets_start_with_the_originals() {
    let g = Counting(Mutex::new(0));
    let texts = vec!["one".to_owned(), "".to_owned(), "three".to_owned()];
    let sets = build_carousel_sets(&g, &texts, 2, 3);

    assert_eq!(sets.len(), 3);
    assert_eq!(sets[0], texts);
    assert_eq!(sets[1], vec!["one #1", "", "three #3"]);
    assert_eq!(sets[2], vec!["one #2", "", "three #4"]);
}

#[test]
fn short_variations_fall_back_to_the_original() {
    let g = Scripted::new(vec![Ok("alt")]);
    let texts = vec!["orig".to_owned()];
    let sets = build_carousel_sets(&g, &texts, 3, 2);

    assert_eq!(sets.len(), 4);
    assert_eq!(sets[1], vec!["alt"]);
    assert_eq!(sets[2], vec!["orig"]);
    assert_eq!(sets[3], vec!["orig"]);
    assert_eq!(g.calls(), 6);
}
