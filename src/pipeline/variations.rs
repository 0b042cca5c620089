use crate::foundation::error::SlideglowResult;

/// Produces alternative phrasings of a slide text (typically a language model).
pub trait TextVariationGenerator: Send + Sync {
    /// One rewrite of `original`. `avoid` holds the rewrites accepted so far.
    fn paraphrase(&self, original: &str, avoid: &[String]) -> SlideglowResult<String>;
}

/// Ask `generator` for up to `count` distinct rewrites of `original`, stopping after
/// `max_attempts` calls.
///
/// Outputs are trimmed. Empty outputs, the original itself and repeats are rejected. A
/// generator error consumes an attempt. The result keeps acceptance order and may be shorter
/// than `count`.
pub fn collect_unique_variations(
    generator: &dyn TextVariationGenerator,
    original: &str,
    count: usize,
    max_attempts: usize,
) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(count);
    let mut attempts = 0usize;
    while out.len() < count && attempts < max_attempts {
        attempts += 1;
        match generator.paraphrase(original, &out) {
            Ok(candidate) => {
                let candidate = candidate.trim();
                if candidate.is_empty()
                    || candidate == original.trim()
                    || out.iter().any(|v| v == candidate)
                {
                    tracing::debug!(attempt = attempts, "rejected duplicate or empty variation");
                    continue;
                }
                out.push(candidate.to_owned());
            }
            Err(e) => tracing::warn!(attempt = attempts, error = %e, "variation request failed"),
        }
    }
    if out.len() < count {
        tracing::warn!(
            wanted = count,
            got = out.len(),
            attempts,
            "attempt budget exhausted before enough unique variations"
        );
    }
    out
}

/// Text sets for one carousel row: the originals first, then `count` rewritten sets.
///
/// Slide `k` of set `v` is the `v`-th unique rewrite of slide `k`, or the original text when
/// fewer rewrites were collected. Blank slides stay blank in every set. Each slide gets
/// `count * attempts_per_variant` generator calls at most.
pub fn build_carousel_sets(
    generator: &dyn TextVariationGenerator,
    slide_texts: &[String],
    count: usize,
    attempts_per_variant: usize,
) -> Vec<Vec<String>> {
    let mut sets = vec![Vec::with_capacity(slide_texts.len()); count + 1];
    for original in slide_texts {
        sets[0].push(original.clone());
        let variations = if original.trim().is_empty() {
            Vec::new()
        } else {
            collect_unique_variations(
                generator,
                original,
                count,
                count.saturating_mul(attempts_per_variant),
            )
        };
        for (v, set) in sets.iter_mut().skip(1).enumerate() {
            set.push(variations.get(v).unwrap_or(original).clone());
        }
    }
    sets
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/variations.rs"]
mod tests;
