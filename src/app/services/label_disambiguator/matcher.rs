//! First-match search over a closed vocabulary
//!
//! Candidates are `(spelling, canonical)` pairs tried in table order at every
//! label position, left to right. The first position where any candidate fits
//! its boundaries decides the field.
//!
//! Boundaries tolerate operator noise but keep codes whole:
//!
//! - a spelling starting with `-` or `+` starts its own token and may follow
//!   anything (`B07-20`);
//! - any other spelling must not be glued to a preceding letter or digit
//!   (`PORT` holds no `RT`);
//! - no spelling may be followed by a digit (`RT12`, `-200`), so `RT1` wins
//!   over `RT` and `00` over `0`. Trailing letters or punctuation are noise
//!   (`-20C`, `RT1(retest)`).

/// Outcome of a vocabulary search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome<'v> {
    /// One canonical value matched at the left-most position
    Found {
        canonical: &'v str,
        start: usize,
        end: usize,
    },
    /// Nothing in the vocabulary appears in the label
    Missing,
    /// Distinct canonical values matched at the same left-most position
    ///
    /// The shipped temperature table never produces this: where one spelling
    /// is a prefix of another with a different value, the longer one continues
    /// with a digit. The outcome guards tables that break that rule.
    Ambiguous(Vec<&'v str>),
}

/// True if `spelling` may start right after `before`
fn fits_before(spelling: &str, before: Option<char>) -> bool {
    if spelling.starts_with(['-', '+']) {
        return true;
    }
    !before.is_some_and(char::is_alphanumeric)
}

/// True if a spelling may end right before `after`
fn fits_after(after: Option<char>) -> bool {
    !after.is_some_and(|c| c.is_ascii_digit())
}

/// Search `text` for the left-most vocabulary entry that fits its boundaries
pub fn first_match<'v>(text: &str, candidates: &[(&'v str, &'v str)]) -> MatchOutcome<'v> {
    for (start, _) in text.char_indices() {
        let before = text[..start].chars().next_back();
        let rest = &text[start..];

        let mut hits: Vec<(&'v str, usize)> = Vec::new();
        for &(spelling, canonical) in candidates {
            if !rest.starts_with(spelling) || !fits_before(spelling, before) {
                continue;
            }
            let after = rest[spelling.len()..].chars().next();
            if fits_after(after) {
                hits.push((canonical, spelling.len()));
            }
        }

        let Some(&(canonical, len)) = hits.first() else {
            continue;
        };

        let mut distinct: Vec<&'v str> = Vec::new();
        for (value, _) in &hits {
            if !distinct.contains(value) {
                distinct.push(*value);
            }
        }
        if distinct.len() > 1 {
            return MatchOutcome::Ambiguous(distinct);
        }

        return MatchOutcome::Found {
            canonical,
            start,
            end: start + len,
        };
    }

    MatchOutcome::Missing
}
