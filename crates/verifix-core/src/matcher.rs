use crate::model::{BoundedPattern, Pattern};
use crate::outcome::MatchOutcome;

/// Locate a pattern in artifact text. Never errors: an absent or unclosed
/// structure is reported as not found.
pub fn match_pattern(text: &str, pattern: &Pattern) -> MatchOutcome {
    match pattern {
        Pattern::Literal(lit) => match_literal(text, lit),
        Pattern::Bounded(b) => match_bounded(text, b),
    }
}

pub fn match_literal(text: &str, literal: &str) -> MatchOutcome {
    match text.find(literal) {
        Some(offset) => MatchOutcome::literal_at(offset, literal),
        None => MatchOutcome::not_found(),
    }
}

/// Apply every pattern, in input order. No short-circuit: callers get an
/// outcome per pattern so they can report every miss at once.
pub fn match_all(text: &str, patterns: &[Pattern]) -> Vec<MatchOutcome> {
    patterns.iter().map(|p| match_pattern(text, p)).collect()
}

/// Find the start marker, then scan forward balancing delimiters until the
/// structure closes. The extracted span is the interior, delimiters excluded;
/// nested delimiter pairs stay inside it.
pub fn match_bounded(text: &str, bounded: &BoundedPattern) -> MatchOutcome {
    let Some(start_offset) = text.find(&bounded.start) else {
        return MatchOutcome::not_found();
    };
    let after = start_offset + bounded.start.len();
    let mut depth = bounded.start_depth();

    // A marker that opens nothing itself anchors the search; the structure
    // begins at the next opening delimiter.
    let span_start = if depth > 0 {
        after
    } else {
        let Some(rel) = text[after..].find(bounded.open) else {
            return MatchOutcome::not_found();
        };
        depth = 1;
        after + rel + bounded.open.len_utf8()
    };

    for (rel, ch) in text[span_start..].char_indices() {
        if ch == bounded.open {
            depth += 1;
        } else if ch == bounded.close {
            depth -= 1;
            if depth == 0 {
                let span = text[span_start..span_start + rel].to_string();
                return MatchOutcome::bounded_at(start_offset, span);
            }
        }
    }

    // Ran out of text before the structure closed.
    MatchOutcome::not_found()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounded(start: &str, open: char, close: char) -> BoundedPattern {
        BoundedPattern { start: start.into(), open, close }
    }

    #[test]
    fn literal_reports_first_byte_offset() {
        let out = match_literal("abc abc", "abc");
        assert_eq!(out, MatchOutcome::literal_at(0, "abc"));
        let out = match_literal("xx abc", "abc");
        assert_eq!(out, MatchOutcome::literal_at(3, "abc"));
    }

    #[test]
    fn literal_absent_is_not_found() {
        assert_eq!(match_literal("abc", "zzz"), MatchOutcome::not_found());
    }

    #[test]
    fn bounded_extracts_interior_across_nesting() {
        let text = "const arr = [1, [2,3], 4];";
        let out = match_bounded(text, &bounded("[", '[', ']'));
        assert_eq!(out, MatchOutcome::bounded_at(12, "1, [2,3], 4".into()));
    }

    #[test]
    fn bounded_marker_with_context_anchors_the_scan() {
        let text = "const other = [9];\nconst arr = [1, [2,3], 4];";
        let out = match_bounded(text, &bounded("const arr = [", '[', ']'));
        assert_eq!(out.first_offset, Some(19));
        assert_eq!(out.captured_span.as_deref(), Some("1, [2,3], 4"));
    }

    #[test]
    fn bounded_marker_without_opener_starts_at_next_open() {
        let text = "register(handlers, { a: 1, b: { c: 2 } });";
        let out = match_bounded(text, &bounded("register(handlers,", '{', '}'));
        assert!(out.found);
        assert_eq!(out.first_offset, Some(0));
        assert_eq!(out.captured_span.as_deref(), Some(" a: 1, b: { c: 2 } "));
    }

    #[test]
    fn bounded_empty_interior_is_found() {
        let out = match_bounded("const xs = [];", &bounded("const xs = [", '[', ']'));
        assert_eq!(out.captured_span.as_deref(), Some(""));
    }

    #[test]
    fn bounded_unclosed_is_not_found() {
        let out = match_bounded("const xs = [1, [2", &bounded("const xs = [", '[', ']'));
        assert_eq!(out, MatchOutcome::not_found());
    }

    #[test]
    fn bounded_missing_marker_is_not_found() {
        let out = match_bounded("nothing here", &bounded("const xs = [", '[', ']'));
        assert_eq!(out, MatchOutcome::not_found());
    }

    #[test]
    fn pattern_dispatch_covers_both_kinds() {
        let text = "fn main() { run(); }";
        let lit = Pattern::literal("run()");
        assert!(match_pattern(text, &lit).found);
        let b = Pattern::bounded("fn main() {", '{', '}');
        let out = match_pattern(text, &b);
        assert_eq!(out.captured_span.as_deref(), Some(" run(); "));
    }

    #[test]
    fn match_all_keeps_order_and_reports_every_miss() {
        let text = "alpha gamma";
        let patterns = vec![
            Pattern::literal("alpha"),
            Pattern::literal("beta"),
            Pattern::literal("gamma"),
        ];
        let outcomes = match_all(text, &patterns);
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].found);
        assert!(!outcomes[1].found);
        assert!(outcomes[2].found);
        assert_eq!(outcomes[2].first_offset, Some(6));
    }
}
