use crate::matcher::match_pattern;
use crate::model::Anchor;
use crate::outcome::OrderOutcome;

/// Compare the first-offset ordering of anchors in `text` against the
/// expected sequence. Missing anchors drop out of the comparison and are
/// reported separately; equal offsets make the ordering indeterminate.
pub fn validate_order(text: &str, anchors: &[Anchor], expected: &[String]) -> OrderOutcome {
    let mut present: Vec<(String, usize)> = Vec::new();
    let mut missing: Vec<String> = Vec::new();
    for anchor in anchors {
        match match_pattern(text, &anchor.pattern).first_offset {
            Some(offset) => present.push((anchor.name.clone(), offset)),
            None => missing.push(anchor.name.clone()),
        }
    }

    // Stable sort keeps declaration order for equal offsets; the tie report
    // below marks those pairs indeterminate regardless.
    present.sort_by_key(|(_, offset)| *offset);
    let ties: Vec<(String, String)> = present
        .windows(2)
        .filter(|w| w[0].1 == w[1].1)
        .map(|w| (w[0].0.clone(), w[1].0.clone()))
        .collect();

    let actual: Vec<String> = present.into_iter().map(|(name, _)| name).collect();
    let expected: Vec<String> = expected
        .iter()
        .filter(|name| actual.iter().any(|a| a == *name))
        .cloned()
        .collect();
    let in_order = actual == expected;

    OrderOutcome { expected, actual, missing, ties, in_order }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Pattern;

    fn anchors(names: &[(&str, &str)]) -> Vec<Anchor> {
        names
            .iter()
            .map(|(name, lit)| Anchor::new(*name, Pattern::literal(*lit)))
            .collect()
    }

    fn expect(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn offsets_decide_order_not_declaration() {
        // First offsets: beta at 5, alpha at 11, gamma at 22.
        let text = "....SbetaS.alpha......gamma";
        let a = anchors(&[("alpha", "alpha"), ("beta", "beta"), ("gamma", "gamma")]);
        let out = validate_order(text, &a, &expect(&["beta", "alpha", "gamma"]));
        assert_eq!(out.actual, expect(&["beta", "alpha", "gamma"]));
        assert!(out.in_order);
        assert!(out.missing.is_empty());
        assert!(out.ties.is_empty());
    }

    #[test]
    fn wrong_order_is_reported_with_both_sequences() {
        let text = "gamma beta alpha";
        let a = anchors(&[("alpha", "alpha"), ("beta", "beta"), ("gamma", "gamma")]);
        let out = validate_order(text, &a, &expect(&["alpha", "beta", "gamma"]));
        assert!(!out.in_order);
        assert_eq!(out.actual, expect(&["gamma", "beta", "alpha"]));
        assert_eq!(out.expected, expect(&["alpha", "beta", "gamma"]));
    }

    #[test]
    fn missing_anchor_drops_out_of_the_comparison() {
        let text = "alpha then gamma";
        let a = anchors(&[("alpha", "alpha"), ("beta", "beta"), ("gamma", "gamma")]);
        let out = validate_order(text, &a, &expect(&["alpha", "beta", "gamma"]));
        assert_eq!(out.missing, expect(&["beta"]));
        assert_eq!(out.actual, expect(&["alpha", "gamma"]));
        assert_eq!(out.expected, expect(&["alpha", "gamma"]));
        assert!(out.in_order);
    }

    #[test]
    fn shared_first_offset_is_a_tie() {
        // Both anchors first match at offset 0.
        let text = "abc abc";
        let a = anchors(&[("whole", "abc"), ("head", "ab")]);
        let out = validate_order(text, &a, &expect(&["whole", "head"]));
        assert_eq!(out.ties, vec![("whole".to_string(), "head".to_string())]);
        assert!(out.is_indeterminate());
    }

    #[test]
    fn duplicate_occurrences_use_the_first() {
        let text = "beta alpha beta";
        let a = anchors(&[("alpha", "alpha"), ("beta", "beta")]);
        let out = validate_order(text, &a, &expect(&["beta", "alpha"]));
        assert!(out.in_order);
    }
}
