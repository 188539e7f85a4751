use std::fmt;

use crate::grid::Position;

/// An ordered run of code values, optionally tied to the grid cells they came from.
///
/// Candidate paths produced by the generator always carry one position per value.
/// Target paths are pure value patterns and usually carry no positions at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path<T> {
    values: Vec<T>,
    positions: Vec<Position>,
}

impl<T> Default for Path<T> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            positions: Vec::new(),
        }
    }
}

impl<T> Path<T> {
    /// Create a path from values and the grid positions they were selected at.
    ///
    /// # Panics
    ///
    /// If `positions` is non-empty and its length differs from that of `values`,
    /// or if any position appears twice.
    pub fn new(values: Vec<T>, positions: Vec<Position>) -> Self {
        assert!(
            positions.is_empty() || positions.len() == values.len(),
            "a path needs one position per value ({} values, {} positions)",
            values.len(),
            positions.len(),
        );
        for (idx, position) in positions.iter().enumerate() {
            assert!(
                !positions[..idx].contains(position),
                "position {position} is visited twice",
            );
        }
        Self { values, positions }
    }

    /// Create a value-only path, as used for targets.
    pub fn from_values(values: impl IntoIterator<Item = T>) -> Self {
        Self {
            values: values.into_iter().collect(),
            positions: Vec::new(),
        }
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The 1-based step at which `position` was visited, if it is part of this path.
    pub fn step_at(&self, position: Position) -> Option<usize> {
        self.positions
            .iter()
            .position(|&visited| visited == position)
            .map(|idx| idx + 1)
    }
}

impl<T: PartialEq> Path<T> {
    /// `true` when the values of `target` appear in this path as one contiguous, in-order run.
    ///
    /// An empty target is contained in every path.
    pub fn contains(&self, target: &Path<T>) -> bool {
        is_contiguous_run(&self.values, &target.values)
    }
}

/// `true` if `needle` occurs as a contiguous run inside `haystack`.
///
/// Tokens are compared element by element, so there is no restriction on what a token may contain.
pub fn is_contiguous_run<T: PartialEq>(haystack: &[T], needle: &[T]) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.windows(needle.len()).any(|window| window == needle)
}

impl<T> FromIterator<T> for Path<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl<T: fmt::Display> fmt::Display for Path<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, value) in self.values.iter().enumerate() {
            if idx > 0 {
                f.write_str("->")?;
            }
            write!(f, "({value})")?;
            if let Some(position) = self.positions.get(idx) {
                write!(f, "{position}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn path(text: &str) -> Path<&str> {
        text.split_ascii_whitespace().collect()
    }

    #[rstest]
    #[case::middle("55 BD", true)]
    #[case::not_contiguous("1C BD", false)]
    #[case::full_match("1C 55 BD 1C", true)]
    #[case::suffix("BD 1C", true)]
    #[case::reversed("BD 55", false)]
    #[case::too_long("1C 55 BD 1C 55", false)]
    #[case::empty("", true)]
    fn contiguous_containment(#[case] target: &str, #[case] expect: bool) {
        let candidate = path("1C 55 BD 1C");
        assert_eq!(candidate.contains(&path(target)), expect);
    }

    #[test]
    fn empty_target_in_empty_candidate() {
        assert!(Path::<&str>::default().contains(&Path::default()));
    }

    #[test]
    fn equal_length_requires_identical_values() {
        assert!(path("1C 55").contains(&path("1C 55")));
        assert!(!path("1C 55").contains(&path("55 1C")));
    }

    #[test]
    fn multi_character_tokens_do_not_bleed() {
        // joined with spaces, "A B" would appear inside "XA B"
        let candidate = Path::from_values(["XA B", "C"]);
        assert!(!candidate.contains(&Path::from_values(["A B"])));
        assert!(!candidate.contains(&Path::from_values(["A", "B"])));
    }

    #[test]
    fn inner_example_incomplete() {
        let target = path("1A 2B 1A 3C");
        assert!(path("1A 2B 3C 1A 2B 1A 3C").contains(&target));
        assert!(!path("1A 2B 3C 1A 2B 1A").contains(&target));
    }

    #[test]
    fn display_with_positions() {
        let candidate = Path::new(
            vec!["55", "1C"],
            vec![Position::new(0, 0), Position::new(1, 0)],
        );
        assert_eq!(candidate.to_string(), "(55)(0, 0)->(1C)(1, 0)");
        assert_eq!(path("1C 55").to_string(), "(1C)->(55)");
    }

    #[test]
    fn step_at_is_one_based() {
        let candidate = Path::new(
            vec!["55", "1C"],
            vec![Position::new(0, 3), Position::new(2, 3)],
        );
        assert_eq!(candidate.step_at(Position::new(2, 3)), Some(2));
        assert_eq!(candidate.step_at(Position::new(0, 0)), None);
    }

    #[test]
    #[should_panic(expected = "one position per value")]
    fn mismatched_positions_panic() {
        Path::new(vec!["55"], vec![Position::new(0, 0), Position::new(1, 0)]);
    }

    #[test]
    #[should_panic(expected = "visited twice")]
    fn repeated_positions_panic() {
        Path::new(vec!["1C", "1C"], vec![Position::new(0, 0), Position::new(0, 0)]);
    }

    fn tokens() -> impl Strategy<Value = Vec<String>> {
        proptest::collection::vec(
            prop_oneof![Just("1C"), Just("55"), Just("BD"), Just("E9"), Just("7A")]
                .prop_map(str::to_owned),
            0..12,
        )
    }

    proptest! {
        #[test]
        fn containment_is_reflexive(values in tokens()) {
            let path = Path::from_values(values);
            prop_assert!(path.contains(&path));
        }

        #[test]
        fn every_window_is_contained(values in tokens()) {
            let path = Path::from_values(values);
            for len in 0..=path.len() {
                if len == 0 {
                    prop_assert!(path.contains(&Path::default()));
                    continue;
                }
                for window in path.values().windows(len) {
                    prop_assert!(path.contains(&Path::from_values(window.to_vec())));
                }
            }
        }

        #[test]
        fn longer_targets_are_never_contained(values in tokens(), extra in tokens()) {
            prop_assume!(!extra.is_empty());
            let path = Path::from_values(values.clone());
            let target = Path::from_values(values.into_iter().chain(extra));
            prop_assert!(!path.contains(&target));
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn path_survives_json() {
        let path = Path::new(
            vec!["55".to_owned(), "1C".to_owned()],
            vec![Position::new(0, 3), Position::new(2, 3)],
        );
        let json = serde_json::to_string(&path).unwrap();
        let back: Path<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
        assert_eq!(back.step_at(Position::new(2, 3)), Some(2));
    }

    #[test]
    fn position_fields_are_named() {
        let json = serde_json::to_value(Position::new(1, 4)).unwrap();
        assert_eq!(json, serde_json::json!({ "row": 1, "column": 4 }));
    }
}
