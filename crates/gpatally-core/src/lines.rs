//! Line reconstruction: fuzzy Y-coordinate grouping of text fragments.
//!
//! A page's fragments arrive in content-stream order with no line
//! structure. Reconstruction buckets them by approximate Y coordinate,
//! orders fragments within a bucket by X, and joins each bucket into a
//! single line string in reading order.

use std::cmp::Ordering;

use crate::fragment::TextFragment;

/// Default Y tolerance for the import path.
///
/// The import pipeline runs with fuzziness disabled: only fragments at the
/// exact same Y coordinate share a line. Non-zero tolerances remain
/// supported for misaligned documents.
pub const DEFAULT_Y_TOLERANCE: f64 = 0.0;

/// Group fragments into lines and reduce each line to a string.
///
/// Bucketing: each fragment joins the existing bucket whose key has the
/// minimum absolute Y distance (ties prefer the lower key) when that
/// distance is non-zero and strictly within `y_tolerance`. Otherwise —
/// distance zero, out of tolerance, or no buckets yet — the fragment lands
/// in the bucket keyed by its exact Y, creating it if needed.
///
/// Output lines are ordered by Y ascending (top-to-bottom given a
/// top-left-origin Y), fragments within a line by X ascending
/// (left-to-right), and fragment texts join with single spaces.
pub fn reconstruct_lines(fragments: &[TextFragment], y_tolerance: f64) -> Vec<String> {
    let mut buckets: Vec<(f64, Vec<&TextFragment>)> = Vec::new();

    for fragment in fragments {
        let nearest = nearest_bucket(&buckets, fragment.y);

        match nearest {
            Some((index, distance)) if distance != 0.0 && distance < y_tolerance => {
                buckets[index].1.push(fragment);
            }
            _ => match buckets.iter_mut().find(|(key, _)| *key == fragment.y) {
                Some((_, members)) => members.push(fragment),
                None => buckets.push((fragment.y, vec![fragment])),
            },
        }
    }

    buckets.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    buckets
        .into_iter()
        .map(|(_, mut members)| {
            members.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
            members
                .iter()
                .map(|f| f.text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Index and distance of the bucket key closest to `y`; ties prefer the
/// lower key value.
fn nearest_bucket(buckets: &[(f64, Vec<&TextFragment>)], y: f64) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64, f64)> = None;
    for (index, (key, _)) in buckets.iter().enumerate() {
        let distance = (key - y).abs();
        let closer = match best {
            None => true,
            Some((_, best_distance, best_key)) => {
                distance < best_distance || (distance == best_distance && *key < best_key)
            }
        };
        if closer {
            best = Some((index, distance, *key));
        }
    }
    best.map(|(index, distance, _)| (index, distance))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(x: f64, y: f64, text: &str) -> TextFragment {
        TextFragment::at(x, y, text)
    }

    #[test]
    fn empty_input_yields_no_lines() {
        assert!(reconstruct_lines(&[], 0.3).is_empty());
    }

    #[test]
    fn fragments_on_same_y_join_in_x_order() {
        let fragments = [frag(200.0, 10.0, "201"), frag(72.0, 10.0, "CMSC")];
        assert_eq!(reconstruct_lines(&fragments, 0.0), ["CMSC 201"]);
    }

    #[test]
    fn lines_order_top_to_bottom() {
        let fragments = [
            frag(72.0, 120.0, "second"),
            frag(72.0, 80.0, "first"),
            frag(72.0, 160.0, "third"),
        ];
        assert_eq!(
            reconstruct_lines(&fragments, 0.0),
            ["first", "second", "third"]
        );
    }

    #[test]
    fn near_y_merges_within_tolerance() {
        // y=10.0 and y=10.2 merge at tolerance 0.3, ordered by x.
        let fragments = [frag(150.0, 10.2, "World"), frag(72.0, 10.0, "Hello")];
        assert_eq!(reconstruct_lines(&fragments, 0.3), ["Hello World"]);
    }

    #[test]
    fn near_y_stays_separate_at_zero_tolerance() {
        let fragments = [frag(150.0, 10.2, "World"), frag(72.0, 10.0, "Hello")];
        assert_eq!(reconstruct_lines(&fragments, 0.0), ["Hello", "World"]);
    }

    #[test]
    fn tolerance_comparison_is_strict() {
        // Distance exactly equal to the tolerance starts a new line.
        let fragments = [frag(72.0, 10.0, "a"), frag(150.0, 10.3, "b")];
        assert_eq!(reconstruct_lines(&fragments, 0.3), ["a", "b"]);
    }

    #[test]
    fn exact_y_match_reuses_bucket_regardless_of_tolerance() {
        let fragments = [
            frag(72.0, 10.0, "a"),
            frag(150.0, 10.0, "b"),
            frag(110.0, 10.0, "c"),
        ];
        assert_eq!(reconstruct_lines(&fragments, 0.3), ["a c b"]);
    }

    #[test]
    fn tie_between_buckets_prefers_lower_key() {
        // y=10.5 is exactly equidistant from buckets 10.0 and 11.0.
        let fragments = [
            frag(72.0, 10.0, "low"),
            frag(72.0, 11.0, "high"),
            frag(150.0, 10.5, "mid"),
        ];
        assert_eq!(reconstruct_lines(&fragments, 0.75), ["low mid", "high"]);
    }

    #[test]
    fn merged_line_keeps_bucket_key_of_first_fragment() {
        // b and c are both within tolerance of the 10.0 bucket; neither
        // shifts its key.
        let fragments = [
            frag(72.0, 10.0, "a"),
            frag(120.0, 10.2, "b"),
            frag(170.0, 10.1, "c"),
        ];
        assert_eq!(reconstruct_lines(&fragments, 0.3), ["a b c"]);
    }

    #[test]
    fn default_tolerance_is_disabled() {
        assert_eq!(DEFAULT_Y_TOLERANCE, 0.0);
    }
}
