//! Ordering of (district, growth) pairs.
//!
//! Ordering contract: `rank` sorts ascending by growth with a stable sort,
//! so districts with equal growth keep their repository (name) order.
//! `top_n` answers are always in descending growth order; a single-top
//! answer is `top_n(.., 1)`.

use crate::data::DistrictGrowth;

/// Stable ascending sort by growth value.
pub fn rank(mut pairs: Vec<DistrictGrowth>) -> Vec<DistrictGrowth> {
    pairs.sort_by(|a, b| a.growth.total_cmp(&b.growth));
    pairs
}

/// Takes the `n` highest entries off an ascending ranking, highest first.
/// Returns fewer than `n` entries when the ranking is shorter.
pub fn top_n(mut ranked: Vec<DistrictGrowth>, n: usize) -> Vec<DistrictGrowth> {
    let mut tops = Vec::with_capacity(n.min(ranked.len()));
    for _ in 0..n {
        match ranked.pop() {
            Some(entry) => tops.push(entry),
            None => break,
        }
    }
    tops
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(values: &[(&str, f64)]) -> Vec<DistrictGrowth> {
        values
            .iter()
            .map(|&(name, growth)| DistrictGrowth::new(name, growth))
            .collect()
    }

    #[test]
    fn test_rank_sorts_ascending() {
        let ranked = rank(pairs(&[("B", 0.3), ("A", 0.1), ("C", 0.2)]));
        let names: Vec<_> = ranked.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C", "B"]);
    }

    #[test]
    fn test_rank_is_stable_on_ties() {
        let ranked = rank(pairs(&[("A", 0.2), ("B", 0.1), ("C", 0.2)]));
        let names: Vec<_> = ranked.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_top_n_descending_from_high_end() {
        let ranked = rank(pairs(&[("A", 0.1), ("B", 0.4), ("C", 0.3), ("D", 0.2)]));
        let tops = top_n(ranked, 2);
        let names: Vec<_> = tops.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C"]);
    }

    #[test]
    fn test_top_n_larger_than_available() {
        let tops = top_n(rank(pairs(&[("A", 0.1), ("B", 0.2)])), 5);
        assert_eq!(tops.len(), 2);
        assert_eq!(tops[0].name, "B");
    }

    #[test]
    fn test_top_n_of_empty() {
        assert!(top_n(Vec::new(), 3).is_empty());
    }
}
