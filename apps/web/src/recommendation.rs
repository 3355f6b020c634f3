//! Display-only career recommendations sampled from the catalog.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::models::Career;

pub const SAMPLE_SIZE: usize = 5;
const MIN_COMPATIBILITY: i32 = 70;
const MAX_COMPATIBILITY: i32 = 95;
const RANK_PENALTY: i32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    #[serde(rename = "carreira")]
    pub career: Career,
    #[serde(rename = "compatibilidade")]
    pub compatibility: i32,
}

/// Decorative score: demand minus 5 per rank position, kept within 70 – 95.
pub fn compatibility(demand: i32, rank: usize) -> i32 {
    let penalty = i32::try_from(rank)
        .unwrap_or(i32::MAX)
        .saturating_mul(RANK_PENALTY);
    demand
        .saturating_sub(penalty)
        .clamp(MIN_COMPATIBILITY, MAX_COMPATIBILITY)
}

/// Shuffles the catalog, keeps the first five, and orders them by descending
/// market demand.
pub fn sample_recommendations<R: Rng + ?Sized>(
    catalog: &[Career],
    rng: &mut R,
) -> Vec<Recommendation> {
    let mut sample: Vec<Career> = catalog.to_vec();
    sample.shuffle(rng);
    sample.truncate(SAMPLE_SIZE);
    sample.sort_by(|a, b| b.demand.cmp(&a.demand));

    sample
        .into_iter()
        .enumerate()
        .map(|(rank, career)| Recommendation {
            compatibility: compatibility(career.demand, rank),
            career,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn catalog(n: i64) -> Vec<Career> {
        (1..=n)
            .map(|id| Career {
                id,
                name: format!("Carreira {id}"),
                description: String::new(),
                demand: (id * 13 % 100) as i32,
            })
            .collect()
    }

    #[test]
    fn test_sample_size_is_min_of_five_and_catalog() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(sample_recommendations(&catalog(12), &mut rng).len(), 5);
        assert_eq!(sample_recommendations(&catalog(3), &mut rng).len(), 3);
        assert!(sample_recommendations(&[], &mut rng).is_empty());
    }

    #[test]
    fn test_sample_sorted_by_descending_demand() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let recs = sample_recommendations(&catalog(15), &mut rng);
            assert!(recs
                .windows(2)
                .all(|w| w[0].career.demand >= w[1].career.demand));
        }
    }

    #[test]
    fn test_sample_has_no_duplicates() {
        let mut rng = StdRng::seed_from_u64(7);
        let recs = sample_recommendations(&catalog(10), &mut rng);
        let mut ids: Vec<i64> = recs.iter().map(|r| r.career.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), recs.len());
    }

    #[test]
    fn test_compatibility_clamped() {
        assert_eq!(compatibility(99, 0), 95);
        assert_eq!(compatibility(90, 1), 85);
        assert_eq!(compatibility(72, 2), 70);
        assert_eq!(compatibility(10, 0), 70);
    }
}
