use rand::Rng;
use rand::seq::{SliceRandom, index};
use vocab_types::ExerciseError;

/// Draw `k` distinct elements (by position) from `pool` in random order.
pub fn sample_without_replacement<T: Clone, R: Rng + ?Sized>(
    pool: &[T],
    k: usize,
    rng: &mut R,
) -> Result<Vec<T>, ExerciseError> {
    if pool.len() < k {
        return Err(ExerciseError::InsufficientPoolSize {
            required: k,
            available: pool.len(),
        });
    }

    // index::sample returns the indices fully shuffled
    Ok(index::sample(rng, pool.len(), k)
        .into_iter()
        .map(|i| pool[i].clone())
        .collect())
}

/// Uniform Fisher-Yates shuffle into a new vector; the input is left untouched.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(seq: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = seq.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_sample_returns_distinct_items() {
        let mut rng = StdRng::seed_from_u64(7);
        let pool: Vec<u32> = (0..20).collect();

        for _ in 0..50 {
            let sample = sample_without_replacement(&pool, 3, &mut rng).unwrap();
            assert_eq!(sample.len(), 3);
            let unique: HashSet<_> = sample.iter().collect();
            assert_eq!(unique.len(), 3);
            assert!(sample.iter().all(|v| pool.contains(v)));
        }
    }

    #[test]
    fn test_sample_entire_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        let pool = vec!["a", "b", "c", "d"];
        let mut sample = sample_without_replacement(&pool, 4, &mut rng).unwrap();
        sample.sort();
        assert_eq!(sample, pool);
    }

    #[test]
    fn test_sample_insufficient_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = sample_without_replacement(&[1, 2], 3, &mut rng);
        assert_eq!(
            result,
            Err(ExerciseError::InsufficientPoolSize {
                required: 3,
                available: 2
            })
        );
    }

    #[test]
    fn test_sample_zero_from_empty_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        let empty: Vec<u8> = Vec::new();
        assert_eq!(sample_without_replacement(&empty, 0, &mut rng).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_shuffle_does_not_mutate_input() {
        let mut rng = StdRng::seed_from_u64(3);
        let original: Vec<u32> = (0..10).collect();
        let shuffled = shuffle(&original, &mut rng);

        assert_eq!(original, (0..10).collect::<Vec<_>>());
        let mut sorted = shuffled.clone();
        sorted.sort();
        assert_eq!(sorted, original);
    }

    #[test]
    fn test_shuffle_is_roughly_uniform() {
        // Each of 3 elements should land first about a third of the time
        let mut rng = StdRng::seed_from_u64(42);
        let mut first_counts = [0u32; 3];
        for _ in 0..3000 {
            let shuffled = shuffle(&[0usize, 1, 2], &mut rng);
            first_counts[shuffled[0]] += 1;
        }
        for count in first_counts {
            assert!((800..1200).contains(&count), "skewed count {}", count);
        }
    }
}
