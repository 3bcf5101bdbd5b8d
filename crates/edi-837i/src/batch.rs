//! Batching policy: contiguous, order-preserving chunks.

use claims_model::ClaimRecord;

/// Split claims into chunks of at most `batch_size`, preserving order.
/// The last chunk may be shorter; nothing is dropped or reordered.
pub fn batch_claims(claims: &[ClaimRecord], batch_size: usize) -> Vec<Vec<ClaimRecord>> {
    let size = batch_size.max(1);
    claims.chunks(size).map(<[ClaimRecord]>::to_vec).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(n: usize) -> Vec<ClaimRecord> {
        (0..n)
            .map(|i| ClaimRecord {
                claim_id: format!("CLM{i:03}"),
                ..ClaimRecord::default()
            })
            .collect()
    }

    #[test]
    fn concat_of_batches_is_the_input() {
        let input = claims(7);
        for size in 1..=8 {
            let batches = batch_claims(&input, size);
            let flattened: Vec<String> = batches
                .iter()
                .flatten()
                .map(|c| c.claim_id.clone())
                .collect();
            let original: Vec<String> = input.iter().map(|c| c.claim_id.clone()).collect();
            assert_eq!(flattened, original, "size {size}");
            assert!(batches.iter().all(|b| b.len() <= size));
        }
    }

    #[test]
    fn last_batch_may_be_shorter() {
        let batches = batch_claims(&claims(5), 2);
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].len(), 2);
        assert_eq!(batches[2].len(), 1);
    }

    #[test]
    fn empty_input_yields_no_batches() {
        assert!(batch_claims(&[], 100).is_empty());
    }
}
