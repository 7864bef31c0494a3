//! Minting of fresh short codes.

use std::sync::Arc;

use super::{CodegenError, IdSource, encoder};

/// Produces short codes that have never been issued before.
///
/// Implementations are pure generators and never touch storage.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Mints a new short code.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::Overflow`] once the identifier space is
    /// exhausted. Retrying does not help: the next identifier is larger still.
    fn next_code(&self) -> Result<String, CodegenError>;
}

/// Encodes identifiers drawn from a shared [`IdSource`].
///
/// Identifiers that are non-zero multiples of 62 are skipped: they render to
/// the same code as their quotient (see [`crate::codegen::encoder`]), which
/// would break short code uniqueness.
#[derive(Debug, Clone)]
pub struct SequentialCodeGenerator {
    ids: Arc<IdSource>,
}

impl SequentialCodeGenerator {
    pub fn new(ids: Arc<IdSource>) -> Self {
        Self { ids }
    }

    /// The counter this generator draws from.
    pub fn id_source(&self) -> &Arc<IdSource> {
        &self.ids
    }
}

impl CodeGenerator for SequentialCodeGenerator {
    fn next_code(&self) -> Result<String, CodegenError> {
        let id = loop {
            let id = self.ids.next();
            if id == 0 || id % encoder::ALPHABET.len() as u64 != 0 {
                break id;
            }
        };

        encoder::encode(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::{MAX_ID, decode, max_decoded};
    use std::collections::HashSet;
    use std::thread;

    fn generator(seed: u64) -> SequentialCodeGenerator {
        SequentialCodeGenerator::new(Arc::new(IdSource::new(seed)))
    }

    #[test]
    fn test_first_codes_from_zero() {
        let codes = generator(0);

        assert_eq!(codes.next_code().unwrap(), "qqqqqqqqqq");
        assert_eq!(codes.next_code().unwrap(), "qqqqqqqqqw");
        assert_eq!(codes.next_code().unwrap(), "qqqqqqqqqe");
    }

    #[test]
    fn test_skips_multiples_of_base() {
        let codes = generator(61);

        assert_eq!(decode(&codes.next_code().unwrap()).unwrap(), 61);
        // 62 is skipped, it would collide with the code for 1
        assert_eq!(decode(&codes.next_code().unwrap()).unwrap(), 63);
        assert_eq!(codes.id_source().current(), 64);
    }

    #[test]
    fn test_codes_are_unique_across_skips() {
        let codes = generator(0);
        let minted: HashSet<String> = (0..10_000).map(|_| codes.next_code().unwrap()).collect();

        assert_eq!(minted.len(), 10_000);
    }

    #[test]
    fn test_minted_codes_decode_to_issued_ids() {
        let codes = generator(3_000);

        for _ in 0..500 {
            let before = codes.id_source().current();
            let code = codes.next_code().unwrap();
            let id = decode(&code).unwrap();

            assert!(id >= before);
            assert_eq!(id + 1, codes.id_source().current());
        }
    }

    #[test]
    fn test_overflow_is_reported() {
        let codes = generator(MAX_ID);

        assert_eq!(codes.next_code().unwrap(), "9999999999");
        assert!(matches!(
            codes.next_code(),
            Err(CodegenError::Overflow { .. })
        ));
    }

    #[test]
    fn test_concurrent_minting_is_collision_free() {
        let codes = generator(0);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let codes = codes.clone();
                thread::spawn(move || {
                    (0..2_000)
                        .map(|_| codes.next_code().unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut all = HashSet::new();
        for handle in handles {
            all.extend(handle.join().unwrap());
        }

        assert_eq!(all.len(), 16_000);
    }

    #[test]
    fn test_reseeding_past_stored_codes_never_reissues() {
        let first_run = generator(1);
        let stored: HashSet<String> = (0..70).map(|_| first_run.next_code().unwrap()).collect();

        let restarted = generator(max_decoded(&stored).unwrap() + 1);
        for _ in 0..70 {
            assert!(!stored.contains(&restarted.next_code().unwrap()));
        }
    }
}
