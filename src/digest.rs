use blake2::{Blake2b512, Digest};

/// Capability set for the strong (cryptographic) digest paired with each
/// chunk's weak rolling fingerprint.
pub trait StrongDigest {
    /// Fixed output size of this digest, in bytes.
    fn output_size(&self) -> usize;

    /// Computes the digest of `input`.
    fn digest(&self, input: &[u8]) -> Vec<u8>;
}

/// The reference strong digest: 512-bit (64-byte) BLAKE2b.
#[derive(Debug, Default, Clone, Copy)]
pub struct Blake512Digest;

impl StrongDigest for Blake512Digest {
    fn output_size(&self) -> usize {
        64
    }

    fn digest(&self, input: &[u8]) -> Vec<u8> {
        let mut hasher = Blake2b512::new();
        hasher.update(input);
        hasher.finalize().to_vec()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn output_size_is_64_bytes() {
        let digest = Blake512Digest;
        assert_eq!(digest.output_size(), 64);
        assert_eq!(digest.digest(b"hello").len(), 64);
    }

    #[test]
    fn deterministic() {
        let digest = Blake512Digest;
        assert_eq!(digest.digest(b"same input"), digest.digest(b"same input"));
    }

    #[test]
    fn distinguishes_inputs() {
        let digest = Blake512Digest;
        assert_ne!(digest.digest(b"a"), digest.digest(b"b"));
    }
}
