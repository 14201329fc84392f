use crate::config::ChunkerConfig;
use crate::error::RdiffError;

/// Capability set shared by all rolling-hash implementations used by the
/// chunker and aligner.
pub trait RollingHash {
    /// Initializes the hash from the first `window_size()` bytes of `buf`,
    /// discarding any extra trailing bytes. Fails if `buf` is shorter than
    /// the window.
    fn initialize(&mut self, buf: &[u8]) -> Result<(), RdiffError>;

    /// Slides the window forward by one byte, returning the new
    /// fingerprint.
    fn roll(&mut self, next_byte: u8) -> u64;

    /// Returns the fingerprint as of the last `initialize`/`roll` call.
    fn current_fingerprint(&self) -> u64;

    /// Returns the configured window size.
    fn window_size(&self) -> usize;

    /// Returns the configured alphabet size.
    fn alphabet_size(&self) -> u64;
}

/// A Rabin fingerprint: a polynomial-mod-`M` rolling hash parameterized by
/// alphabet size, window size, and modulus.
///
/// Holds only scalar state, so copying and moving are defect-free.
#[derive(Debug, Clone, Copy)]
pub struct RabinFingerprint {
    alphabet_size: u64,
    window_size: usize,
    modulus: u64,
    fingerprint: u64,
    h: u64,
    last_byte: u8,
}

impl RabinFingerprint {
    /// Builds a Rabin fingerprint with explicit parameters, precomputing
    /// `h = alphabet_size^(window_size - 1) mod modulus`.
    pub fn new(alphabet_size: u64, window_size: usize, modulus: u64) -> Self {
        let mut h = 1u64;
        for _ in 0..window_size.saturating_sub(1) {
            h = (h * alphabet_size) % modulus;
        }
        Self {
            alphabet_size,
            window_size,
            modulus,
            fingerprint: 0,
            h,
            last_byte: 0,
        }
    }

    /// Builds a Rabin fingerprint from a [`ChunkerConfig`].
    pub fn from_config(config: &ChunkerConfig) -> Self {
        Self::new(config.alphabet_size, config.window_size, config.modulus)
    }

    /// Returns the rolling-hash modulus.
    pub fn modulus(&self) -> u64 {
        self.modulus
    }
}

impl Default for RabinFingerprint {
    fn default() -> Self {
        Self::from_config(&ChunkerConfig::default())
    }
}

impl RollingHash for RabinFingerprint {
    fn initialize(&mut self, buf: &[u8]) -> Result<(), RdiffError> {
        if buf.len() < self.window_size {
            return Err(RdiffError::InitTooShort {
                window: self.window_size,
                got: buf.len(),
            });
        }

        let window = &buf[..self.window_size];
        let mut fingerprint = 0u64;
        for &byte in window {
            fingerprint = (self.alphabet_size * fingerprint + byte as u64) % self.modulus;
        }
        self.fingerprint = fingerprint;
        self.last_byte = window[self.window_size - 1];
        Ok(())
    }

    fn roll(&mut self, next_byte: u8) -> u64 {
        // Signed 128-bit arithmetic avoids the unsigned-subtraction
        // underflow that `alphabet_size * (fingerprint - last_byte * h)`
        // would otherwise risk before the modulus is applied.
        let a = self.alphabet_size as i128;
        let m = self.modulus as i128;
        let fp = self.fingerprint as i128;
        let last = self.last_byte as i128;
        let h = self.h as i128;

        let mut new_fp = (a * (fp - last * h) + next_byte as i128) % m;
        if new_fp < 0 {
            new_fp += m;
        }

        self.fingerprint = new_fp as u64;
        self.last_byte = next_byte;
        self.fingerprint
    }

    fn current_fingerprint(&self) -> u64 {
        self.fingerprint
    }

    fn window_size(&self) -> usize {
        self.window_size
    }

    fn alphabet_size(&self) -> u64 {
        self.alphabet_size
    }
}
