/// Tunable parameters of the rolling-hash chunker.
///
/// These are not exposed on the CLI (matching the reference tool, which
/// hardcodes them) but are part of the core's configuration surface so a
/// library caller can plug in different values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkerConfig {
    /// Rolling-hash alphabet size.
    pub alphabet_size: u64,
    /// Rolling-hash window size `W`.
    pub window_size: usize,
    /// Rolling-hash modulus `M`.
    pub modulus: u64,
    /// Bit pattern applied to the `(prev, curr)` byte pair whose zero match
    /// defines a chunk boundary.
    pub boundary_mask: u32,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            alphabet_size: 256,
            window_size: 48,
            modulus: i32::MAX as u64,
            boundary_mask: 0x1FFF,
        }
    }
}
