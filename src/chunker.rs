use serde::{Deserialize, Serialize};

use crate::byte_stream::ByteStream;
use crate::config::ChunkerConfig;
use crate::digest::StrongDigest;
use crate::error::RdiffError;
use crate::rolling_hash::RollingHash;

/// Metadata identifying a single content-defined chunk of a file.
///
/// Equality deliberately excludes `start_offset`: two chunks with the same
/// fingerprint, digest, and length are considered the same chunk content
/// wherever they occur.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedChunk {
    /// Rolling-hash value at the chunk's closing window.
    pub fingerprint: u64,
    /// Strong digest over the chunk's bytes.
    pub digest: Vec<u8>,
    /// Byte offset of the chunk's first byte in its source file.
    pub start_offset: u64,
    /// Chunk length in bytes.
    pub length: u64,
}

impl PartialEq for SignedChunk {
    fn eq(&self, other: &Self) -> bool {
        self.fingerprint == other.fingerprint
            && self.digest == other.digest
            && self.length == other.length
    }
}

impl Eq for SignedChunk {}

/// Ordered, read-only sequence of [`SignedChunk`]s covering one file
/// exactly once, in ascending `start_offset`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignatureSet {
    pub chunks: Vec<SignedChunk>,
}

impl SignatureSet {
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

/// Streams `stream` through `rolling`/`digest`, emitting a [`SignatureSet`].
///
/// Implements the content-defined chunking algorithm: read a window,
/// initialize the rolling hash, then roll byte by byte until the boundary
/// predicate fires on the low `boundary_mask` bits of `(prev, curr)`, at
/// which point the chunk is emitted and the window is re-primed from
/// scratch for the next chunk.
pub fn generate_signature<R: RollingHash, D: StrongDigest>(
    stream: &mut ByteStream,
    rolling: &mut R,
    digest: &D,
    config: &ChunkerConfig,
) -> Result<SignatureSet, RdiffError> {
    let window = rolling.window_size();
    let mut bytes_read: u64 = 0;
    let mut chunks = Vec::new();

    let first = stream.read_chunk(window)?;
    bytes_read += first.len() as u64;

    if first.len() < window {
        // Empty file -> empty SignatureSet; short file -> one chunk with
        // fingerprint 0, since no roll ever occurred.
        if !first.is_empty() {
            chunks.push(SignedChunk {
                fingerprint: 0,
                digest: digest.digest(&first),
                start_offset: 0,
                length: first.len() as u64,
            });
        }
        return Ok(SignatureSet { chunks });
    }

    rolling.initialize(&first)?;
    let mut chunk = first;

    loop {
        let next_byte = match stream.read_byte()? {
            Some(b) => b,
            None => break,
        };

        let last = *chunk.last().expect("chunk is primed with a full window");
        chunk.push(next_byte);
        bytes_read += 1;
        let fingerprint = rolling.roll(next_byte);

        let pair = (u32::from(last) << 8) | u32::from(next_byte);
        if pair & config.boundary_mask != 0 {
            continue;
        }

        chunks.push(SignedChunk {
            fingerprint,
            digest: digest.digest(&chunk),
            start_offset: bytes_read - chunk.len() as u64,
            length: chunk.len() as u64,
        });
        chunk.clear();

        let reprimed = stream.read_chunk(window)?;
        bytes_read += reprimed.len() as u64;

        if reprimed.is_empty() {
            return Ok(SignatureSet { chunks });
        }
        if reprimed.len() < window {
            // Trailing partial run shorter than the window: emit it as the
            // final chunk and stop, matching the "no roll occurred"
            // fingerprint-is-zero rule for under-window data.
            chunks.push(SignedChunk {
                fingerprint: 0,
                digest: digest.digest(&reprimed),
                start_offset: bytes_read - reprimed.len() as u64,
                length: reprimed.len() as u64,
            });
            return Ok(SignatureSet { chunks });
        }

        rolling.initialize(&reprimed)?;
        chunk = reprimed;
    }

    if !chunk.is_empty() {
        chunks.push(SignedChunk {
            fingerprint: rolling.current_fingerprint(),
            digest: digest.digest(&chunk),
            start_offset: bytes_read - chunk.len() as u64,
            length: chunk.len() as u64,
        });
    }

    Ok(SignatureSet { chunks })
}

/// Generates a signature for the file at `input_path` and writes it,
/// `bincode`-serialized, to `signature_path`.
pub fn create_signature_file(
    input_path: &std::path::Path,
    signature_path: &std::path::Path,
) -> Result<SignatureSet, RdiffError> {
    use crate::digest::Blake512Digest;
    use crate::rolling_hash::RabinFingerprint;

    let config = ChunkerConfig::default();
    let mut input = ByteStream::open_read(input_path)?;
    let mut rolling = RabinFingerprint::from_config(&config);
    let digest = Blake512Digest;

    let signature = generate_signature(&mut input, &mut rolling, &digest, &config)?;

    let mut sig_file = std::fs::File::create(signature_path)?;
    bincode::serialize_into(&mut sig_file, &signature)?;

    tracing::info!(
        chunks = signature.len(),
        path = %signature_path.display(),
        "wrote signature file"
    );

    Ok(signature)
}
