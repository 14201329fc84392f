use serde::{Deserialize, Serialize};

use crate::byte_stream::ByteStream;
use crate::chunker::{SignatureSet, SignedChunk};
use crate::error::RdiffError;

/// A single entry in the delta record stream.
///
/// Distinct from the teacher's heterogeneous-record-with-a-tag shape: each
/// variant carries exactly the payload it needs, so there is no
/// sometimes-present field to keep in sync with a separate tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DeltaRecord {
    /// Chunk shared verbatim between old and new files.
    Original(SignedChunk),
    /// Chunk present only in the new file; payload is its raw bytes.
    Added(SignedChunk, Vec<u8>),
    /// Chunk whose content changed; payload is a byte-diff script.
    Modified(SignedChunk, Vec<u8>),
    /// Chunk present only in the old file.
    Removed(SignedChunk),
}

impl DeltaRecord {
    fn wire_tag(&self) -> u64 {
        match self {
            DeltaRecord::Original(_) => 0,
            DeltaRecord::Added(_, _) => 1,
            DeltaRecord::Modified(_, _) => 2,
            DeltaRecord::Removed(_) => 3,
        }
    }

    pub fn chunk(&self) -> &SignedChunk {
        match self {
            DeltaRecord::Original(c)
            | DeltaRecord::Added(c, _)
            | DeltaRecord::Modified(c, _)
            | DeltaRecord::Removed(c) => c,
        }
    }

    fn payload(&self) -> Option<&[u8]> {
        match self {
            DeltaRecord::Added(_, bytes) | DeltaRecord::Modified(_, bytes) => Some(bytes),
            DeltaRecord::Original(_) | DeltaRecord::Removed(_) => None,
        }
    }
}

/// Position-synchronized walk over two [`SignatureSet`]s, classifying
/// chunks as ORIGINAL / ADDED / MODIFIED / REMOVED.
///
/// Cases are tried in the fixed order A through F described in the
/// component design; the first whose condition holds fires, and in cases
/// D and E the smallest qualifying lookahead index wins (`Iterator::find`
/// scans left to right).
pub fn align(
    old: &SignatureSet,
    new: &SignatureSet,
    old_stream: &mut ByteStream,
    new_stream: &mut ByteStream,
) -> Result<Vec<DeltaRecord>, RdiffError> {
    let o = &old.chunks;
    let n = &new.chunks;
    let mut oi = 0usize;
    let mut ni = 0usize;
    let mut records = Vec::new();

    while oi < o.len() || ni < n.len() {
        // Case A: old exhausted, everything left in new is added.
        if oi >= o.len() {
            records.push(read_added(new_stream, &n[ni])?);
            ni += 1;
            continue;
        }

        // Case B: new exhausted, everything left in old was removed.
        if ni >= n.len() {
            records.push(DeltaRecord::Removed(o[oi].clone()));
            oi += 1;
            continue;
        }

        // Case C: chunks line up exactly.
        if n[ni] == o[oi] {
            records.push(DeltaRecord::Original(o[oi].clone()));
            oi += 1;
            ni += 1;
            continue;
        }

        // Case D: the current new chunk matches an old chunk further
        // ahead; everything skipped over in old was removed. Don't
        // advance `ni` — the next iteration re-enters via case C.
        if let Some(j) = (oi..o.len()).find(|&j| n[ni] == o[j]) {
            for k in oi..j {
                records.push(DeltaRecord::Removed(o[k].clone()));
            }
            oi = j;
            continue;
        }

        // Case E: bounds-checked one-ahead lookahead (§9 Open Question 1).
        // If new[ni + 1] matches some later old chunk, treat new[ni] as a
        // modification of the chunk at the same position rather than an
        // insertion.
        let lookahead_matches = n
            .get(ni + 1)
            .map(|next| (oi..o.len()).any(|j| *next == o[j]))
            .unwrap_or(false);

        if lookahead_matches {
            let chunk = n[ni].clone();
            let old_bytes = old_stream.read_chunk_at(chunk.length as usize, chunk.start_offset)?;
            let new_bytes = new_stream.read_chunk_at(chunk.length as usize, chunk.start_offset)?;
            let script = byte_diff(&old_bytes, &new_bytes);
            records.push(DeltaRecord::Modified(chunk, script));
            oi += 1;
            ni += 1;
            continue;
        }

        // Case F: no correspondence found anywhere; treat as an insertion.
        records.push(read_added(new_stream, &n[ni])?);
        ni += 1;
    }

    Ok(records)
}

fn read_added(stream: &mut ByteStream, chunk: &SignedChunk) -> Result<DeltaRecord, RdiffError> {
    let bytes = stream.read_chunk_at(chunk.length as usize, chunk.start_offset)?;
    Ok(DeltaRecord::Added(chunk.clone(), bytes))
}

/// Computes a minimal per-byte edit script transforming `old` into `new`.
///
/// The wire format is `{M, R, A}` commands: `M`/`A` are 6 bytes (tag,
/// 4-byte big-endian position, value byte); `R` is 5 bytes (tag, position).
/// Positions are masked to a byte per element (§9 Open Question 2) rather
/// than narrowed by truncating shifts.
///
/// Note on the `M` command's value byte: it carries the *old* file's byte
/// at the mismatching position, matching the literal algorithm in the
/// component design (this differs from what an applier reconstructing the
/// new file would actually need — see DESIGN.md).
pub fn byte_diff(old: &[u8], new: &[u8]) -> Vec<u8> {
    let mut script = Vec::new();
    let mut i = 0usize;
    let mut j = 0usize;

    while i < old.len() && j < new.len() {
        if old[i] != new[j] {
            script.push(b'M');
            script.extend_from_slice(&(i as u32).to_be_bytes());
            script.push(old[i]);
        }
        i += 1;
        j += 1;
    }

    while i < old.len() {
        script.push(b'R');
        script.extend_from_slice(&(i as u32).to_be_bytes());
        i += 1;
    }

    while j < new.len() {
        script.push(b'A');
        script.extend_from_slice(&(j as u32).to_be_bytes());
        script.push(new[j]);
        j += 1;
    }

    script
}

/// Serializes [`DeltaRecord`]s to a delta file per the wire format in the
/// component design: `tag:u64-le`, `signature:u64-le`, `digest:raw`,
/// `length:u64-le`, then an optional payload for ADDED/MODIFIED.
///
/// Unlike the reference format, MODIFIED payloads are prefixed with their
/// own `u64`-le byte length so the stream is self-delimiting (§9 Open
/// Question 3) without requiring an applier to replay old-file state to
/// find the next record.
pub struct DeltaWriter<'a> {
    stream: &'a mut ByteStream,
}

impl<'a> DeltaWriter<'a> {
    pub fn new(stream: &'a mut ByteStream) -> Self {
        Self { stream }
    }

    pub fn write_record(&mut self, record: &DeltaRecord) -> Result<(), RdiffError> {
        let chunk = record.chunk();

        self.stream.write_all(&record.wire_tag().to_le_bytes())?;
        self.stream.write_all(&chunk.fingerprint.to_le_bytes())?;
        self.stream.write_all(&chunk.digest)?;
        self.stream.write_all(&chunk.length.to_le_bytes())?;

        if let Some(payload) = record.payload() {
            if matches!(record, DeltaRecord::Modified(_, _)) {
                self.stream
                    .write_all(&(payload.len() as u64).to_le_bytes())?;
            }
            self.stream.write_all(payload)?;
        }

        Ok(())
    }

    pub fn write_all(&mut self, records: &[DeltaRecord]) -> Result<(), RdiffError> {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }
}

/// Generates the delta between `old_signature`/`old_path` and
/// `new_path`, writing the resulting record stream to `delta_path`.
pub fn create_delta_file(
    old_signature: &SignatureSet,
    old_path: &std::path::Path,
    new_path: &std::path::Path,
    delta_path: &std::path::Path,
) -> Result<Vec<DeltaRecord>, RdiffError> {
    use crate::chunker::generate_signature;
    use crate::config::ChunkerConfig;
    use crate::digest::Blake512Digest;
    use crate::rolling_hash::RabinFingerprint;

    let config = ChunkerConfig::default();

    let new_signature = {
        let mut new_stream = ByteStream::open_read(new_path)?;
        let mut rolling = RabinFingerprint::from_config(&config);
        let digest = Blake512Digest;
        generate_signature(&mut new_stream, &mut rolling, &digest, &config)?
    };

    let mut old_stream = ByteStream::open_read(old_path)?;
    let mut new_stream = ByteStream::open_read(new_path)?;
    let records = align(old_signature, &new_signature, &mut old_stream, &mut new_stream)?;

    let mut delta_stream = ByteStream::create_write(delta_path)?;
    let mut writer = DeltaWriter::new(&mut delta_stream);
    writer.write_all(&records)?;

    tracing::info!(
        records = records.len(),
        path = %delta_path.display(),
        "wrote delta file"
    );

    Ok(records)
}
