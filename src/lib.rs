pub mod byte_stream;
pub mod chunker;
pub mod config;
pub mod delta;
pub mod digest;
pub mod error;
pub mod rolling_hash;

pub use byte_stream::ByteStream;
pub use chunker::{create_signature_file, generate_signature, SignatureSet, SignedChunk};
pub use config::ChunkerConfig;
pub use delta::{align, byte_diff, create_delta_file, DeltaRecord, DeltaWriter};
pub use digest::{Blake512Digest, StrongDigest};
pub use error::RdiffError;
pub use rolling_hash::{RabinFingerprint, RollingHash};
