//! Streaming content hashing.
//!
//! Files are read sequentially in fixed-size blocks so memory use stays
//! constant regardless of file size.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use digest::Digest;

use dupehunt_core::{ContentHash, HashAlgorithm, HashError};

/// Size of each read when streaming a file into the digest.
pub const HASH_BLOCK_SIZE: usize = 64 * 1024;

/// Computes content digests with one fixed algorithm.
///
/// A `Hasher` holds no digest state between calls, so a single instance
/// can be shared across worker threads; every call builds its own state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hasher {
    algorithm: HashAlgorithm,
}

impl Hasher {
    /// Create a hasher for the given algorithm.
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Create a hasher from an algorithm name, falling back to the default
    /// algorithm when the name is not recognised.
    pub fn from_name(name: &str) -> Self {
        let (algorithm, known) = HashAlgorithm::from_name(name);
        if !known {
            tracing::warn!(
                requested = name,
                fallback = %algorithm,
                "Unknown hash algorithm, using default"
            );
        }
        Self { algorithm }
    }

    /// Algorithm used by this hasher.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Hash the full contents of a file.
    pub fn hash_file(&self, path: &Path) -> Result<ContentHash, HashError> {
        let file = File::open(path).map_err(|e| HashError::io(path, e))?;
        self.hash_reader(file).map_err(|e| HashError::io(path, e))
    }

    /// Hash everything readable from `reader`.
    pub fn hash_reader<R: Read>(&self, mut reader: R) -> io::Result<ContentHash> {
        let mut state = DigestState::new(self.algorithm);
        let mut buffer = vec![0u8; HASH_BLOCK_SIZE];

        loop {
            let bytes_read = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            state.update(&buffer[..bytes_read]);
        }

        Ok(state.finalize())
    }
}

/// Running digest for one file.
enum DigestState {
    Sha1(sha1::Sha1),
    Sha256(sha2::Sha256),
    Sha512(sha2::Sha512),
    Md5(md5::Md5),
    Blake3(Box<blake3::Hasher>),
}

impl DigestState {
    fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Sha1 => Self::Sha1(sha1::Sha1::new()),
            HashAlgorithm::Sha256 => Self::Sha256(sha2::Sha256::new()),
            HashAlgorithm::Sha512 => Self::Sha512(sha2::Sha512::new()),
            HashAlgorithm::Md5 => Self::Md5(md5::Md5::new()),
            HashAlgorithm::Blake3 => Self::Blake3(Box::new(blake3::Hasher::new())),
        }
    }

    fn update(&mut self, block: &[u8]) {
        match self {
            Self::Sha1(h) => Digest::update(h, block),
            Self::Sha256(h) => Digest::update(h, block),
            Self::Sha512(h) => Digest::update(h, block),
            Self::Md5(h) => Digest::update(h, block),
            Self::Blake3(h) => {
                h.update(block);
            }
        }
    }

    fn finalize(self) -> ContentHash {
        match self {
            Self::Sha1(h) => ContentHash::from_bytes(&h.finalize()),
            Self::Sha256(h) => ContentHash::from_bytes(&h.finalize()),
            Self::Sha512(h) => ContentHash::from_bytes(&h.finalize()),
            Self::Md5(h) => ContentHash::from_bytes(&h.finalize()),
            Self::Blake3(h) => ContentHash::from_bytes(h.finalize().as_bytes()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use strum::IntoEnumIterator;
    use tempfile::TempDir;

    #[test]
    fn test_known_digests() {
        let cases = [
            (HashAlgorithm::Md5, "900150983cd24fb0d6963f7d28e17f72"),
            (HashAlgorithm::Sha1, "a9993e364706816aba3e25717850c26c9cd0d89d"),
            (
                HashAlgorithm::Sha256,
                "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
            ),
        ];

        for (alg, expected) in cases {
            let hash = Hasher::new(alg).hash_reader(&b"abc"[..]).unwrap();
            assert_eq!(hash.as_hex(), expected, "{alg}");
        }
    }

    #[test]
    fn test_digest_lengths() {
        for alg in HashAlgorithm::iter() {
            let hash = Hasher::new(alg).hash_reader(&b"content"[..]).unwrap();
            let expected = match alg {
                HashAlgorithm::Md5 => 32,
                HashAlgorithm::Sha1 => 40,
                HashAlgorithm::Sha256 | HashAlgorithm::Blake3 => 64,
                HashAlgorithm::Sha512 => 128,
            };
            assert_eq!(hash.as_hex().len(), expected, "{alg}");
        }
    }

    #[test]
    fn test_multi_block_file_matches_single_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("big.bin");
        let data: Vec<u8> = (0..HASH_BLOCK_SIZE * 3 + 17).map(|i| (i % 251) as u8).collect();
        fs::write(&path, &data).unwrap();

        let hasher = Hasher::new(HashAlgorithm::Sha256);
        let streamed = hasher.hash_file(&path).unwrap();
        let expected = ContentHash::from_bytes(&sha2::Sha256::digest(&data));
        assert_eq!(streamed, expected);
    }

    #[test]
    fn test_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        let err = Hasher::default()
            .hash_file(&temp.path().join("gone.bin"))
            .unwrap_err();
        assert!(matches!(err, HashError::NotFound { .. }));
    }

    #[test]
    fn test_from_name_falls_back_to_default() {
        assert_eq!(Hasher::from_name("whirlpool").algorithm(), HashAlgorithm::Sha1);
        assert_eq!(Hasher::from_name("sha512").algorithm(), HashAlgorithm::Sha512);
    }
}
