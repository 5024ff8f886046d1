//! Track signatures and fingerprints.
//!
//! A track signature is the ordered list of (codec, track number, language,
//! track type) tuples for one container file, exactly as reported by the
//! identification facility. Order is intentional: a file with tracks
//! [video, audio-en, audio-jp] is structurally distinct from one with
//! [video, audio-jp, audio-en].
//!
//! The fingerprint is a stable CRC-32 digest over a canonical serialization
//! of the signature. Identical signatures always yield identical fingerprints
//! across runs; collision resistance is not a security requirement here, only
//! grouping accuracy.

use std::fmt;

/// ASCII unit separator, placed between the four fields of one track.
const FIELD_SEP: u8 = 0x1f;

/// ASCII record separator, placed between tracks.
const TRACK_SEP: u8 = 0x1e;

/// The four metadata fields of one track, each an opaque string as reported
/// by the identification facility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackFields {
    pub codec: String,
    pub number: String,
    pub language: String,
    pub track_type: String,
}

/// Ordered sequence of per-track fields, in the container's native track
/// order. Equality is element-wise, including order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackSignature {
    pub tracks: Vec<TrackFields>,
}

impl TrackSignature {
    pub fn new(tracks: Vec<TrackFields>) -> Self {
        TrackSignature { tracks }
    }

    /// Number of tracks in the signature.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Computes the fingerprint of this signature.
    ///
    /// Pure and total: the empty signature yields a well-defined fingerprint
    /// (its own valid, if likely unintended, equivalence class). The field and
    /// track separators are ASCII control characters that cannot occur in the
    /// metadata values the identification facility reports, so field and
    /// track boundaries cannot be confused with content.
    pub fn fingerprint(&self) -> Fingerprint {
        let mut hasher = crc32fast::Hasher::new();
        for (i, track) in self.tracks.iter().enumerate() {
            if i > 0 {
                hasher.update(&[TRACK_SEP]);
            }
            hasher.update(track.codec.as_bytes());
            hasher.update(&[FIELD_SEP]);
            hasher.update(track.number.as_bytes());
            hasher.update(&[FIELD_SEP]);
            hasher.update(track.language.as_bytes());
            hasher.update(&[FIELD_SEP]);
            hasher.update(track.track_type.as_bytes());
        }
        Fingerprint(hasher.finalize())
    }
}

/// Deterministic digest of a track signature, used as a grouping and
/// equality key. The string form (eight lowercase hex digits) names group
/// directories in split mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fingerprint(pub u32);

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}
