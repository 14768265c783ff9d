use std::fmt;

/// A fixed 32-byte key.
///
/// Used both for transaction content hashes and for account identities;
/// the bytes are opaque to this crate.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Byte32([u8; 32]);

impl Byte32 {
    /// Wrap a raw 32-byte array.
    pub const fn new(inner: [u8; 32]) -> Self {
        Byte32(inner)
    }

    /// The all-zero key.
    pub const fn zero() -> Self {
        Byte32([0u8; 32])
    }

    /// Copy from a slice; `None` unless it is exactly 32 bytes long.
    pub fn from_slice(src: &[u8]) -> Option<Self> {
        let inner: [u8; 32] = src.try_into().ok()?;
        Some(Byte32(inner))
    }
}

impl From<[u8; 32]> for Byte32 {
    fn from(inner: [u8; 32]) -> Self {
        Byte32(inner)
    }
}

impl fmt::LowerHex for Byte32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "0x")?;
        }
        let mut buf = [0u8; 64];
        faster_hex::hex_encode(&self.0, &mut buf).map_err(|_| fmt::Error)?;
        let hex = std::str::from_utf8(&buf).map_err(|_| fmt::Error)?;
        f.write_str(hex)
    }
}

impl fmt::Display for Byte32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:#x}")
    }
}

impl fmt::Debug for Byte32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Byte32({self:#x})")
    }
}
