use std::io::{self, Cursor};

/// Decode a value from a blocking byte source.
///
/// Implementations either return a complete value or an error,
/// a partially decoded value is never handed out.
pub trait ReadFrom<R: io::Read>: Sized {
    type Error;
    fn read_from(reader: R) -> Result<Self, Self::Error>;
}

/// Decode a value from an in-memory buffer that may not hold all of it yet.
///
/// `Ok(None)` means more bytes are needed, in that case the cursor position
/// is unspecified and the caller should retry from the original position.
pub trait TryReadFrom<R: AsRef<[u8]>>: Sized {
    type Error;
    fn try_read_from(reader: &mut Cursor<R>) -> Result<Option<Self>, Self::Error>;
}
