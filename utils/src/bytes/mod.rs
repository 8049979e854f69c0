use crate::traits::writer::WriteTo;
use std::fmt::Write;

/// Lower-case hex dump of at most `limit` leading bytes,
/// an ellipsis marks a cut.
pub fn bytes_to_hex(bytes: &[u8], limit: usize) -> String {
    let shown = &bytes[..bytes.len().min(limit)];
    let mut s = String::with_capacity(shown.len() * 3 + 3);
    for (i, b) in shown.iter().enumerate() {
        if i > 0 {
            s.push(' ');
        }
        let _ = write!(&mut s, "{:02x}", b);
    }
    if shown.len() < bytes.len() {
        s.push_str(" ..");
    }
    s
}

pub fn writable_to_bytes<E, T: WriteTo<Vec<u8>, Error = E>>(writable: &T) -> Result<Vec<u8>, E> {
    let mut bytes = vec![];
    writable.write_to(&mut bytes)?;
    Ok(bytes)
}
