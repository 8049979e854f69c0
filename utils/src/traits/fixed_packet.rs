/// Packets whose encoded size never depends on their content.
pub trait FixedPacket {
    fn bytes_count() -> usize;
}
