/// Packets whose encoded size is only known once the value exists,
/// e.g. a tag carrying a length-prefixed payload.
pub trait DynamicSizedPacket {
    fn get_packet_bytes_count(&self) -> usize;
}
