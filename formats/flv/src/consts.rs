pub const FLV_SIGNATURE: [u8; 3] = [b'F', b'L', b'V'];
pub const FLV_VERSION: u8 = 1;

/// Signature, version, flags and data offset.
pub const FLV_HEADER_SIZE: usize = 9;
pub const PREVIOUS_TAG_SIZE_SIZE: usize = 4;
pub const FLV_TAG_HEADER_SIZE: usize = 11;

/// Largest payload a 24 bit data size can describe.
pub const MAX_TAG_DATA_SIZE: u32 = 0x00FF_FFFF;

pub mod type_flags {
    pub const AUDIO_SHIFT: u8 = 2;
    pub const VIDEO_SHIFT: u8 = 0;
}

/// The tag type byte is `reserved(2) | filter(1) | tag type(5)`.
pub const TAG_FILTER_SHIFT: u8 = 5;
