#[cfg(test)]
mod tests {
    use std::{collections::VecDeque, io};

    use byteorder::{BigEndian, WriteBytesExt};
    use tokio_util::{bytes::BytesMut, codec::Decoder};
    use utils::{
        bytes::writable_to_bytes,
        traits::{
            dynamic_sized_packet::DynamicSizedPacket,
            reader::{ReadFrom, TryReadFrom},
        },
    };

    use crate::{
        errors::FLVError,
        header::FLVHeader,
        tag::{
            FLVTag,
            audio_tag_header::{SoundFormat, SoundRate, SoundSize, SoundType},
            flv_tag_header::FLVTagType,
            framed::FLVMessageFramed,
            reader::Reader,
            video_tag_header::{AVCPacketType, CodecID, FrameTypeFLV},
        },
        telemetry::Telemetry,
    };

    struct RawTag<'a> {
        tag_type: u8,
        data_size: u32,
        timestamp: u32,
        timestamp_extended: u8,
        stream_id: u32,
        payload: &'a [u8],
        footer: Option<u32>,
    }

    impl<'a> RawTag<'a> {
        fn new(tag_type: u8, payload: &'a [u8]) -> Self {
            Self {
                tag_type,
                data_size: payload.len() as u32,
                timestamp: 0,
                timestamp_extended: 0,
                stream_id: 0,
                payload,
                footer: Some(11 + payload.len() as u32),
            }
        }

        fn bytes(&self) -> Vec<u8> {
            let mut bytes = vec![];
            bytes.write_u8(self.tag_type).unwrap();
            bytes.write_u24::<BigEndian>(self.data_size).unwrap();
            bytes.write_u24::<BigEndian>(self.timestamp).unwrap();
            bytes.write_u8(self.timestamp_extended).unwrap();
            bytes.write_u24::<BigEndian>(self.stream_id).unwrap();
            bytes.extend_from_slice(self.payload);
            if let Some(footer) = self.footer {
                bytes.write_u32::<BigEndian>(footer).unwrap();
            }
            bytes
        }
    }

    /// Hands out the scripted chunks in order, one chunk per `read` at most.
    struct ScriptedSource {
        chunks: VecDeque<io::Result<Vec<u8>>>,
    }

    impl ScriptedSource {
        fn new(chunks: Vec<io::Result<Vec<u8>>>) -> Self {
            Self {
                chunks: chunks.into(),
            }
        }
    }

    impl io::Read for ScriptedSource {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.chunks.pop_front() {
                None => Ok(0),
                Some(Err(err)) => Err(err),
                Some(Ok(mut chunk)) => {
                    let n = chunk.len().min(buf.len());
                    buf[..n].copy_from_slice(&chunk[..n]);
                    if n < chunk.len() {
                        self.chunks.push_front(Ok(chunk.split_off(n)));
                    }
                    Ok(n)
                }
            }
        }
    }

    fn quiet_reader(bytes: &[u8]) -> Reader<&[u8]> {
        Reader::with_telemetry(bytes, Telemetry::none())
    }

    #[test]
    fn extended_timestamp_is_the_high_byte() {
        let raw = RawTag {
            timestamp: 0x000002,
            timestamp_extended: 0x01,
            ..RawTag::new(9, &[0x27, 0x01])
        };
        let tag = FLVTag::read_from(&raw.bytes()[..]).unwrap();
        assert_eq!(tag.timestamp(), 0x0100_0002);

        let raw = RawTag {
            timestamp: 0xFFFFFF,
            timestamp_extended: 0xFF,
            ..RawTag::new(9, &[0x27, 0x01])
        };
        let tag = FLVTag::read_from(&raw.bytes()[..]).unwrap();
        assert_eq!(tag.timestamp(), 0xFFFF_FFFF);
    }

    #[test]
    fn payload_holds_exactly_data_size_bytes() {
        let payload: Vec<u8> = (0..=255).collect();
        let bytes = RawTag::new(8, &payload).bytes();
        let mut reader = quiet_reader(&bytes);
        let tag = reader.read_next().unwrap().unwrap();
        assert_eq!(tag.tag_type(), FLVTagType::Audio);
        assert_eq!(tag.data_size(), 256);
        assert_eq!(tag.payload().len(), 256);
        assert_eq!(&tag.payload()[..], &payload[..]);
        assert_eq!(reader.position(), bytes.len() as u64);
        assert_eq!(tag.get_packet_bytes_count(), bytes.len());
    }

    #[test]
    fn empty_payload() {
        let bytes = RawTag::new(18, &[]).bytes();
        let tag = FLVTag::read_from(&bytes[..]).unwrap();
        assert_eq!(tag.data_size(), 0);
        assert!(tag.payload().is_empty());
    }

    #[test]
    fn truncated_payload_is_a_format_error() {
        let mut bytes = RawTag {
            data_size: 100,
            footer: None,
            ..RawTag::new(9, &[0x17; 10])
        }
        .bytes();
        bytes.truncate(11 + 10);
        let err = quiet_reader(&bytes).read_next().unwrap_err();
        assert!(matches!(
            err,
            FLVError::TruncatedPayload {
                expected: 100,
                received: 10,
                offset: 11
            }
        ));
        assert!(err.is_format());
    }

    #[test]
    fn short_tag_header_is_a_transport_error() {
        let bytes = RawTag::new(9, &[0x17, 0x00]).bytes();
        let err = quiet_reader(&bytes[..5]).read_next().unwrap_err();
        assert!(matches!(
            &err,
            FLVError::Transport { field: "tag header", offset: 0, source }
                if source.kind() == io::ErrorKind::UnexpectedEof
        ));
        assert!(err.is_transport());
    }

    #[test]
    fn clean_end_of_stream() {
        let mut reader = quiet_reader(&[]);
        assert!(reader.read_next().unwrap().is_none());
        assert!(reader.read().unwrap_err().is_transport());
    }

    #[test]
    fn offsets_start_where_the_reader_was_placed() {
        let bytes = RawTag::new(9, &[0x17, 0x00]).bytes();
        let err = Reader::with_telemetry(&bytes[..3], Telemetry::none())
            .starting_at(13)
            .read_next()
            .unwrap_err();
        assert!(matches!(err, FLVError::Transport { offset: 13, .. }));
    }

    #[test]
    fn missing_footer_is_tolerated() {
        let bytes = RawTag {
            footer: None,
            ..RawTag::new(9, &[0x27, 0x01, 0x00])
        }
        .bytes();
        let mut reader = quiet_reader(&bytes);
        let tag = reader.read_next().unwrap().unwrap();
        assert_eq!(&tag.payload()[..], &[0x27, 0x01, 0x00]);
        assert!(reader.read_next().unwrap().is_none());
    }

    #[test]
    fn footer_mismatch_is_tolerated() {
        let mut bytes = RawTag {
            footer: Some(0xDEAD),
            ..RawTag::new(8, &[0xAF, 0x01])
        }
        .bytes();
        bytes.extend(RawTag::new(8, &[0xAF, 0x01, 0x02]).bytes());
        let mut reader = quiet_reader(&bytes);
        assert_eq!(reader.read_next().unwrap().unwrap().data_size(), 2);
        assert_eq!(reader.read_next().unwrap().unwrap().data_size(), 3);
        assert!(reader.read_next().unwrap().is_none());
    }

    #[test]
    fn source_failure_inside_the_footer_is_fatal() {
        let first = RawTag::new(9, &[0x17, 0x00, 0x00, 0x00, 0x00]).bytes();
        let second = RawTag::new(8, &[0xAF, 0x01]).bytes();
        let footer_start = first.len() - 4;
        let source = ScriptedSource::new(vec![
            Ok(first[..footer_start + 2].to_vec()),
            Err(io::ErrorKind::ConnectionReset.into()),
            Ok(first[footer_start + 2..].to_vec()),
            Ok(second),
        ]);

        let err = Reader::with_telemetry(source, Telemetry::none())
            .read_next()
            .unwrap_err();
        assert!(matches!(
            &err,
            FLVError::Transport { field: "previous tag size", offset: 16, source }
                if source.kind() == io::ErrorKind::ConnectionReset
        ));
        assert!(err.is_transport());
    }

    #[test]
    fn interrupted_reads_are_retried() {
        let bytes = RawTag::new(9, &[0x27, 0x01]).bytes();
        let source = ScriptedSource::new(vec![
            Ok(bytes[..5].to_vec()),
            Err(io::ErrorKind::Interrupted.into()),
            Ok(bytes[5..bytes.len() - 2].to_vec()),
            Err(io::ErrorKind::Interrupted.into()),
            Ok(bytes[bytes.len() - 2..].to_vec()),
        ]);
        let mut reader = Reader::with_telemetry(source, Telemetry::none());
        assert_eq!(reader.read_next().unwrap().unwrap().data_size(), 2);
        assert_eq!(reader.position(), bytes.len() as u64);
        assert!(reader.read_next().unwrap().is_none());
    }

    #[test]
    fn short_footer_still_counts_toward_the_position() {
        let mut bytes = RawTag::new(9, &[0x27, 0x01, 0x00]).bytes();
        bytes.truncate(bytes.len() - 2);
        let mut reader = quiet_reader(&bytes);
        assert!(reader.read_next().unwrap().is_some());
        assert_eq!(reader.position(), (11 + 3 + 2) as u64);
        assert!(reader.read_next().unwrap().is_none());
    }

    #[test]
    fn unknown_tag_types_pass_through() {
        let tag = FLVTag::read_from(&RawTag::new(7, &[1, 2, 3]).bytes()[..]).unwrap();
        assert_eq!(tag.tag_type(), FLVTagType::Unknown(7));
        assert!(matches!(
            tag.tag_type().known(),
            Err(FLVError::UnknownFLVTagType(7))
        ));
        assert_eq!(tag.payload().len(), 3);

        let tag = FLVTag::read_from(&RawTag::new(0x28, &[0xAF, 0x01]).bytes()[..]).unwrap();
        assert_eq!(tag.tag_type(), FLVTagType::Unknown(0x28));
        assert!(tag.tag_type().is_filtered());
        assert!(!tag.tag_type().is_audio());
        assert!(FLVTagType::Audio.known().is_ok());
        assert!(!FLVTagType::Audio.is_filtered());
    }

    #[test]
    fn non_zero_stream_id_is_kept() {
        let raw = RawTag {
            stream_id: 0x010203,
            ..RawTag::new(9, &[0x27])
        };
        let tag = quiet_reader(&raw.bytes()).read_next().unwrap().unwrap();
        assert_eq!(tag.stream_id(), 0x010203);
    }

    #[test]
    fn write_then_read() {
        let tag = FLVTag::new(
            FLVTagType::Video,
            0x7F12_3456,
            vec![0x17_u8, 0x01, 0, 0, 0, 0xAA],
        )
        .unwrap();
        let bytes = writable_to_bytes(&tag).unwrap();
        assert_eq!(bytes.len(), tag.get_packet_bytes_count());
        assert_eq!(&bytes[4..8], &[0x12, 0x34, 0x56, 0x7F]);
        assert_eq!(&bytes[bytes.len() - 4..], &[0, 0, 0, 17]);
        assert_eq!(FLVTag::read_from(&bytes[..]).unwrap(), tag);
    }

    #[test]
    fn oversized_payload_is_rejected() {
        let err = FLVTag::new(FLVTagType::Video, 0, vec![0_u8; 0x100_0000]).unwrap_err();
        assert!(matches!(err, FLVError::PayloadTooLarge(0x100_0000)));
    }

    #[test]
    fn video_prefix() {
        let tag = FLVTag::new(FLVTagType::Video, 0, vec![0x17_u8, 0x00, 0x00, 0x00, 0x00]).unwrap();
        let header = tag.video_tag_header().unwrap().unwrap();
        assert_eq!(header.frame_type, FrameTypeFLV::KeyFrame);
        assert_eq!(header.codec_id, CodecID::AVC);
        assert_eq!(header.avc_packet_type, Some(AVCPacketType::SequenceHeader));
        assert_eq!(header.composition_time, Some(0));
        assert!(header.is_key_frame());
        assert!(header.is_sequence_header());
        assert!(tag.audio_tag_header().unwrap().is_none());

        let tag = FLVTag::new(FLVTagType::Video, 0, vec![0x27_u8, 0x01, 0xFF, 0xFF, 0xFE]).unwrap();
        let header = tag.video_tag_header().unwrap().unwrap();
        assert_eq!(header.frame_type, FrameTypeFLV::InterFrame);
        assert_eq!(header.avc_packet_type, Some(AVCPacketType::NALU));
        assert_eq!(header.composition_time, Some(-2));

        let tag = FLVTag::new(FLVTagType::Video, 0, vec![0x22_u8, 0x00]).unwrap();
        let header = tag.video_tag_header().unwrap().unwrap();
        assert_eq!(header.codec_id, CodecID::SorensonH263);
        assert_eq!(header.avc_packet_type, None);
        assert!(!header.is_sequence_header());

        let tag = FLVTag::new(FLVTagType::Video, 0, vec![0x11_u8]).unwrap();
        assert!(matches!(
            tag.video_tag_header(),
            Err(FLVError::UnknownCodecID(1))
        ));
    }

    #[test]
    fn audio_prefix() {
        let tag = FLVTag::new(FLVTagType::Audio, 0, vec![0xAF_u8, 0x00, 0x12, 0x10]).unwrap();
        let header = tag.audio_tag_header().unwrap().unwrap();
        assert_eq!(header.sound_format, SoundFormat::AAC);
        assert_eq!(header.sound_rate, SoundRate::KHZ44);
        assert_eq!(header.sound_size, SoundSize::Bit16);
        assert_eq!(header.sound_type, SoundType::Stereo);
        assert!(header.is_aac());
        assert!(header.is_sequence_header());
        assert!(tag.video_tag_header().unwrap().is_none());

        let tag = FLVTag::new(FLVTagType::Audio, 0, vec![0x2E_u8, 0xFF]).unwrap();
        let header = tag.audio_tag_header().unwrap().unwrap();
        assert_eq!(header.sound_format, SoundFormat::MP3);
        assert_eq!(header.aac_packet_type, None);
        assert!(!header.is_sequence_header());

        let tag = FLVTag::new(FLVTagType::Audio, 0, Vec::<u8>::new()).unwrap();
        assert!(tag.audio_tag_header().is_err());
    }

    #[test]
    fn try_read_waits_for_the_footer() {
        let bytes = RawTag::new(9, &[0x17, 0x00, 0x00]).bytes();
        let mut cursor = io::Cursor::new(&bytes[..bytes.len() - 1]);
        assert!(FLVTag::try_read_from(&mut cursor).unwrap().is_none());

        let mut cursor = io::Cursor::new(&bytes[..]);
        let tag = FLVTag::try_read_from(&mut cursor).unwrap().unwrap();
        assert_eq!(tag.data_size(), 3);
        assert_eq!(cursor.position(), bytes.len() as u64);
    }

    fn stream_header() -> Vec<u8> {
        writable_to_bytes(&FLVHeader::new(true, true)).unwrap()
    }

    #[test]
    fn framed_decoder_waits_for_whole_frames() {
        let mut stream = stream_header();
        stream.extend(RawTag::new(9, &[0x17, 0x00, 0x00, 0x00, 0x00]).bytes());
        stream.extend(RawTag::new(8, &[0xAF, 0x01, 0x21]).bytes());

        let mut framed = FLVMessageFramed::with_telemetry(Telemetry::none());
        let mut buf = BytesMut::new();
        let mut messages = vec![];
        for chunk in stream.chunks(4) {
            buf.extend_from_slice(chunk);
            while let Some(message) = framed.decode(&mut buf).unwrap() {
                messages.push(message);
            }
        }

        assert!(buf.is_empty());
        assert_eq!(framed.position(), stream.len() as u64);
        assert_eq!(messages.len(), 2);
        assert!(messages[0].is_video_sequence_header());
        assert!(!messages[1].is_audio_sequence_header());
        assert!(std::sync::Arc::ptr_eq(messages[0].header(), messages[1].header()));
        assert!(std::sync::Arc::ptr_eq(
            messages[0].header(),
            framed.header().unwrap()
        ));
    }

    #[test]
    fn framed_decoder_header_only() {
        let mut framed = FLVMessageFramed::with_telemetry(Telemetry::none());
        let mut buf = BytesMut::from(&stream_header()[..8]);
        assert!(framed.decode(&mut buf).unwrap().is_none());
        assert!(framed.header().is_none());
        assert!(matches!(
            framed.decode_eof(&mut buf),
            Err(FLVError::Transport {
                field: "flv header",
                ..
            })
        ));

        let mut buf = BytesMut::from(&b"FLX\x01\x05\x00\x00\x00\x09\x00\x00\x00\x00"[..]);
        assert!(matches!(
            FLVMessageFramed::with_telemetry(Telemetry::none()).decode(&mut buf),
            Err(FLVError::UnknownSignature(_))
        ));
    }

    #[test]
    fn framed_decoder_last_tag_without_footer() {
        let mut stream = stream_header();
        stream.extend(
            RawTag {
                footer: None,
                ..RawTag::new(8, &[0xAF, 0x00, 0x12, 0x10])
            }
            .bytes(),
        );
        let mut framed = FLVMessageFramed::with_telemetry(Telemetry::none());
        let mut buf = BytesMut::from(&stream[..]);
        assert!(framed.decode(&mut buf).unwrap().is_none());
        let message = framed.decode_eof(&mut buf).unwrap().unwrap();
        assert!(message.is_audio_sequence_header());
        assert!(buf.is_empty());
        assert!(framed.decode_eof(&mut buf).unwrap().is_none());
    }

    #[test]
    fn framed_decoder_truncated_at_eof() {
        let mut stream = stream_header();
        stream.extend(RawTag::new(9, &[0x17; 20]).bytes());
        stream.truncate(13 + 11 + 5);
        let mut framed = FLVMessageFramed::with_telemetry(Telemetry::none());
        let mut buf = BytesMut::from(&stream[..]);
        assert!(matches!(
            framed.decode_eof(&mut buf),
            Err(FLVError::TruncatedPayload {
                expected: 20,
                received: 5,
                offset: 24
            })
        ));

        let mut buf = BytesMut::from(&stream[..13 + 6]);
        let mut framed = FLVMessageFramed::with_telemetry(Telemetry::none());
        assert!(matches!(
            framed.decode_eof(&mut buf),
            Err(FLVError::Transport {
                field: "tag header",
                offset: 13,
                ..
            })
        ));
    }
}
