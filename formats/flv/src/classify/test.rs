#[cfg(test)]
mod tests {
    use crate::{
        classify::{Classification, classify, classify_parts},
        tag::{FLVTag, flv_tag_header::FLVTagType},
    };

    fn tag(tag_type: FLVTagType, payload: &'static [u8]) -> FLVTag {
        FLVTag::new(tag_type, 0, payload).unwrap()
    }

    #[test]
    fn avc_sequence_header() {
        let result = classify(&tag(FLVTagType::Video, &[0x17, 0x00, 0x00, 0x00, 0x00, 0x01]));
        assert_eq!(
            result,
            Classification {
                is_video_sequence_header: true,
                is_audio_sequence_header: false,
                is_meta_data: false,
            }
        );
    }

    #[test]
    fn avc_inter_frame_nalu() {
        let result = classify(&tag(FLVTagType::Video, &[0x27, 0x01, 0x00, 0x00, 0x00]));
        assert!(!result.is_video_sequence_header);
    }

    #[test]
    fn avc_packet_type_zero_on_inter_frame() {
        let result = classify(&tag(FLVTagType::Video, &[0x27, 0x00]));
        assert!(!result.is_video_sequence_header);
    }

    #[test]
    fn non_avc_key_frame() {
        // HEVC key frame with packet type 0 is not recognized
        let result = classify(&tag(FLVTagType::Video, &[0x1C, 0x00]));
        assert!(!result.is_video_sequence_header);
        // Sorenson H.263 key frame
        let result = classify(&tag(FLVTagType::Video, &[0x12, 0x00]));
        assert!(!result.is_video_sequence_header);
    }

    #[test]
    fn aac_sequence_header() {
        let result = classify(&tag(FLVTagType::Audio, &[0xAF, 0x00]));
        assert_eq!(
            result,
            Classification {
                is_video_sequence_header: false,
                is_audio_sequence_header: true,
                is_meta_data: false,
            }
        );
    }

    #[test]
    fn aac_raw() {
        let result = classify(&tag(FLVTagType::Audio, &[0xAF, 0x01, 0x21]));
        assert!(!result.is_audio_sequence_header);
    }

    #[test]
    fn mp3_is_never_a_sequence_header() {
        let result = classify(&tag(FLVTagType::Audio, &[0x2F, 0x00]));
        assert!(!result.is_audio_sequence_header);
    }

    #[test]
    fn short_payloads() {
        assert_eq!(
            classify(&tag(FLVTagType::Video, &[0x17])),
            Classification::default()
        );
        assert_eq!(
            classify(&tag(FLVTagType::Audio, &[0xAF])),
            Classification::default()
        );
        assert_eq!(classify(&tag(FLVTagType::Video, &[])), Classification::default());
    }

    #[test]
    fn markers_only_count_for_the_matching_tag_type() {
        let result = classify(&tag(FLVTagType::Audio, &[0x17, 0x00]));
        assert!(!result.is_video_sequence_header);
        let result = classify(&tag(FLVTagType::Video, &[0xAF, 0x00]));
        assert!(!result.is_audio_sequence_header);
        let result = classify(&tag(FLVTagType::Unknown(0x29), &[0x17, 0x00]));
        assert_eq!(result, Classification::default());
    }

    #[test]
    fn meta_data_tag_types() {
        assert!(classify_parts(FLVTagType::Amf0Data, &[0x02]).is_meta_data);
        assert!(classify_parts(FLVTagType::Amf3Data, &[]).is_meta_data);
        assert!(classify_parts(FLVTagType::from(18), &[]).is_meta_data);
        assert!(classify_parts(FLVTagType::from(15), &[]).is_meta_data);
        for other in [0_u8, 8, 9, 14, 16, 17, 19, 0x28, 0x32, 255] {
            assert!(
                !classify_parts(FLVTagType::from(other), &[0xAF, 0x00]).is_meta_data,
                "tag type {} should not be meta data",
                other
            );
        }
    }

    #[test]
    fn meta_data_is_never_a_sequence_header() {
        let result = classify(&tag(FLVTagType::Amf0Data, &[0x17, 0x00]));
        assert!(result.is_meta_data);
        assert!(!result.is_video_sequence_header);
        assert!(!result.is_audio_sequence_header);
    }

    #[test]
    fn classification_is_idempotent() {
        let tag = tag(FLVTagType::Video, &[0x17, 0x00, 0x00]);
        let first = classify(&tag);
        let second = classify(&tag);
        assert_eq!(first, second);
        assert_eq!(&tag.payload()[..], &[0x17, 0x00, 0x00]);
    }
}
