use std::{fmt::Write, io};

use flv_formats::{
    demuxer::{DemuxState, FlvDemuxer},
    message::FLVMessage,
    tag::FLVTag,
};
use utils::bytes::bytes_to_hex;

use crate::{config::Probe, errors::AppResult};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ProbeSummary {
    pub(crate) messages: u64,
    pub(crate) meta_data: u64,
    pub(crate) video_sequence_headers: u64,
    pub(crate) audio_sequence_headers: u64,
    /// The stream failed and `stop_on_error` was off.
    pub(crate) failed: bool,
}

impl ProbeSummary {
    fn record(&mut self, message: &FLVMessage) {
        self.messages += 1;
        self.meta_data += message.is_meta_data() as u64;
        self.video_sequence_headers += message.is_video_sequence_header() as u64;
        self.audio_sequence_headers += message.is_audio_sequence_header() as u64;
    }
}

pub(crate) fn probe<R: io::Read>(reader: R, config: &Probe) -> AppResult<ProbeSummary> {
    let mut demuxer = FlvDemuxer::open(reader)?;
    let header = demuxer.header();
    tracing::info!(
        "flv header: version {}, has audio: {}, has video: {}, data offset: {}",
        header.version(),
        header.has_audio(),
        header.has_video(),
        header.data_offset()
    );

    let mut summary = ProbeSummary::default();
    while !config.max_tags.is_some_and(|max| summary.messages >= max) {
        match demuxer.next_message() {
            Ok(Some(message)) => {
                summary.record(&message);
                tracing::info!(
                    "#{} {}",
                    summary.messages,
                    describe(&message, config.payload_preview)
                );
            }
            Ok(None) => break,
            Err(err) if config.stop_on_error => return Err(err.into()),
            Err(err) => {
                tracing::warn!(
                    "giving up on the rest of the stream at offset {}: {}",
                    demuxer.position(),
                    err
                );
                summary.failed = true;
                break;
            }
        }
    }

    if demuxer.state() == DemuxState::TagLoop {
        tracing::info!("stopped after {} tags", summary.messages);
    }
    tracing::info!(
        "probe done: {} messages, {} meta data, {} video / {} audio sequence headers",
        summary.messages,
        summary.meta_data,
        summary.video_sequence_headers,
        summary.audio_sequence_headers
    );
    Ok(summary)
}

/// One line per message: tag fields, classification, codec prefix and an
/// optional payload dump.
pub(crate) fn describe(message: &FLVMessage, payload_preview: usize) -> String {
    let tag = message.tag();
    let mut line = format!(
        "{:?} timestamp: {} data size: {}",
        tag.tag_type(),
        tag.timestamp(),
        tag.data_size()
    );
    if message.is_meta_data() {
        line.push_str(" [meta data]");
    }
    if message.is_video_sequence_header() {
        line.push_str(" [video sequence header]");
    }
    if message.is_audio_sequence_header() {
        line.push_str(" [audio sequence header]");
    }
    if let Some(prefix) = codec_prefix(tag) {
        let _ = write!(&mut line, ", {}", prefix);
    }
    if payload_preview > 0 {
        let _ = write!(
            &mut line,
            ", payload: {}",
            bytes_to_hex(tag.payload(), payload_preview)
        );
    }
    line
}

fn codec_prefix(tag: &FLVTag) -> Option<String> {
    let described = match (tag.audio_tag_header(), tag.video_tag_header()) {
        (Ok(Some(audio)), _) => format!("{:?}", audio),
        (_, Ok(Some(video))) => format!("{:?}", video),
        (Err(err), _) | (_, Err(err)) => format!("undecodable codec prefix: {}", err),
        _ => return None,
    };
    Some(described)
}
