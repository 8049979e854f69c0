use std::{io, iter::FusedIterator, sync::Arc};

use utils::traits::fixed_packet::FixedPacket;

use crate::{
    errors::FLVResult,
    header::{self, FLVHeader},
    message::FLVMessage,
    tag,
    telemetry::Telemetry,
};


///
/// ```text
/// open -> HeaderParsed -> TagLoop <-+
///                           |       |
///                           +-------+
///                           |
///                           +-> EndOfStream
///                           +-> Error
/// ```
/// Both `EndOfStream` and `Error` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemuxState {
    HeaderParsed,
    TagLoop,
    EndOfStream,
    Error,
}

impl DemuxState {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::EndOfStream | Self::Error)
    }
}

/// Turns a byte source into a sequence of classified [`FLVMessage`]s.
///
/// The header is read by [`FlvDemuxer::open`], tags are then pulled one per
/// call. A failure of any kind is final, there is no attempt to find the
/// next tag boundary.
#[derive(Debug)]
pub struct FlvDemuxer<R> {
    header: Arc<FLVHeader>,
    tags: tag::reader::Reader<R>,
    telemetry: Telemetry,
    state: DemuxState,
}

impl<R> FlvDemuxer<R>
where
    R: io::Read,
{
    pub fn open(reader: R) -> FLVResult<Self> {
        Self::open_with_telemetry(reader, Telemetry::current())
    }

    pub fn open_with_telemetry(mut reader: R, telemetry: Telemetry) -> FLVResult<Self> {
        let header = header::reader::Reader::with_telemetry(&mut reader, telemetry.clone())
            .read()
            .inspect_err(|err| {
                telemetry.in_scope(|| tracing::error!("failed to open flv stream: {}", err))
            })?;
        let tags = tag::reader::Reader::with_telemetry(reader, telemetry.clone())
            .starting_at(FLVHeader::bytes_count() as u64);
        Ok(Self {
            header: Arc::new(header),
            tags,
            telemetry,
            state: DemuxState::HeaderParsed,
        })
    }

    #[inline]
    pub fn header(&self) -> &Arc<FLVHeader> {
        &self.header
    }

    #[inline]
    pub fn state(&self) -> DemuxState {
        self.state
    }

    /// Bytes consumed from the start of the stream so far.
    #[inline]
    pub fn position(&self) -> u64 {
        self.tags.position()
    }

    pub fn into_inner(self) -> R {
        self.tags.into_inner()
    }

    /// Pull, classify and assemble the next tag.
    ///
    /// `Ok(None)` once the stream ended on a tag boundary, and forever after
    /// the demuxer reached a terminal state.
    pub fn next_message(&mut self) -> FLVResult<Option<FLVMessage>> {
        if self.state.is_terminal() {
            return Ok(None);
        }

        match self.tags.read_next() {
            Ok(Some(tag)) => {
                self.state = DemuxState::TagLoop;
                Ok(Some(FLVMessage::assemble(&self.header, tag)))
            }
            Ok(None) => {
                self.state = DemuxState::EndOfStream;
                let position = self.tags.position();
                self.telemetry
                    .in_scope(|| tracing::debug!("flv stream ended at offset {}", position));
                Ok(None)
            }
            Err(err) => {
                self.state = DemuxState::Error;
                self.telemetry
                    .in_scope(|| tracing::error!("flv demuxer stopped: {}", err));
                Err(err)
            }
        }
    }
}

impl<R: io::Read> Iterator for FlvDemuxer<R> {
    type Item = FLVResult<FLVMessage>;
    fn next(&mut self) -> Option<Self::Item> {
        self.next_message().transpose()
    }
}

impl<R: io::Read> FusedIterator for FlvDemuxer<R> {}
