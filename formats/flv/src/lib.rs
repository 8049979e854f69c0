//! Demuxer for the FLV container.
//!
//! [`demuxer::FlvDemuxer`] reads the file header once, then pulls tags one at a
//! time, classifies each of them and hands out [`message::FLVMessage`] values.
//! Every step is synchronous and blocks on the underlying [`std::io::Read`].

pub mod classify;
pub mod consts;
pub mod demuxer;
pub mod errors;
pub mod header;
pub mod message;
pub mod tag;
pub mod telemetry;
