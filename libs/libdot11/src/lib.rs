/// Libdot11's own [Error](error::Error) implementation
pub mod error;
/// The [Frame](frame::Frame) enum, frame structs and the injection codec.
pub mod frame;
/// Enums representing frame types and frame subtypes.
mod frame_types;
/// [nom] parsers for decoding crafted frames.
pub mod parsers;
/// All traits used or provided by this library.
mod traits;

use crate::error::Error;
use crate::parsers::*;

// Re-exports for user convenience
pub use crate::frame::{encode, EncodedFrame, Frame, FrameSpec, MAX_FRAME_LEN};
pub use crate::frame_types::*;
pub use crate::traits::*;

/// Parse a bare IEEE 802.11 management frame (no radiotap preamble).
///
/// Only the subtypes this crate can craft are decoded, everything else is
/// reported as [Error::UnhandledFrameSubtype].
pub fn parse_frame(input: &[u8]) -> Result<Frame, Error> {
    let (input, frame_control) = parse_frame_control(input)?;

    match frame_control.frame_subtype {
        FrameSubType::Beacon => parse_beacon(frame_control, input),
        FrameSubType::Deauthentication => parse_deauthentication(frame_control, input),
        _ => Err(Error::UnhandledFrameSubtype(frame_control, input.to_vec())),
    }
}

/// Parse a frame the way it is handed to the injector: radiotap preamble first.
///
/// The preamble is skipped using the length it declares for itself.
pub fn parse_injected_frame(input: &[u8]) -> Result<Frame, Error> {
    let (input, _preamble) = parse_radiotap_preamble(input)?;
    parse_frame(input)
}
