use nom::Needed;

use crate::frame::components::FrameControl;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The SSID information element can carry at most 32 bytes.
    /// Truncating would shift every following element, so the codec refuses instead.
    #[error("SSID is {len} bytes long, the limit is {max}")]
    SsidTooLong { len: usize, max: usize },
    /// An information element payload did not fit its one byte length field.
    #[error("Information element {id} carries {len} bytes, the limit is 255")]
    ElementTooLong { id: u8, len: usize },
    /// The encoded frame would exceed [MAX_FRAME_LEN](crate::MAX_FRAME_LEN).
    #[error("Encoded frame is {len} bytes long, the limit is {max}")]
    FrameTooLong { len: usize, max: usize },

    /// Only the subtypes this library can craft are decoded.
    /// The [FrameControl] header is always parsed and can be used for debugging.
    #[error("This frame subtype isn't handled: {:?} ({:?})", .0.frame_subtype, .0.frame_type)]
    UnhandledFrameSubtype(FrameControl, Vec<u8>),
    #[error("Radiotap preamble is invalid: {}", .0)]
    InvalidPreamble(String),
    #[error("A parsing failure occurred: \n{}\ndata: {:?}", .0, .1)]
    Failure(String, Vec<u8>),
    #[error("There wasn't enough data. {}", .0)]
    Incomplete(String),
}

impl Error {
    /// Whether this error was raised while building a frame rather than decoding one.
    pub fn is_invalid_spec(&self) -> bool {
        matches!(
            self,
            Error::SsidTooLong { .. } | Error::ElementTooLong { .. } | Error::FrameTooLong { .. }
        )
    }
}

impl From<nom::Err<nom::error::Error<&[u8]>>> for Error {
    /// nom errors borrow the input slice. Copy what we need so the error can
    /// outlive the buffer it was produced from.
    fn from(error: nom::Err<nom::error::Error<&[u8]>>) -> Self {
        match error {
            nom::Err::Incomplete(needed) => match needed {
                Needed::Size(size) => {
                    Error::Incomplete(format!("At least {size} bytes are missing"))
                }
                Needed::Unknown => Error::Incomplete(String::new()),
            },
            nom::Err::Failure(error) | nom::Err::Error(error) => Error::Failure(
                format!(
                    "An error occured while parsing the data: nom::ErrorKind is {:?}",
                    error.code
                ),
                error.input.to_vec(),
            ),
        }
    }
}
