use nom::bytes::complete::take;
use nom::number::complete::le_u16;
use nom::sequence::tuple;

use super::{clone_slice, parse_mac};
use crate::error::Error;
use crate::frame::components::{FrameControl, ManagementHeader, SequenceControl};

/// Parse and return the [ManagementHeader] from a given payload.
/// The frame control has already been consumed.
pub fn parse_management_header(
    frame_control: FrameControl,
    input: &[u8],
) -> Result<(&[u8], ManagementHeader), Error> {
    let (remaining, (duration, address_1, address_2, address_3, sequence_control)) = tuple((
        take(2usize),
        parse_mac,
        parse_mac,
        parse_mac,
        le_u16,
    ))(input)?;

    let duration = clone_slice::<2>(duration);

    Ok((
        remaining,
        ManagementHeader {
            frame_control,
            duration,
            address_1,
            address_2,
            address_3,
            sequence_control: SequenceControl {
                fragment_number: (sequence_control & 0x0F) as u8,
                sequence_number: sequence_control >> 4,
            },
        },
    ))
}
