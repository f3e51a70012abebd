use nom::number::complete::{le_u16, le_u64};
use nom::sequence::tuple;
use nom::IResult;

use crate::error::Error;
use crate::frame::components::FrameControl;
use crate::frame::*;
use crate::parsers::{parse_beacon_elements, parse_management_header};

/// Parse a [Beacon] frame.
///
/// The general structure is:
/// - ManagementHeader
/// - Timestamp
/// - Beacon interval
/// - Capability info
/// - Information elements
pub fn parse_beacon(frame_control: FrameControl, input: &[u8]) -> Result<Frame, Error> {
    let (input, header) = parse_management_header(frame_control, input)?;
    let (_, (timestamp, beacon_interval, capability_info, elements)) =
        tuple((le_u64, le_u16, le_u16, parse_beacon_elements))(input)?;

    Ok(Frame::Beacon(Beacon {
        header,
        timestamp,
        beacon_interval,
        capability_info,
        elements,
    }))
}

/// Parse a [Deauthentication] frame.
///
/// The general structure is:
/// - ManagementHeader
/// - Reason code
pub fn parse_deauthentication(frame_control: FrameControl, input: &[u8]) -> Result<Frame, Error> {
    let (input, header) = parse_management_header(frame_control, input)?;
    let reason: IResult<&[u8], u16> = le_u16(input);
    let (_, reason_code) = reason?;

    Ok(Frame::Deauthentication(Deauthentication {
        header,
        reason_code: DeauthenticationReason::from_code(reason_code),
    }))
}
