use nom::bytes::complete::take;
use nom::number::complete::{le_u16, le_u32, le_u8};
use nom::sequence::tuple;
use nom::IResult;

use crate::error::Error;

/// The fixed part of a radiotap header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RadiotapPreamble {
    pub version: u8,
    pub length: u16,
    pub present: u32,
}

/// Parse the radiotap preamble and skip whatever optional fields it declares.
///
/// Returns the remaining input, which starts at the 802.11 frame control.
pub fn parse_radiotap_preamble(input: &[u8]) -> Result<(&[u8], RadiotapPreamble), Error> {
    let (_, (version, _pad, length, present)) = parse_fixed_fields(input)?;

    if version != 0 {
        return Err(Error::InvalidPreamble(format!(
            "unsupported radiotap version {version}"
        )));
    }
    if (length as usize) < 8 {
        return Err(Error::InvalidPreamble(format!(
            "declared length {length} is shorter than the fixed header"
        )));
    }

    let skipped: IResult<&[u8], &[u8]> = take(length as usize)(input);
    let (remaining, _) = skipped?;

    Ok((
        remaining,
        RadiotapPreamble {
            version,
            length,
            present,
        },
    ))
}

/// Version, padding, length and present bitmap.
fn parse_fixed_fields(input: &[u8]) -> IResult<&[u8], (u8, u8, u16, u32)> {
    tuple((le_u8, le_u8, le_u16, le_u32))(input)
}
