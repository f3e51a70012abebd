use nom::bytes::complete::take;
use nom::number::complete::le_u8;
use nom::IResult;

use crate::frame::components::{BeaconElements, ElementId, SupportedRate};

/// Parse all information elements until the input is exhausted.
///
/// Unlike received traffic, crafted frames may carry an empty SSID element,
/// so zero length payloads are kept rather than skipped.
pub fn parse_beacon_elements(mut input: &[u8]) -> IResult<&[u8], BeaconElements> {
    let mut elements = BeaconElements::default();

    while !input.is_empty() {
        let (remaining, (element_id, data)) = parse_element(input)?;
        input = remaining;

        match element_id {
            id if id == ElementId::Ssid as u8 => {
                elements.ssid = Some(String::from_utf8_lossy(data).to_string());
            }
            id if id == ElementId::SupportedRates as u8 => {
                elements.supported_rates = data.iter().map(|b| SupportedRate::decode(*b)).collect();
            }
            id if id == ElementId::DsParameterSet as u8 && data.len() == 1 => {
                elements.ds_parameter_set = Some(data[0]);
            }
            _ => elements.other.push((element_id, data.to_vec())),
        }
    }

    Ok((input, elements))
}

/// One `[id][len][payload]` triplet.
fn parse_element(input: &[u8]) -> IResult<&[u8], (u8, &[u8])> {
    let (input, element_id) = le_u8(input)?;
    let (input, length) = le_u8(input)?;
    let (input, data) = take(length)(input)?;
    Ok((input, (element_id, data)))
}
