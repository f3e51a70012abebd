mod elements;
mod frame_control;
mod header;
mod mac_address;
mod sequence_control;

pub use elements::{
    BeaconElements, ElementId, ElementWriter, SupportedRate, MAX_ELEMENT_LEN, MAX_SSID_LEN,
};
pub use frame_control::FrameControl;
pub use header::ManagementHeader;
pub use mac_address::*;
pub use sequence_control::SequenceControl;
