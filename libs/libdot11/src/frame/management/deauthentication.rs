use std::fmt;

use crate::frame::components::*;
use crate::traits::Addresses;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deauthentication {
    pub header: ManagementHeader,
    pub reason_code: DeauthenticationReason,
}

impl Deauthentication {
    /// The body is the little endian reason code and nothing else.
    pub fn encode_body(&self) -> Vec<u8> {
        self.reason_code.code().to_le_bytes().to_vec()
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = self.header.encode();
        bytes.extend(self.encode_body());
        bytes
    }
}

impl Addresses for Deauthentication {
    fn src(&self) -> Option<&MacAddress> {
        self.header.src()
    }

    fn dest(&self) -> &MacAddress {
        self.header.dest()
    }

    fn bssid(&self) -> Option<&MacAddress> {
        self.header.bssid()
    }
}

/// IEEE 802.11 reason codes. Codes without a variant are kept verbatim in
/// [DeauthenticationReason::Other] so any 16 bit value can be sent.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeauthenticationReason {
    UnspecifiedReason,
    PreviousAuthenticationNoLongerValid,
    DeauthenticatedBecauseSTAIsLeaving,
    DisassociatedDueToInactivity,
    DisassociatedBecauseAPUnableToHandleAllSTAs,
    Class2FrameReceivedFromNonauthenticatedSTA,
    Class3FrameReceivedFromNonassociatedSTA,
    DisassociatedBecauseSTALeavingBSS,
    STARequestingReassociationNotAuthenticated,
    DisassociatedBecauseOfPowerCapability,
    DisassociatedBecauseOfSupportedChannels,
    InvalidInformationElement,
    MICFailure,
    FourWayHandshakeTimeout,
    GroupKeyHandshakeTimeout,
    IEEE8021XAuthenticationFailed,
    Other(u16),
}

impl DeauthenticationReason {
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => DeauthenticationReason::UnspecifiedReason,
            2 => DeauthenticationReason::PreviousAuthenticationNoLongerValid,
            3 => DeauthenticationReason::DeauthenticatedBecauseSTAIsLeaving,
            4 => DeauthenticationReason::DisassociatedDueToInactivity,
            5 => DeauthenticationReason::DisassociatedBecauseAPUnableToHandleAllSTAs,
            6 => DeauthenticationReason::Class2FrameReceivedFromNonauthenticatedSTA,
            7 => DeauthenticationReason::Class3FrameReceivedFromNonassociatedSTA,
            8 => DeauthenticationReason::DisassociatedBecauseSTALeavingBSS,
            9 => DeauthenticationReason::STARequestingReassociationNotAuthenticated,
            10 => DeauthenticationReason::DisassociatedBecauseOfPowerCapability,
            11 => DeauthenticationReason::DisassociatedBecauseOfSupportedChannels,
            13 => DeauthenticationReason::InvalidInformationElement,
            14 => DeauthenticationReason::MICFailure,
            15 => DeauthenticationReason::FourWayHandshakeTimeout,
            16 => DeauthenticationReason::GroupKeyHandshakeTimeout,
            23 => DeauthenticationReason::IEEE8021XAuthenticationFailed,
            other => DeauthenticationReason::Other(other),
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            DeauthenticationReason::UnspecifiedReason => 1,
            DeauthenticationReason::PreviousAuthenticationNoLongerValid => 2,
            DeauthenticationReason::DeauthenticatedBecauseSTAIsLeaving => 3,
            DeauthenticationReason::DisassociatedDueToInactivity => 4,
            DeauthenticationReason::DisassociatedBecauseAPUnableToHandleAllSTAs => 5,
            DeauthenticationReason::Class2FrameReceivedFromNonauthenticatedSTA => 6,
            DeauthenticationReason::Class3FrameReceivedFromNonassociatedSTA => 7,
            DeauthenticationReason::DisassociatedBecauseSTALeavingBSS => 8,
            DeauthenticationReason::STARequestingReassociationNotAuthenticated => 9,
            DeauthenticationReason::DisassociatedBecauseOfPowerCapability => 10,
            DeauthenticationReason::DisassociatedBecauseOfSupportedChannels => 11,
            DeauthenticationReason::InvalidInformationElement => 13,
            DeauthenticationReason::MICFailure => 14,
            DeauthenticationReason::FourWayHandshakeTimeout => 15,
            DeauthenticationReason::GroupKeyHandshakeTimeout => 16,
            DeauthenticationReason::IEEE8021XAuthenticationFailed => 23,
            DeauthenticationReason::Other(code) => *code,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DeauthenticationReason::UnspecifiedReason => "Unspecified reason",
            DeauthenticationReason::PreviousAuthenticationNoLongerValid => {
                "Previous authentication no longer valid"
            }
            DeauthenticationReason::DeauthenticatedBecauseSTAIsLeaving => {
                "Deauthenticated because sending STA is leaving (or has left) IBSS or ESS"
            }
            DeauthenticationReason::DisassociatedDueToInactivity => {
                "Disassociated due to inactivity"
            }
            DeauthenticationReason::DisassociatedBecauseAPUnableToHandleAllSTAs => {
                "Disassociated because AP is unable to handle all currently associated STAs"
            }
            DeauthenticationReason::Class2FrameReceivedFromNonauthenticatedSTA => {
                "Class 2 frame received from nonauthenticated STA"
            }
            DeauthenticationReason::Class3FrameReceivedFromNonassociatedSTA => {
                "Class 3 frame received from nonassociated STA"
            }
            DeauthenticationReason::DisassociatedBecauseSTALeavingBSS => {
                "Disassociated because sending STA is leaving (or has left) BSS"
            }
            DeauthenticationReason::STARequestingReassociationNotAuthenticated => {
                "STA requesting (re)association is not authenticated with responding STA"
            }
            DeauthenticationReason::DisassociatedBecauseOfPowerCapability => {
                "Disassociated because the Power Capability element is unacceptable"
            }
            DeauthenticationReason::DisassociatedBecauseOfSupportedChannels => {
                "Disassociated because the Supported Channels element is unacceptable"
            }
            DeauthenticationReason::InvalidInformationElement => "Invalid information element",
            DeauthenticationReason::MICFailure => "Message integrity code (MIC) failure",
            DeauthenticationReason::FourWayHandshakeTimeout => "4-Way Handshake timeout",
            DeauthenticationReason::GroupKeyHandshakeTimeout => "Group Key Handshake timeout",
            DeauthenticationReason::IEEE8021XAuthenticationFailed => {
                "IEEE 802.1X authentication failed"
            }
            DeauthenticationReason::Other(_) => "Unknown",
        }
    }
}

impl Default for DeauthenticationReason {
    fn default() -> Self {
        DeauthenticationReason::Class3FrameReceivedFromNonassociatedSTA
    }
}

impl fmt::Display for DeauthenticationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.description())
    }
}
