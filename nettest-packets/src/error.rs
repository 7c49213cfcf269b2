use failure::Fail;
use hex::FromHexError;
use std::net::AddrParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketErrorKind {
    InvalidMacAddr,
    InvalidIpAddr,
    InvalidHex,
    FrameTooShort,
    NotArp,
    MalformedArp,
}

#[derive(Debug, Fail)]
pub enum PacketError {
    #[fail(display = "invalid MAC address: {:?}", input)]
    InvalidMacAddr { input: String },

    /// The address parser's own error, kept as the cause.
    #[fail(display = "invalid IPv4 address: {}", _0)]
    InvalidIpAddr(#[cause] AddrParseError),

    #[fail(display = "invalid hex string: {}", _0)]
    InvalidHex(#[cause] FromHexError),

    #[fail(display = "frame is {} bytes, less than the minimum of {}", len, min)]
    FrameTooShort { len: usize, min: usize },

    #[fail(display = "frame has ether type {:#06x}, not ARP", ether_type)]
    NotArp { ether_type: u16 },

    #[fail(display = "malformed ARP payload: {}", reason)]
    MalformedArp { reason: &'static str },
}

impl PacketError {
    pub fn kind(&self) -> PacketErrorKind {
        match self {
            PacketError::InvalidMacAddr { .. } => PacketErrorKind::InvalidMacAddr,
            PacketError::InvalidIpAddr(_) => PacketErrorKind::InvalidIpAddr,
            PacketError::InvalidHex(_) => PacketErrorKind::InvalidHex,
            PacketError::FrameTooShort { .. } => PacketErrorKind::FrameTooShort,
            PacketError::NotArp { .. } => PacketErrorKind::NotArp,
            PacketError::MalformedArp { .. } => PacketErrorKind::MalformedArp,
        }
    }
}

impl From<AddrParseError> for PacketError {
    fn from(err: AddrParseError) -> Self {
        PacketError::InvalidIpAddr(err)
    }
}

impl From<FromHexError> for PacketError {
    fn from(err: FromHexError) -> Self {
        PacketError::InvalidHex(err)
    }
}
