use crate::*;
use std::convert::TryFrom;
use std::net::Ipv4Addr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArpOp {
    Request = 1,
    Reply = 2,
}

pub const ARP_HARDWARE_TYPE_ETHERNET: u16 = 1;

/// ARP payload length for IPv4 over Ethernet: 8 fixed bytes plus two (MAC, IPv4) pairs.
pub const ARP_PAYLOAD_LEN: usize = 28;
pub const ARP_FRAME_LEN: usize = ETHERNET_HEADER_LEN + ARP_PAYLOAD_LEN;

// Offsets into the ARP payload, end exclusive.
const HARDWARE_TYPE_RANGE: (usize, usize) = (0, 2);
const PROTOCOL_TYPE_RANGE: (usize, usize) = (2, 4);
const HARDWARE_ADDR_LEN_RANGE: (usize, usize) = (4, 5);
const PROTOCOL_ADDR_LEN_RANGE: (usize, usize) = (5, 6);
const OPCODE_RANGE: (usize, usize) = (6, 8);
const SENDER_HARDWARE_ADDR_RANGE: (usize, usize) = (8, 14);
const SENDER_PROTOCOL_ADDR_RANGE: (usize, usize) = (14, 18);
const TARGET_HARDWARE_ADDR_RANGE: (usize, usize) = (18, 24);
const TARGET_PROTOCOL_ADDR_RANGE: (usize, usize) = (24, 28);

///
/// EthernetFrame wrapper with getters/setters for an IPv4-over-Ethernet ARP packet, RFC 826
/// https://tools.ietf.org/html/rfc826
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArpFrame {
    frame: EthernetFrame,
}

impl ArpFrame {
    ///
    /// Constructs a zeroed ARP frame with the ARP ether type and the fixed
    /// hardware/protocol type and length fields already set.
    ///
    pub fn new() -> Self {
        let mut frame = EthernetFrame::empty();
        frame.set_ether_type(ARP_ETHER_TYPE);
        frame.set_payload(&[0; ARP_PAYLOAD_LEN]);

        let mut arp_frame = ArpFrame { frame };
        arp_frame.set_hardware_type(ARP_HARDWARE_TYPE_ETHERNET);
        arp_frame.set_protocol_type(IPV4_ETHER_TYPE);
        arp_frame.set_arp_data(&[6], HARDWARE_ADDR_LEN_RANGE);
        arp_frame.set_arp_data(&[4], PROTOCOL_ADDR_LEN_RANGE);
        arp_frame
    }

    ///
    /// Builds a complete frame addressed from `src_mac` to `dst_mac`.
    ///
    /// The sender fields always carry the source addresses. A request leaves the target hardware
    /// address zeroed since that is what is being asked for; a reply fills it with `dst_mac`.
    ///
    pub fn ipv4(
        op: ArpOp,
        src_mac: MacAddr,
        dst_mac: MacAddr,
        src_ip: Ipv4Addr,
        dst_ip: Ipv4Addr,
    ) -> Self {
        let mut arp_frame = ArpFrame::new();
        arp_frame.frame.set_dest_mac(dst_mac);
        arp_frame.frame.set_src_mac(src_mac);
        arp_frame.set_opcode(op as u16);
        arp_frame.set_sender_hardware_addr(src_mac);
        arp_frame.set_sender_protocol_addr(src_ip);
        arp_frame.set_target_hardware_addr(match op {
            ArpOp::Request => MacAddr::ZERO,
            ArpOp::Reply => dst_mac,
        });
        arp_frame.set_target_protocol_addr(dst_ip);
        arp_frame
    }

    pub fn hardware_type(&self) -> u16 {
        self.arp_u16(HARDWARE_TYPE_RANGE)
    }

    pub fn protocol_type(&self) -> u16 {
        self.arp_u16(PROTOCOL_TYPE_RANGE)
    }

    pub fn hardware_addr_len(&self) -> u8 {
        self.arp_data(HARDWARE_ADDR_LEN_RANGE)[0]
    }

    pub fn protocol_addr_len(&self) -> u8 {
        self.arp_data(PROTOCOL_ADDR_LEN_RANGE)[0]
    }

    pub fn opcode(&self) -> u16 {
        self.arp_u16(OPCODE_RANGE)
    }

    pub fn sender_hardware_addr(&self) -> MacAddr {
        self.arp_mac(SENDER_HARDWARE_ADDR_RANGE)
    }

    pub fn sender_protocol_addr(&self) -> Ipv4Addr {
        self.arp_ipv4(SENDER_PROTOCOL_ADDR_RANGE)
    }

    pub fn target_hardware_addr(&self) -> MacAddr {
        self.arp_mac(TARGET_HARDWARE_ADDR_RANGE)
    }

    pub fn target_protocol_addr(&self) -> Ipv4Addr {
        self.arp_ipv4(TARGET_PROTOCOL_ADDR_RANGE)
    }

    pub fn set_hardware_type(&mut self, htype: u16) {
        self.set_arp_data(&htype.to_be_bytes(), HARDWARE_TYPE_RANGE);
    }

    pub fn set_protocol_type(&mut self, ptype: u16) {
        self.set_arp_data(&ptype.to_be_bytes(), PROTOCOL_TYPE_RANGE);
    }

    pub fn set_opcode(&mut self, code: u16) {
        self.set_arp_data(&code.to_be_bytes(), OPCODE_RANGE);
    }

    pub fn set_sender_hardware_addr(&mut self, addr: MacAddr) {
        self.set_arp_data(&addr.bytes, SENDER_HARDWARE_ADDR_RANGE);
    }

    pub fn set_sender_protocol_addr(&mut self, addr: Ipv4Addr) {
        self.set_arp_data(&addr.octets(), SENDER_PROTOCOL_ADDR_RANGE);
    }

    pub fn set_target_hardware_addr(&mut self, addr: MacAddr) {
        self.set_arp_data(&addr.bytes, TARGET_HARDWARE_ADDR_RANGE);
    }

    pub fn set_target_protocol_addr(&mut self, addr: Ipv4Addr) {
        self.set_arp_data(&addr.octets(), TARGET_PROTOCOL_ADDR_RANGE);
    }

    pub fn ethernet(&self) -> &EthernetFrame {
        &self.frame
    }

    // Move ownership of the frame back to the caller
    pub fn frame(self) -> EthernetFrame {
        self.frame
    }

    pub fn to_hex(&self) -> String {
        self.frame.to_hex()
    }

    // Returns the ARP payload bytes in the given range
    fn arp_data(&self, (start, end): (usize, usize)) -> &[u8] {
        let offset = self.frame.payload_offset;
        &self.frame.data[offset + start..offset + end]
    }

    fn set_arp_data(&mut self, bytes: &[u8], (start, end): (usize, usize)) {
        let offset = self.frame.payload_offset;
        self.frame.data[offset + start..offset + end].copy_from_slice(bytes);
    }

    fn arp_u16(&self, range: (usize, usize)) -> u16 {
        let data = self.arp_data(range);
        u16::from_be_bytes([data[0], data[1]])
    }

    fn arp_mac(&self, range: (usize, usize)) -> MacAddr {
        let mut bytes = [0u8; 6];
        bytes.copy_from_slice(self.arp_data(range));
        MacAddr::new(bytes)
    }

    fn arp_ipv4(&self, range: (usize, usize)) -> Ipv4Addr {
        let data = self.arp_data(range);
        Ipv4Addr::new(data[0], data[1], data[2], data[3])
    }
}

impl Default for ArpFrame {
    fn default() -> Self {
        ArpFrame::new()
    }
}

impl TryFrom<EthernetFrame> for ArpFrame {
    type Error = PacketError;

    ///
    /// Decorates the given EthernetFrame with ArpFrame getters/setters.
    /// Validates
    /// - The frame has an ARP ether type
    /// - The payload is exactly one IPv4-over-Ethernet ARP packet
    ///
    fn try_from(frame: EthernetFrame) -> Result<Self, Self::Error> {
        if frame.ether_type() != ARP_ETHER_TYPE {
            return Err(PacketError::NotArp {
                ether_type: frame.ether_type(),
            });
        }

        let payload_len = frame.payload().len();
        if payload_len != ARP_PAYLOAD_LEN {
            return Err(PacketError::MalformedArp {
                reason: "payload is not 28 bytes",
            });
        }

        let arp_frame = ArpFrame { frame };
        if arp_frame.hardware_addr_len() != 6 || arp_frame.protocol_addr_len() != 4 {
            return Err(PacketError::MalformedArp {
                reason: "address lengths are not Ethernet/IPv4",
            });
        }

        Ok(arp_frame)
    }
}

///
/// Constructs an ARP packet as an uppercase hex string, ready to hand to the device's
/// raw packet injection command.
///
/// MACs are colon separated ("11:22:33:44:55:66"), IPs dotted decimal ("192.168.1.1").
/// Pass `MacAddr::BROADCAST` formatted as a string for `dst_mac` to build a broadcast request.
///
pub fn construct_arp_packet(
    src_mac: &str,
    dst_mac: &str,
    src_ip: &str,
    dst_ip: &str,
    op: ArpOp,
) -> Result<String, PacketError> {
    let arp_frame = ArpFrame::ipv4(
        op,
        src_mac.parse()?,
        dst_mac.parse()?,
        src_ip.parse::<Ipv4Addr>()?,
        dst_ip.parse::<Ipv4Addr>()?,
    );
    Ok(arp_frame.to_hex())
}
