use crate::*;
use std::borrow::Cow;

pub const ETHERNET_HEADER_LEN: usize = 14;

#[derive(Clone, Debug)]
pub struct EthernetFrame {
    pub data: PacketData,
    pub payload_offset: usize,
}

impl EthernetFrame {
    pub fn from_buffer(frame: PacketData) -> Result<EthernetFrame, PacketError> {
        // Ethernet II frames must be at least the header, which is 14bytes
        // 0                    6                    12                      14
        // |---6 byte Dest_MAC--|---6 byte Src_MAC---|--2 Byte EtherType---|
        // No 802.1Q tag; the injection path only takes untagged frames.

        if frame.len() < ETHERNET_HEADER_LEN {
            return Err(PacketError::FrameTooShort {
                len: frame.len(),
                min: ETHERNET_HEADER_LEN,
            });
        }

        Ok(EthernetFrame {
            data: frame,
            payload_offset: ETHERNET_HEADER_LEN,
        })
    }

    /// Parses a frame from its hex text form, starting at the L2 header.
    pub fn from_hex(text: &str) -> Result<EthernetFrame, PacketError> {
        EthernetFrame::from_buffer(hex::decode(text)?)
    }

    /// Returns an empty EthernetFrame where all values all populated to zero. This function allocates a
    /// new array to hold the header.
    pub fn empty() -> EthernetFrame {
        EthernetFrame {
            data: vec![0; ETHERNET_HEADER_LEN],
            payload_offset: ETHERNET_HEADER_LEN,
        }
    }

    pub fn dest_mac(&self) -> MacAddr {
        let mut bytes = [0u8; 6];
        bytes.copy_from_slice(&self.data[0..6]);
        MacAddr::new(bytes)
    }

    pub fn src_mac(&self) -> MacAddr {
        let mut bytes = [0u8; 6];
        bytes.copy_from_slice(&self.data[6..12]);
        MacAddr::new(bytes)
    }

    pub fn set_dest_mac(&mut self, mac: MacAddr) {
        self.data[..6].copy_from_slice(&mac.bytes);
    }

    pub fn set_src_mac(&mut self, mac: MacAddr) {
        self.data[6..12].copy_from_slice(&mac.bytes);
    }

    pub fn ether_type(&self) -> u16 {
        u16::from_be_bytes([self.data[12], self.data[13]])
    }

    pub fn set_ether_type(&mut self, ether_type: u16) {
        self.data[12..=13].copy_from_slice(&ether_type.to_be_bytes());
    }

    // This gives you a cow of a slice of the payload.
    pub fn payload(&self) -> Cow<[u8]> {
        Cow::from(&self.data[self.payload_offset..])
    }

    pub fn set_payload(&mut self, payload: &[u8]) {
        self.data.truncate(self.payload_offset);
        self.data.reserve_exact(payload.len());
        self.data.extend(payload);
    }

    /// Uppercase hex of the whole frame, header included.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(&self.data)
    }
}

impl PartialEq for EthernetFrame {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for EthernetFrame {}

#[cfg(test)]
mod tests {
    use super::*;
    use hex::FromHexError;
    use std::vec::Vec;

    #[test]
    fn ethernet_frame() {
        let data: Vec<u8> = vec![0xde, 0xad, 0xbe, 0xef, 0xff, 0xff, 1, 2, 3, 4, 5, 6, 0, 0];
        let frame = EthernetFrame::from_buffer(data).unwrap();
        assert_eq!(
            frame.dest_mac(),
            MacAddr::new([0xde, 0xad, 0xbe, 0xef, 0xff, 0xff])
        );
        assert_eq!(frame.src_mac(), MacAddr::new([1, 2, 3, 4, 5, 6]));
        assert_eq!(frame.ether_type(), 0);
        assert_eq!(frame.payload().len(), 0);
    }

    #[test]
    fn set_payload() {
        let mut frame = EthernetFrame::empty();
        frame.set_payload(&[1, 2, 3]);

        let new_payload: Vec<u8> = vec![1, 2, 3, 4, 5, 6, 7, 8, 9];
        frame.set_payload(&new_payload);
        assert_eq!(frame.payload(), new_payload);
        assert_eq!(frame.data.len(), ETHERNET_HEADER_LEN + new_payload.len());
    }

    #[test]
    fn invalid_data_length() {
        let data: Vec<u8> = vec![0xde, 0xad, 0xbe, 0xef, 0xff, 0xff, 1, 2, 3, 4, 5, 6];
        match EthernetFrame::from_buffer(data) {
            Err(PacketError::FrameTooShort { len: 12, min: 14 }) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn set_macs() {
        let mut frame = EthernetFrame::empty();
        let new_dest = MacAddr::new([0x98, 0x88, 0x18, 0x12, 0xb4, 0xdf]);
        frame.set_dest_mac(new_dest);
        frame.set_src_mac(MacAddr::BROADCAST);
        assert_eq!(frame.dest_mac(), new_dest);
        assert_eq!(frame.src_mac(), MacAddr::BROADCAST);
    }

    #[test]
    fn ether_type() {
        let mut frame = EthernetFrame::empty();
        frame.set_ether_type(ARP_ETHER_TYPE);
        assert_eq!(frame.ether_type(), 0x0806);
        assert_eq!(&frame.data[12..14], &[0x08, 0x06]);
    }

    #[test]
    fn hex_form() -> Result<(), PacketError> {
        let frame = EthernetFrame::from_hex("ffffffffffff0001020304050800c0a8")?;
        assert!(frame.dest_mac().is_broadcast());
        assert_eq!(frame.ether_type(), IPV4_ETHER_TYPE);
        assert_eq!(frame.payload(), &[0xc0, 0xa8][..]);
        assert_eq!(frame.to_hex(), "FFFFFFFFFFFF0001020304050800C0A8");
        Ok(())
    }

    #[test]
    fn hex_with_odd_length_is_rejected() {
        match EthernetFrame::from_hex("FFFFFFFFFFFF0001020304050806A") {
            Err(PacketError::InvalidHex(FromHexError::OddLength)) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn hex_with_non_hex_digit_is_rejected() {
        for text in &["0xFFFFFFFFFF00010203040508", "FF FFFFFFFFF0001020304050806"] {
            let err = EthernetFrame::from_hex(text).unwrap_err();
            assert_eq!(err.kind(), PacketErrorKind::InvalidHex);
        }
    }
}
