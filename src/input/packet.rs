//! Three-byte pointer packets
//!
//! Byte 0 carries the button state and a sync bit that is always set, bytes 1
//! and 2 carry the x and y movement as signed bytes, y pointing up.

use tracing::trace;

use crate::error::GameError;

pub const LEFT_BUTTON: u8 = 1 << 0;
pub const SYNC_BIT: u8 = 1 << 3;
pub const X_SIGN: u8 = 1 << 4;
pub const Y_SIGN: u8 = 1 << 5;

pub const PACKET_LEN: usize = 3;

/// One decoded motion report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerSample {
    pub delta_x: i32,
    pub delta_y: i32,
    pub left_button: bool,
}

impl PointerSample {
    pub fn from_packet(packet: [u8; PACKET_LEN]) -> Self {
        Self {
            delta_x: packet[1] as i8 as i32,
            delta_y: packet[2] as i8 as i32,
            left_button: packet[0] & LEFT_BUTTON != 0,
        }
    }
}

/// Reassembles packets from a raw byte stream
#[derive(Debug, Default, Clone)]
pub struct PacketFramer {
    buffer: [u8; PACKET_LEN],
    filled: usize,
}

impl PacketFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte.
    ///
    /// Outside a packet, only a byte with the sync bit can start one; anything
    /// else is rejected and the framer keeps waiting.
    pub fn push(&mut self, byte: u8) -> Result<Option<PointerSample>, GameError> {
        if self.filled == 0 && byte & SYNC_BIT == 0 {
            return Err(GameError::Protocol(format!(
                "byte {byte:#04x} cannot start a packet"
            )));
        }

        self.buffer[self.filled] = byte;
        self.filled += 1;

        if self.filled < PACKET_LEN {
            return Ok(None);
        }

        self.filled = 0;
        let sample = PointerSample::from_packet(self.buffer);
        trace!(?sample, "pointer packet");
        Ok(Some(sample))
    }

    /// Drop a partially received packet
    pub fn reset(&mut self) {
        self.filled = 0;
    }

    pub fn is_mid_packet(&self) -> bool {
        self.filled > 0
    }
}

/// Encode one packet
pub fn encode_packet(delta_x: i32, delta_y: i32, left_button: bool) -> [u8; PACKET_LEN] {
    let dx = delta_x.clamp(-128, 127);
    let dy = delta_y.clamp(-128, 127);

    let mut status = SYNC_BIT;
    if left_button {
        status |= LEFT_BUTTON;
    }
    if dx < 0 {
        status |= X_SIGN;
    }
    if dy < 0 {
        status |= Y_SIGN;
    }

    [status, dx as i8 as u8, dy as i8 as u8]
}

/// Encode a movement as a series of packets no larger than `max_step` per axis.
///
/// Always yields at least one packet so a button change without movement is
/// still reported.
pub fn encode_motion(delta_x: i32, delta_y: i32, left_button: bool, max_step: i32) -> Vec<[u8; PACKET_LEN]> {
    let max_step = max_step.max(1);
    let steps = (delta_x.abs().max(delta_y.abs()) + max_step - 1) / max_step;
    let steps = steps.max(1);

    let mut packets = Vec::with_capacity(steps as usize);
    let (mut sent_x, mut sent_y) = (0, 0);
    for i in 1..=steps {
        let target_x = delta_x * i / steps;
        let target_y = delta_y * i / steps;
        packets.push(encode_packet(target_x - sent_x, target_y - sent_y, left_button));
        sent_x = target_x;
        sent_y = target_y;
    }
    packets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(framer: &mut PacketFramer, bytes: &[u8]) -> Vec<PointerSample> {
        bytes
            .iter()
            .filter_map(|&b| framer.push(b).ok().flatten())
            .collect()
    }

    #[test]
    fn test_complete_packet() {
        let mut framer = PacketFramer::new();
        let samples = feed(&mut framer, &[SYNC_BIT | LEFT_BUTTON, 5, 0xFD]);

        assert_eq!(
            samples,
            vec![PointerSample {
                delta_x: 5,
                delta_y: -3,
                left_button: true,
            }]
        );
        assert!(!framer.is_mid_packet());
    }

    #[test]
    fn test_waits_for_sync_byte() {
        let mut framer = PacketFramer::new();

        assert!(matches!(framer.push(0x01), Err(GameError::Protocol(_))));
        assert!(matches!(framer.push(0x07), Err(GameError::Protocol(_))));
        assert!(!framer.is_mid_packet());

        let samples = feed(&mut framer, &[SYNC_BIT, 1, 2]);
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].delta_x, 1);
    }

    #[test]
    fn test_mid_packet_bytes_need_no_sync_bit() {
        let mut framer = PacketFramer::new();
        assert_eq!(framer.push(SYNC_BIT).unwrap(), None);
        assert_eq!(framer.push(0x00).unwrap(), None);
        assert!(framer.push(0x00).unwrap().is_some());
    }

    #[test]
    fn test_reset_drops_partial_packet() {
        let mut framer = PacketFramer::new();
        framer.push(SYNC_BIT).unwrap();
        framer.push(4).unwrap();
        framer.reset();

        assert!(framer.push(0x02).is_err());
    }

    #[test]
    fn test_consecutive_packets() {
        let mut framer = PacketFramer::new();
        let mut bytes = Vec::new();
        bytes.extend(encode_packet(3, 4, false));
        bytes.extend(encode_packet(-7, -8, true));

        let samples = feed(&mut framer, &bytes);
        assert_eq!(samples.len(), 2);
        assert_eq!((samples[1].delta_x, samples[1].delta_y), (-7, -8));
        assert!(samples[1].left_button);
    }

    #[test]
    fn test_encode_packet_sets_sign_bits() {
        let packet = encode_packet(-1, 2, false);
        assert_eq!(packet[0], SYNC_BIT | X_SIGN);
        assert_eq!(packet[1], 0xFF);
        assert_eq!(packet[2], 2);
    }

    #[test]
    fn test_encode_motion_splits_large_moves() {
        let packets = encode_motion(45, -20, false, 10);
        assert_eq!(packets.len(), 5);

        let samples: Vec<_> = packets.into_iter().map(PointerSample::from_packet).collect();
        assert!(samples.iter().all(|s| s.delta_x.abs() <= 10 && s.delta_y.abs() <= 10));
        assert_eq!(samples.iter().map(|s| s.delta_x).sum::<i32>(), 45);
        assert_eq!(samples.iter().map(|s| s.delta_y).sum::<i32>(), -20);
    }

    #[test]
    fn test_encode_motion_without_movement() {
        let packets = encode_motion(0, 0, true, 10);
        assert_eq!(packets, vec![[SYNC_BIT | LEFT_BUTTON, 0, 0]]);
    }
}
