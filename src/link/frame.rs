//! VN-100 binary output frame codec
//!
//! Packet format: `[0xFA] [GROUPS] [FIELDS u16 LE] [PAYLOAD] [CRC16 BE]`
//!
//! `GROUPS` is a bitmask of output groups; this driver configures only the
//! common group. `FIELDS` selects which measurements the payload carries,
//! in bit order. The CRC covers every byte after the sync byte up to the
//! CRC itself (CRC16-CCITT, zero initial value).

use crate::types::ImuSnapshot;

/// Frame sync byte
pub(crate) const SYNC: u8 = 0xFA;

/// Output group bitmask: common group only
pub(crate) const GROUP_COMMON: u8 = 0x01;

// Common-group field bits
pub(crate) const FIELD_YPR: u16 = 1 << 3;
pub(crate) const FIELD_QUATERNION: u16 = 1 << 4;
pub(crate) const FIELD_ANGULAR_RATE: u16 = 1 << 5;
pub(crate) const FIELD_ACCEL: u16 = 1 << 8;

/// Field selection written to the output register: every group the
/// snapshot exposes.
pub(crate) const OUTPUT_FIELDS: u16 =
    FIELD_YPR | FIELD_QUATERNION | FIELD_ANGULAR_RATE | FIELD_ACCEL;

/// Payload size in bytes for each common-group field, by bit position.
/// Zero marks the reserved bit; a frame selecting it cannot be sized and
/// is rejected by the reader.
const COMMON_FIELD_SIZES: [usize; 16] = [8, 8, 8, 12, 16, 12, 24, 12, 12, 24, 20, 28, 2, 4, 8, 0];

/// One decoded frame: zero or more measurement groups
///
/// A `Frame` is only ever produced from a CRC-validated packet, so the
/// groups it does carry are never torn. Groups the sensor did not include
/// are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    /// Yaw, pitch, roll (degrees)
    pub ypr: Option<[f32; 3]>,
    /// Angular rate (rad/s)
    pub angular_rate: Option<[f32; 3]>,
    /// Acceleration (m/s²)
    pub accel: Option<[f32; 3]>,
    /// Orientation quaternion
    pub quaternion: Option<[f32; 4]>,
}

impl Frame {
    /// True if every measurement group the snapshot exposes is present
    pub fn is_complete(&self) -> bool {
        self.to_snapshot().is_some()
    }

    /// Convert to a snapshot, requiring all four measurement groups
    pub fn to_snapshot(&self) -> Option<ImuSnapshot> {
        Some(ImuSnapshot {
            ypr: self.ypr?,
            angular_rate: self.angular_rate?,
            accel: self.accel?,
            quaternion: self.quaternion?,
        })
    }
}

/// Total payload length for a field selection, or `None` if a reserved
/// field bit is set.
pub(crate) fn payload_len(fields: u16) -> Option<usize> {
    let mut len = 0;
    for (bit, &size) in COMMON_FIELD_SIZES.iter().enumerate() {
        if fields & (1 << bit) != 0 {
            if size == 0 {
                return None;
            }
            len += size;
        }
    }
    Some(len)
}

/// Decode a CRC-validated payload against its field selection
///
/// Fields the snapshot does not use are skipped by size. Returns `None`
/// only if the payload is shorter than the selection demands.
pub(crate) fn decode(fields: u16, payload: &[u8]) -> Option<Frame> {
    let mut frame = Frame::default();
    let mut offset = 0;

    for (bit, &size) in COMMON_FIELD_SIZES.iter().enumerate() {
        let mask = 1u16 << bit;
        if fields & mask == 0 {
            continue;
        }
        if size == 0 || offset + size > payload.len() {
            return None;
        }
        let data = &payload[offset..offset + size];
        match mask {
            FIELD_YPR => frame.ypr = Some(read_vec3(data)),
            FIELD_QUATERNION => frame.quaternion = Some(read_vec4(data)),
            FIELD_ANGULAR_RATE => frame.angular_rate = Some(read_vec3(data)),
            FIELD_ACCEL => frame.accel = Some(read_vec3(data)),
            _ => {} // selected but unused by the snapshot
        }
        offset += size;
    }

    Some(frame)
}

/// CRC16-CCITT as specified for the binary output format (zero seed)
pub(crate) fn crc16(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc = (crc >> 8) | (crc << 8);
        crc ^= byte as u16;
        crc ^= (crc & 0xFF) >> 4;
        crc ^= crc << 12;
        crc ^= (crc & 0x00FF) << 5;
    }
    crc
}

fn read_vec3(data: &[u8]) -> [f32; 3] {
    let mut out = [0.0; 3];
    for (value, chunk) in out.iter_mut().zip(data.chunks_exact(4)) {
        *value = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    out
}

fn read_vec4(data: &[u8]) -> [f32; 4] {
    let mut out = [0.0; 4];
    for (value, chunk) in out.iter_mut().zip(data.chunks_exact(4)) {
        *value = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    out
}

/// Encode a complete packet for a common-group field selection (tests)
#[cfg(test)]
pub(crate) fn encode(fields: u16, payload: &[u8]) -> Vec<u8> {
    let mut body = vec![GROUP_COMMON];
    body.extend_from_slice(&fields.to_le_bytes());
    body.extend_from_slice(payload);
    let crc = crc16(&body);

    let mut packet = vec![SYNC];
    packet.extend_from_slice(&body);
    packet.extend_from_slice(&crc.to_be_bytes());
    packet
}

/// Payload bytes for the four-group output selection (tests)
#[cfg(test)]
pub(crate) fn encode_output_payload(
    ypr: [f32; 3],
    quaternion: [f32; 4],
    angular_rate: [f32; 3],
    accel: [f32; 3],
) -> Vec<u8> {
    // Payload field order follows bit order: ypr(3), quat(4), rate(5), accel(8)
    let mut payload = Vec::new();
    for v in ypr {
        payload.extend_from_slice(&v.to_le_bytes());
    }
    for v in quaternion {
        payload.extend_from_slice(&v.to_le_bytes());
    }
    for v in angular_rate {
        payload.extend_from_slice(&v.to_le_bytes());
    }
    for v in accel {
        payload.extend_from_slice(&v.to_le_bytes());
    }
    payload
}
