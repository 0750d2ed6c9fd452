//! CRC-16/ARC over the textual frame body. DC-09 computes the checksum over
//! the ASCII bytes of everything after the crc+length prefix, and renders it
//! either as four uppercase hex digits or as two raw bytes.

use crc::{Algorithm, Crc, CRC_16_ARC};

// poly 0xA001 reflected, init 0, no final xor -- the "ARC" variant.
pub const CRC_ARC_ALG: Algorithm<u16> = CRC_16_ARC;

pub const CRC_ARC: Crc<u16> = Crc::<u16>::new(&CRC_ARC_ALG);

/// Checksum of a message body, as sent on the wire.
pub fn checksum(msg: &str) -> u16 {
    CRC_ARC.checksum(msg.as_bytes())
}

/// Four uppercase hex digits, zero padded, e.g. `E5D5`.
pub fn checksum_hex(msg: &str) -> String {
    format!("{:04X}", checksum(msg))
}

/// Two raw bytes, most significant first (binary CRC framing).
pub fn checksum_bytes(msg: &str) -> [u8; 2] {
    checksum(msg).to_be_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Vectors lifted from real panel traffic.
    #[test]
    fn test_known_frames() {
        assert_eq!(
            checksum_hex(r#""SIA-DCS"6002L0#AAA[|Nri1/CL501]_14:12:04,09-25-2019"#),
            "E5D5"
        );
        assert_eq!(
            checksum_hex(r#""SIA-DCS"4738R0001L0001[#006969|Nri04/OP001NM]"#),
            "39D5"
        );
        assert_eq!(
            checksum_hex(r#""SIA-DCS"5268L0#AAA[Nri1/WA000]_08:40:47,07-08-2020"#),
            "E9A4"
        );
    }

    #[test]
    fn test_hex_is_zero_padded() {
        // The algorithm check value for "123456789" is 0xBB3D; an input whose
        // checksum is below 0x1000 must still render four digits.
        assert_eq!(checksum("123456789"), 0xBB3D);
        let padded = checksum_hex("");
        assert_eq!(padded.len(), 4);
        assert_eq!(padded, "0000");
    }

    #[test]
    fn test_bytes_match_hex() {
        let msg = r#""NULL"0000L0#AAA[]"#;
        let hex = checksum_hex(msg);
        let bytes = checksum_bytes(msg);
        assert_eq!(hex, format!("{:02X}{:02X}", bytes[0], bytes[1]));
    }
}
