//! Charstring decryption.
//!
//! Both ciphers work in place. The plain bytes are written to the front of
//! the buffer, which is safe since every plain byte is written at or before
//! the position of the cipher byte it was produced from.

use crate::error::{Error, Result};

const C1: u32 = 52845;
const C2: u32 = 22719;
const EEXEC_KEY: u32 = 55665;
const CHARSTRING_KEY: u32 = 4330;

/// Decrypts a charstring in place.
///
/// The first `len_iv` plain bytes are discarded. Returns the number of plain
/// bytes, which are stored in `data[..len]`.
///
/// Input and output share `data`, so this covers the case where the source
/// and destination buffers alias. The tail `data[len..]` keeps cipher bytes.
pub fn decrypt(len_iv: i32, data: &mut [u8]) -> Result<usize> {
    let skip = check_len_iv(len_iv, data.len())?;
    let mut r = CHARSTRING_KEY;

    for i in 0..data.len() {
        let plain = decrypt_byte(data[i], &mut r);

        if i >= skip {
            data[i - skip] = plain;
        }
    }

    Ok(data.len() - skip)
}

/// Decrypts a charstring that is still covered by the eexec cipher, in place.
///
/// The eexec layer is peeled first and the charstring layer second, in a
/// single pass. Returns the number of plain bytes, which are stored in
/// `data[..len]`.
///
/// As with [`decrypt`], source and destination are the same buffer.
pub fn decrypt_double(len_iv: i32, data: &mut [u8]) -> Result<usize> {
    let skip = check_len_iv(len_iv, data.len())?;
    let mut outer = EEXEC_KEY;
    let mut inner = CHARSTRING_KEY;

    for i in 0..data.len() {
        let plain = decrypt_byte(decrypt_byte(data[i], &mut outer), &mut inner);

        if i >= skip {
            data[i - skip] = plain;
        }
    }

    Ok(data.len() - skip)
}

fn check_len_iv(len_iv: i32, len: usize) -> Result<usize> {
    usize::try_from(len_iv)
        .ok()
        .filter(|skip| *skip <= len)
        .ok_or(Error::BadLenIv)
}

#[inline]
pub(crate) fn decrypt_byte(cipher: u8, r: &mut u32) -> u8 {
    let cipher = u32::from(cipher);
    let plain = cipher ^ (*r >> 8);
    *r = ((cipher + *r).wrapping_mul(C1).wrapping_add(C2)) & 0xFFFF;
    (plain & 0xFF) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encrypt(plain: &[u8], key: u32) -> Vec<u8> {
        let mut r = key;
        plain
            .iter()
            .map(|p| {
                let c = (u32::from(*p) ^ (r >> 8)) & 0xFF;
                r = ((c + r).wrapping_mul(C1).wrapping_add(C2)) & 0xFFFF;
                c as u8
            })
            .collect()
    }

    #[test]
    fn single_known_ciphertext() {
        // Four zero lenIV bytes followed by `139 13`.
        let mut data = [0x10, 0xBF, 0x31, 0x70, 0x79, 0x3D];
        let len = decrypt(4, &mut data).unwrap();

        assert_eq!(len, 2);
        assert_eq!(&data[..len], &[0x8B, 0x0D]);
    }

    #[test]
    fn single_round_trip() {
        let plain = b"\x00\x00\x00\x00\x8b\x8b\x0d\x0e";
        let mut data = encrypt(plain, CHARSTRING_KEY);
        let len = decrypt(4, &mut data).unwrap();

        assert_eq!(len, 4);
        assert_eq!(&data[..len], &plain[4..]);
    }

    #[test]
    fn double_round_trip() {
        let plain = b"\x01\x02\x03\x04\xf7\x00\x8b\x15\x0e";
        let mut data = encrypt(&encrypt(plain, CHARSTRING_KEY), EEXEC_KEY);
        let len = decrypt_double(4, &mut data).unwrap();

        assert_eq!(len, plain.len() - 4);
        assert_eq!(&data[..len], &plain[4..]);
    }

    #[test]
    fn in_place_keeps_cipher_tail() {
        let plain = b"\x00\x00\x8b\x8c\x0e";
        let cipher = encrypt(plain, CHARSTRING_KEY);
        let mut data = cipher.clone();
        let len = decrypt(2, &mut data).unwrap();

        assert_eq!(&data[..len], &plain[2..]);
        assert_eq!(&data[len..], &cipher[len..]);
    }

    #[test]
    fn zero_len_iv() {
        let plain = b"\x8b\x0e";
        let mut data = encrypt(plain, CHARSTRING_KEY);

        assert_eq!(decrypt(0, &mut data), Ok(2));
        assert_eq!(&data, plain);
    }

    #[test]
    fn invalid_len_iv() {
        let mut data = [1, 2, 3];

        assert_eq!(decrypt(-1, &mut data), Err(Error::BadLenIv));
        assert_eq!(decrypt(4, &mut data), Err(Error::BadLenIv));
        assert_eq!(decrypt_double(-2, &mut data), Err(Error::BadLenIv));
        assert_eq!(data, [1, 2, 3]);
    }
}
