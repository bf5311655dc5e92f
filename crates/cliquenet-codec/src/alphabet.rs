//! Base-92 digit alphabet.

/// Number of digits in the alphabet.
pub const BASE: u32 = 92;

/// Digit characters in value order: printable ASCII without `"`, `'` and `\`.
pub const ALPHABET: [u8; BASE as usize] = build_alphabet();

const INVALID: u8 = u8::MAX;

/// Reverse lookup from ASCII byte to digit value.
const DIGIT_VALUES: [u8; 128] = build_digit_values();

const fn is_excluded(c: u8) -> bool {
    c == b'"' || c == b'\'' || c == b'\\'
}

const fn build_alphabet() -> [u8; BASE as usize] {
    let mut out = [0u8; BASE as usize];
    let mut c = 0x20u8;
    let mut i = 0;
    while c <= 0x7E {
        if !is_excluded(c) {
            out[i] = c;
            i += 1;
        }
        c += 1;
    }
    out
}

const fn build_digit_values() -> [u8; 128] {
    let mut out = [INVALID; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        out[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    out
}

/// Character for a digit value `< 92`.
pub fn digit_char(value: u32) -> char {
    ALPHABET[value as usize] as char
}

/// Digit value of an encoded byte, or `None` outside the alphabet.
pub fn digit_value(byte: u8) -> Option<u32> {
    match DIGIT_VALUES.get(byte as usize) {
        Some(&v) if v != INVALID => Some(v as u32),
        _ => None,
    }
}
