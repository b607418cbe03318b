/// Hex color literals (`#rgb`, `#rrggbb`)
use nom::{
    bytes::complete::{tag, take_while_m_n},
    combinator::{all_consuming, map_res},
    multi::count,
    sequence::preceded,
    IResult,
};

use crate::error::ColorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// The page accent, a lime green.
    pub const ACCENT: Rgb = Rgb::new(0xcc, 0xff, 0x00);

    /// Parse `#rgb` or `#rrggbb` (case-insensitive).
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let trimmed = input.trim();
        let parsed = if trimmed.len() == 4 {
            all_consuming(short_hex)(trimmed)
        } else {
            all_consuming(long_hex)(trimmed)
        };
        parsed.map(|(_, rgb)| rgb).map_err(|_| ColorError {
            input: input.to_string(),
        })
    }

    /// CSS form, always six digits.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn hex_pair(input: &str) -> IResult<&str, u8> {
    map_res(
        take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()),
        |digits: &str| u8::from_str_radix(digits, 16),
    )(input)
}

fn hex_single(input: &str) -> IResult<&str, u8> {
    map_res(
        take_while_m_n(1, 1, |c: char| c.is_ascii_hexdigit()),
        |digit: &str| u8::from_str_radix(digit, 16),
    )(input)
}

fn long_hex(input: &str) -> IResult<&str, Rgb> {
    let (input, channels) = preceded(tag("#"), count(hex_pair, 3))(input)?;
    Ok((input, Rgb::new(channels[0], channels[1], channels[2])))
}

fn short_hex(input: &str) -> IResult<&str, Rgb> {
    let (input, channels) = preceded(tag("#"), count(hex_single, 3))(input)?;
    // #abc expands to #aabbcc
    Ok((
        input,
        Rgb::new(channels[0] * 17, channels[1] * 17, channels[2] * 17),
    ))
}
