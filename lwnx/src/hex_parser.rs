//! Decoding of serial captures stored as whitespace separated hex dumps.

use crate::{codec::PacketDecoder, error::Error, packet::Packet};
use nom::{
    bytes::complete::take_while_m_n, character::complete::multispace0, combinator::{map_res, all_consuming},
    multi::many1, sequence::delimited, IResult,
};

/// Decodes a pair of chars formatted as hex into a byte. For example "FF" -> 255
fn hex_byte(input: &str) -> IResult<&str, u8> {
    map_res(
        take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()),
        |hex| u8::from_str_radix(hex, 16),
    )(input)
}

pub fn parse_hex_str(input: &str) -> IResult<&str, Vec<u8>> {
    all_consuming(many1(delimited(multispace0, hex_byte, multispace0)))(input)
}

/// Feeds a captured byte stream through the packet decoder, keeping every valid packet
pub fn decode_from_string(input: &str) -> Result<Vec<Packet>, Error> {
    let (_, data) =
        parse_hex_str(input).map_err(|_| Error::InvalidData("Could not parse hex file"))?;
    Ok(PacketDecoder::new().decode_all(&data))
}
