use lazy_static::lazy_static;
use manifest_dir_macros::exist_relative_path;
use mockall::mock;
use nom::{
    bytes::complete::take_while_m_n,
    character::complete::multispace0,
    combinator::{all_consuming, map_res},
    multi::many1,
    sequence::delimited,
    IResult,
};
use std::{
    collections::VecDeque,
    io::{Read, Write},
    sync::{Arc, Mutex},
};

/// Decodes a pair of chars formatted as hex into a byte. For example "FF" -> 255
fn hex_byte(input: &str) -> IResult<&str, u8> {
    map_res(
        take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()),
        |hex| u8::from_str_radix(hex, 16),
    )(input)
}

fn parse_hex_str(input: &str) -> IResult<&str, Vec<u8>> {
    all_consuming(many1(delimited(multispace0, hex_byte, multispace0)))(input)
}

lazy_static! {
    pub static ref SINGLE_READING: Vec<u8> = {
        let hex_str = include_str!(exist_relative_path!(
            "../resources/test/single_reading_example.txt"
        ));
        let (_, data) = parse_hex_str(hex_str)
            .expect("Failed to parse resources/test/single_reading_example.txt");
        data
    };
    pub static ref STREAM: Vec<u8> = {
        let hex_str = include_str!(exist_relative_path!(
            "../resources/test/stream_example.txt"
        ));
        let (_, data) = parse_hex_str(hex_str)
            .expect("Failed to parse resources/test/stream_example.txt");
        data
    };
}

mock! {
    pub IO {}
    impl Read for IO {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize>;
    }
    impl Write for IO {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize>;
        fn flush(&mut self) -> std::io::Result<()>;
    }
}

/// Byte queue shared between a test and the `read` expectation of a [`MockIO`]
#[derive(Clone, Default)]
pub struct RxQueue(Arc<Mutex<VecDeque<u8>>>);

impl RxQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, bytes: &[u8]) {
        self.0.lock().unwrap().extend(bytes);
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hands out queued bytes, an empty queue reads as a timeout
    pub fn read_into(&self, buf: &mut [u8]) -> std::io::Result<usize> {
        let mut queue = self.0.lock().unwrap();
        let count = queue.len().min(buf.len());
        for (dst, src) in buf.iter_mut().zip(queue.drain(..count)) {
            *dst = src;
        }
        Ok(count)
    }
}
