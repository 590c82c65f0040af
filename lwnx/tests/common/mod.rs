#![allow(dead_code)]

use lwnx::{encode_packet, Packet, PacketDecoder};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use utilities::{MockIO, RxQueue};

pub const TIMEOUT: Duration = Duration::from_millis(20);

pub type Written = Arc<Mutex<Vec<Packet>>>;

pub fn str16(s: &str) -> Vec<u8> {
    let mut field = s.as_bytes().to_vec();
    field.resize(16, 0);
    field
}

pub fn distance_packet(distance: u16, raw_angle: u16) -> Packet {
    let [d0, d1] = distance.to_le_bytes();
    let [a0, a1] = raw_angle.to_le_bytes();
    encode_packet(lwnx::DISTANCE_DATA, false, &[d0, d1, a0, a1]).unwrap()
}

/// Response an SF45 would give to `request`
pub fn respond(request: &Packet) -> Packet {
    let payload = match request.command() {
        0 => str16("SF45/B"),
        2 => vec![7, 3, 2, 0],
        3 => str16("A1B2C3D4"),
        _ => request.payload().to_vec(),
    };
    encode_packet(request.command(), request.is_write(), &payload).unwrap()
}

/// Serial port answering every request, except the ones listed in `silent`
///
/// Enabling the distance stream queues `stream` right after the acknowledgement.
pub fn simulated_device(rx: RxQueue, written: Written, stream: Vec<u8>, silent: Vec<u8>) -> MockIO {
    let mut io = MockIO::new();
    let device_rx = rx.clone();
    let mut decoder = PacketDecoder::new();
    io.expect_write().returning(move |buf| {
        for packet in decoder.decode_all(buf) {
            written.lock().unwrap().push(packet.clone());
            if silent.contains(&packet.command()) {
                continue;
            }
            device_rx.push(respond(&packet).as_bytes());
            if packet.command() == 30 && packet.payload().first() == Some(&5) {
                device_rx.push(&stream);
            }
        }
        Ok(buf.len())
    });
    io.expect_flush().returning(|| Ok(()));
    io.expect_read().returning(move |buf| rx.read_into(buf));
    io
}

pub fn commands(written: &Written) -> Vec<u8> {
    written.lock().unwrap().iter().map(|p| p.command()).collect()
}
