mod common;

use claims::*;
use common::*;
use lwnx::{
    Error, IoAdapter, LoggedReading, ReadingSink, Session, SessionConfig, SessionSummary,
    StdIoAdapter,
};
use mockall::{mock, Sequence};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use utilities::RxQueue;

mock! {
    pub Sink {}
    impl ReadingSink for Sink {
        fn append(&mut self, reading: &LoggedReading) -> lwnx::Result<()>;
        fn flush(&mut self) -> lwnx::Result<()>;
    }
}

fn config() -> SessionConfig {
    SessionConfig {
        query_timeout: TIMEOUT,
        command_timeout: TIMEOUT,
        reading_timeout: TIMEOUT,
        ..Default::default()
    }
}

fn session(
    sink: MockSink,
    stream: Vec<u8>,
    silent: Vec<u8>,
) -> (Session<StdIoAdapter<utilities::MockIO>, MockSink>, Written) {
    let written = Written::default();
    let io = simulated_device(RxQueue::new(), written.clone(), stream, silent);
    let lwnx = StdIoAdapter::new(io).open_lwnx();
    (Session::new(lwnx, sink, config()), written)
}

fn stream_of(readings: &[(u16, u16)]) -> Vec<u8> {
    readings
        .iter()
        .flat_map(|(distance, angle)| distance_packet(*distance, *angle).into_bytes())
        .collect()
}

fn is_disable(written: &Written) -> bool {
    let written = written.lock().unwrap();
    let last = written.last().unwrap();
    last.command() == 30 && last.payload() == [0, 0, 0, 0]
}

#[test]
fn log_readings_until_stopped() {
    let running = Arc::new(AtomicBool::new(true));
    let mut sink = MockSink::new();
    let mut seq = Sequence::new();
    let expected = [(1.0, 0.1), (2.5, -0.5), (0.3, 320.0)];
    for (i, (distance, angle)) in expected.into_iter().enumerate() {
        let running = running.clone();
        sink.expect_append()
            .withf(move |r| r.distance == distance && r.angle == angle && r.timestamp > 0.0)
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| {
                if i == 2 {
                    running.store(false, Ordering::SeqCst);
                }
                Ok(())
            });
        sink.expect_flush().times(1).in_sequence(&mut seq).returning(|| Ok(()));
    }

    // 0.5 degrees below zero, wrapped
    let stream = stream_of(&[(100, 10), (250, 65535 - 50), (30, 32000), (400, 0)]);
    let (mut session, written) = session(sink, stream, Vec::new());

    assert_ok_eq!(
        session.run(&running),
        SessionSummary { readings: 3, misses: 0 }
    );
    assert_eq!(commands(&written), vec![0, 2, 3, 66, 27, 30, 30]);
    assert!(is_disable(&written));
}

#[test]
fn count_misses_without_stopping() {
    let running = Arc::new(AtomicBool::new(true));
    let mut sink = MockSink::new();
    {
        let running = running.clone();
        sink.expect_append().times(1).returning(move |_| {
            running.store(false, Ordering::SeqCst);
            Ok(())
        });
    }
    sink.expect_flush().times(1).returning(|| Ok(()));

    // Undersized packet first, then a valid one
    let mut stream = lwnx::encode_packet(lwnx::DISTANCE_DATA, false, &[1, 2])
        .unwrap()
        .into_bytes();
    stream.extend(stream_of(&[(100, 10)]));
    let (mut session, written) = session(sink, stream, Vec::new());

    assert_ok_eq!(
        session.run(&running),
        SessionSummary { readings: 1, misses: 1 }
    );
    assert!(is_disable(&written));
}

#[test]
fn disable_stream_on_sink_failure() {
    let running = AtomicBool::new(true);
    let mut sink = MockSink::new();
    sink.expect_append().times(1).returning(|_| {
        Err(Error::IOError(std::io::Error::new(
            std::io::ErrorKind::Other,
            "Disk full",
        )))
    });
    sink.expect_flush().never();

    let (mut session, written) = session(sink, stream_of(&[(100, 10)]), Vec::new());
    assert_err!(session.run(&running));
    assert!(is_disable(&written));
}

#[test]
fn abort_on_failed_handshake() {
    let running = AtomicBool::new(true);
    let mut sink = MockSink::new();
    sink.expect_append().never();

    let (mut session, written) = session(sink, Vec::new(), vec![2]);
    assert_matches!(
        session.run(&running),
        Err(Error::NoResponse { command: 2, attempts: 4 })
    );
    // Streaming was never requested, so there is nothing to disable
    assert_eq!(commands(&written), vec![0, 2, 2, 2, 2]);
}

#[test]
fn disable_stream_when_enable_is_not_acknowledged() {
    let running = AtomicBool::new(true);
    let mut sink = MockSink::new();
    sink.expect_append().never();

    let (mut session, written) = session(sink, Vec::new(), vec![30]);
    assert_matches!(
        session.run(&running),
        Err(Error::NoResponse { command: 30, attempts: 4 })
    );
    let written = written.lock().unwrap();
    let stream_requests: Vec<_> = written
        .iter()
        .filter(|p| p.command() == 30)
        .map(|p| p.payload()[0])
        .collect();
    assert_eq!(stream_requests, vec![5, 5, 5, 5, 0, 0, 0, 0]);
}

#[test]
fn stop_before_first_reading() {
    let running = AtomicBool::new(false);
    let mut sink = MockSink::new();
    sink.expect_append().never();

    let (mut session, written) = session(sink, stream_of(&[(100, 10)]), Vec::new());
    assert_ok_eq!(session.run(&running), SessionSummary::default());
    assert!(is_disable(&written));
}

#[test]
fn reject_invalid_update_rate_before_streaming() {
    let running = AtomicBool::new(true);
    let written = Written::default();
    let io = simulated_device(RxQueue::new(), written.clone(), Vec::new(), Vec::new());
    let config = SessionConfig {
        update_rate: 13,
        ..config()
    };
    let mut session = Session::new(StdIoAdapter::new(io).open_lwnx(), MockSink::new(), config);

    assert_matches!(session.run(&running), Err(Error::InvalidUpdateRate(13)));
    assert_eq!(commands(&written), vec![0, 2, 3]);
}
