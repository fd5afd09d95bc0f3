//! End-to-end frame exchange over a live byte stream.
//!
//! A `UnixStream` pair stands in for the serial link: same Read + Write
//! surface, same timeout-bounded short reads.

#![cfg(unix)]

use std::os::unix::net::UnixStream;
use std::time::Duration;

use serlink_frame::{ByteOrder, FrameChannel, FrameConfig, FrameError, FrameField};

fn channel_pair() -> (FrameChannel<UnixStream>, FrameChannel<UnixStream>) {
    let (left, right) = UnixStream::pair().unwrap();
    left.set_read_timeout(Some(Duration::from_millis(100)))
        .unwrap();
    right
        .set_read_timeout(Some(Duration::from_millis(100)))
        .unwrap();
    (FrameChannel::new(left), FrameChannel::new(right))
}

#[test]
fn request_response_roundtrip() {
    let (mut host, mut device) = channel_pair();

    host.send(0x02, &[]).unwrap();
    let request = device.receive(0x02).unwrap();
    assert!(request.is_empty());

    device.send(0x02, &[42]).unwrap();
    let response = host.receive(0x02).unwrap();
    assert_eq!(response.as_ref(), [42]);
}

#[test]
fn assorted_commands_and_payload_sizes() {
    let (mut host, mut device) = channel_pair();

    for (command, len) in [(0u32, 0usize), (1, 1), (0x55, 9), (u32::MAX, 512)] {
        let payload: Vec<u8> = (0..len).map(|i| i as u8).collect();
        host.send(command, &payload).unwrap();
        assert_eq!(device.receive(command).unwrap().as_ref(), payload);
    }
}

#[test]
fn msb_first_peers_agree() {
    let (left, right) = UnixStream::pair().unwrap();
    let cfg = FrameConfig {
        byte_order: ByteOrder::MsbFirst,
        ..FrameConfig::default()
    };
    let mut host = FrameChannel::with_config(left, cfg.clone());
    let mut device = FrameChannel::with_config(right, cfg);

    host.send(0x1122_3344, b"msb").unwrap();
    assert_eq!(device.receive(0x1122_3344).unwrap().as_ref(), b"msb");
}

#[test]
fn silent_peer_times_out_on_start_marker() {
    let (mut host, _device) = channel_pair();

    let err = host.receive(1).unwrap_err();
    assert!(matches!(
        err,
        FrameError::Timeout {
            field: FrameField::StartMarker,
            ..
        }
    ));
}

#[test]
fn stalled_mid_frame_times_out_on_payload() {
    let (mut host, device) = channel_pair();

    // Hand-write a header announcing 4 payload bytes, then go quiet.
    use std::io::Write;
    let mut raw = device.into_inner();
    raw.write_all(&[0x55, 0x01, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0xAB])
        .unwrap();

    let err = host.receive(1).unwrap_err();
    assert!(matches!(
        err,
        FrameError::Timeout {
            field: FrameField::Payload,
            expected: 4,
            got: 1,
        }
    ));
}

#[test]
fn mismatched_command_rejected_across_the_wire() {
    let (mut host, mut device) = channel_pair();

    host.send(5, &[1, 2, 3]).unwrap();
    let err = device.receive(6).unwrap_err();
    assert!(matches!(
        err,
        FrameError::CommandMismatch {
            expected: 6,
            received: 5,
        }
    ));
}
