//! Regenerates the CLI hex fixture from the canonical sample message.
//! The dictionary fixture (`fields.json`) is maintained by hand.
//!
//! Run from the repo root:
//! `cargo run -p bookwire-core --bin regenerate_fixtures`

use std::fs;
use std::path::Path;

use bookwire_core::codec::layout;

fn sample_message() -> Vec<u8> {
    let mut msg = vec![
        layout::FLAG_HAS_SET_DEFS | layout::FLAG_HAS_SUMMARY,
        layout::KEY_TYPE_ASCII,
    ];

    // set 1: ORDER_PRC decimal, ORDER_SIZE uint, ORDER_SIDE enum
    msg.extend_from_slice(&[
        0x01, 0x01, 0x03, //
        0x00, 0x16, layout::WIRE_DECIMAL, 0x09, //
        0x00, 0x1E, layout::WIRE_UINT, 0x08, //
        0x00, 0x19, layout::WIRE_ENUM, 0x02,
    ]);

    // summary: instrument name + trade date
    msg.push(layout::LIST_STANDARD);
    msg.extend_from_slice(&[0x00, 0x03, layout::WIRE_ASCII, 0x04]);
    msg.extend_from_slice(b"NDAQ");
    msg.extend_from_slice(&[0x00, 0x25, layout::WIRE_DATE, 0x04, 0x07, 0xEA, 0x08, 0x06]);
    msg.extend_from_slice(&layout::END_OF_LIST.to_be_bytes());

    // ADD via set 1
    msg.extend_from_slice(&[0x03, b'1', b'0', b'0', layout::ACTION_ADD]);
    msg.extend_from_slice(&[layout::LIST_SET_DEFINED, 0x01, 0xFE]);
    msg.extend_from_slice(&10050i64.to_be_bytes());
    msg.extend_from_slice(&500u64.to_be_bytes());
    msg.extend_from_slice(&1u16.to_be_bytes());

    // UPDATE with an explicit field list
    msg.extend_from_slice(&[0x03, b'1', b'0', b'1', layout::ACTION_UPDATE]);
    msg.push(layout::LIST_STANDARD);
    msg.extend_from_slice(&[0x00, 0x16, layout::WIRE_DECIMAL, 0x09, 0xFE]);
    msg.extend_from_slice(&10125i64.to_be_bytes());
    msg.extend_from_slice(&layout::END_OF_LIST.to_be_bytes());

    // DELETE carries no payload
    msg.extend_from_slice(&[0x03, b'1', b'0', b'0', layout::ACTION_DELETE]);

    msg.push(layout::END_OF_CONTAINER);
    msg
}

fn hex_lines(bytes: &[u8]) -> String {
    let mut out = String::new();
    for chunk in bytes.chunks(16) {
        for b in chunk {
            out.push_str(&format!("{:02x}", b));
        }
        out.push('\n');
    }
    out
}

fn main() {
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("bookwire-cli")
        .join("tests")
        .join("fixtures");
    fs::create_dir_all(&fixtures).expect("create fixtures dir");

    let hex_path = fixtures.join("book_update.hex");
    fs::write(&hex_path, hex_lines(&sample_message())).expect("write hex fixture");
    eprintln!("wrote {}", hex_path.display());
}
