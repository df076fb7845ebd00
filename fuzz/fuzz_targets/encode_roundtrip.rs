#![no_main]

// Encodes arbitrary blocks and checks the output is deterministic, decodable and respects
// the mode constraints of each format.

use dst_texture_bc1::{decode_bc1_block_from_slice, encode_bc1_block};
use dst_texture_bc3::{decode_bc3_block_from_slice, encode_bc3_block};
use dst_texture_common::{
    color_565::Color565, color_8888::Color8888, decoded_4x4_block::Decoded4x4Block,
    quality::CompressionQuality,
};
use libfuzzer_sys::{arbitrary, fuzz_target};

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct Input {
    pub rgba: [[u8; 4]; 16],
    pub fast: bool,
}

fuzz_target!(|input: Input| {
    let block = Decoded4x4Block {
        pixels: input.rgba.map(|[r, g, b, a]| Color8888::new(r, g, b, a)),
    };
    let quality = if input.fast {
        CompressionQuality::Fast
    } else {
        CompressionQuality::Normal
    };

    let bc1 = encode_bc1_block(&block, quality);
    assert_eq!(bc1, encode_bc1_block(&block, quality));
    decode_bc1_block_from_slice(&bc1).unwrap();

    let bc3 = encode_bc3_block(&block, quality);
    assert_eq!(bc3, encode_bc3_block(&block, quality));
    let decoded = decode_bc3_block_from_slice(&bc3).unwrap();

    // The colour half of BC3 stays in four colour mode (or a solid index 0 block).
    let c0 = Color565::from_raw(u16::from_le_bytes([bc3[8], bc3[9]]));
    let c1 = Color565::from_raw(u16::from_le_bytes([bc3[10], bc3[11]]));
    assert!(c0.greater_than(&c1) || bc3[12..16] == [0, 0, 0, 0]);

    // Extreme alpha values are always reproduced exactly.
    let min = block.pixels.iter().map(|p| p.a).min().unwrap();
    let max = block.pixels.iter().map(|p| p.a).max().unwrap();
    assert!(decoded.pixels.iter().any(|p| p.a == min));
    assert!(decoded.pixels.iter().any(|p| p.a == max));
});
