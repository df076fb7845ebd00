#![no_main]

// Compares our BC3 decoder against rgbcx-sys.

use core::mem;
use dst_texture_bc3::util::decode_bc3_block;
use dst_texture_common::decoded_4x4_block::Decoded4x4Block;
use dst_texture_common::{color_565::Color565, color_8888::Color8888};
use libfuzzer_sys::{arbitrary, fuzz_target};
use rgbcx_sys::root::rgbcx;

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct Bc3Block {
    pub bytes: [u8; 16],
}

fuzz_target!(|block: Bc3Block| {
    // Skip c0 <= c1: decoders disagree on whether BC3 colour honours three colour mode.
    let c0 = Color565::from_raw(u16::from_le_bytes([block.bytes[8], block.bytes[9]]));
    let c1 = Color565::from_raw(u16::from_le_bytes([block.bytes[10], block.bytes[11]]));
    if !c0.greater_than(&c1) {
        return;
    }

    let bc3_block = &block.bytes;
    let our_decoded = unsafe { decode_bc3_block(bc3_block.as_ptr()) };
    let reference_decoded = rgbcx_decode_bc3_to_block(bc3_block);

    assert_eq!(our_decoded, reference_decoded, "Decoded blocks don't match");
});

fn rgbcx_decode_bc3_to_block(bc3_block: &[u8]) -> Decoded4x4Block {
    let mut rgba_buffer = [0u8; 4 * 16];

    unsafe {
        rgbcx::unpack_bc3(
            bc3_block.as_ptr() as *const core::ffi::c_void,
            rgba_buffer.as_mut_ptr() as *mut core::ffi::c_void,
            rgbcx::bc1_approx_mode::cBC1Ideal,
        );

        let pixels: [Color8888; 16] = mem::transmute(rgba_buffer);
        Decoded4x4Block { pixels }
    }
}
