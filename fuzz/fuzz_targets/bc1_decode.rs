#![no_main]

// Compares our BC1 decoder against rgbcx-sys using the Ideal method.

use core::mem;
use dst_texture_bc1::util::decode_bc1_block;
use dst_texture_common::color_8888::Color8888;
use dst_texture_common::decoded_4x4_block::Decoded4x4Block;
use libfuzzer_sys::{arbitrary, fuzz_target};
use rgbcx_sys::root::rgbcx;

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct Bc1Block {
    pub bytes: [u8; 8],
}

fuzz_target!(|block: Bc1Block| {
    let bc1_block = &block.bytes;

    let our_decoded = unsafe { decode_bc1_block(bc1_block.as_ptr()) };
    let rgbcx_decoded = rgbcx_decode_bc1_to_block(bc1_block);

    assert_eq!(our_decoded, rgbcx_decoded, "Decoded blocks don't match");
});

/// Decode BC1 block using rgbcx-sys with Ideal method and return it as Decoded4x4Block
fn rgbcx_decode_bc1_to_block(bc1_block: &[u8]) -> Decoded4x4Block {
    let mut rgba_buffer = [0u8; 4 * 16];

    unsafe {
        rgbcx::unpack_bc1(
            bc1_block.as_ptr() as *const core::ffi::c_void,
            rgba_buffer.as_mut_ptr() as *mut core::ffi::c_void,
            true, // set_alpha: three colour mode index 3 decodes with alpha 0
            rgbcx::bc1_approx_mode::cBC1Ideal,
        );

        // RGBA byte order matches the repr(C) layout of Color8888
        let pixels: [Color8888; 16] = mem::transmute(rgba_buffer);
        Decoded4x4Block { pixels }
    }
}
