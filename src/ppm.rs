//! Plain-text PPM (`P3`) export.

use std::io::{self, Write};

use crate::vec3::Channel::*;
use crate::Image;

/// Maps a linear color channel to its 8-bit output value: gamma-2 correction
/// (square root) followed by clamping into [0, 0.999] and scaling by 256.
fn to_byte(x: f32) -> u8 {
    (256. * x.sqrt().max(0.).min(0.999)) as u8
}

/// Writes `image` to `out` in plain PPM: a `P3` header with dimensions and
/// max channel value, then one whitespace-separated RGB triplet per pixel,
/// rows from the top of the image down.
pub fn write_ppm(out: &mut impl Write, image: &Image) -> io::Result<()> {
    writeln!(out, "P3\n{} {}\n255", image.width(), image.height())?;
    for scanline in image.scanlines() {
        for color in scanline {
            writeln!(
                out,
                "{} {} {}",
                to_byte(color[R]),
                to_byte(color[G]),
                to_byte(color[B])
            )?;
        }
    }
    Ok(())
}
