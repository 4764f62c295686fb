use opencv::{
    core::{Mat, Point, Vec3b, Vec4b},
    imgcodecs,
    prelude::*,
};

use crate::error::{Error, Result};

/// Loads the overlay sprite with its alpha channel intact.
pub fn load_sprite(path: &str) -> Result<Mat> {
    let sprite = imgcodecs::imread(path, imgcodecs::IMREAD_UNCHANGED)?;
    if sprite.empty() {
        return Err(Error::UnreadableImage {
            path: path.to_string(),
        });
    }
    let channels = sprite.channels();
    if channels != 4 {
        return Err(Error::SpriteWithoutAlpha {
            path: path.to_string(),
            channels,
        });
    }
    Ok(sprite)
}

/// Pastes `sprite` onto `frame` centered at `center`.
///
/// Alpha is a binary mask: any non-zero alpha pixel is copied opaquely,
/// zero-alpha pixels leave the frame untouched. The destination
/// rectangle is clipped against the frame, so placements overlapping an
/// edge or fully outside are handled without touching out-of-bounds
/// pixels.
pub fn composite(frame: &mut Mat, sprite: &Mat, center: Point) -> Result<()> {
    let frame_size = frame.size()?;
    let sprite_size = sprite.size()?;

    let origin = Point::new(
        center.x - sprite_size.width / 2,
        center.y - sprite_size.height / 2,
    );

    let x0 = origin.x.max(0);
    let y0 = origin.y.max(0);
    let x1 = (origin.x + sprite_size.width).min(frame_size.width);
    let y1 = (origin.y + sprite_size.height).min(frame_size.height);
    if x0 >= x1 || y0 >= y1 {
        return Ok(());
    }

    for y in y0..y1 {
        for x in x0..x1 {
            let src = *sprite.at_2d::<Vec4b>(y - origin.y, x - origin.x)?;
            if src[3] != 0 {
                *frame.at_2d_mut::<Vec3b>(y, x)? = Vec3b::from([src[0], src[1], src[2]]);
            }
        }
    }

    Ok(())
}
