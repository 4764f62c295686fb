use log::info;
use opencv::{
    core::{Mat, Rect, Size, Vector},
    highgui, imgcodecs,
    prelude::*,
};

use crate::config::Config;
use crate::error::{Error, Result};

/// Square region of `side` pixels centered in an image of `size`.
///
/// The midpoint and half-size use integer division, so an odd `side`
/// lands one pixel off true center.
pub fn centered_rect(size: Size, side: i32) -> Result<Rect> {
    if size.width < side || size.height < side {
        return Err(Error::SourceTooSmall {
            width: size.width,
            height: size.height,
            size: side,
        });
    }

    let center_x = size.width / 2;
    let center_y = size.height / 2;
    let half = side / 2;
    Ok(Rect::new(center_x - half, center_y - half, side, side))
}

/// Extracts the centered square as an owned mat.
pub fn centered_crop(image: &Mat, side: i32) -> Result<Mat> {
    let rect = centered_rect(image.size()?, side)?;
    Ok(image.roi(rect)?.clone_pointee())
}

pub fn run(cfg: &Config) -> Result<()> {
    let original = imgcodecs::imread(&cfg.source_image, imgcodecs::IMREAD_COLOR)?;
    if original.empty() {
        return Err(Error::UnreadableImage {
            path: cfg.source_image.clone(),
        });
    }

    let cropped = centered_crop(&original, cfg.crop_size)?;

    highgui::imshow("Original image", &original)?;
    highgui::imshow(&format!("Crop {0}x{0}", cfg.crop_size), &cropped)?;

    if !imgcodecs::imwrite(&cfg.cropped_output, &cropped, &Vector::new())? {
        return Err(Error::WriteFailed {
            path: cfg.cropped_output.clone(),
        });
    }
    info!("cropped image saved as {}", cfg.cropped_output);
    println!("Crop saved as: {}", cfg.cropped_output);

    Ok(())
}
