use log::{debug, info, warn};
use opencv::{
    core::{Mat, Point, Scalar},
    highgui,
    imgproc::{self, rectangle, LINE_8},
    prelude::*,
    types::VectorOfVectorOfPoint,
    videoio::{self, VideoCapture},
};

use crate::blob::{self, Blob};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::overlay;

const WINDOW_NAME: &str = "Mark tracking";

/// Capture device released on drop, so early aborts return the OS
/// handle too.
struct Camera {
    capture: VideoCapture,
}

impl Camera {
    fn open(index: i32) -> Result<Self> {
        let capture = VideoCapture::new(index, videoio::CAP_ANY)?;
        if !capture.is_opened()? {
            return Err(Error::CameraUnavailable { index });
        }
        info!("camera {} opened", index);
        Ok(Self { capture })
    }

    fn read(&mut self, frame: &mut Mat) -> Result<bool> {
        Ok(self.capture.read(frame)?)
    }
}

impl Drop for Camera {
    fn drop(&mut self) {
        if let Err(e) = self.capture.release() {
            warn!("camera release failed: {}", e);
        }
    }
}

/// Draws the blob outline, its bounding box and a full-frame crosshair
/// through its center.
fn annotate(frame: &mut Mat, blob: &Blob) -> Result<()> {
    let mut outline = VectorOfVectorOfPoint::new();
    outline.push(blob.contour.clone());
    imgproc::draw_contours(
        frame,
        &outline,
        -1,
        Scalar::new(0.0, 255.0, 0.0, 0.0),
        2,
        LINE_8,
        &Mat::default(),
        0,
        Point::new(0, 0),
    )?;

    rectangle(frame, blob.bounds, Scalar::new(0.0, 0.0, 255.0, 0.0), 2, LINE_8, 0)?;

    let size = frame.size()?;
    let center = blob.center();
    imgproc::line(
        frame,
        Point::new(center.x, 0),
        Point::new(center.x, size.height),
        Scalar::new(255.0, 0.0, 0.0, 0.0),
        2,
        LINE_8,
        0,
    )?;
    imgproc::line(
        frame,
        Point::new(0, center.y),
        Point::new(size.width, center.y),
        Scalar::new(0.0, 0.0, 255.0, 0.0),
        2,
        LINE_8,
        0,
    )?;

    Ok(())
}

pub fn run(cfg: &Config) -> Result<()> {
    let sprite = overlay::load_sprite(&cfg.sprite_image)?;
    let mut camera = Camera::open(cfg.camera_index)?;

    let mut frame = Mat::default();
    loop {
        if !camera.read(&mut frame)? || frame.empty() {
            info!("capture stream ended");
            break;
        }

        if let Some(blob) = blob::detect(&frame, cfg.threshold)? {
            debug!("blob at {:?}", blob.bounds);
            annotate(&mut frame, &blob)?;
            overlay::composite(&mut frame, &sprite, blob.center())?;
        }

        highgui::imshow(WINDOW_NAME, &frame)?;

        let key = highgui::wait_key(1)?;
        if key & 0xFF == cfg.quit_key as i32 {
            info!("quit key pressed");
            break;
        }
    }

    Ok(())
}
