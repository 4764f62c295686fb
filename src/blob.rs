use opencv::{
    core::{Mat, Point, Rect},
    imgproc::{
        self, bounding_rect, cvt_color, find_contours, threshold, CHAIN_APPROX_SIMPLE,
        COLOR_BGR2GRAY, RETR_EXTERNAL, THRESH_BINARY,
    },
    prelude::*,
    types::{VectorOfPoint, VectorOfVectorOfPoint},
};

use crate::error::Result;

/// The largest bright region of one frame: its outline and the
/// axis-aligned box around it. Recomputed from scratch every frame.
#[derive(Debug)]
pub struct Blob {
    pub contour: VectorOfPoint,
    pub bounds: Rect,
}

impl Blob {
    /// Bounding-box center, truncating division.
    pub fn center(&self) -> Point {
        Point::new(
            self.bounds.x + self.bounds.width / 2,
            self.bounds.y + self.bounds.height / 2,
        )
    }
}

pub fn grayscale(frame: &Mat) -> Result<Mat> {
    let mut gray = Mat::default();
    cvt_color(frame, &mut gray, COLOR_BGR2GRAY, 0)?;
    Ok(gray)
}

/// Fixed binary threshold: pixels brighter than `value` become 255,
/// the rest 0.
pub fn binarize(gray: &Mat, value: f64) -> Result<Mat> {
    let mut mask = Mat::default();
    threshold(gray, &mut mask, value, 255.0, THRESH_BINARY)?;
    Ok(mask)
}

/// Picks the maximum-area external contour of a binary mask.
///
/// Strict comparison keeps the first-encountered contour on area ties.
pub fn find_largest(mask: &Mat) -> Result<Option<Blob>> {
    let mut contours = VectorOfVectorOfPoint::new();
    find_contours(
        mask,
        &mut contours,
        RETR_EXTERNAL,
        CHAIN_APPROX_SIMPLE,
        Point::new(0, 0),
    )?;

    let mut largest_area = 0.0;
    let mut largest = None;
    for contour in contours.iter() {
        let area = imgproc::contour_area(&contour, false)?;
        if area > largest_area {
            largest_area = area;
            largest = Some(contour);
        }
    }

    match largest {
        Some(contour) => {
            let bounds = bounding_rect(&contour)?;
            Ok(Some(Blob { contour, bounds }))
        }
        None => Ok(None),
    }
}

/// Full per-frame segmentation: grayscale, binarize, pick the largest
/// blob. `None` when nothing reaches the threshold.
pub fn detect(frame: &Mat, thresh: f64) -> Result<Option<Blob>> {
    let gray = grayscale(frame)?;
    let mask = binarize(&gray, thresh)?;
    find_largest(&mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Scalar, Size, CV_8UC1, CV_8UC3};
    use opencv::imgproc::{rectangle, LINE_8};

    fn dark_frame(width: i32, height: i32) -> Mat {
        Mat::new_rows_cols_with_default(height, width, CV_8UC3, Scalar::all(20.0)).unwrap()
    }

    fn paint(frame: &mut Mat, rect: Rect, brightness: f64) {
        rectangle(frame, rect, Scalar::all(brightness), -1, LINE_8, 0).unwrap();
    }

    #[test]
    fn bright_square_is_boxed_exactly() {
        let mut frame = dark_frame(160, 120);
        paint(&mut frame, Rect::new(30, 40, 20, 20), 220.0);

        let blob = detect(&frame, 100.0).unwrap().unwrap();
        assert_eq!(blob.bounds, Rect::new(30, 40, 20, 20));
        assert_eq!(blob.center(), Point::new(40, 50));
    }

    #[test]
    fn larger_of_two_squares_wins() {
        let mut frame = dark_frame(200, 200);
        paint(&mut frame, Rect::new(10, 10, 8, 8), 200.0);
        paint(&mut frame, Rect::new(120, 60, 40, 40), 200.0);

        let blob = detect(&frame, 100.0).unwrap().unwrap();
        assert_eq!(blob.bounds, Rect::new(120, 60, 40, 40));
    }

    #[test]
    fn all_dark_frame_has_no_blob() {
        let frame = dark_frame(160, 120);
        assert!(detect(&frame, 100.0).unwrap().is_none());
    }

    #[test]
    fn binarize_splits_at_the_cutoff() {
        let mut gray =
            Mat::new_rows_cols_with_default(2, 2, CV_8UC1, Scalar::all(0.0)).unwrap();
        *gray.at_2d_mut::<u8>(0, 0).unwrap() = 100;
        *gray.at_2d_mut::<u8>(0, 1).unwrap() = 101;
        *gray.at_2d_mut::<u8>(1, 0).unwrap() = 255;

        let mask = binarize(&gray, 100.0).unwrap();
        assert_eq!(mask.size().unwrap(), Size::new(2, 2));
        assert_eq!(*mask.at_2d::<u8>(0, 0).unwrap(), 0);
        assert_eq!(*mask.at_2d::<u8>(0, 1).unwrap(), 255);
        assert_eq!(*mask.at_2d::<u8>(1, 0).unwrap(), 255);
        assert_eq!(*mask.at_2d::<u8>(1, 1).unwrap(), 0);
    }
}
