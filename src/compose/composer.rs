use image::{RgbImage, imageops};

use crate::{
    compose::grid::GridSpec,
    foundation::{
        core::{CellSize, ImageBuffer},
        error::{CollageError, CollageResult},
    },
};

/// Resampling filter used when fitting a thumbnail into its cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl From<ResizeFilter> for imageops::FilterType {
    fn from(f: ResizeFilter) -> Self {
        match f {
            ResizeFilter::Nearest => imageops::FilterType::Nearest,
            ResizeFilter::Triangle => imageops::FilterType::Triangle,
            ResizeFilter::CatmullRom => imageops::FilterType::CatmullRom,
            ResizeFilter::Gaussian => imageops::FilterType::Gaussian,
            ResizeFilter::Lanczos3 => imageops::FilterType::Lanczos3,
        }
    }
}

/// Pastes thumbnails row-major onto a black RGB canvas sized by [`GridSpec`].
#[derive(Clone, Copy, Debug, Default)]
pub struct GridComposer {
    pub filter: ResizeFilter,
}

impl GridComposer {
    pub fn new(filter: ResizeFilter) -> Self {
        Self { filter }
    }

    /// Compose `images` into one canvas. Image `i` lands in column `i % side`, row
    /// `i / side`, stretched to exactly `cell x cell`. Alpha is dropped.
    ///
    /// Buffers are decoded one at a time as their cell comes up; the first one that
    /// fails to decode aborts composition.
    #[tracing::instrument(skip(self, images), fields(count = images.len(), cell = cell.px()))]
    pub fn compose(&self, images: Vec<ImageBuffer>, cell: CellSize) -> CollageResult<RgbImage> {
        let grid = GridSpec::new(images.len(), cell)?;
        let mut canvas = RgbImage::new(grid.width(), grid.height());
        let px = cell.px();
        let filter = imageops::FilterType::from(self.filter);

        let mut pending = images.into_iter().enumerate();
        'rows: for y in (0..grid.height()).step_by(px as usize) {
            for x in (0..grid.width()).step_by(px as usize) {
                let Some((idx, buf)) = pending.next() else {
                    break 'rows;
                };
                let tile = decode_cell(&buf, idx, px, filter)?;
                imageops::replace(&mut canvas, &tile, i64::from(x), i64::from(y));
            }
        }

        tracing::info!(
            width = grid.width(),
            height = grid.height(),
            side = grid.side,
            trimmed = grid.is_trimmed(),
            "collage composed"
        );
        Ok(canvas)
    }
}

fn decode_cell(
    buf: &ImageBuffer,
    idx: usize,
    px: u32,
    filter: imageops::FilterType,
) -> CollageResult<RgbImage> {
    let decoded = image::load_from_memory(buf.as_bytes())
        .map_err(|e| CollageError::decode(format!("image #{idx} ({} bytes): {e}", buf.len())))?;
    let rgb = decoded.to_rgb8();
    if rgb.dimensions() == (px, px) {
        return Ok(rgb);
    }
    Ok(imageops::resize(&rgb, px, px, filter))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{Rgb, Rgba, RgbaImage};

    use super::*;

    fn png(w: u32, h: u32, rgb: [u8; 3]) -> ImageBuffer {
        let img = RgbaImage::from_pixel(w, h, Rgba([rgb[0], rgb[1], rgb[2], 255]));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        ImageBuffer(buf)
    }

    fn cell(px: u32) -> CellSize {
        CellSize::new(px).unwrap()
    }

    const COLORS: [[u8; 3]; 5] = [
        [255, 0, 0],
        [0, 255, 0],
        [0, 0, 255],
        [255, 255, 0],
        [0, 255, 255],
    ];

    #[test]
    fn single_image_fills_one_cell() {
        let out = GridComposer::new(ResizeFilter::Nearest)
            .compose(vec![png(3, 5, [9, 8, 7])], cell(4))
            .unwrap();
        assert_eq!(out.dimensions(), (4, 4));
        assert!(out.pixels().all(|p| *p == Rgb([9, 8, 7])));
    }

    #[test]
    fn five_images_land_row_major_on_trimmed_canvas() {
        let images = COLORS.iter().map(|c| png(8, 8, *c)).collect();
        let out = GridComposer::new(ResizeFilter::Nearest)
            .compose(images, cell(10))
            .unwrap();
        assert_eq!(out.dimensions(), (30, 20));

        let grid = GridSpec::new(5, cell(10)).unwrap();
        for (i, c) in COLORS.iter().enumerate() {
            let (x0, y0) = grid.origin_of(i as u32);
            for (dx, dy) in [(0, 0), (9, 0), (0, 9), (9, 9), (5, 5)] {
                assert_eq!(*out.get_pixel(x0 + dx, y0 + dy), Rgb(*c), "image {i}");
            }
        }
        // cell (2, 1) is past the last image and stays blank
        for y in 10..20 {
            for x in 20..30 {
                assert_eq!(*out.get_pixel(x, y), Rgb([0, 0, 0]));
            }
        }
    }

    #[test]
    fn non_square_sources_are_stretched_to_cell() {
        let images = vec![png(40, 10, [1, 2, 3]), png(10, 40, [4, 5, 6])];
        let out = GridComposer::new(ResizeFilter::Nearest)
            .compose(images, cell(6))
            .unwrap();
        assert_eq!(out.dimensions(), (12, 6));
        assert_eq!(*out.get_pixel(0, 5), Rgb([1, 2, 3]));
        assert_eq!(*out.get_pixel(11, 0), Rgb([4, 5, 6]));
    }

    #[test]
    fn alpha_is_flattened_to_rgb() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 0]));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        let out = GridComposer::default()
            .compose(vec![ImageBuffer(buf)], cell(2))
            .unwrap();
        assert_eq!(*out.get_pixel(1, 1), Rgb([10, 20, 30]));
    }

    #[test]
    fn undecodable_buffer_aborts_with_index() {
        let images = vec![png(2, 2, [1, 1, 1]), ImageBuffer(b"not an image".to_vec())];
        let err = GridComposer::default()
            .compose(images, cell(2))
            .unwrap_err();
        assert!(matches!(err, CollageError::Decode(_)));
        assert!(err.to_string().contains("image #1"));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            GridComposer::default().compose(Vec::new(), cell(2)),
            Err(CollageError::EmptyResult(_))
        ));
    }
}
