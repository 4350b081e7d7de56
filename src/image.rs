use image::{DynamicImage, GenericImageView, ImageBuffer, Pixel, Rgb, RgbImage};
use log::debug;
use crate::{PixelSink, PixelSource, Point3i};

fn convert_color(color: Rgb<u8>) -> Point3i {
    color.into()
}

impl PixelSource for RgbImage {
    fn dimensions(&self) -> (u32, u32) {
        ImageBuffer::dimensions(self)
    }

    fn pixels(&self) -> Box<dyn Iterator<Item=Point3i> + '_> {
        Box::new(ImageBuffer::pixels(self).map(|&color| convert_color(color)))
    }
}

impl PixelSource for DynamicImage {
    fn dimensions(&self) -> (u32, u32) {
        GenericImageView::dimensions(self)
    }

    fn pixels(&self) -> Box<dyn Iterator<Item=Point3i> + '_> {
        let (width, height) = GenericImageView::dimensions(self);

        Box::new((0..height).flat_map(move |row| {
            (0..width).map(move |col| convert_color(self.get_pixel(col, row).to_rgb()))
        }))
    }
}

impl PixelSink for RgbImage {
    fn write(&mut self, row: u32, col: u32, color: Point3i) {
        let rgb8 = color.to_rgb8_saturating();
        if color.to_rgb8().is_none() {
            debug!("Clamped out-of-range color {} at pixel [{}][{}]", color, row, col);
        }

        self.put_pixel(col, row, Rgb([rgb8.red, rgb8.green, rgb8.blue]));
    }
}
