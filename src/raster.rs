//! Bitmap rendering using resvg/usvg.
//!
//! Frames are serialized to SVG and rasterized, so bitmaps always match the
//! inline markup.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

use crate::error::{AvatarError, AvatarResult};
use crate::render::Frame;

impl Frame {
    /// Rasterizes the frame at its size class.
    ///
    /// The document is emitted with the size class as its pixel dimensions,
    /// so the tree renders without any extra transform.
    #[tracing::instrument(level = "debug", skip(self), fields(size = ?self.size))]
    pub fn to_image(&self) -> AvatarResult<RgbaImage> {
        let pixels = self.size.pixels();
        let tree = Tree::from_str(&self.to_svg_sized(pixels), &Options::default())
            .map_err(|e| AvatarError::raster(e.to_string()))?;

        paint(&tree, pixels, Transform::identity())
            .ok_or_else(|| AvatarError::raster(format!("cannot allocate a {pixels}px canvas")))
    }

    /// Rasterizes the frame and encodes it as PNG.
    pub fn to_png(&self) -> AvatarResult<Vec<u8>> {
        let mut bytes = Vec::new();
        self.to_image()?
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| AvatarError::raster(e.to_string()))?;
        Ok(bytes)
    }
}

/// Rasterizes arbitrary SVG markup into a `size` square.
///
/// The drawing is scaled uniformly by its longer side and anchored top-left.
/// Returns `None` for unparsable markup or a zero size.
pub fn rasterize(svg: &str, size: u32) -> Option<RgbaImage> {
    let tree = Tree::from_str(svg, &Options::default()).ok()?;
    let extent = tree.size().width().max(tree.size().height());
    let scale = size as f32 / extent;
    paint(&tree, size, Transform::from_scale(scale, scale))
}

/// Draws `tree` onto a fresh square canvas and returns straight-alpha pixels.
fn paint(tree: &Tree, size: u32, transform: Transform) -> Option<RgbaImage> {
    let mut pixmap = Pixmap::new(size, size)?;
    resvg::render(tree, transform, &mut pixmap.as_mut());

    let straight: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|px| {
            let c = px.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    RgbaImage::from_raw(size, size, straight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AvatarConfig;
    use crate::projection::SizeClass;
    use crate::render::{RenderOptions, render_config};

    #[test]
    fn rasterize_scales_to_requested_size() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100" width="100" height="100"><circle cx="50" cy="50" r="40" fill="#ff0000"/></svg>"##;
        let img = rasterize(svg, 50).unwrap();
        assert_eq!((img.width(), img.height()), (50, 50));
        assert_eq!(img.get_pixel(25, 25).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn invalid_markup_is_rejected() {
        assert!(rasterize("<not-svg", 10).is_none());
    }

    #[test]
    fn frame_rasterizes_at_size_class() {
        let config = AvatarConfig::default()
            .with_colors("#00ff00", "#00ff00")
            .with_hair_style("bald")
            .with_accessories(Vec::<&str>::new());
        let options = RenderOptions {
            size: SizeClass::Lg,
            ..RenderOptions::default()
        };
        let img = render_config(&config, None, &options).to_image().unwrap();
        assert_eq!(img.width(), 150);

        // left half of the round body, clear of the face
        let body = img.get_pixel(36, 60).0;
        assert_eq!(body, [0, 255, 0, 255]);
    }

    #[test]
    fn png_has_signature() {
        let frame = render_config(&AvatarConfig::default(), None, &RenderOptions::default());
        let png = frame.to_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn translucent_fills_come_out_straight() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><rect width="10" height="10" fill="#ff0000" fill-opacity="0.5"/></svg>"##;
        let [r, g, b, a] = rasterize(svg, 10).unwrap().get_pixel(5, 5).0;
        assert!(r >= 254, "red = {r}");
        assert_eq!((g, b), (0, 0));
        assert!((127..=128).contains(&a), "alpha = {a}");
    }

    #[test]
    fn zero_size_is_rejected() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"/>"#;
        assert!(rasterize(svg, 0).is_none());
    }
}
