pub trait GlyphSource {
    type Image;

    fn draw(&self, code: u8) -> Self::Image;
}
