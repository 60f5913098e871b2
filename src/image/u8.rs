/// Borrowed 8-bit image view with interleaved channels.
///
/// The enhancement core only accepts `channels == 1`; colour buffers are
/// viewed through the same type so the check happens in one place.
#[derive(Clone, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub channels: usize,
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// Tightly packed single-channel view.
    pub fn gray(w: usize, h: usize, data: &'a [u8]) -> Self {
        Self {
            w,
            h,
            stride: w,
            channels: 1,
            data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x * self.channels]
    }

    /// True when the backing slice covers every row the view claims.
    pub fn is_well_formed(&self) -> bool {
        if self.h == 0 || self.w == 0 {
            return true;
        }
        let row_len = self.w * self.channels;
        self.stride >= row_len && self.data.len() >= (self.h - 1) * self.stride + row_len
    }
}

impl<'a> crate::image::traits::ImageView for ImageU8<'a> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w * self.channels]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        (self.stride == self.w * self.channels)
            .then_some(&self.data[..self.w * self.h * self.channels])
    }
}
