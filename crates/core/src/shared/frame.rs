use ndarray::ArrayView3;

use crate::shared::region::Region;

/// A decoded still image: contiguous pixel bytes in row-major order.
///
/// Format conversion happens at I/O boundaries only; the domain layer
/// treats pixel data as opaque.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Single-channel luma using the ITU-R BT.601 weights.
    ///
    /// A frame that is already single-channel is returned as-is.
    pub fn to_gray(&self) -> Frame {
        if self.channels == 1 {
            return self.clone();
        }
        let step = self.channels as usize;
        let data = self
            .data
            .chunks_exact(step)
            .map(|px| {
                let luma = 0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32;
                luma.round().clamp(0.0, 255.0) as u8
            })
            .collect();
        Frame::new(data, self.width, self.height, 1)
    }

    /// Extracts a square crop centered on the region, clamped to frame bounds.
    pub fn square_crop(&self, region: &Region) -> Frame {
        let fw = self.width as i64;
        let fh = self.height as i64;
        let side = region.width.max(region.height) as i64;
        let cx = region.x as i64 + region.width as i64 / 2;
        let cy = region.y as i64 + region.height as i64 / 2;

        let x1 = (cx - side / 2).clamp(0, fw);
        let y1 = (cy - side / 2).clamp(0, fh);
        let x2 = (cx - side / 2 + side).clamp(0, fw);
        let y2 = (cy - side / 2 + side).clamp(0, fh);
        self.crop(x1 as u32, y1 as u32, (x2 - x1) as u32, (y2 - y1) as u32)
    }

    /// Copies out a rectangle. The caller guarantees it lies within the frame.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Frame {
        let channels = self.channels as usize;
        let row_len = width as usize * channels;
        let mut data = Vec::with_capacity(row_len * height as usize);
        for row in y..y + height {
            let start = (row as usize * self.width as usize + x as usize) * channels;
            data.extend_from_slice(&self.data[start..start + row_len]);
        }
        Frame::new(data, width, height, self.channels)
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}
