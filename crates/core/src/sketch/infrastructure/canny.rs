//! Canny edge detection on single-channel images.
//!
//! Sobel 3x3 gradients with replicated borders, L1 magnitude, non-maximum
//! suppression quantized to four directions, then hysteresis over the
//! 8-neighbourhood. Output pixels are 255 on edges and 0 elsewhere.

const NONE: u8 = 0;
const WEAK: u8 = 1;
const STRONG: u8 = 2;

// tan(22.5°) and tan(67.5°)
const TAN_22_5: f64 = 0.414_213_56;
const TAN_67_5: f64 = 2.414_213_56;

pub fn canny(gray: &[u8], width: usize, height: usize, low: f64, high: f64) -> Vec<u8> {
    debug_assert_eq!(gray.len(), width * height);
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let (gx, gy) = sobel(gray, width, height);
    let mag: Vec<i32> = gx.iter().zip(&gy).map(|(x, y)| x.abs() + y.abs()).collect();
    let mut state = suppress_non_maxima(&gx, &gy, &mag, width, height, low, high);
    hysteresis(&mut state, width, height);
    state
        .into_iter()
        .map(|s| if s == STRONG { 255 } else { 0 })
        .collect()
}

fn sobel(gray: &[u8], width: usize, height: usize) -> (Vec<i32>, Vec<i32>) {
    let at = |x: isize, y: isize| -> i32 {
        let cx = x.clamp(0, width as isize - 1) as usize;
        let cy = y.clamp(0, height as isize - 1) as usize;
        gray[cy * width + cx] as i32
    };
    let mut gx = vec![0i32; width * height];
    let mut gy = vec![0i32; width * height];
    for y in 0..height as isize {
        for x in 0..width as isize {
            let i = y as usize * width + x as usize;
            gx[i] = (at(x + 1, y - 1) + 2 * at(x + 1, y) + at(x + 1, y + 1))
                - (at(x - 1, y - 1) + 2 * at(x - 1, y) + at(x - 1, y + 1));
            gy[i] = (at(x - 1, y + 1) + 2 * at(x, y + 1) + at(x + 1, y + 1))
                - (at(x - 1, y - 1) + 2 * at(x, y - 1) + at(x + 1, y - 1));
        }
    }
    (gx, gy)
}

/// Keeps local maxima along the gradient direction and classifies them as
/// weak (`> low`) or strong (`> high`).
fn suppress_non_maxima(
    gx: &[i32],
    gy: &[i32],
    mag: &[i32],
    width: usize,
    height: usize,
    low: f64,
    high: f64,
) -> Vec<u8> {
    let mag_at = |x: isize, y: isize| -> i32 {
        if x < 0 || y < 0 || x >= width as isize || y >= height as isize {
            0
        } else {
            mag[y as usize * width + x as usize]
        }
    };
    let mut state = vec![NONE; width * height];
    for y in 0..height as isize {
        for x in 0..width as isize {
            let i = y as usize * width + x as usize;
            let m = mag[i];
            if (m as f64) <= low {
                continue;
            }
            let ax = gx[i].abs() as f64;
            let ay = gy[i].abs() as f64;
            let is_max = if ay < ax * TAN_22_5 {
                m > mag_at(x - 1, y) && m >= mag_at(x + 1, y)
            } else if ay > ax * TAN_67_5 {
                m > mag_at(x, y - 1) && m >= mag_at(x, y + 1)
            } else {
                let s = if (gx[i] < 0) != (gy[i] < 0) { -1 } else { 1 };
                m > mag_at(x - s, y - 1) && m > mag_at(x + s, y + 1)
            };
            if is_max {
                state[i] = if m as f64 > high { STRONG } else { WEAK };
            }
        }
    }
    state
}

/// Promotes weak pixels 8-connected to a strong pixel; the rest are dropped.
fn hysteresis(state: &mut [u8], width: usize, height: usize) {
    let mut stack: Vec<usize> = (0..state.len()).filter(|&i| state[i] == STRONG).collect();
    while let Some(i) = stack.pop() {
        let x = (i % width) as isize;
        let y = (i / width) as isize;
        for dy in -1..=1 {
            for dx in -1..=1 {
                let nx = x + dx;
                let ny = y + dy;
                if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                    continue;
                }
                let n = ny as usize * width + nx as usize;
                if state[n] == WEAK {
                    state[n] = STRONG;
                    stack.push(n);
                }
            }
        }
    }
    for s in state.iter_mut() {
        if *s != STRONG {
            *s = NONE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Left half `left`, right half `right`, step between columns 9 and 10.
    fn vertical_step(left: u8, right: u8) -> Vec<u8> {
        (0..20 * 20)
            .map(|i| if i % 20 < 10 { left } else { right })
            .collect()
    }

    #[test]
    fn test_uniform_image_has_no_edges() {
        let edges = canny(&[90u8; 16 * 16], 16, 16, 30.0, 70.0);
        assert_eq!(edges.len(), 256);
        assert!(edges.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_step_yields_single_pixel_wide_edge() {
        let edges = canny(&vertical_step(0, 255), 20, 20, 30.0, 70.0);
        for y in 0..20 {
            for x in 0..20 {
                let expected = if x == 9 { 255 } else { 0 };
                assert_eq!(edges[y * 20 + x], expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_step_below_low_threshold_is_ignored() {
        // Sobel response of a step of 5 is 20.
        let edges = canny(&vertical_step(100, 105), 20, 20, 30.0, 70.0);
        assert!(edges.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_weak_only_step_is_dropped() {
        // Response 40 sits between the thresholds with nothing strong to follow.
        let edges = canny(&vertical_step(100, 110), 20, 20, 30.0, 70.0);
        assert!(edges.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_hysteresis_follows_connected_weak_pixels() {
        // 5x3 grid: strong (0,1), weak chain (1,1) (2,1) (3,2), isolated weak (4,0).
        let mut state = vec![NONE; 15];
        state[5] = STRONG;
        state[6] = WEAK;
        state[7] = WEAK;
        state[13] = WEAK;
        state[4] = WEAK;
        hysteresis(&mut state, 5, 3);
        assert_eq!(state[5], STRONG);
        assert_eq!(state[6], STRONG);
        assert_eq!(state[7], STRONG);
        assert_eq!(state[13], STRONG);
        assert_eq!(state[4], NONE);
    }

    #[test]
    fn test_empty_image() {
        assert!(canny(&[], 0, 0, 30.0, 70.0).is_empty());
    }
}
