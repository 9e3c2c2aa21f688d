/// Horizontal 3x3 Sobel kernel, row-major.
///
/// Responds to intensity increasing from left to right.
pub const SOBEL_X: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];

/// Vertical 3x3 Sobel kernel, row-major.
///
/// Responds to intensity decreasing from top to bottom.
pub const SOBEL_Y: [[i32; 3]; 3] = [[1, 2, 1], [0, 0, 0], [-1, -2, -1]];

/// Correlate a 3x3 integer kernel with the neighbourhood centred at column `col`.
///
/// `rows` holds the rows above, at and below the centre pixel. The caller
/// guarantees `1 <= col < width - 1`.
#[inline(always)]
pub fn correlate3(kernel: &[[i32; 3]; 3], rows: [&[u8]; 3], col: usize) -> i32 {
    let mut sum = 0;
    for (krow, row) in kernel.iter().zip(rows.iter()) {
        for (dx, &k) in krow.iter().enumerate() {
            sum += k * row[col + dx - 1] as i32;
        }
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sobel_kernels_sum_to_zero() {
        let sum_x: i32 = SOBEL_X.iter().flatten().sum();
        let sum_y: i32 = SOBEL_Y.iter().flatten().sum();
        assert_eq!(sum_x, 0);
        assert_eq!(sum_y, 0);
    }

    #[test]
    fn test_sobel_kernels_transposed() {
        // SOBEL_Y is SOBEL_X transposed and negated
        for (i, row) in SOBEL_X.iter().enumerate() {
            for (j, &k) in row.iter().enumerate() {
                assert_eq!(SOBEL_Y[j][i], -k);
            }
        }
    }

    #[test]
    fn test_correlate3() {
        let top = [0u8, 0, 255];
        let mid = [0u8, 0, 255];
        let bot = [0u8, 0, 255];
        let rows = [&top[..], &mid[..], &bot[..]];
        assert_eq!(correlate3(&SOBEL_X, rows, 1), 4 * 255);
        assert_eq!(correlate3(&SOBEL_Y, rows, 1), 0);
    }
}
