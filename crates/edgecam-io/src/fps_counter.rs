use std::time::Instant;

/// The smoothing factor for the FPS calculation.
const SMOOTHING: f32 = 0.95;

/// A simple frame per second (FPS) counter.
///
/// # Examples
///
/// ```
/// use edgecam_io::fps_counter::FpsCounter;
///
/// let mut fps_counter = FpsCounter::new();
///
/// for _ in 0..100 {
///    fps_counter.update();
/// }
///
/// assert_eq!(fps_counter.frame_count(), 100);
/// ```
#[derive(Debug)]
pub struct FpsCounter {
    last_time: Instant,
    frame_count: u32,
    fps: f32,
}

impl FpsCounter {
    /// Creates a new `FpsCounter`.
    pub fn new() -> Self {
        Self {
            last_time: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    /// Returns the current FPS.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Returns the number of frames counted so far.
    #[inline]
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Updates the frame count and calculates the FPS.
    pub fn update(&mut self) {
        self.frame_count += 1;

        let now = Instant::now();
        let elapsed = now.duration_since(self.last_time).as_secs_f32();
        self.last_time = now;

        // back to back updates can land on the same instant
        if elapsed <= 0.0 {
            return;
        }

        let instant_fps = 1.0 / elapsed;
        self.fps = if self.fps == 0.0 {
            instant_fps
        } else {
            self.fps * SMOOTHING + instant_fps * (1.0 - SMOOTHING)
        };
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{thread, time::Duration};

    #[test]
    fn test_fps_counter() {
        let mut fps_counter = super::FpsCounter::new();
        fps_counter.update();
        thread::sleep(Duration::from_millis(5));
        fps_counter.update();
        assert_eq!(fps_counter.frame_count(), 2);
        assert!(fps_counter.fps() > 0.0);
        assert!(fps_counter.fps().is_finite());
    }
}
