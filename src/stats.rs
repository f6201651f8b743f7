//! Frame-rate and frame-summary accounting shared by the native front ends

use std::collections::VecDeque;

use serde::Serialize;

use crate::core::FrameStats;

const FPS_WINDOW: usize = 60;

/// FPS over the last 60 frame timestamps
#[derive(Debug, Default)]
pub struct FpsCounter {
    frames: VecDeque<f64>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frames: VecDeque::with_capacity(FPS_WINDOW + 1),
        }
    }

    /// Record a frame at `now_ms`
    pub fn tick(&mut self, now_ms: f64) {
        self.frames.push_back(now_ms);
        if self.frames.len() > FPS_WINDOW {
            self.frames.pop_front();
        }
    }

    pub fn fps(&self) -> f64 {
        let (Some(first), Some(last)) = (self.frames.front(), self.frames.back()) else {
            return 0.0;
        };
        let elapsed = last - first;
        if self.frames.len() < 2 || elapsed <= 0.0 {
            return 0.0;
        }
        (self.frames.len() as f64 - 1.0) / (elapsed / 1000.0)
    }
}

/// Totals over a run, printed by the CLI
#[derive(Debug, Default, Clone, Serialize)]
pub struct RunStats {
    pub frames: u64,
    pub totals: FrameStats,
    /// Largest number of deflected points in one frame
    pub peak_deflected: usize,
    pub elapsed_ms: f64,
}

impl RunStats {
    pub fn record(&mut self, frame: FrameStats) {
        self.frames += 1;
        self.peak_deflected = self.peak_deflected.max(frame.deflected);
        self.totals += frame;
    }

    pub fn avg_fps(&self) -> f64 {
        if self.elapsed_ms <= 0.0 {
            return 0.0;
        }
        self.frames as f64 / (self.elapsed_ms / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_needs_two_frames() {
        let mut fps = FpsCounter::new();
        assert_eq!(fps.fps(), 0.0);
        fps.tick(0.0);
        assert_eq!(fps.fps(), 0.0);
    }

    #[test]
    fn fps_at_steady_rate() {
        let mut fps = FpsCounter::new();
        for i in 0..200 {
            fps.tick(i as f64 * 20.0);
        }
        assert!((fps.fps() - 50.0).abs() < 1e-9, "got {}", fps.fps());
    }

    #[test]
    fn run_stats_accumulate() {
        let mut run = RunStats::default();
        run.record(FrameStats { drawn: 10, skipped: 2, deflected: 3 });
        run.record(FrameStats { drawn: 10, skipped: 2, deflected: 7 });
        run.elapsed_ms = 1000.0;
        assert_eq!(run.frames, 2);
        assert_eq!(run.totals.drawn, 20);
        assert_eq!(run.totals.deflected, 10);
        assert_eq!(run.peak_deflected, 7);
        assert_eq!(run.avg_fps(), 2.0);
    }
}
