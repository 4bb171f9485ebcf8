use std::time::Duration;

use crate::raster::Raster;

/// Cadence at which the shell is expected to call [`Animator::tick`].
pub const TICK_INTERVAL: Duration = Duration::from_millis(15);

/// Canvas snapshot emitted by one animation tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Full-size canvas state at this tick.
    pub raster: Raster,
    /// Rows revealed so far, in `[0, height]`.
    pub revealed_rows: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Running,
    Done,
    Exhausted,
}

/// One reveal run: a finished sketch drawn onto a blank white canvas one
/// row per tick.
///
/// The run is an explicit state machine. While running, each [`tick`]
/// copies the next sketch row into the owned canvas and emits the canvas
/// as a [`Frame`]. Once every row has landed, one final frame equal to the
/// full sketch is emitted, after which the run is exhausted and yields
/// nothing. A sketch of height `H` therefore produces exactly `H + 1`
/// frames; a zero-height sketch skips straight to the final (empty) frame.
///
/// Runs are not resumable or restartable; start a new one instead.
///
/// [`tick`]: Self::tick
#[derive(Clone, Debug)]
pub struct RevealAnimation {
    sketch: Raster,
    canvas: Raster,
    revealed_rows: u32,
    phase: Phase,
}

impl RevealAnimation {
    /// Begin a run over `sketch` with a fresh blank white canvas.
    pub fn start(sketch: Raster) -> Self {
        let canvas = Raster::blank_white(sketch.width(), sketch.height());
        let phase = if sketch.height() == 0 {
            Phase::Done
        } else {
            Phase::Running
        };
        Self {
            sketch,
            canvas,
            revealed_rows: 0,
            phase,
        }
    }

    /// Advance the state machine by one tick.
    ///
    /// Returns the frame for this tick, or `None` once the run is over.
    pub fn tick(&mut self) -> Option<Frame> {
        match self.phase {
            Phase::Running => {
                self.canvas.copy_row_from(&self.sketch, self.revealed_rows);
                self.revealed_rows += 1;
                if self.revealed_rows == self.sketch.height() {
                    self.phase = Phase::Done;
                }
                Some(Frame {
                    raster: self.canvas.clone(),
                    revealed_rows: self.revealed_rows,
                })
            }
            Phase::Done => {
                self.phase = Phase::Exhausted;
                Some(Frame {
                    raster: self.sketch.clone(),
                    revealed_rows: self.revealed_rows,
                })
            }
            Phase::Exhausted => None,
        }
    }

    /// Rows revealed so far.
    pub fn revealed_rows(&self) -> u32 {
        self.revealed_rows
    }

    /// The sketch this run reveals.
    pub fn sketch(&self) -> &Raster {
        &self.sketch
    }

    /// `true` once the run will produce no further frames.
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Exhausted
    }
}

impl Iterator for RevealAnimation {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        self.tick()
    }
}

/// Controller holding at most one active [`RevealAnimation`].
///
/// [`start`] replaces whatever run is in flight, which is the only
/// cancellation mechanism: the superseded run is dropped whole and can
/// never emit another frame. Everything runs on the caller's thread, so no
/// synchronization is involved.
///
/// [`start`]: Self::start
#[derive(Clone, Debug, Default)]
pub struct Animator {
    run: Option<RevealAnimation>,
}

impl Animator {
    /// Idle animator with no run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start revealing `sketch`, cancelling any run already in flight.
    pub fn start(&mut self, sketch: Raster) {
        tracing::debug!(
            width = sketch.width(),
            height = sketch.height(),
            restarted = self.run.is_some(),
            "starting reveal run"
        );
        self.run = Some(RevealAnimation::start(sketch));
    }

    /// Tick the active run, if any.
    pub fn tick(&mut self) -> Option<Frame> {
        self.run.as_mut()?.tick()
    }

    /// `true` while the active run still has frames to emit.
    pub fn is_running(&self) -> bool {
        self.run.as_ref().is_some_and(|run| !run.is_finished())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Channels;

    fn sketch(width: u32, height: u32, value: u8) -> Raster {
        Raster::filled(width, height, Channels::Gray, value)
    }

    #[test]
    fn emits_height_plus_one_frames() {
        let mut run = RevealAnimation::start(sketch(2, 3, 9));
        let frames: Vec<Frame> = std::iter::from_fn(|| run.tick()).collect();
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[3].raster, sketch(2, 3, 9));
    }

    #[test]
    fn zero_height_emits_single_empty_frame() {
        let empty = Raster::new(5, 0, Channels::Gray, vec![]).unwrap();
        let mut run = RevealAnimation::start(empty.clone());
        let frame = run.tick().unwrap();
        assert_eq!(frame.raster, empty);
        assert_eq!(frame.revealed_rows, 0);
        assert!(run.tick().is_none());
    }

    #[test]
    fn iterator_matches_tick() {
        let frames: Vec<Frame> = RevealAnimation::start(sketch(1, 2, 0)).collect();
        assert_eq!(frames.len(), 3);
    }

    #[test]
    fn animator_is_idle_until_started() {
        let mut animator = Animator::new();
        assert!(!animator.is_running());
        assert!(animator.tick().is_none());

        animator.start(sketch(1, 1, 0));
        assert!(animator.is_running());
    }
}
