//! The image carousel inside the project modal.
//!
//! Index arithmetic wraps in both directions. Autoplay runs only for
//! carousels with more than one slide and is modeled as explicit deadlines
//! against a caller-supplied clock: the runtime calls [`Carousel::tick`]
//! from its timer, tests pass timestamps directly. Any manual navigation
//! pauses autoplay and schedules a resume; scheduling a new deadline
//! overwrites the old one, so a stale timer can never fire twice.

use crate::config::CarouselConfig;

/// Autoplay phase. `Hovered` wins over a pending resume: leaving the image
/// restarts the cycle from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Autoplay {
    /// Single slide, nothing to rotate.
    Disabled,
    Running { next_at: u64 },
    Hovered,
    Paused { resume_at: u64 },
}

#[derive(Debug)]
pub struct Carousel {
    len: usize,
    index: usize,
    autoplay: Autoplay,
    fullscreen: bool,
    cfg: CarouselConfig,
}

impl Carousel {
    pub fn new(len: usize, cfg: CarouselConfig, now: u64) -> Self {
        let autoplay = if len > 1 {
            Autoplay::Running {
                next_at: now + cfg.autoplay_delay_ms,
            }
        } else {
            Autoplay::Disabled
        };
        Self {
            len,
            index: 0,
            autoplay,
            fullscreen: false,
            cfg,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Arrows, dots and swipe handling only exist for multi-slide
    /// carousels.
    pub fn has_nav(&self) -> bool {
        self.len > 1
    }

    pub fn is_autoplaying(&self) -> bool {
        matches!(self.autoplay, Autoplay::Running { .. })
    }

    /// Advance the clock. Fires at most one transition per call; the
    /// runtime ticks often enough that this is indistinguishable from a
    /// real timer.
    pub fn tick(&mut self, now: u64) {
        match self.autoplay {
            Autoplay::Running { next_at } if now >= next_at => {
                self.index = self.wrapped(self.index as isize + 1);
                self.autoplay = Autoplay::Running {
                    next_at: now + self.cfg.autoplay_delay_ms,
                };
            }
            Autoplay::Paused { resume_at } if now >= resume_at => {
                self.autoplay = Autoplay::Running {
                    next_at: now + self.cfg.autoplay_delay_ms,
                };
            }
            _ => {}
        }
    }

    /// Next-arrow click.
    pub fn next(&mut self, now: u64) {
        self.step(1, now);
    }

    /// Previous-arrow click.
    pub fn prev(&mut self, now: u64) {
        self.step(-1, now);
    }

    /// Dot click.
    pub fn goto(&mut self, target: usize, now: u64) {
        if target >= self.len {
            return;
        }
        self.index = target;
        self.pause(now);
    }

    /// Completed horizontal drag. Positive `dx` is a rightward drag and
    /// shows the previous slide; movement under the threshold is a tap.
    pub fn swipe(&mut self, dx: i64, now: u64) {
        let threshold = self.cfg.swipe_threshold_px as i64;
        if dx > threshold {
            self.prev(now);
        } else if dx < -threshold {
            self.next(now);
        }
    }

    pub fn hover_start(&mut self) {
        if self.autoplay != Autoplay::Disabled {
            self.autoplay = Autoplay::Hovered;
        }
    }

    pub fn hover_end(&mut self, now: u64) {
        if self.autoplay == Autoplay::Hovered {
            self.autoplay = Autoplay::Running {
                next_at: now + self.cfg.autoplay_delay_ms,
            };
        }
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    fn step(&mut self, delta: isize, now: u64) {
        if self.len < 2 {
            return;
        }
        self.index = self.wrapped(self.index as isize + delta);
        self.pause(now);
    }

    fn pause(&mut self, now: u64) {
        if self.autoplay != Autoplay::Disabled {
            self.autoplay = Autoplay::Paused {
                resume_at: now + self.cfg.resume_delay_ms,
            };
        }
    }

    fn wrapped(&self, raw: isize) -> usize {
        let len = self.len as isize;
        (raw.rem_euclid(len)) as usize
    }
}
