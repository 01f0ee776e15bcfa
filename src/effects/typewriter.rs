//! The typewriter effect.
//!
//! Types and backspaces through a list of strings as an explicit state
//! machine: a single [`tick`](Typewriter::tick) driver steps through the
//! phases, and every transition is local to [`Typewriter::step`] — no nested
//! timed callbacks. Inline `^NNN` escapes pause typing for `NNN`
//! milliseconds and are stripped from the output; `^^` types a literal `^`.

use std::time::Duration;

use derive_builder::Builder;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on state-machine steps per tick; a zero-delay configuration
/// would otherwise spin inside a single call forever.
const MAX_STEPS_PER_TICK: usize = 10_000;

/// Configuration for the typewriter.
///
/// All durations are base values: per-character delays additionally get a
/// uniform random "humanizing" jitter of up to `humanize_ms` milliseconds.
///
/// # Examples
///
/// ```rust
/// use meshlight::effects::TypewriterOptionsBuilder;
///
/// let options = TypewriterOptionsBuilder::default()
///     .type_delay_ms(30_u64)
///     .loop_forever(true)
///     .build()
///     .unwrap();
/// assert!(options.loop_forever);
/// ```
#[derive(Builder, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[builder(default)]
pub struct TypewriterOptions {
    /// Base delay per typed character, in milliseconds.
    pub type_delay_ms: u64,
    /// Base delay per deleted character, in milliseconds.
    pub back_delay_ms: u64,
    /// Delay before the first character (and after a loop wrap).
    pub start_delay_ms: u64,
    /// Pause between finishing a string and starting to backspace it.
    pub backspace_pause_ms: u64,
    /// Maximum humanizing jitter added to each per-character delay.
    pub humanize_ms: u64,
    /// Whether the sequence restarts after the last string.
    pub loop_forever: bool,
    /// Number of full passes when looping; `None` is unbounded.
    pub loop_count: Option<usize>,
    /// Whether the typing order is shuffled (and reshuffled per pass).
    pub shuffle: bool,
    /// Characters to keep when backspacing, indexed by position in the
    /// typing order; missing entries keep nothing.
    pub keep_chars: Vec<usize>,
}

impl Default for TypewriterOptions {
    fn default() -> Self {
        Self {
            type_delay_ms: 0,
            back_delay_ms: 0,
            start_delay_ms: 0,
            backspace_pause_ms: 500,
            humanize_ms: 70,
            loop_forever: false,
            loop_count: None,
            shuffle: false,
            keep_chars: Vec::new(),
        }
    }
}

/// Errors from typewriter construction.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TypewriterError {
    /// An empty string list leaves nothing to type.
    #[error("typewriter needs at least one string")]
    NoStrings,
}

/// The phases of the typewriter state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypewriterPhase {
    /// Waiting out the start delay.
    Idle,
    /// Emitting characters.
    Typing,
    /// Holding at a `^NNN` pause marker.
    PausedAtMarker,
    /// String finished; waiting before backspacing.
    AwaitingBackspace,
    /// Deleting characters.
    Backspacing,
    /// Finished for good (last string typed, looping exhausted).
    Done,
}

/// The typewriter state machine.
///
/// Drive it with [`tick`](Self::tick) once per frame; read the display text
/// with [`text`](Self::text) at any time.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use meshlight::effects::{Typewriter, TypewriterOptions};
///
/// let mut tw = Typewriter::new(
///     vec!["hi".into()],
///     TypewriterOptions {
///         humanize_ms: 0,
///         ..TypewriterOptions::default()
///     },
///     rand::rng(),
/// )
/// .unwrap();
/// tw.tick(Duration::from_secs(10));
/// assert_eq!(tw.text(), "hi");
/// assert!(tw.is_done());
/// ```
pub struct Typewriter<R: Rng> {
    strings: Vec<Vec<char>>,
    options: TypewriterOptions,
    sequence: Vec<usize>,
    order_pos: usize,
    current: Vec<char>,
    cursor: usize,
    display: String,
    phase: TypewriterPhase,
    wait_ms: f64,
    loops_done: usize,
    rng: R,
}

impl<R: Rng> Typewriter<R> {
    /// Creates the machine, idle until the start delay elapses.
    ///
    /// # Errors
    ///
    /// [`TypewriterError::NoStrings`] for an empty string list.
    pub fn new(
        strings: Vec<String>,
        options: TypewriterOptions,
        mut rng: R,
    ) -> Result<Self, TypewriterError> {
        if strings.is_empty() {
            return Err(TypewriterError::NoStrings);
        }
        let strings: Vec<Vec<char>> = strings.iter().map(|s| s.chars().collect()).collect();

        let mut sequence: Vec<usize> = (0..strings.len()).collect();
        if options.shuffle {
            sequence.shuffle(&mut rng);
        }
        let current = strings[sequence[0]].clone();
        let wait_ms = options.start_delay_ms as f64;

        Ok(Self {
            strings,
            options,
            sequence,
            order_pos: 0,
            current,
            cursor: 0,
            display: String::new(),
            phase: TypewriterPhase::Idle,
            wait_ms,
            loops_done: 0,
            rng,
        })
    }

    /// The currently displayed text.
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.display
    }

    /// The current phase.
    #[inline]
    #[must_use]
    pub const fn phase(&self) -> TypewriterPhase {
        self.phase
    }

    /// Whether the machine has finished for good.
    #[inline]
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.phase == TypewriterPhase::Done
    }

    /// Advances the machine by `dt`, returning `true` when the displayed
    /// text changed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let mut budget = dt.as_secs_f64() * 1_000.0;
        let mut changed = false;

        for _ in 0..MAX_STEPS_PER_TICK {
            if self.phase == TypewriterPhase::Done {
                break;
            }
            if self.wait_ms > budget {
                self.wait_ms -= budget;
                break;
            }
            budget -= self.wait_ms;
            self.wait_ms = 0.0;
            changed |= self.step();
        }
        changed
    }

    /// Performs exactly one state-machine action and schedules the next.
    fn step(&mut self) -> bool {
        match self.phase {
            TypewriterPhase::Idle => {
                self.phase = TypewriterPhase::Typing;
                self.wait_ms = self.humanized(self.options.type_delay_ms);
                false
            }
            TypewriterPhase::Typing => self.step_typing(),
            TypewriterPhase::PausedAtMarker => {
                self.phase = TypewriterPhase::Typing;
                self.wait_ms = 0.0;
                false
            }
            TypewriterPhase::AwaitingBackspace => {
                self.phase = TypewriterPhase::Backspacing;
                self.wait_ms = self.humanized(self.options.back_delay_ms);
                false
            }
            TypewriterPhase::Backspacing => self.step_backspacing(),
            TypewriterPhase::Done => false,
        }
    }

    fn step_typing(&mut self) -> bool {
        // Pause marker at the cursor: strip it, honor the pause. A bare
        // caret is stripped without pausing, so `^^` types one caret.
        if self.current.get(self.cursor) == Some(&'^') {
            let digits: String = self.current[self.cursor + 1..]
                .iter()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            if digits.is_empty() {
                // Bare caret: strip it and emit the escaped character
                // verbatim, without re-checking it for markers.
                self.current.remove(self.cursor);
                if self.cursor < self.current.len() {
                    self.display.push(self.current[self.cursor]);
                    self.cursor += 1;
                    self.wait_ms = self.humanized(self.options.type_delay_ms);
                    return true;
                }
                return false;
            }
            let pause: u64 = digits.parse().unwrap_or(0);
            self.current.drain(self.cursor..self.cursor + 1 + digits.len());
            self.phase = TypewriterPhase::PausedAtMarker;
            self.wait_ms = pause as f64;
            return false;
        }

        if self.cursor == self.current.len() {
            // String complete.
            if self.order_pos == self.sequence.len() - 1 {
                self.loops_done += 1;
                let keep_going = self.options.loop_forever
                    && self.options.loop_count.is_none_or(|n| self.loops_done < n);
                if !keep_going {
                    self.phase = TypewriterPhase::Done;
                    return false;
                }
            }
            self.phase = TypewriterPhase::AwaitingBackspace;
            self.wait_ms = self.options.backspace_pause_ms as f64;
            return false;
        }

        self.display.push(self.current[self.cursor]);
        self.cursor += 1;
        self.wait_ms = self.humanized(self.options.type_delay_ms);
        true
    }

    fn step_backspacing(&mut self) -> bool {
        let keep = self
            .options
            .keep_chars
            .get(self.order_pos)
            .copied()
            .unwrap_or(0);

        if self.cursor > keep {
            self.display.pop();
            self.cursor -= 1;
            self.wait_ms = self.humanized(self.options.back_delay_ms);
            return true;
        }

        // Move on to the next string, keeping the configured prefix length;
        // the kept columns are re-sourced from the incoming string.
        self.order_pos += 1;
        if self.order_pos == self.sequence.len() {
            self.order_pos = 0;
            if self.options.shuffle {
                self.sequence.shuffle(&mut self.rng);
            }
            self.phase = TypewriterPhase::Idle;
            self.wait_ms = self.options.start_delay_ms as f64;
        } else {
            self.phase = TypewriterPhase::Typing;
            self.wait_ms = self.humanized(self.options.type_delay_ms);
        }

        self.current = self.strings[self.sequence[self.order_pos]].clone();
        self.cursor = self.cursor.min(self.current.len());
        let kept: String = self.current[..self.cursor].iter().collect();
        let changed = kept != self.display;
        self.display = kept;
        changed
    }

    fn humanized(&mut self, base_ms: u64) -> f64 {
        if self.options.humanize_ms == 0 {
            return base_ms as f64;
        }
        (base_ms + self.rng.random_range(0..=self.options.humanize_ms)) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn fast_options() -> TypewriterOptions {
        TypewriterOptions {
            humanize_ms: 0,
            backspace_pause_ms: 0,
            ..TypewriterOptions::default()
        }
    }

    fn typewriter(strings: &[&str], options: TypewriterOptions) -> Typewriter<StdRng> {
        Typewriter::new(
            strings.iter().map(|s| (*s).to_owned()).collect(),
            options,
            StdRng::seed_from_u64(41),
        )
        .unwrap()
    }

    #[test]
    fn empty_string_list_is_rejected() {
        let result = Typewriter::new(
            Vec::new(),
            TypewriterOptions::default(),
            StdRng::seed_from_u64(41),
        );
        assert_eq!(result.err(), Some(TypewriterError::NoStrings));
    }

    #[test]
    fn types_a_single_string_to_completion() {
        let mut tw = typewriter(&["hello"], fast_options());
        tw.tick(Duration::from_secs(60));
        assert_eq!(tw.text(), "hello");
        assert!(tw.is_done());
    }

    #[test]
    fn pause_marker_is_stripped_and_honored() {
        let mut tw = typewriter(&["a^200b"], fast_options());
        // Everything up to the marker types instantly with zero delays.
        tw.tick(Duration::from_millis(10));
        assert_eq!(tw.text(), "a");
        assert_eq!(tw.phase(), TypewriterPhase::PausedAtMarker);

        // The pause has 190 ms left; not enough budget yet.
        tw.tick(Duration::from_millis(100));
        assert_eq!(tw.text(), "a");

        tw.tick(Duration::from_millis(200));
        assert_eq!(tw.text(), "ab");
        assert!(tw.is_done());
    }

    #[test]
    fn double_caret_types_a_literal_caret() {
        let mut tw = typewriter(&["x^^y"], fast_options());
        tw.tick(Duration::from_secs(60));
        assert_eq!(tw.text(), "x^y");
    }

    #[test]
    fn progresses_through_strings_with_backspacing() {
        let mut tw = typewriter(&["one", "two"], fast_options());

        tw.tick(Duration::from_secs(60));
        assert_eq!(tw.text(), "two", "first string typed, erased, second typed");
        assert!(tw.is_done());
    }

    #[test]
    fn last_string_stays_on_screen_without_looping() {
        let mut tw = typewriter(&["a", "bc"], fast_options());
        tw.tick(Duration::from_secs(600));
        assert_eq!(tw.text(), "bc");
        assert_eq!(tw.phase(), TypewriterPhase::Done);
    }

    #[test]
    fn loop_count_bounds_the_passes() {
        let mut tw = typewriter(
            &["ab"],
            TypewriterOptions {
                loop_forever: true,
                loop_count: Some(2),
                ..fast_options()
            },
        );
        tw.tick(Duration::from_secs(600));
        assert!(tw.is_done());
    }

    #[test]
    fn keep_chars_preserves_a_prefix() {
        let mut tw = typewriter(
            &["abcdef", "abcxyz"],
            TypewriterOptions {
                keep_chars: vec![3],
                ..fast_options()
            },
        );
        tw.tick(Duration::from_secs(600));
        // First string backspaces down to 3 chars, second continues from
        // column 3 with its own prefix.
        assert_eq!(tw.text(), "abcxyz");
        assert!(tw.is_done());
    }

    #[test]
    fn display_changes_are_reported() {
        let mut tw = typewriter(&["hi"], fast_options());
        assert!(tw.tick(Duration::from_secs(60)));
        assert!(!tw.tick(Duration::from_secs(1)), "done machine reports no change");
    }

    #[test]
    fn humanized_delays_spread_typing_over_time() {
        let mut tw = typewriter(
            &["abcd"],
            TypewriterOptions {
                type_delay_ms: 50,
                humanize_ms: 0,
                ..TypewriterOptions::default()
            },
        );
        // 50 ms per character: after 120 ms at most two characters landed.
        tw.tick(Duration::from_millis(120));
        assert!(tw.text().len() <= 2, "got {:?}", tw.text());
        tw.tick(Duration::from_secs(10));
        assert_eq!(tw.text(), "abcd");
    }
}
