//! Single-threaded polling loop tying capture, matching and dispatch together.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use autopermit_core::{Decision, MonitorConfig, Rect};
use autopermit_matcher::{find, Template};

use crate::allow_list::AllowListSource;
use crate::capture::PixelSource;
use crate::input::InputSink;
use crate::journal::ActionJournal;
use crate::policy::{ActionPolicy, Dispatch, Outcome};
use crate::stats::SessionStats;

/// Granularity of the interruptible inter-cycle sleep.
const SLEEP_SLICE: Duration = Duration::from_millis(50);

/// The polling monitor: capture, match, decide, dispatch, sleep, repeat.
///
/// Single-threaded by design. Every cycle is independent; any capture or
/// dispatch failure degrades to a skipped cycle and the loop continues.
pub struct Monitor<P: PixelSource, I: InputSink> {
    config: MonitorConfig,
    templates: Vec<Template>,
    source: P,
    sink: I,
    policy: ActionPolicy,
    allow_list: Option<AllowListSource>,
    journal: ActionJournal,
    stats: SessionStats,
    stop: Arc<AtomicBool>,
}

impl<P: PixelSource, I: InputSink> Monitor<P, I> {
    /// Create a monitor over the given collaborators.
    ///
    /// The allow-list source is only constructed when the restriction is
    /// enabled in the configuration.
    pub fn new(config: MonitorConfig, templates: Vec<Template>, source: P, sink: I) -> Self {
        let policy = ActionPolicy::new(config.settings.cooldown());
        let allow_list = config.allow_list.enabled.then(|| {
            AllowListSource::new(
                config.allow_list.path.clone(),
                config.allow_list.refresh_interval(),
                config.buttons.keys().cloned().collect(),
            )
        });
        let journal = ActionJournal::new(&config.journal);
        Self {
            config,
            templates,
            source,
            sink,
            policy,
            allow_list,
            journal,
            stats: SessionStats::new(),
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shared stop flag; setting it ends `run` after the current cycle.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Per-session decision counters.
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Run detection cycles until the stop flag is set.
    pub fn run(&mut self) {
        tracing::info!(
            buttons = self.templates.len(),
            interval_ms = self.config.settings.check_interval_ms,
            "monitor started"
        );
        while !self.stop.load(Ordering::Relaxed) {
            if let Some(decision) = self.run_once() {
                tracing::info!(%decision, "decision");
            }
            self.sleep_interruptible(self.config.settings.check_interval());
        }
        tracing::info!(stats = %self.stats, "monitor stopped");
    }

    /// Run one detection cycle. Returns the decision emitted, if any.
    pub fn run_once(&mut self) -> Option<Decision> {
        let now = Instant::now();
        let allowed = self
            .allow_list
            .as_mut()
            .map(|source| source.refresh(now).clone());

        let region = self.locate_region()?;
        let frame = match self.source.capture(region) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::debug!(error = %e, "capture failed, skipping cycle");
                return None;
            }
        };

        let mut chosen: Option<Outcome> = None;
        for template in &self.templates {
            let Some(m) = find(&frame, template) else {
                continue;
            };
            tracing::debug!(
                button = template.name(),
                score = m.score,
                x = m.center.x,
                y = m.center.y,
                "button detected"
            );
            if let Some(outcome) = self.policy.decide(
                template.name(),
                template.action(),
                &m,
                allowed.as_ref(),
                self.config.allow_list.fallback_on_empty,
                now,
            ) {
                chosen = Some(outcome);
                break;
            }
        }

        let outcome = chosen?;
        let delay = self.config.settings.action_delay();
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        self.dispatch(&outcome);
        self.stats.record(outcome.decision.kind());
        Some(outcome.decision)
    }

    /// Geometry of the first configured window title that can be located.
    fn locate_region(&mut self) -> Option<Rect> {
        for title in &self.config.window_titles {
            if let Some(region) = self.source.locate_window(title) {
                return Some(region);
            }
        }
        tracing::debug!(
            titles = ?self.config.window_titles,
            "no monitored window found"
        );
        None
    }

    /// Perform the chosen dispatch and journal it.
    ///
    /// The cooldown was already consumed when the decision was made, so a
    /// failed input event is logged and otherwise dropped.
    fn dispatch(&mut self, outcome: &Outcome) {
        match &outcome.dispatch {
            Dispatch::Click(point) => {
                if let Err(e) = self.sink.click(*point) {
                    tracing::warn!(error = %e, "click dispatch failed");
                }
                self.journal.record(&format!(
                    "{} via click at ({}, {})",
                    outcome.decision, point.x, point.y
                ));
            }
            Dispatch::Chord(chord) => {
                if let Err(e) = self.sink.send_chord(chord) {
                    tracing::warn!(error = %e, "chord dispatch failed");
                }
                self.journal
                    .record(&format!("{} via chord {}", outcome.decision, chord));
            }
            Dispatch::Alert => {
                if self.config.settings.sound_alert_on_skip {
                    ring_bell();
                }
                self.journal
                    .record(&format!("{} (manual action required)", outcome.decision));
            }
        }
    }

    /// Sleep in short slices so the stop flag is honored promptly.
    fn sleep_interruptible(&self, duration: Duration) {
        let deadline = Instant::now() + duration;
        while !self.stop.load(Ordering::Relaxed) {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            std::thread::sleep(remaining.min(SLEEP_SLICE));
        }
    }
}

/// Ring the terminal bell.
fn ring_bell() {
    print!("\x07");
    let _ = std::io::stdout().flush();
}
