//! Driver that runs one configuration window by window.

use std::time::Instant;

use super::convergence::{Convergence, ConvergenceMonitor};
use super::errors::{DriverError, DriverResult};
use super::planner::WindowPlanner;
use super::types::{DriverOptions, RunOutcome, StopReason};
use crate::checker::{CheckerClient, ModelSource};
use crate::logging::{format_progress, EchoCallback, LogConfig, RunLog};
use crate::models::{RunConfig, RunMode, Timeline, Window};
use crate::render::{ModelRenderer, RenderRequest};
use crate::results::{format_elapsed, ResultSink};
use crate::trace::ProbabilityParser;

/// What happened to one window.
enum WindowOutcome {
    Completed,
    Skipped,
}

/// Composes planner, renderer, checker, parser and sink into one run.
///
/// The driver holds no per-run state: every call to [`run`](Self::run)
/// starts with an empty timeline and run log.
pub struct WindowedVerificationDriver {
    renderer: Box<dyn ModelRenderer>,
    checker: Box<dyn CheckerClient>,
    parser: Box<dyn ProbabilityParser>,
    sink: ResultSink,
    monitor: ConvergenceMonitor,
    options: DriverOptions,
    log_config: LogConfig,
    echo: Option<EchoCallback>,
}

impl WindowedVerificationDriver {
    /// Create a driver from its collaborators.
    pub fn new<R, C, P>(renderer: R, checker: C, parser: P, sink: ResultSink) -> Self
    where
        R: ModelRenderer + 'static,
        C: CheckerClient + 'static,
        P: ProbabilityParser + 'static,
    {
        Self {
            renderer: Box::new(renderer),
            checker: Box::new(checker),
            parser: Box::new(parser),
            sink,
            monitor: ConvergenceMonitor::new(),
            options: DriverOptions::default(),
            log_config: LogConfig::default(),
            echo: None,
        }
    }

    /// Override driver options (builder pattern).
    pub fn with_options(mut self, options: DriverOptions) -> Self {
        self.options = options;
        self
    }

    /// Set run log echo configuration.
    pub fn with_log_config(mut self, config: LogConfig) -> Self {
        self.log_config = config;
        self
    }

    /// Echo run log lines to a callback as they are recorded.
    pub fn with_echo(mut self, echo: EchoCallback) -> Self {
        self.echo = Some(echo);
        self
    }

    /// Result sink used for artifacts.
    pub fn sink(&self) -> &ResultSink {
        &self.sink
    }

    /// Run one configuration to completion and persist its artifacts.
    ///
    /// Fails before any window is attempted if the checker is unavailable
    /// or a check run has no horizon, and on the first window if the model
    /// cannot be rendered. Later render failures and per-window checker and
    /// parse failures are logged and the window is skipped.
    pub fn run(&self, config: &RunConfig, mode: RunMode) -> DriverResult<RunOutcome> {
        if mode == RunMode::Check && config.horizon().is_none() {
            return Err(DriverError::UnboundedCheck);
        }
        self.checker
            .ensure_available()
            .map_err(DriverError::Precondition)?;

        let mut log = RunLog::new(self.log_config.clone(), self.echo.clone());
        log.header(&config.header(mode));
        log.notice(&format!(
            "Starting {}x{} {} {} with {}...",
            config.size(),
            config.size(),
            config.property().name(),
            mode,
            self.checker.tool_name()
        ));

        let start = Instant::now();
        let mut timeline = Timeline::new();
        let mut windows_attempted = 0u64;
        let mut windows_skipped = 0u64;
        let mut consecutive_skips = 0u32;
        let mut stop_reason = StopReason::HorizonExhausted;

        for window in WindowPlanner::for_config(config) {
            windows_attempted += 1;

            let request = RenderRequest::for_window(config, window);
            let outcome = match self.renderer.render(&request) {
                Ok(text) => {
                    let model = ModelSource::text(request.label(), text);
                    let outcome = match mode {
                        RunMode::Check => self.check_window(&mut log, window, &model),
                        RunMode::Simulate => {
                            self.simulate_window(&mut log, window, &model, &mut timeline)
                        }
                    };
                    if let Some(path) = self.checker.kept_model(&model) {
                        log.warn(&format!("model kept at {}", path.display()));
                    }
                    outcome
                }
                // Nothing has run yet, so the template itself is unusable.
                Err(e) if windows_attempted == 1 => return Err(DriverError::render(window, e)),
                Err(e) => {
                    log.warn(&format!(
                        "Clock cycle block {} failed to render: {}. Skipping...",
                        window, e
                    ));
                    WindowOutcome::Skipped
                }
            };

            match outcome {
                WindowOutcome::Completed => consecutive_skips = 0,
                WindowOutcome::Skipped => {
                    windows_skipped += 1;
                    consecutive_skips += 1;
                }
            }

            if mode != RunMode::Simulate {
                continue;
            }

            if let Convergence::Saturated { p_max, clock_cycle } = self.monitor.evaluate(&timeline)
            {
                stop_reason = StopReason::Saturated { clock_cycle, p_max };
                break;
            }

            if let Some(limit) = self.options.failure_limit {
                if config.horizon().is_none() && consecutive_skips >= limit {
                    stop_reason = StopReason::FailureLimit { consecutive_skips };
                    log.warn(&format!("{}, stopping", stop_reason));
                    break;
                }
            }
        }

        let elapsed = start.elapsed();
        log.notice(&format!(
            "{} complete ({}). Time elapsed: {}",
            capitalize(&mode.to_string()),
            stop_reason,
            format_elapsed(elapsed)
        ));
        log.finish(elapsed);

        let artifacts = self.sink.persist(config, &timeline, log.contents())?;

        Ok(RunOutcome {
            mode,
            stop_reason,
            windows_attempted,
            windows_skipped,
            timeline,
            elapsed,
            artifacts,
        })
    }

    fn check_window(&self, log: &mut RunLog, window: Window, model: &ModelSource) -> WindowOutcome {
        match self.checker.check(model) {
            Ok(report) => {
                log.info(&format!(
                    "finished clock cycle block {} but probs were not calculated",
                    window
                ));
                log.raw(&report);
                WindowOutcome::Completed
            }
            Err(e) => {
                log.warn(&format!(
                    "Clock cycle block {} failed to check: {}. Skipping...",
                    window, e
                ));
                WindowOutcome::Skipped
            }
        }
    }

    fn simulate_window(
        &self,
        log: &mut RunLog,
        window: Window,
        model: &ModelSource,
        timeline: &mut Timeline,
    ) -> WindowOutcome {
        let trace = match self.checker.simulate(model) {
            Ok(trace) => trace,
            Err(e) => {
                log.warn(&format!(
                    "Clock cycle block {} failed to simulate: {}. Skipping analysis...",
                    window, e
                ));
                return WindowOutcome::Skipped;
            }
        };

        let samples = match self.parser.parse(&trace) {
            Ok(samples) => samples,
            Err(e) => {
                log.parse_error(&format!(
                    "Clock cycle block {} produced an unreadable trace: {}. Skipping analysis...",
                    window, e
                ));
                log.raw(&trace);
                return WindowOutcome::Skipped;
            }
        };

        let outside = samples.iter().filter(|s| !window.contains(s.clock_cycle)).count();
        if outside > 0 {
            tracing::debug!("{} samples outside clock cycle block {}", outside, window);
        }

        timeline.extend(samples.iter().copied());
        let p_max = timeline.max_probability().unwrap_or_default();
        log.info(&format_progress(window, &samples, p_max));
        log.raw(&trace);

        WindowOutcome::Completed
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
