//! Fixed-cadence tick driver around a [`Session`].
//!
//! Drawing and sound are left to a [`Frontend`]; the default one only logs.

use std::str::FromStr;
use std::time::Duration;

use color_eyre::eyre::WrapErr;
use lib::{Event, Grid, Session, SessionConfig, Snapshot};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, trace, warn};

pub const DEFAULT_TICK: Duration = Duration::from_millis(100);
pub const DEFAULT_CELL_SIZE: u32 = 20;
pub const DEFAULT_GRID_CELLS: i32 = 20;

/// Consumer of the simulation's visible state and cues.
pub trait Frontend {
    /// Called after every tick with the state to draw.
    fn render(&mut self, snapshot: &Snapshot);

    /// Food eaten / game over. Must return immediately.
    fn cue(&mut self, event: Event);
}

/// Headless frontend that reports through `tracing`.
#[derive(Debug, Default)]
pub struct LogFrontend;

impl Frontend for LogFrontend {
    fn render(&mut self, snapshot: &Snapshot) {
        if tracing::enabled!(tracing::Level::TRACE) {
            match serde_json::to_string(snapshot) {
                Ok(frame) => trace!(%frame, "frame"),
                Err(err) => warn!(%err, "could not encode frame"),
            }
        }
    }

    fn cue(&mut self, event: Event) {
        match event {
            Event::FoodEaten { score } => debug!(score, "food eaten"),
            Event::GameOver(termination) => info!(
                cause = ?termination.cause,
                ticks = termination.ticks,
                length = termination.length,
                "Game Over! Your score: {}",
                termination.score
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    pub session: SessionConfig,
    pub tick: Duration,
    /// Sessions still running after this many ticks are ended and restarted.
    pub max_ticks: Option<u64>,
    /// Number of sessions to play, 0 for no limit.
    pub games: u32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            tick: DEFAULT_TICK,
            max_ticks: None,
            games: 0,
        }
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> color_eyre::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .wrap_err_with(|| format!("invalid {key}: {value:?}"))
        })
        .transpose()
}

impl DriverConfig {
    /// Reads `SNAKE_*` variables from the process environment.
    pub fn from_env() -> color_eyre::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> color_eyre::Result<Self> {
        let grid = match parse::<u32>(&lookup, "SNAKE_SURFACE_WIDTH")? {
            Some(width_px) => {
                let height_px = parse(&lookup, "SNAKE_SURFACE_HEIGHT")?.unwrap_or(width_px);
                let cell_size = parse(&lookup, "SNAKE_CELL_SIZE")?.unwrap_or(DEFAULT_CELL_SIZE);
                Grid::from_surface(width_px, height_px, cell_size)?
            }
            None => Grid::new(
                parse(&lookup, "SNAKE_WIDTH")?.unwrap_or(DEFAULT_GRID_CELLS),
                parse(&lookup, "SNAKE_HEIGHT")?.unwrap_or(DEFAULT_GRID_CELLS),
            )?,
        };

        let mut session = SessionConfig::new(grid);
        if let Some(seed) = parse(&lookup, "SNAKE_SEED")? {
            session = session.with_seed(seed);
        }
        session.validate().wrap_err("unusable grid")?;

        let tick = parse(&lookup, "SNAKE_TICK_MS")?
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TICK);

        Ok(Self {
            session,
            tick,
            max_ticks: parse(&lookup, "SNAKE_MAX_TICKS")?,
            games: parse(&lookup, "SNAKE_GAMES")?.unwrap_or(0),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    SessionEnded,
}

pub struct TickDriver<F> {
    config: DriverConfig,
    session: Session,
    frontend: F,
    games_played: u32,
}

impl<F: Frontend> TickDriver<F> {
    pub fn new(config: DriverConfig, frontend: F) -> color_eyre::Result<Self> {
        let session = Session::new(config.session)?;
        Ok(Self {
            config,
            session,
            frontend,
            games_played: 0,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    /// One step of the simulation followed by frontend updates.
    pub fn tick(&mut self) -> Control {
        let outcome = self.session.step();
        self.frontend.render(&self.session.snapshot());
        if let Some(event) = outcome.event() {
            self.frontend.cue(event);
        }

        if outcome.is_over() {
            return Control::SessionEnded;
        }
        if self
            .config
            .max_ticks
            .is_some_and(|max| self.session.ticks() >= max)
        {
            info!(
                score = self.session.score(),
                ticks = self.session.ticks(),
                "tick limit reached"
            );
            return Control::SessionEnded;
        }
        Control::Continue
    }

    /// Ticks at the configured cadence until the game budget is used up or
    /// Ctrl-C is pressed. Ticks never overlap.
    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut interval = tokio::time::interval(self.config.tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = interval.tick() => {}
                result = &mut shutdown => {
                    result.wrap_err("failed to listen for Ctrl-C")?;
                    info!(games = self.games_played, "interrupted");
                    return Ok(());
                }
            }

            if self.tick() == Control::Continue {
                continue;
            }
            self.games_played += 1;
            if self.config.games != 0 && self.games_played >= self.config.games {
                info!(games = self.games_played, "done");
                return Ok(());
            }
            self.session.restart();
            self.frontend.render(&self.session.snapshot());
        }
    }
}
