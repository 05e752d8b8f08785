use chrono::Duration;
use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::schedule::slot_utils::{SlotConfig, DEFAULT_SLOT_COUNT, DEFAULT_SLOT_MINUTES};

const MINUTES_PER_DAY: i64 = 24 * 60;

#[derive(Debug, Parser)]
#[command(name = "appointment-scheduler", about = "Book appointments into FCFS and priority queues")]
pub struct Cli {
    /// Minutes between offered slots
    #[arg(long, env = "SCHEDULER_SLOT_MINUTES", default_value_t = DEFAULT_SLOT_MINUTES, global = true)]
    pub slot_minutes: i64,

    /// Number of slots offered
    #[arg(long, env = "SCHEDULER_SLOT_COUNT", default_value_t = DEFAULT_SLOT_COUNT, global = true)]
    pub slot_count: usize,

    #[command(subcommand)]
    pub mode: Option<Mode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Mode {
    /// Interactive session on the terminal
    Console,
    /// Serve the booking form over HTTP
    Web {
        #[arg(long, env = "PORT", default_value_t = 8080)]
        port: u16,
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("slot duration must be between 1 and 1440 minutes, got {0}")]
    DurationOutOfRange(i64),
    #[error("slot count must be at least 1")]
    ZeroCount,
    #[error("{count} slots {minutes} minutes apart span a full day, so offered times would repeat")]
    OfferSpansDay { minutes: i64, count: usize },
}

impl Cli {
    pub fn mode(&self) -> Mode {
        self.mode.clone().unwrap_or(Mode::Console)
    }

    pub fn slot_config(&self) -> Result<SlotConfig, ConfigError> {
        if self.slot_minutes <= 0 || self.slot_minutes > MINUTES_PER_DAY {
            return Err(ConfigError::DurationOutOfRange(self.slot_minutes));
        }
        if self.slot_count == 0 {
            return Err(ConfigError::ZeroCount);
        }
        // slot strings carry no date, so the last offer must land before the first wraps around
        let span = i64::try_from(self.slot_count - 1)
            .ok()
            .and_then(|gaps| gaps.checked_mul(self.slot_minutes));
        if !matches!(span, Some(span) if span < MINUTES_PER_DAY) {
            return Err(ConfigError::OfferSpansDay {
                minutes: self.slot_minutes,
                count: self.slot_count,
            });
        }
        Ok(SlotConfig {
            duration: Duration::minutes(self.slot_minutes),
            count: self.slot_count,
        })
    }
}
