//! Ordered fallback across translation strategies.
//!
//! Strategies are tried in order. An unavailable strategy is skipped, a
//! declined confirmation ends the run, a failure moves on to the next
//! strategy, and the first success wins. Each strategy gets one attempt.

use anyhow::Result;

use super::client::TranslationRequest;
use super::strategy::{Availability, Confirmation, TranslationStrategy};

/// How a dispatch ended.
#[derive(Debug)]
pub enum Outcome {
    Translated {
        strategy: &'static str,
        text: String,
    },
    /// The user answered "no" to a confirmation of `strategy`.
    Declined {
        strategy: &'static str,
        message: &'static str,
    },
    /// Every strategy was unavailable or failed. Holds one entry per
    /// strategy: the unavailability reason or the error.
    Exhausted { failures: Vec<(&'static str, String)> },
}

/// The user-facing side of a dispatch: progress reports and confirmations.
pub trait Interaction: Send {
    fn announce(&mut self, strategy: &str, message: &str);
    fn unavailable(&mut self, strategy: &str, reason: &str);
    fn failed(&mut self, strategy: &str, error: &anyhow::Error, hint: Option<&str>);
    fn confirm(&mut self, confirmation: &Confirmation) -> Result<bool>;
}

pub struct Dispatcher {
    strategies: Vec<Box<dyn TranslationStrategy>>,
}

impl Dispatcher {
    pub fn new(strategies: Vec<Box<dyn TranslationStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Runs the strategies in order until one succeeds.
    ///
    /// Errors are only returned when the interaction itself fails (for
    /// example a cancelled prompt); strategy failures are part of the outcome.
    pub async fn translate(
        &self,
        request: &TranslationRequest,
        interaction: &mut dyn Interaction,
    ) -> Result<Outcome> {
        let mut failures = Vec::new();

        for strategy in &self.strategies {
            let name = strategy.name();

            if let Availability::Unavailable(reason) = strategy.availability() {
                tracing::debug!(strategy = name, %reason, "strategy unavailable");
                interaction.unavailable(name, &reason);
                failures.push((name, reason));
                continue;
            }

            for confirmation in strategy.confirmations() {
                if !interaction.confirm(confirmation)? {
                    return Ok(Outcome::Declined {
                        strategy: name,
                        message: confirmation.on_decline,
                    });
                }
            }

            if let Some(message) = strategy.announcement() {
                interaction.announce(name, message);
            }

            match strategy.translate(request).await {
                Ok(text) => {
                    tracing::debug!(strategy = name, "translation succeeded");
                    return Ok(Outcome::Translated {
                        strategy: name,
                        text,
                    });
                }
                Err(error) => {
                    tracing::warn!(strategy = name, error = %error, "translation failed");
                    interaction.failed(name, &error, strategy.failure_hint());
                    failures.push((name, format!("{error:#}")));
                }
            }
        }

        Ok(Outcome::Exhausted { failures })
    }
}
