//! Core analysis orchestration

use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::parser::parse_response;
use crate::prompt::PromptBuilder;
use crate::protocol::{Message, Reply, StatusReply};
use crate::slot::{AnalysisSlot, AnalysisStatus};
use crate::types::{millis, AnalysisReport};
use scholar_domain::traits::TextGenerator;
use scholar_domain::ScoredAnalysis;
use scholar_llm::LlmError;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Main analyzer orchestrating prompt, dispatch, parse and score
///
/// Clones share the same provider and the same [`AnalysisSlot`], so at most
/// one analysis runs across all of them.
pub struct Analyzer<G> {
    llm: Arc<G>,
    slot: AnalysisSlot,
    config: AnalyzerConfig,
}

impl<G> Clone for Analyzer<G> {
    fn clone(&self) -> Self {
        Self {
            llm: Arc::clone(&self.llm),
            slot: self.slot.clone(),
            config: self.config.clone(),
        }
    }
}

/// An analysis running on a spawned task
#[derive(Debug)]
pub struct AnalysisHandle {
    task: JoinHandle<Result<ScoredAnalysis, AnalyzerError>>,
}

impl AnalysisHandle {
    /// Wait for the outcome
    pub async fn wait(self) -> Result<ScoredAnalysis, AnalyzerError> {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) => Err(AnalyzerError::Task(e.to_string())),
        }
    }

    /// True once the task has finished
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl<G> Analyzer<G>
where
    G: TextGenerator<Error = LlmError> + Send + Sync + 'static,
{
    /// Create a new analyzer with its own slot
    pub fn new(llm: G, config: AnalyzerConfig) -> Self {
        Self::with_slot(llm, config, AnalysisSlot::new())
    }

    /// Create an analyzer that shares an existing slot
    pub fn with_slot(llm: G, config: AnalyzerConfig, slot: AnalysisSlot) -> Self {
        Self {
            llm: Arc::new(llm),
            slot,
            config,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// The shared slot
    pub fn slot(&self) -> &AnalysisSlot {
        &self.slot
    }

    /// Send the analysis prompt for `text` and return the raw model output
    ///
    /// The whole exchange is bounded by the configured request timeout.
    pub async fn dispatch(&self, text: &str) -> Result<String, LlmError> {
        let prompt = PromptBuilder::new(text).build();
        let timeout = self.config.request_timeout();

        debug!("Dispatching prompt of {} chars", prompt.len());
        tokio::time::timeout(timeout, self.llm.generate(&prompt))
            .await
            .map_err(|_| {
                LlmError::Transport(format!("request timed out after {}s", timeout.as_secs()))
            })?
    }

    /// Analyze `text`: dispatch, parse and score
    ///
    /// # Errors
    ///
    /// - `Busy` if another analysis is in flight
    /// - `Dispatch` if the endpoint could not produce text
    pub async fn analyze(&self, text: &str) -> Result<ScoredAnalysis, AnalyzerError> {
        let guard = self.slot.try_claim().ok_or(AnalyzerError::Busy)?;
        let analysis = self.run(text).await?;
        guard.complete(analysis.clone());
        Ok(analysis)
    }

    /// Start an analysis on a spawned task
    ///
    /// The slot is claimed before this returns, so a second `start` fails
    /// immediately with `Busy`. Must be called within a Tokio runtime.
    pub fn start(&self, text: impl Into<String>) -> Result<AnalysisHandle, AnalyzerError> {
        let guard = self.slot.try_claim().ok_or(AnalyzerError::Busy)?;
        let text = text.into();
        let this = self.clone();

        let task = tokio::spawn(async move {
            let analysis = this.run(&text).await?;
            guard.complete(analysis.clone());
            Ok(analysis)
        });

        Ok(AnalysisHandle { task })
    }

    /// Current running flag and last result
    pub fn status(&self) -> AnalysisStatus {
        self.slot.status()
    }

    /// Poll at the configured interval until nothing is running
    pub async fn wait_for_result(&self) -> Option<ScoredAnalysis> {
        self.wait_for_result_every(self.config.poll_interval()).await
    }

    /// Poll every `interval` until nothing is running, then return the last result
    pub async fn wait_for_result_every(&self, interval: Duration) -> Option<ScoredAnalysis> {
        loop {
            let status = self.slot.status();
            if !status.running {
                return status.result;
            }
            tokio::time::sleep(interval).await;
        }
    }

    /// Analyze `text` and fold any error into the report
    pub async fn analyze_report(&self, text: &str) -> AnalysisReport {
        let id = Uuid::now_v7();
        let started = Instant::now();
        let outcome = self.analyze(text).await;
        let processing_time_ms = millis(started.elapsed());

        match outcome {
            Ok(analysis) => AnalysisReport {
                id,
                analysis,
                error: None,
                processing_time_ms,
            },
            Err(e) => AnalysisReport {
                id,
                analysis: ScoredAnalysis::failed(),
                error: Some(e.user_message()),
                processing_time_ms,
            },
        }
    }

    /// Answer one inbound message
    pub async fn handle_message(&self, message: Message) -> Reply {
        match message {
            Message::StartAnalysis { text } => match self.analyze(&text).await {
                Ok(analysis) => Reply::done(&analysis),
                Err(e) => Reply::error(e.user_message()),
            },
            Message::GetAnalysisResult => {
                let status = self.slot.status();
                Reply::Status(StatusReply {
                    running: status.running,
                    result: status.result.as_ref().map(Into::into),
                })
            }
        }
    }

    async fn run(&self, text: &str) -> Result<ScoredAnalysis, AnalyzerError> {
        info!("Starting analysis of {} chars", text.len());
        let started = Instant::now();

        let raw = match self.dispatch(text).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Analysis failed ({}): {}", e.kind(), e);
                return Err(e.into());
            }
        };

        let analysis = ScoredAnalysis::from_parsed(parse_response(&raw));
        info!(
            "Analysis complete in {:?}: confidence {}%",
            started.elapsed(),
            analysis.confidence
        );
        Ok(analysis)
    }
}
