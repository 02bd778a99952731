//! Message host implementation

use scholar_analyzer::{Analyzer, Reply};
use scholar_domain::traits::TextGenerator;
use scholar_llm::LlmError;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::HostError;
use crate::protocol::{decode, ReplyEnvelope};

/// Message host
///
/// Reads newline-delimited JSON requests and writes one reply line per
/// request. `startAnalysis` runs on its own task so status requests are
/// answered while an analysis is in flight; replies may therefore arrive out
/// of request order and should be matched by `id`.
pub struct Host<G> {
    analyzer: Analyzer<G>,
}

impl<G> Host<G>
where
    G: TextGenerator<Error = LlmError> + Send + Sync + 'static,
{
    /// Create a host around an analyzer
    pub fn new(analyzer: Analyzer<G>) -> Self {
        Self { analyzer }
    }

    /// Serve requests from `reader` until it closes
    ///
    /// Returns once every in-flight request has been answered.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<(), HostError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Host started");

        let (tx, mut rx) = mpsc::unbounded_channel::<ReplyEnvelope>();
        let mut tx = Some(tx);
        let mut buf = Vec::new();

        loop {
            tokio::select! {
                read = reader.read_until(b'\n', &mut buf), if tx.is_some() => {
                    read?;
                    if buf.is_empty() {
                        debug!("Input closed, draining in-flight replies");
                        tx = None;
                    } else if let Some(tx) = &tx {
                        let raw = std::mem::take(&mut buf);
                        match String::from_utf8(raw) {
                            Ok(line) => self.dispatch(&line, tx.clone()),
                            Err(_) => reject(
                                tx,
                                None,
                                HostError::InvalidMessage("line is not valid UTF-8".into()),
                            ),
                        }
                    }
                }
                reply = rx.recv() => {
                    match reply {
                        Some(reply) => write_reply(&mut writer, &reply).await?,
                        None => break,
                    }
                }
            }
        }

        info!("Host stopped");
        Ok(())
    }

    fn dispatch(&self, line: &str, tx: mpsc::UnboundedSender<ReplyEnvelope>) {
        if line.trim().is_empty() {
            return;
        }

        let request = decode(line);
        let id = request.id;
        let message = match request.message {
            Ok(message) => message,
            Err(e) => {
                reject(&tx, id, e);
                return;
            }
        };

        debug!("Received {:?}", message);
        let analyzer = self.analyzer.clone();
        tokio::spawn(async move {
            let reply = analyzer.handle_message(message).await;
            send(&tx, ReplyEnvelope::new(id, reply));
        });
    }
}

fn reject(tx: &mpsc::UnboundedSender<ReplyEnvelope>, id: Option<Value>, error: HostError) {
    warn!("Rejecting request: {}", error);
    send(tx, ReplyEnvelope::new(id, Reply::error(error.to_string())));
}

fn send(tx: &mpsc::UnboundedSender<ReplyEnvelope>, reply: ReplyEnvelope) {
    if tx.send(reply).is_err() {
        warn!("Reply dropped, output closed");
    }
}

async fn write_reply<W>(writer: &mut W, reply: &ReplyEnvelope) -> Result<(), HostError>
where
    W: AsyncWrite + Unpin,
{
    let mut line = reply.to_line()?;
    line.push('\n');
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholar_analyzer::AnalyzerConfig;
    use scholar_llm::MockProvider;
    use serde_json::{json, Value};
    use std::time::Duration;

    const RESPONSE: &str = "1. Summary: S\n2. Methodology: M\n3. Bias: B\n4. Gaps: G";

    fn host(llm: MockProvider) -> Host<MockProvider> {
        Host::new(Analyzer::new(llm, AnalyzerConfig::default()))
    }

    async fn run(host: &Host<MockProvider>, input: &str) -> Vec<Value> {
        let mut out = Vec::new();
        host.serve(input.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    fn by_id(replies: &[Value], id: i64) -> &Value {
        replies
            .iter()
            .find(|reply| reply["id"] == json!(id))
            .unwrap_or_else(|| panic!("no reply with id {}", id))
    }

    #[tokio::test]
    async fn test_status_without_analysis() {
        let replies = run(&host(MockProvider::new(RESPONSE)), "{\"action\":\"getAnalysisResult\"}\n").await;
        assert_eq!(replies, vec![json!({"running": false, "result": null})]);
    }

    #[tokio::test]
    async fn test_start_analysis_echoes_id() {
        let input = "{\"id\":1,\"action\":\"startAnalysis\",\"text\":\"paper\"}\n";
        let replies = run(&host(MockProvider::new(RESPONSE)), input).await;
        assert_eq!(
            replies,
            vec![json!({
                "id": 1,
                "status": "done",
                "result": {
                    "summary": "S",
                    "methodology": "M",
                    "biasDetection": "B",
                    "researchGaps": "G",
                    "confidence": 95
                }
            })]
        );
    }

    #[tokio::test]
    async fn test_invalid_lines_do_not_stop_the_host() {
        let input = "garbage\n\n{\"id\":2,\"action\":\"nope\"}\n{\"id\":3,\"action\":\"getAnalysisResult\"}\n";
        let replies = run(&host(MockProvider::new(RESPONSE)), input).await;
        assert_eq!(replies.len(), 3);

        assert!(replies.iter().any(|r| r["status"] == "error" && r.get("id").is_none()));
        assert_eq!(by_id(&replies, 2)["status"], "error");
        assert_eq!(by_id(&replies, 3)["running"], false);
    }

    #[tokio::test]
    async fn test_non_utf8_line_is_rejected() {
        let input: &[u8] = b"\xff\xfe\n{\"id\":9,\"action\":\"getAnalysisResult\"}\n";
        let mut out = Vec::new();
        host(MockProvider::new(RESPONSE))
            .serve(input, &mut out)
            .await
            .unwrap();

        let replies: Vec<Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0]["status"], "error");
        assert!(replies[0]["error"].as_str().unwrap().contains("UTF-8"));
        assert_eq!(by_id(&replies, 9)["running"], false);
    }

    #[tokio::test]
    async fn test_last_line_without_newline() {
        let replies = run(&host(MockProvider::new(RESPONSE)), "{\"id\":4,\"action\":\"getAnalysisResult\"}").await;
        assert_eq!(replies.len(), 1);
        assert_eq!(by_id(&replies, 4)["running"], false);
    }

    #[tokio::test]
    async fn test_concurrent_start_is_busy() {
        let llm = MockProvider::new(RESPONSE).with_delay(Duration::from_millis(200));
        let input = "{\"id\":1,\"action\":\"startAnalysis\",\"text\":\"a\"}\n\
                     {\"id\":2,\"action\":\"startAnalysis\",\"text\":\"b\"}\n";
        let replies = run(&host(llm.clone()), input).await;

        assert_eq!(replies.len(), 2);
        let statuses: Vec<&str> = [1, 2]
            .iter()
            .map(|id| by_id(&replies, *id)["status"].as_str().unwrap())
            .collect();
        assert!(statuses.contains(&"done"));
        assert!(statuses.contains(&"error"));
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_input() {
        assert!(run(&host(MockProvider::new(RESPONSE)), "").await.is_empty());
    }
}
