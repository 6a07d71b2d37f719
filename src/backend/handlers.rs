//! Backend action handlers: one function per API concern.

use crossbeam_channel::Sender;

use crate::api::{ApiClient, ChatTransport};
use crate::protocol::{BackendAction, GuiEvent, RevealGate};
use crate::reveal::{RevealSchedule, REVEAL_TICK};
use crate::transcript::RequestId;

pub async fn handle_action(
    client: &ApiClient,
    action: BackendAction,
    event_tx: &Sender<GuiEvent>,
    gate: &RevealGate,
) {
    match action {
        BackendAction::Chat { request, question } => {
            run_reply(client, request, &question, event_tx, gate).await;
        }

        BackendAction::Search { query } => match client.search_books(&query).await {
            Ok(books) => {
                let _ = event_tx.send(GuiEvent::SearchResults(books));
            }
            Err(e) => {
                tracing::warn!(error = %e, "search failed");
                let _ = event_tx.send(GuiEvent::SearchFailed(
                    "Search failed. Please try again.".to_string(),
                ));
            }
        },

        BackendAction::StartScan => match client.start_scan().await {
            Ok(()) => {
                let _ = event_tx.send(GuiEvent::ScanStateChanged { scanning: true });
            }
            Err(e) => {
                tracing::warn!(error = %e, "scan start failed");
                let _ = event_tx.send(GuiEvent::Error(format!("Could not start scan: {}", e)));
            }
        },

        BackendAction::StopScan => match client.stop_scan().await {
            Ok(()) => {
                let _ = event_tx.send(GuiEvent::ScanStateChanged { scanning: false });
            }
            Err(e) => {
                tracing::warn!(error = %e, "scan stop failed");
                let _ = event_tx.send(GuiEvent::Error(format!("Could not stop scan: {}", e)));
            }
        },

        BackendAction::FetchRobotStatus => match client.robot_status().await {
            Ok(status) => {
                let _ = event_tx.send(GuiEvent::RobotStatus(status));
            }
            // Polling is periodic; a missed sample is not worth a toast.
            Err(e) => tracing::debug!(error = %e, "robot status poll failed"),
        },

        BackendAction::SetRobotStatus(status) => match client.set_robot_status(status).await {
            Ok(()) => {
                let _ = event_tx.send(GuiEvent::RobotStatus(status));
            }
            Err(e) => {
                tracing::warn!(error = %e, "robot status update failed");
                let _ = event_tx.send(GuiEvent::Error(format!("Could not reset robot: {}", e)));
            }
        },

        BackendAction::GuideToBook { barcode, title } => {
            match client.book_guide(&barcode, &title).await {
                Ok(ack) => {
                    let _ = event_tx.send(GuiEvent::GuideStarted {
                        request_id: ack.request_id,
                    });
                }
                Err(e) => {
                    tracing::warn!(error = %e, barcode = %barcode, "guidance request failed");
                    let _ = event_tx.send(GuiEvent::GuideFailed(
                        "Could not reach the guide robot.".to_string(),
                    ));
                }
            }
        }

        BackendAction::CancelGuide {
            barcode,
            request_id,
        } => {
            if let Err(e) = client.book_guide_cancel(&barcode, request_id.as_deref()).await {
                tracing::warn!(error = %e, barcode = %barcode, "guidance cancel failed");
            }
            // The modal closes regardless; the robot side times out on its own.
            let _ = event_tx.send(GuiEvent::GuideCancelled);
        }
    }
}

/// Ask the transport and replay the answer through the reveal schedule.
///
/// Emits `ReplyStarted`, zero or more `ReplyChunk`s on the fixed tick and
/// a final `ReplyDone`, or a single `ReplyFailed`. Between ticks the gate
/// is sampled: once it no longer names `request` (teardown or a newer
/// request), ticking stops and nothing further is emitted.
pub async fn run_reply<T: ChatTransport>(
    transport: &T,
    request: RequestId,
    question: &str,
    event_tx: &Sender<GuiEvent>,
    gate: &RevealGate,
) {
    let reply = match transport.send(question).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(error = %e, "chat request failed");
            let _ = event_tx.send(GuiEvent::ReplyFailed {
                request,
                question: question.to_string(),
            });
            return;
        }
    };

    if !gate.is_current(request) {
        return;
    }
    let _ = event_tx.send(GuiEvent::ReplyStarted { request });

    let mut schedule = RevealSchedule::new(&reply.content);
    if schedule.is_finished() {
        // Empty reply: complete immediately, zero ticks.
        let _ = event_tx.send(GuiEvent::ReplyDone {
            request,
            text: reply.content,
        });
        return;
    }

    while let Some(prefix) = schedule.next() {
        tokio::time::sleep(REVEAL_TICK).await;
        if !gate.is_current(request) {
            return;
        }
        let event = if schedule.is_finished() {
            GuiEvent::ReplyDone {
                request,
                text: prefix,
            }
        } else {
            GuiEvent::ReplyChunk {
                request,
                text: prefix,
            }
        };
        let _ = event_tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::models::ChatReply;
    use crate::transcript::Transcript;
    use async_trait::async_trait;
    use crossbeam_channel::unbounded;

    struct StubTransport {
        reply: Option<String>,
    }

    #[async_trait]
    impl ChatTransport for StubTransport {
        async fn send(&self, _question: &str) -> Result<ChatReply, ApiError> {
            match &self.reply {
                Some(content) => Ok(ChatReply {
                    content: content.clone(),
                    ..ChatReply::default()
                }),
                // Any reqwest error works as a stand-in; an unparseable
                // proxy URL produces one without touching the network.
                None => Err(ApiError::Build(
                    reqwest::Proxy::all("http://[bad").unwrap_err(),
                )),
            }
        }
    }

    #[tokio::test]
    async fn test_reply_event_sequence() {
        let transport = StubTransport {
            reply: Some("hello there".to_string()),
        };
        let (event_tx, event_rx) = unbounded();
        let gate = RevealGate::new();
        gate.arm(7);

        run_reply(&transport, 7, "hi", &event_tx, &gate).await;

        let events: Vec<GuiEvent> = event_rx.try_iter().collect();
        assert!(matches!(events[0], GuiEvent::ReplyStarted { request: 7 }));

        let mut prev_len = 0;
        let mut done = None;
        for event in &events[1..] {
            match event {
                GuiEvent::ReplyChunk { request: 7, text } => {
                    assert!(done.is_none(), "chunk after done");
                    assert!("hello there".starts_with(text.as_str()));
                    assert!(text.chars().count() > prev_len);
                    prev_len = text.chars().count();
                }
                GuiEvent::ReplyDone { request: 7, text } => {
                    assert!(done.is_none(), "done emitted twice");
                    done = Some(text.clone());
                }
                other => panic!("unexpected event: {:?}", other),
            }
        }
        assert_eq!(done.as_deref(), Some("hello there"));
    }

    #[tokio::test]
    async fn test_empty_reply_completes_without_chunks() {
        let transport = StubTransport {
            reply: Some(String::new()),
        };
        let (event_tx, event_rx) = unbounded();
        let gate = RevealGate::new();
        gate.arm(1);

        run_reply(&transport, 1, "hi", &event_tx, &gate).await;

        let events: Vec<GuiEvent> = event_rx.try_iter().collect();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], GuiEvent::ReplyStarted { request: 1 }));
        match &events[1] {
            GuiEvent::ReplyDone { request: 1, text } => assert!(text.is_empty()),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failed_reply_carries_question() {
        let transport = StubTransport { reply: None };
        let (event_tx, event_rx) = unbounded();
        let gate = RevealGate::new();
        gate.arm(3);

        run_reply(&transport, 3, "what are the hours?", &event_tx, &gate).await;

        let events: Vec<GuiEvent> = event_rx.try_iter().collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            GuiEvent::ReplyFailed { request: 3, question } => {
                assert_eq!(question, "what are the hours?");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_cleared_gate_stops_ticking() {
        let transport = StubTransport {
            reply: Some("x".repeat(200)),
        };
        let (event_tx, event_rx) = unbounded();
        let gate = RevealGate::new();
        gate.arm(5);
        // Torn down before the reveal starts ticking.
        gate.clear();

        run_reply(&transport, 5, "hi", &event_tx, &gate).await;

        let events: Vec<GuiEvent> = event_rx.try_iter().collect();
        assert!(
            events.is_empty(),
            "no events may be emitted after teardown, got {:?}",
            events
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_gate_cleared_mid_reveal_stops_ticking() {
        // 600 chars -> ~60 ticks at 14ms, plenty of time to cancel.
        let transport = StubTransport {
            reply: Some("x".repeat(600)),
        };
        let (event_tx, event_rx) = unbounded();
        let gate = RevealGate::new();
        gate.arm(9);

        let task = {
            let event_tx = event_tx.clone();
            let gate = gate.clone();
            tokio::spawn(async move {
                run_reply(&transport, 9, "hi", &event_tx, &gate).await;
            })
        };

        // Wait until the reveal has begun ticking, then tear it down.
        loop {
            if event_rx.try_iter().any(|e| matches!(e, GuiEvent::ReplyChunk { .. })) {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        gate.clear();
        task.await.unwrap();

        let remaining: Vec<GuiEvent> = event_rx.try_iter().collect();
        assert!(
            !remaining
                .iter()
                .any(|e| matches!(e, GuiEvent::ReplyDone { .. })),
            "reveal must not complete after teardown"
        );
    }

    /// End-to-end: drive a transcript through the full success cycle the
    /// way the UI does, draining backend events into it.
    #[tokio::test]
    async fn test_transcript_resolves_through_event_stream() {
        let transport = StubTransport {
            reply: Some("Try Walden by Thoreau.".to_string()),
        };
        let (event_tx, event_rx) = unbounded();
        let gate = RevealGate::new();

        let mut transcript = Transcript::new();
        transcript.push_user("recommend a classic").unwrap();
        let request = transcript.begin_reply();
        gate.arm(request);

        run_reply(&transport, request, "recommend a classic", &event_tx, &gate).await;

        for event in event_rx.try_iter() {
            match event {
                GuiEvent::ReplyStarted { request } => transcript.start_reveal(request),
                GuiEvent::ReplyChunk { request, text } => transcript.apply_chunk(request, &text),
                GuiEvent::ReplyDone { request, text } => transcript.complete_reply(request, &text),
                GuiEvent::ReplyFailed { request, question } => {
                    transcript.fail_reply(request, &question)
                }
                other => panic!("unexpected event: {:?}", other),
            }
        }

        assert!(!transcript.is_in_flight());
        let last = transcript.messages().last().unwrap();
        assert_eq!(last.content, "Try Walden by Thoreau.");
    }
}
