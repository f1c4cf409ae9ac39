//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use hackroom_server::infrastructure::dto::websocket::{
    ClientEvent, RoomUserPayload, ServerEvent, TimerDto,
};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{
    command::{Command, HELP, Identity, parse_input},
    domain::should_display_timer,
    error::ClientError,
    formatter::MessageFormatter,
    ui::redisplay_prompt,
};

/// What the session has seen so far
pub struct SessionView {
    username: String,
    timer: Option<TimerDto>,
}

impl SessionView {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            timer: None,
        }
    }

    /// Turn one text frame into something to print.
    ///
    /// A `joinRoom:error` ends the session; running-timer ticks are absorbed.
    pub fn handle_frame(&mut self, text: &str) -> Result<Option<String>, ClientError> {
        let event = match serde_json::from_str::<ServerEvent>(text) {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!("Unrecognized frame ({}): {}", e, text);
                return Ok(Some(MessageFormatter::format_raw_message(text)));
            }
        };

        match event {
            ServerEvent::JoinRoomError(error) => Err(ClientError::UsernameRejected(error.error)),
            ServerEvent::TimerUpdate(timer) => {
                let display = should_display_timer(self.timer.as_ref(), &timer);
                let output = display.then(|| MessageFormatter::format_timer(&timer));
                self.timer = Some(timer);
                Ok(output)
            }
            other => Ok(Some(MessageFormatter::format_event(&other, &self.username))),
        }
    }

    /// The latest timer state, including the per-second updates not printed
    pub fn current_timer(&self) -> String {
        match &self.timer {
            Some(timer) => MessageFormatter::format_timer(timer),
            None => "\n[timer] no timer state received yet\n".to_string(),
        }
    }
}

fn encode(event: &ClientEvent) -> Result<Message, ClientError> {
    Ok(Message::Text(serde_json::to_string(event)?.into()))
}

/// Run one WebSocket session: connect, join, then relay until it ends.
///
/// `Ok(())` means the user chose to leave; any `Err` is a candidate for a
/// reconnect.
pub async fn run_client_session(
    url: &str,
    identity: &Identity,
    prompt: &str,
    input: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    tracing::info!("Connected to {}", url);

    let (mut write, mut read) = ws_stream.split();

    let join = ClientEvent::JoinRoom(RoomUserPayload {
        room_id: identity.room_id.clone(),
        username: identity.username.clone(),
    });
    write
        .send(encode(&join)?)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    println!(
        "\nYou are '{}' in room '{}'. Type /help for commands, /quit to exit.\n",
        identity.username, identity.room_id
    );

    let mut view = SessionView::new(identity.username.clone());

    loop {
        tokio::select! {
            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    if let Some(output) = view.handle_frame(text.as_str())? {
                        print!("{}", output);
                        redisplay_prompt(prompt);
                    }
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("Server closed the connection");
                    return Err(ClientError::ConnectionError("Connection lost".to_string()));
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return Err(ClientError::ConnectionError(e.to_string()));
                }
            },
            line = input.recv() => {
                let Some(line) = line else {
                    // Ctrl+C / Ctrl+D
                    write.send(Message::Close(None)).await.ok();
                    return Ok(());
                };
                let event = match parse_input(&line, identity) {
                    Ok(Command::Send(event)) => event,
                    Ok(Command::ShowTimer) => {
                        print!("{}", view.current_timer());
                        redisplay_prompt(prompt);
                        continue;
                    }
                    Ok(Command::Help) => {
                        println!("{}", HELP);
                        redisplay_prompt(prompt);
                        continue;
                    }
                    Ok(Command::Leave) => {
                        write.send(encode(&identity.leave_event())?).await.ok();
                        write.send(Message::Close(None)).await.ok();
                        return Ok(());
                    }
                    Ok(Command::Quit) => {
                        write.send(Message::Close(None)).await.ok();
                        return Ok(());
                    }
                    Err(e) => {
                        println!("{}", e);
                        redisplay_prompt(prompt);
                        continue;
                    }
                };
                if let Err(e) = write.send(encode(&event)?).await {
                    tracing::warn!("Failed to send event: {}", e);
                    return Err(ClientError::ConnectionError(e.to_string()));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer_frame(status: &str, remaining: u64, version: u64) -> String {
        serde_json::json!({
            "type": "timer:update",
            "data": {
                "roomId": "abc123",
                "status": status,
                "remainingTime": remaining,
                "startTime": null,
                "lastUpdateBy": "bob",
                "log": [],
                "version": version
            }
        })
        .to_string()
    }

    #[test]
    fn test_join_error_ends_session() {
        // テスト項目: joinRoom:error を受け取るとユーザー名拒否エラーになる
        // given (前提条件):
        let mut view = SessionView::new("alice");
        let frame = r#"{"type":"joinRoom:error","data":{"error":"Username 'alice' is already taken in this room"}}"#;

        // when (操作):
        let result = view.handle_frame(frame);

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(ClientError::UsernameRejected(message)) if message.contains("already taken")
        ));
    }

    #[test]
    fn test_running_ticks_are_absorbed_but_remembered() {
        // テスト項目: 毎秒の timer:update は表示されないが、/timer 用に最新状態が保持される
        // given (前提条件):
        let mut view = SessionView::new("alice");
        let first = view.handle_frame(&timer_frame("running", 600, 2)).unwrap();

        // when (操作):
        let tick = view.handle_frame(&timer_frame("running", 599, 2)).unwrap();

        // then (期待する結果):
        assert!(first.is_some());
        assert!(tick.is_none());
        assert!(view.current_timer().contains("09:59 running"));
    }

    #[test]
    fn test_chat_frame_is_formatted() {
        // テスト項目: message イベントが整形されて返される
        // given (前提条件):
        let mut view = SessionView::new("alice");
        let frame = r#"{"type":"message","data":{"roomId":"abc123","username":"bob","message":"hi","timestamp":1672498800000}}"#;

        // when (操作):
        let output = view.handle_frame(frame).unwrap().unwrap();

        // then (期待する結果):
        assert!(output.contains("@bob: hi"));
    }

    #[test]
    fn test_unknown_frame_is_shown_raw() {
        // テスト項目: 解釈できないフレームは生のまま表示される
        // given (前提条件):
        let mut view = SessionView::new("alice");

        // when (操作):
        let output = view.handle_frame("garbage").unwrap().unwrap();

        // then (期待する結果):
        assert!(output.contains("Received: garbage"));
    }
}
