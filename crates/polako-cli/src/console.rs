//! Console transport: one user chatting over stdin/stdout.
//!
//! A message ends at a blank line so that multi-line answers can be sent.
//! A line starting with `/` typed on its own is sent immediately.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use polako_core::{Dispatcher, InboundMessage, UserId};

pub struct ConsoleTransport {
    user_id: UserId,
    name: String,
}

impl ConsoleTransport {
    pub fn new(user_id: UserId, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
        }
    }

    /// Read messages until EOF, writing each reply followed by a blank line.
    /// Returns the number of messages handled.
    pub async fn serve<R, W>(
        &self,
        dispatcher: &Dispatcher,
        input: R,
        mut output: W,
    ) -> Result<usize>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = BufReader::new(input).lines();
        let mut pending: Vec<String> = Vec::new();
        let mut handled = 0;

        while let Some(line) = lines.next_line().await.context("failed to read input")? {
            if line.trim().is_empty() {
                if !pending.is_empty() {
                    self.send(dispatcher, &mut pending, &mut output).await?;
                    handled += 1;
                }
                continue;
            }
            let is_command = line.trim_start().starts_with('/');
            pending.push(line);
            if is_command && pending.len() == 1 {
                self.send(dispatcher, &mut pending, &mut output).await?;
                handled += 1;
            }
        }

        if !pending.is_empty() {
            self.send(dispatcher, &mut pending, &mut output).await?;
            handled += 1;
        }
        Ok(handled)
    }

    async fn send<W: AsyncWrite + Unpin>(
        &self,
        dispatcher: &Dispatcher,
        pending: &mut Vec<String>,
        output: &mut W,
    ) -> Result<()> {
        let text = pending.join("\n");
        pending.clear();

        let reply = dispatcher.handle(&InboundMessage::new(self.user_id, &self.name, text));
        output.write_all(reply.as_bytes()).await?;
        output.write_all(b"\n\n").await?;
        output.flush().await.context("failed to write reply")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use polako_core::{Dictionary, DictionaryEntry, QuizEngine, UserStore};

    use super::*;

    fn dispatcher() -> Dispatcher {
        let dict = Dictionary::build(vec![
            DictionaryEntry::new("soba", "room"),
            DictionaryEntry::new("kuća", "house"),
        ])
        .unwrap();
        Dispatcher::new(QuizEngine::new(Arc::new(dict), Arc::new(UserStore::new())))
    }

    #[tokio::test]
    async fn commands_are_sent_immediately() {
        let d = dispatcher();
        let transport = ConsoleTransport::new(5, "Ana");
        let mut out = Vec::new();

        let handled = transport
            .serve(&d, &b"/set 2\n/rate\n"[..], &mut out)
            .await
            .unwrap();

        assert_eq!(handled, 2);
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("You will get 2 words per task.\n\n"), "{out}");
        assert!(out.contains("not answered anything yet"));
        assert_eq!(d.quiz().store().profile(5).unwrap().name, "Ana");
    }

    #[tokio::test]
    async fn multi_line_answer_is_one_message() {
        let d = dispatcher();
        let transport = ConsoleTransport::new(5, "Ana");
        let mut out = Vec::new();

        let handled = transport
            .serve(&d, &b"/set 2\nhello\n\nsoba\nku\xC4\x87a\n"[..], &mut out)
            .await
            .unwrap();

        assert_eq!(handled, 3);
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Translate 2 words"));
        assert!(out.contains("Correct "), "{out}");
        assert_eq!(d.quiz().store().profile(5).unwrap().history.len(), 2);
    }
}
