use std::io::Write;

use anyhow::{Context, Result};
use pachico_core::{AgentClient, ChatController, ConversationsStore, SendOutcome};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use super::command::{Command, HELP};
use super::render::{render_history, render_list, render_message};

const GREETING: &str = "Pachico: part nutritionist, part gym bro. Type /help for commands, /quit to exit.";

/// Whether the loop should keep reading input
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Line-oriented chat front end over a [`ChatController`]
pub struct Repl<W: Write> {
    controller: ChatController,
    client: AgentClient,
    out: W,
}

impl<W: Write> Repl<W> {
    pub fn new(controller: ChatController, client: AgentClient, out: W) -> Self {
        Self {
            controller,
            client,
            out,
        }
    }

    /// Read commands from stdin until EOF or a quit command
    pub async fn run(&mut self) -> Result<()> {
        writeln!(self.out, "{}", GREETING)?;
        writeln!(self.out, "Agent: {}", self.client.base_url())?;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;

            let Some(line) = lines.next_line().await.context("Failed to read input")? else {
                break;
            };

            if self.handle(Command::parse(&line)).await? == Flow::Quit {
                break;
            }
        }

        writeln!(self.out, "Goodbye!")?;
        Ok(())
    }

    pub async fn handle(&mut self, command: Command) -> Result<Flow> {
        debug!(?command, "Handling command");

        match command {
            Command::Empty => {}
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => writeln!(self.out, "{}", HELP)?,
            Command::Invalid(reason) => writeln!(self.out, "{} (try /help)", reason)?,
            Command::New => {
                self.controller.store().lock().create();
                writeln!(self.out, "Started a new conversation.")?;
            }
            Command::List => {
                let listing = render_list(&self.controller.store().lock());
                writeln!(self.out, "{}", listing)?;
            }
            Command::History => {
                let transcript = {
                    let store = self.controller.store().lock();
                    store
                        .active_conversation()
                        .map(|conv| render_history(conv, &self.client))
                };
                match transcript {
                    Some(transcript) => writeln!(self.out, "{}", transcript)?,
                    None => writeln!(self.out, "No active conversation.")?,
                }
            }
            Command::Open(target) => {
                let mut store = self.controller.store().lock();
                match resolve_target(&store, &target) {
                    Some(id) => {
                        store.select(id.clone());
                        let title = store.get(&id).map(|c| c.title.clone()).unwrap_or_default();
                        writeln!(self.out, "Switched to \"{}\".", title)?;
                    }
                    None => writeln!(self.out, "No conversation matches \"{}\".", target)?,
                }
            }
            Command::Delete(target) => {
                let mut store = self.controller.store().lock();
                match resolve_target(&store, &target) {
                    Some(id) => {
                        store.delete(&id);
                        writeln!(self.out, "Deleted.")?;
                    }
                    None => writeln!(self.out, "No conversation matches \"{}\".", target)?,
                }
            }
            Command::Send(content) => self.send(&content).await?,
        }

        Ok(Flow::Continue)
    }

    async fn send(&mut self, content: &str) -> Result<()> {
        {
            let mut store = self.controller.store().lock();
            if store.active_conversation().is_none() {
                store.create();
            }
        }

        let Some(pending) = self.controller.begin_send(content) else {
            return Ok(());
        };
        let thread_id = pending.thread_id().to_string();

        writeln!(self.out, "pachico is thinking...")?;
        self.out.flush()?;

        let outcome = self.controller.complete_send(pending).await;
        debug!(?outcome, "Send complete");

        let reply = self
            .controller
            .store()
            .lock()
            .get(&thread_id)
            .and_then(|c| c.last_message().cloned());

        match (reply, outcome) {
            (Some(message), _) => writeln!(self.out, "{}", render_message(&message, &self.client))?,
            (None, SendOutcome::Failed(detail)) => writeln!(self.out, "{}", detail)?,
            (None, _) => {}
        }

        Ok(())
    }
}

/// Find a conversation by list position (1-based, most recent first),
/// exact id, or unique id prefix. Numbers outside the list fall back to
/// id matching, since a hex id can start with digits.
pub fn resolve_target(store: &ConversationsStore, target: &str) -> Option<String> {
    let target = target.trim();

    let by_position = target
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| store.list_recent().get(i).map(|c| c.thread_id.clone()));
    if by_position.is_some() {
        return by_position;
    }

    if store.get(target).is_some() {
        return Some(target.to_string());
    }

    let mut matches = store
        .conversations()
        .iter()
        .filter(|c| c.thread_id.starts_with(target));
    match (matches.next(), matches.next()) {
        (Some(only), None) => Some(only.thread_id.clone()),
        _ => None,
    }
}
