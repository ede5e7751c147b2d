//! Interactive prompts: destination chat and reply anchor.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use tgup_core::{
    domain::{Destination, MessageId},
    errors::Error,
    store::{ChatHistory, ChatHistoryRecord},
    Result,
};

const NEW_CHAT_LABEL: &str = "Enter new chat ID";

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask for one line of text; surrounding whitespace is trimmed.
    pub fn input(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::Input(format!("no answer for {label:?}")));
        }
        Ok(line.trim().to_string())
    }

    /// Numbered menu; re-asks until the answer is in range. Returns the 0-based index.
    pub fn select(&mut self, label: &str, items: &[String]) -> Result<usize> {
        writeln!(self.output, "{label}:")?;
        for (idx, item) in items.iter().enumerate() {
            writeln!(self.output, "  {}) {item}", idx + 1)?;
        }

        loop {
            let answer = self.input("Choice")?;
            match answer.parse::<usize>() {
                Ok(n) if (1..=items.len()).contains(&n) => return Ok(n - 1),
                _ => writeln!(
                    self.output,
                    "Please enter a number between 1 and {}",
                    items.len()
                )?,
            }
        }
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }
}

/// Pick a destination from the chat history, or read and remember a new one.
pub fn choose_destination<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    history: &ChatHistory,
) -> Result<Destination> {
    let records = history.list()?;
    let mut items: Vec<String> = records.iter().map(ChatHistoryRecord::label).collect();
    items.push(NEW_CHAT_LABEL.to_string());

    let idx = prompter.select("Select chat", &items)?;
    if let Some(record) = records.get(idx) {
        return Destination::parse(&record.chat_id).ok_or_else(|| {
            Error::Input(format!("invalid chat id in history: {:?}", record.chat_id))
        });
    }

    let destination = loop {
        let raw = prompter.input("Enter channel/group ID (numeric or username)")?;
        match Destination::parse(&raw) {
            Some(d) => break d,
            None => prompter.say("A chat ID or username is required")?,
        }
    };
    let name = prompter.input("Enter chat name (optional, for history)")?;
    let name = Some(name.as_str()).filter(|n| !n.is_empty());

    match history.record(&destination.to_string(), name) {
        Ok(()) => tracing::info!("Stored chat {destination} for history"),
        Err(e) => tracing::warn!("Failed to store chat history: {e}"),
    }

    Ok(destination)
}

/// Ask which message the upload should reply to; `0` or empty means none.
pub fn ask_reply_anchor<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<Option<MessageId>> {
    let raw = prompter.input("Reply to message ID (0 for none)")?;
    parse_reply_anchor(&raw)
}

fn parse_reply_anchor(raw: &str) -> Result<Option<MessageId>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let id: i32 = raw
        .parse()
        .map_err(|e| Error::Input(format!("invalid message ID {raw:?}: {e}")))?;
    match id {
        0 => Ok(None),
        id if id > 0 => Ok(Some(MessageId(id))),
        _ => Err(Error::Input(format!("invalid message ID {raw:?}: negative"))),
    }
}
