use std::fmt;

/// Telegram message id (numeric). Used as the reply anchor for folder contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub i32);

/// Where uploads go: a numeric chat id or a public `@username`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Destination {
    Id(i64),
    Username(String),
}

impl Destination {
    /// Parse a chat identifier as typed by the user.
    ///
    /// Anything that is not a signed integer is treated as a username; the leading
    /// `@` is optional.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(id) = raw.parse::<i64>() {
            return Some(Self::Id(id));
        }
        let name = raw.trim_start_matches('@');
        if name.is_empty() {
            return None;
        }
        Some(Self::Username(format!("@{name}")))
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Username(name) => f.write_str(name),
        }
    }
}
