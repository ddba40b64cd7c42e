/*!
 * Structural markers of the INTERLIS 1 transfer format and the scope they
 * open while a file is scanned.
 */

use std::fmt;

use log::debug;

/// Line-leading keyword that opens a structural scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// `MODL`, file level
    Model,
    /// `TOPI`, topic level
    Topic,
    /// `TABL`, table level, nested in a topic
    Table,
}

impl Marker {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Model => "MODL",
            Self::Topic => "TOPI",
            Self::Table => "TABL",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "MODL" => Some(Self::Model),
            "TOPI" => Some(Self::Topic),
            "TABL" => Some(Self::Table),
            _ => None,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A marker line and the identifier it introduces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerLine<'a> {
    pub marker: Marker,
    pub identifier: &'a str,
    /// Byte offset of the identifier within the line
    pub offset: usize,
}

impl<'a> MarkerLine<'a> {
    /// Detect a marker line. Returns `None` for blank lines, other content,
    /// and marker keywords without an identifier.
    pub fn detect(line: &'a str) -> Option<Self> {
        let mut tokens = tokens_with_offsets(line);
        let (_, keyword) = tokens.next()?;
        let marker = Marker::from_keyword(keyword)?;
        let (offset, identifier) = tokens.next()?;

        Some(Self {
            marker,
            identifier,
            offset,
        })
    }

    /// The line with the identifier token replaced at its own position
    pub fn substitute(&self, line: &str, replacement: &str) -> String {
        let end = self.offset + self.identifier.len();
        let mut out = String::with_capacity(line.len() - self.identifier.len() + replacement.len());
        out.push_str(&line[..self.offset]);
        out.push_str(replacement);
        out.push_str(&line[end..]);
        out
    }
}

// Whitespace-delimited tokens together with their byte offsets
fn tokens_with_offsets(line: &str) -> impl Iterator<Item = (usize, &str)> {
    line.split(char::is_whitespace)
        .scan(0usize, move |pos, token| {
            let start = *pos;
            // Separator characters may be wider than one byte
            *pos += token.len();
            *pos += line[*pos..].chars().next().map_or(0, char::len_utf8);
            Some((start, token))
        })
        .filter(|(_, token)| !token.is_empty())
}

/// Topic and table that are current while scanning a file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationContext {
    topic: Option<String>,
    table: Option<String>,
}

impl TranslationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the scope for a marker line, using the untranslated identifier
    pub fn enter(&mut self, marker: Marker, identifier: &str) {
        match marker {
            Marker::Model => {
                self.topic = None;
                self.table = None;
            }
            Marker::Topic => {
                self.topic = Some(identifier.to_string());
                self.table = None;
            }
            Marker::Table => {
                self.table = Some(identifier.to_string());
            }
        }
        debug!("Entered {} {} (topic={:?}, table={:?})", marker, identifier, self.topic, self.table);
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }
}
