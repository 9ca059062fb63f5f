use std::{borrow::Cow, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::fs;

/// The changelog document, either loaded from disk or started from a header.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Changelog {
    /// The path to the CHANGELOG file
    pub(crate) path: PathBuf,
    /// The full document, including anything appended since it was loaded
    pub(crate) content: String,
}

impl Changelog {
    /// Read the changelog at `path`, or start a new one with `header` if there is no file yet.
    pub(crate) fn load(path: PathBuf, header: &str) -> Result<Self, fs::Error> {
        let content = if path.exists() {
            fs::read_to_string(path.as_path())?
        } else {
            String::from(header)
        };
        Ok(Self { path, content })
    }

    pub(crate) fn contains(&self, entry: &str) -> bool {
        self.content.contains(entry)
    }

    /// Append `entry` to the end of the document, return the diff being applied.
    pub(crate) fn with_entry(&mut self, entry: &str) -> String {
        self.content.push_str(entry);
        entry.to_string()
    }
}

/// Build the changelog entry for a release titled `title` (the tag name).
pub(crate) fn entry(title: &str, commit_message: &str, format: MessageFormat) -> String {
    format!("\n## {title}\n\n- {}\n", format.apply(commit_message))
}

/// How a commit message gets placed into the changelog list item.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageFormat {
    /// Insert the message as-is, even if it spans multiple lines.
    #[default]
    Verbatim,
    /// Only the first line of the message.
    Subject,
    /// Indent every line after the first so the whole message stays in one list item.
    Indent,
}

impl MessageFormat {
    fn apply(self, message: &str) -> Cow<'_, str> {
        match self {
            Self::Verbatim => Cow::Borrowed(message),
            Self::Subject => Cow::Borrowed(message.lines().next().unwrap_or_default()),
            Self::Indent if !message.contains('\n') => Cow::Borrowed(message),
            Self::Indent => {
                let mut lines = message.lines();
                let mut indented = String::with_capacity(message.len() + 16);
                indented.push_str(lines.next().unwrap_or_default());
                for line in lines {
                    indented.push('\n');
                    if !line.is_empty() {
                        indented.push_str("  ");
                        indented.push_str(line);
                    }
                }
                Cow::Owned(indented)
            }
        }
    }
}
