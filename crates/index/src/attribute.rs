use events::LogEvent;
use serde::{Deserialize, Serialize};

/// How an attribute value is split into hierarchy segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// Split at each occurrence of the character.
    Char(char),
    /// The whole value is a single flat leaf.
    None,
}

impl Separator {
    /// Split `value` at the last separator into `(parent, label)`.
    ///
    /// Returns `None` when the value has no parent segment.
    pub fn split_last(self, value: &str) -> Option<(&str, &str)> {
        match self {
            Separator::Char(c) => value
                .rfind(c)
                .map(|at| (&value[..at], &value[at + c.len_utf8()..])),
            Separator::None => None,
        }
    }
}

/// An event attribute that gets its own hierarchical index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    Logger,
    Level,
    SourceAssembly,
    SourceType,
    Thread,
    SourceApplication,
    SourceMachine,
    SourceFile,
}

impl AttributeKind {
    /// All kinds, in the order an event's attributes are indexed.
    pub const ALL: [AttributeKind; 8] = [
        AttributeKind::Logger,
        AttributeKind::Level,
        AttributeKind::SourceAssembly,
        AttributeKind::SourceType,
        AttributeKind::Thread,
        AttributeKind::SourceApplication,
        AttributeKind::SourceMachine,
        AttributeKind::SourceFile,
    ];

    pub(crate) fn position(self) -> usize {
        self as usize
    }

    /// Label of the tree root for this kind.
    pub fn root_label(self) -> &'static str {
        match self {
            AttributeKind::Logger => "Loggers",
            AttributeKind::Level => "Levels",
            AttributeKind::SourceAssembly => "Assemblies",
            AttributeKind::SourceType => "Classes",
            AttributeKind::Thread => "Threads",
            AttributeKind::SourceApplication => "Applications",
            AttributeKind::SourceMachine => "Machines",
            AttributeKind::SourceFile => "Files",
        }
    }

    pub fn separator(self, file_separator: char) -> Separator {
        match self {
            AttributeKind::Logger | AttributeKind::SourceType => Separator::Char('.'),
            AttributeKind::SourceFile => Separator::Char(file_separator),
            AttributeKind::Level
            | AttributeKind::SourceAssembly
            | AttributeKind::Thread
            | AttributeKind::SourceApplication
            | AttributeKind::SourceMachine => Separator::None,
        }
    }

    /// The value this kind indexes on `event`, if it carries one.
    pub fn value(self, event: &LogEvent) -> Option<&str> {
        match self {
            AttributeKind::Logger => event.logger.as_deref(),
            AttributeKind::Level => Some(event.level.as_str()),
            AttributeKind::SourceAssembly => event.source_assembly.as_deref(),
            AttributeKind::SourceType => event.source_type.as_deref(),
            AttributeKind::Thread => event.thread.as_deref(),
            AttributeKind::SourceApplication => event.source_application.as_deref(),
            AttributeKind::SourceMachine => event.source_machine.as_deref(),
            AttributeKind::SourceFile => event.source_file.as_deref(),
        }
    }
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.root_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_last_dotted() {
        let sep = Separator::Char('.');
        assert_eq!(sep.split_last("a.b.c"), Some(("a.b", "c")));
        assert_eq!(sep.split_last("a"), None);
        assert_eq!(sep.split_last("."), Some(("", "")));
    }

    #[test]
    fn test_flat_kinds_never_split() {
        assert_eq!(Separator::None.split_last("a.b"), None);
        assert_eq!(AttributeKind::Thread.separator('/'), Separator::None);
        assert_eq!(
            AttributeKind::SourceFile.separator('\\'),
            Separator::Char('\\')
        );
    }
}
