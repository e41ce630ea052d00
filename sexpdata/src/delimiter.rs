//! Bracket pairs that delimit containers.
use std::collections::HashMap;
use std::fmt::Display;

use crate::scanner::is_whitespace;

/// An opener/closer character pair identifying a kind of container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DelimiterKind {
    pub opener: char,
    pub closer: char,
}

impl DelimiterKind {
    /// Parentheses, the default kind used for lists.
    pub const PARENS: DelimiterKind = DelimiterKind::new('(', ')');

    /// Square brackets, used for arrays.
    pub const BRACKETS: DelimiterKind = DelimiterKind::new('[', ']');

    pub const fn new(opener: char, closer: char) -> Self {
        Self { opener, closer }
    }
}

impl Default for DelimiterKind {
    fn default() -> Self {
        Self::PARENS
    }
}

impl Display for DelimiterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.opener, self.closer)
    }
}

/// Error while registering a [`DelimiterKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("opener `{opener}` is already bound to closer `{existing}`")]
    OpenerInUse { opener: char, existing: char },
    #[error("`{character}` is already used by the delimiter kind `{existing}`")]
    CharacterInUse {
        character: char,
        existing: DelimiterKind,
    },
    #[error("`{0}` can not be used as a delimiter")]
    Reserved(char),
}

/// Table of the delimiter kinds known to a parser or printer.
///
/// The default registry contains [`DelimiterKind::PARENS`] and
/// [`DelimiterKind::BRACKETS`]. Every character is used by at most one kind,
/// in at most one role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimiterRegistry {
    by_opener: HashMap<char, DelimiterKind>,
    by_closer: HashMap<char, DelimiterKind>,
}

impl DelimiterRegistry {
    /// A registry without any delimiters.
    pub fn empty() -> Self {
        Self {
            by_opener: HashMap::new(),
            by_closer: HashMap::new(),
        }
    }

    /// Add a delimiter kind.
    ///
    /// Registering a kind that is already present does nothing.
    pub fn register(&mut self, kind: DelimiterKind) -> Result<(), RegistryError> {
        let DelimiterKind { opener, closer } = kind;

        if let Some(existing) = self.by_opener.get(&opener) {
            if existing.closer == closer {
                return Ok(());
            }

            return Err(RegistryError::OpenerInUse {
                opener,
                existing: existing.closer,
            });
        }

        for character in [opener, closer] {
            if is_reserved(character) {
                return Err(RegistryError::Reserved(character));
            }

            if let Some(existing) = self.kind_using(character) {
                return Err(RegistryError::CharacterInUse {
                    character,
                    existing,
                });
            }
        }

        if opener == closer {
            return Err(RegistryError::Reserved(opener));
        }

        tracing::trace!(%opener, %closer, "registered delimiter kind");
        self.by_opener.insert(opener, kind);
        self.by_closer.insert(closer, kind);
        Ok(())
    }

    /// Builder style variant of [`DelimiterRegistry::register`].
    pub fn with(mut self, kind: DelimiterKind) -> Result<Self, RegistryError> {
        self.register(kind)?;
        Ok(self)
    }

    #[inline]
    pub fn closer_for(&self, opener: char) -> Option<char> {
        self.by_opener.get(&opener).map(|kind| kind.closer)
    }

    #[inline]
    pub fn kind_for_opener(&self, opener: char) -> Option<DelimiterKind> {
        self.by_opener.get(&opener).copied()
    }

    #[inline]
    pub fn is_opener(&self, c: char) -> bool {
        self.by_opener.contains_key(&c)
    }

    #[inline]
    pub fn is_closer(&self, c: char) -> bool {
        self.by_closer.contains_key(&c)
    }

    #[inline]
    pub fn is_delimiter(&self, c: char) -> bool {
        self.is_opener(c) || self.is_closer(c)
    }

    /// Iterate over all registered pairs as `(opener, closer)`.
    pub fn pairs(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.by_opener.values().map(|kind| (kind.opener, kind.closer))
    }

    fn kind_using(&self, c: char) -> Option<DelimiterKind> {
        self.by_opener
            .get(&c)
            .or_else(|| self.by_closer.get(&c))
            .copied()
    }
}

impl Default for DelimiterRegistry {
    fn default() -> Self {
        let mut by_opener = HashMap::new();
        let mut by_closer = HashMap::new();

        for kind in [DelimiterKind::PARENS, DelimiterKind::BRACKETS] {
            by_opener.insert(kind.opener, kind);
            by_closer.insert(kind.closer, kind);
        }

        Self {
            by_opener,
            by_closer,
        }
    }
}

/// Characters with a fixed meaning in the syntax.
fn is_reserved(c: char) -> bool {
    is_whitespace(c) || matches!(c, '"' | '\'' | '\\' | ';')
}
