//! Static authorization directory.
//!
//! The directory is the complete authorization policy of the endpoint: an
//! immutable set of (identifier, display name) pairs compiled into the
//! binary and constructed once at startup. There is no runtime mutation
//! path: adding or removing cards means reflashing.
//!
//! Lookup is an exact-match linear scan. The directory is small and static,
//! so linearity is acceptable, and the uniqueness invariant enforced at
//! construction means a scan needs no tie-break rule: at most one entry can
//! match. Per-entry comparison is constant-time (see
//! [`CardUid`]'s `PartialEq`).

use scanpost_core::{CardUid, Error, Result};
use tracing::debug;

/// One compiled-in authorization: an identifier and the holder's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationEntry {
    /// Card identifier, canonical.
    pub uid: CardUid,

    /// Display name shown on grant and reported in telemetry.
    pub name: String,
}

/// Immutable identifier → name mapping.
///
/// # Examples
///
/// ```
/// use scanpost_engine::AuthorizationDirectory;
///
/// let directory = AuthorizationDirectory::from_table(&[
///     ("E3 3C 5C 1C", "Donovan"),
///     ("F3 FB 53 94", "Lily"),
/// ]).unwrap();
///
/// let uid = "E3 3C 5C 1C".parse().unwrap();
/// assert_eq!(directory.lookup(&uid), Some("Donovan"));
/// ```
#[derive(Debug, Clone)]
pub struct AuthorizationDirectory {
    entries: Vec<AuthorizationEntry>,
}

impl AuthorizationDirectory {
    /// Build a directory from (identifier, name) pairs.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateEntry` if two entries share an identifier:
    /// uniqueness is an invariant of the directory, not a best-match policy.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (CardUid, String)>,
    ) -> Result<Self> {
        let mut collected: Vec<AuthorizationEntry> = Vec::new();

        for (uid, name) in entries {
            if collected.iter().any(|entry| entry.uid == uid) {
                return Err(Error::DuplicateEntry {
                    uid: uid.canonical(),
                });
            }
            collected.push(AuthorizationEntry { uid, name });
        }

        debug!(entries = collected.len(), "Authorization directory built");
        Ok(Self { entries: collected })
    }

    /// Build a directory from a compiled-in table of canonical text entries.
    ///
    /// # Errors
    ///
    /// Returns an error if an identifier does not parse as canonical text or
    /// if two entries share an identifier.
    pub fn from_table(table: &[(&str, &str)]) -> Result<Self> {
        let mut entries = Vec::with_capacity(table.len());
        for (uid_text, name) in table {
            let uid: CardUid = uid_text.parse()?;
            entries.push((uid, (*name).to_string()));
        }
        Self::from_entries(entries)
    }

    /// Exact-match lookup; returns the paired name on a hit.
    ///
    /// Linear in directory size. At most one entry can match because
    /// identifiers are unique within the directory.
    #[must_use]
    pub fn lookup(&self, uid: &CardUid) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| &entry.uid == uid)
            .map(|entry| entry.name.as_str())
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the directory has no entries (every scan is denied).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
