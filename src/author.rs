// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Author identities.
//!
//! Hosts identify authors however they like (user names, account ids,
//! public keys). Tracked changes only ever compare authors for equality, so
//! the tracker works with a compact opaque token and leaves the mapping back
//! to host identities to an `AuthorTable`.

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// An opaque author token. Two changes belong to the same author exactly
/// when their tokens are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AuthorId(u16);

impl AuthorId {
    /// Create a token from a raw value, for hosts that manage their own
    /// numbering.
    pub const fn new(raw: u16) -> AuthorId {
        return AuthorId(raw);
    }

    pub const fn raw(self) -> u16 {
        return self.0;
    }
}

/// Hands out `AuthorId`s for host identities and maps them back when
/// changes are rendered.
#[derive(Clone, Debug)]
pub struct AuthorTable<U: Clone + Eq + Hash> {
    ids: FxHashMap<U, AuthorId>,
    authors: Vec<U>,
}

impl<U: Clone + Eq + Hash> Default for AuthorTable<U> {
    fn default() -> Self {
        return Self::new();
    }
}

impl<U: Clone + Eq + Hash> AuthorTable<U> {
    pub fn new() -> AuthorTable<U> {
        return AuthorTable {
            ids: FxHashMap::default(),
            authors: Vec::new(),
        };
    }

    /// The token for `author`, numbered in order of first appearance.
    ///
    /// Panics once every `u16` token is taken.
    pub fn intern(&mut self, author: U) -> AuthorId {
        if let Some(&id) = self.ids.get(&author) {
            return id;
        }
        let Ok(raw) = u16::try_from(self.authors.len()) else {
            panic!("author table is full");
        };
        let id = AuthorId(raw);
        self.ids.insert(author.clone(), id);
        self.authors.push(author);
        return id;
    }

    /// The host identity behind a token, if this table handed it out.
    pub fn resolve(&self, id: AuthorId) -> Option<&U> {
        return self.authors.get(id.0 as usize);
    }
}
