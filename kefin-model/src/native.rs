//! The host application's fixed home-section slots.
//!
//! The web client stores its own home layout as `homesection0` through
//! `homesection9` in the user's display preferences, each holding one token
//! from a fixed vocabulary or `"none"`.

use std::collections::HashSet;
use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

pub const NATIVE_SLOT_COUNT: usize = 10;
pub const SLOT_KEY_PREFIX: &str = "homesection";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum NativeToken {
    #[default]
    None,
    SmallLibraryTiles,
    LibraryButtons,
    ActiveRecordings,
    Resume,
    ResumeAudio,
    ResumeBook,
    NextUp,
    LatestMedia,
    LiveTv,
}

impl NativeToken {
    /// Every token that can occupy a slot, in the host's default order.
    pub const ASSIGNABLE: [NativeToken; 9] = [
        NativeToken::SmallLibraryTiles,
        NativeToken::Resume,
        NativeToken::ResumeAudio,
        NativeToken::ResumeBook,
        NativeToken::LiveTv,
        NativeToken::NextUp,
        NativeToken::LatestMedia,
        NativeToken::LibraryButtons,
        NativeToken::ActiveRecordings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NativeToken::None => "none",
            NativeToken::SmallLibraryTiles => "smalllibrarytiles",
            NativeToken::LibraryButtons => "librarybuttons",
            NativeToken::ActiveRecordings => "activerecordings",
            NativeToken::Resume => "resume",
            NativeToken::ResumeAudio => "resumeaudio",
            NativeToken::ResumeBook => "resumebook",
            NativeToken::NextUp => "nextup",
            NativeToken::LatestMedia => "latestmedia",
            NativeToken::LiveTv => "livetv",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, NativeToken::None)
    }
}

impl Display for NativeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NativeToken {
    type Err = ModelError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let token = raw.trim().to_ascii_lowercase();
        std::iter::once(NativeToken::None)
            .chain(NativeToken::ASSIGNABLE)
            .find(|candidate| candidate.as_str() == token)
            .ok_or_else(|| ModelError::InvalidNativeToken(raw.to_string()))
    }
}

/// `homesection{index}`
pub fn slot_key(index: usize) -> String {
    format!("{SLOT_KEY_PREFIX}{index}")
}

/// Ordered slot assignments. A non-`none` token occupies at most one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NativeSlots([NativeToken; NATIVE_SLOT_COUNT]);

impl NativeSlots {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fills slots in order; repeated tokens after the first occurrence and
    /// tokens beyond the slot count are dropped.
    pub fn from_tokens<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = NativeToken>,
    {
        let mut slots = [NativeToken::None; NATIVE_SLOT_COUNT];
        let mut seen = HashSet::new();
        let mut next = 0;
        for token in tokens {
            if next == NATIVE_SLOT_COUNT {
                break;
            }
            if token.is_none() || !seen.insert(token) {
                continue;
            }
            slots[next] = token;
            next += 1;
        }
        Self(slots)
    }

    /// Reads raw per-slot values; missing or unknown values read as `none`
    /// and duplicates keep their first slot only.
    pub fn from_raw<F>(mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut slots = [NativeToken::None; NATIVE_SLOT_COUNT];
        let mut seen = HashSet::new();
        for (index, slot) in slots.iter_mut().enumerate() {
            let token = lookup(&slot_key(index))
                .and_then(|raw| raw.parse::<NativeToken>().ok())
                .unwrap_or_default();
            if !token.is_none() && seen.insert(token) {
                *slot = token;
            }
        }
        Self(slots)
    }

    pub fn get(&self, index: usize) -> Option<NativeToken> {
        self.0.get(index).copied()
    }

    pub fn tokens(&self) -> &[NativeToken; NATIVE_SLOT_COUNT] {
        &self.0
    }

    pub fn position(&self, token: NativeToken) -> Option<usize> {
        if token.is_none() {
            return None;
        }
        self.0.iter().position(|slot| *slot == token)
    }

    pub fn is_occupied(&self, token: NativeToken) -> bool {
        self.position(token).is_some()
    }

    pub fn occupied(&self) -> HashSet<NativeToken> {
        self.0.iter().copied().filter(|t| !t.is_none()).collect()
    }

    /// `(homesectionN, token)` pairs for every slot, `none` included.
    pub fn entries(&self) -> impl Iterator<Item = (String, &'static str)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(index, token)| (slot_key(index), token.as_str()))
    }
}
