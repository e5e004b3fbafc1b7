//! Native host sections and the custom ids that stand in for them.

use kefin_model::NativeToken;

use super::home::{
    CONTINUE_WATCHING, CONTINUE_WATCHING_NEXT_UP, NEXT_UP, RECENTLY_ADDED_PREFIX,
};

/// A native section as listed in the order editor. Its section id is the
/// token itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeSection {
    pub token: NativeToken,
    pub name: &'static str,
}

const NATIVE_SECTIONS: [NativeSection; 9] = [
    NativeSection {
        token: NativeToken::SmallLibraryTiles,
        name: "My Media",
    },
    NativeSection {
        token: NativeToken::Resume,
        name: "Continue Watching",
    },
    NativeSection {
        token: NativeToken::ResumeAudio,
        name: "Continue Listening",
    },
    NativeSection {
        token: NativeToken::ResumeBook,
        name: "Continue Reading",
    },
    NativeSection {
        token: NativeToken::LiveTv,
        name: "Live TV",
    },
    NativeSection {
        token: NativeToken::NextUp,
        name: "Next Up",
    },
    NativeSection {
        token: NativeToken::LatestMedia,
        name: "Recently Added Media",
    },
    NativeSection {
        token: NativeToken::LibraryButtons,
        name: "My Media (small)",
    },
    NativeSection {
        token: NativeToken::ActiveRecordings,
        name: "Active Recordings",
    },
];

/// Custom section ids that render the same content as a native token.
const NATIVE_EQUIVALENTS: [(&str, &[NativeToken]); 9] = [
    (CONTINUE_WATCHING, &[NativeToken::Resume]),
    (NEXT_UP, &[NativeToken::NextUp]),
    (
        CONTINUE_WATCHING_NEXT_UP,
        &[NativeToken::Resume, NativeToken::NextUp],
    ),
    ("my-media", &[NativeToken::SmallLibraryTiles]),
    ("library-buttons", &[NativeToken::LibraryButtons]),
    ("live-tv", &[NativeToken::LiveTv]),
    ("active-recordings", &[NativeToken::ActiveRecordings]),
    ("continue-listening", &[NativeToken::ResumeAudio]),
    ("continue-reading", &[NativeToken::ResumeBook]),
];

pub fn native_sections() -> &'static [NativeSection] {
    &NATIVE_SECTIONS
}

/// The native token a section id names directly, if any.
pub fn native_token_of(id: &str) -> Option<NativeToken> {
    let token = id.parse::<NativeToken>().ok()?;
    (!token.is_none()).then_some(token)
}

/// Tokens a non-native section supersedes. Empty for unrelated ids.
pub fn native_tokens_for(id: &str) -> &'static [NativeToken] {
    if let Some((_, tokens)) =
        NATIVE_EQUIVALENTS.iter().find(|(custom, _)| *custom == id)
    {
        return tokens;
    }
    if id.starts_with(RECENTLY_ADDED_PREFIX) {
        return &[NativeToken::LatestMedia];
    }
    &[]
}
