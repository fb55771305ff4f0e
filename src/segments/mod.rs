//! segments
//!
//! Turns a snapshot into an ordered sequence of display fragments.
//!
//! This is the boundary with the host rendering protocol: a [`Fragment`]
//! carries text plus classification tags, and the host decides what a tag
//! like `git_ahead` looks like on screen. No colors or escape sequences are
//! produced here.
//!
//! Fragment order is fixed: branch (or a no-commits marker), ahead, behind,
//! conflict, stash, modified, staged, then one fragment per tag. Zero-valued
//! counters emit nothing.

use std::collections::HashMap;

use serde::Serialize;

use crate::status::Snapshot;

/// Marker shown in place of a branch when history is unborn.
const NO_COMMITS: &str = "[no-commits]";

/// Abbreviation length for a detached head commit.
const SHORT_OID: usize = 7;

/// The glyphs used for each logical icon.
///
/// Defaults match the built-in set; hosts override individual glyphs by
/// logical name via [`IconSet::with_overrides`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSet {
    pub branch: String,
    pub ahead: String,
    pub behind: String,
    pub staged: String,
    pub modified: String,
    pub stashed: String,
    pub conflict: String,
    pub tag: String,
}

impl Default for IconSet {
    fn default() -> Self {
        Self {
            branch: "\u{e0a0}".to_string(),
            ahead: "↑".to_string(),
            behind: "↓".to_string(),
            staged: "●".to_string(),
            modified: "✚".to_string(),
            stashed: "⚑".to_string(),
            conflict: "✖".to_string(),
            tag: "★".to_string(),
        }
    }
}

impl IconSet {
    /// Build an icon set from the defaults plus per-name overrides.
    ///
    /// Recognized names: `branch`, `ahead`, `behind`, `staged`, `modified`,
    /// `stashed`, `conflict`, `tag`. Unrecognized names are ignored.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut icons = Self::default();
        for (name, glyph) in overrides {
            match name.as_str() {
                "branch" => icons.branch = glyph.clone(),
                "ahead" => icons.ahead = glyph.clone(),
                "behind" => icons.behind = glyph.clone(),
                "staged" => icons.staged = glyph.clone(),
                "modified" => icons.modified = glyph.clone(),
                "stashed" => icons.stashed = glyph.clone(),
                "conflict" => icons.conflict = glyph.clone(),
                "tag" => icons.tag = glyph.clone(),
                _ => {}
            }
        }
        icons
    }
}

/// One display fragment: text plus classification tags.
///
/// Tags are ordered most-specific first; the host picks the first one it has
/// a style for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment {
    pub text: String,
    pub groups: Vec<&'static str>,
}

impl Fragment {
    fn new(text: String, groups: Vec<&'static str>) -> Self {
        Self { text, groups }
    }
}

/// Build the ordered fragment list for a snapshot.
pub fn build(snapshot: &Snapshot, icons: &IconSet) -> Vec<Fragment> {
    let mut fragments = Vec::new();

    fragments.push(head_fragment(snapshot, icons));

    let counters: [(usize, &str, &'static str); 6] = [
        (snapshot.ahead, icons.ahead.as_str(), "git_ahead"),
        (snapshot.behind, icons.behind.as_str(), "git_behind"),
        (snapshot.conflicts, icons.conflict.as_str(), "git_conflict"),
        (snapshot.stashes, icons.stashed.as_str(), "git_stashed"),
        (snapshot.modified, icons.modified.as_str(), "git_modified"),
        (snapshot.staged, icons.staged.as_str(), "git_staged"),
    ];
    for (count, icon, group) in counters {
        if count > 0 {
            fragments.push(Fragment::new(format!("{icon} {count}"), vec![group, "git"]));
        }
    }

    for tag in &snapshot.tags {
        fragments.push(Fragment::new(
            format!("{} {}", icons.tag, tag),
            vec!["git_tag", "git"],
        ));
    }

    fragments
}

/// The leading fragment: branch name, detached head, or no-commits marker.
fn head_fragment(snapshot: &Snapshot, icons: &IconSet) -> Fragment {
    let head = match &snapshot.head {
        Some(head) => head,
        None => return Fragment::new(NO_COMMITS.to_string(), vec!["git_head_detached", "git"]),
    };

    let (label, group) = match &snapshot.branch {
        Some(name) if snapshot.is_dirty() => (name.clone(), "git_head_dirty"),
        Some(name) => (name.clone(), "git_head_clean"),
        None => (head.short(SHORT_OID).to_string(), "git_head_detached"),
    };

    Fragment::new(
        format!("{} {}", icons.branch, label),
        vec![group, "git_branch", "git"],
    )
}
