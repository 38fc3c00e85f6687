//! Workload profiles and utilities for benchmarking `brisk-arena`.
//!
//! The reference workload is a window-list refresh: enumerate the desktop's
//! top-level windows into an arena, sort them for display, then reset the
//! arena and rebuild the list on the next refresh.
//!
//! - [`simulated_desktop`]: deterministic window set for a given seed
//! - [`WindowList::enumerate`]: one enumeration pass into an arena
//! - [`refresh_profile`]: arena config sized like the desktop tool's

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use brisk_arena::{Arena, ArenaArray, ArenaConfig, ArenaError};
use bytemuck::{Pod, Zeroable};

/// A top-level window as reported by the platform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DesktopWindow {
    /// Opaque platform handle.
    pub handle: u64,
    /// Window title; may be empty.
    pub title: String,
    /// Whether the window is currently visible.
    pub visible: bool,
}

/// One entry of a [`WindowList`], stored inside the arena.
///
/// The title lives in the list's title pool at `title_start..title_start + title_len`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct WindowRecord {
    /// Opaque platform handle.
    pub handle: u64,
    /// Byte offset of the title in the title pool.
    pub title_start: u32,
    /// Title length in bytes.
    pub title_len: u32,
    /// Lowercased first character of the title; the display order key.
    pub sort_key: u32,
    _pad: u32,
}

/// Visible, titled windows from one enumeration pass.
///
/// Both arrays live in the arena passed to [`WindowList::enumerate`] and go
/// stale when it is reset.
#[derive(Debug, Default)]
pub struct WindowList {
    records: ArenaArray<WindowRecord>,
    titles: ArenaArray<u8>,
}

impl WindowList {
    /// Collect every visible window with a non-empty title, sorted by the
    /// lowercased first character of its title.
    pub fn enumerate(arena: &mut Arena, windows: &[DesktopWindow]) -> Result<Self, ArenaError> {
        let mut list = Self::default();
        for window in windows {
            if !window.visible || window.title.is_empty() {
                continue;
            }
            let sort_key = window
                .title
                .chars()
                .next()
                .and_then(|c| c.to_lowercase().next())
                .map_or(0, u32::from);
            let record = WindowRecord {
                handle: window.handle,
                title_start: list.titles.len() as u32,
                title_len: window.title.len() as u32,
                sort_key,
                _pad: 0,
            };
            list.titles.extend_from_slice(window.title.as_bytes(), arena)?;
            list.records.push(record, arena)?;
        }

        list.records
            .as_mut_slice(arena)?
            .sort_by_key(|record| record.sort_key);
        Ok(list)
    }

    /// Number of windows in the list.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The record at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds or the arena was reset.
    pub fn record<'a>(&self, arena: &'a Arena, index: usize) -> &'a WindowRecord {
        self.records.at(arena, index)
    }

    /// Title bytes of the record at `index`.
    pub fn title<'a>(&self, arena: &'a Arena, index: usize) -> Result<&'a [u8], ArenaError> {
        let record = self.record(arena, index);
        let start = record.title_start as usize;
        let end = start + record.title_len as usize;
        Ok(&self.titles.as_slice(arena)?[start..end])
    }
}

/// Deterministic desktop of `count` windows for the given seed.
///
/// Roughly one window in five is hidden and one in seven is untitled, so
/// enumeration exercises its filters.
pub fn simulated_desktop(count: usize, seed: u64) -> Vec<DesktopWindow> {
    const APPS: [&str; 8] = [
        "Notepad",
        "terminal",
        "Game Launcher",
        "browser",
        "Settings",
        "zed",
        "Media Player",
        "calculator",
    ];
    let mut state = seed | 1;
    (0..count)
        .map(|i| {
            // xorshift64
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let app = APPS[(state % APPS.len() as u64) as usize];
            let title = if i % 7 == 3 {
                String::new()
            } else {
                format!("{app} - {}", state % 1000)
            };
            DesktopWindow {
                handle: 0x1000 + i as u64,
                title,
                visible: i % 5 != 4,
            }
        })
        .collect()
}

/// Arena config used by the desktop tool: 8 MiB, default alignment.
pub fn refresh_profile() -> ArenaConfig {
    ArenaConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_desktop_is_deterministic() {
        assert_eq!(simulated_desktop(50, 7), simulated_desktop(50, 7));
        assert_ne!(simulated_desktop(50, 7), simulated_desktop(50, 8));
    }

    #[test]
    fn enumerate_filters_hidden_and_untitled() {
        let windows = simulated_desktop(100, 42);
        let expected = windows
            .iter()
            .filter(|w| w.visible && !w.title.is_empty())
            .count();
        let mut arena = Arena::with_config(refresh_profile()).unwrap();
        let list = WindowList::enumerate(&mut arena, &windows).unwrap();
        assert_eq!(list.len(), expected);
    }

    #[test]
    fn enumerate_sorts_by_case_folded_first_letter() {
        let windows = simulated_desktop(200, 3);
        let mut arena = Arena::new(64 * 1024);
        let list = WindowList::enumerate(&mut arena, &windows).unwrap();
        let firsts: Vec<u8> = (0..list.len())
            .map(|i| list.title(&arena, i).unwrap()[0].to_ascii_lowercase())
            .collect();
        assert!(firsts.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn titles_resolve_to_source_text() {
        let windows = vec![
            DesktopWindow {
                handle: 1,
                title: "beta".into(),
                visible: true,
            },
            DesktopWindow {
                handle: 2,
                title: "Alpha".into(),
                visible: true,
            },
        ];
        let mut arena = Arena::new(1024);
        let list = WindowList::enumerate(&mut arena, &windows).unwrap();
        assert_eq!(list.record(&arena, 0).handle, 2);
        assert_eq!(list.title(&arena, 0).unwrap(), b"Alpha");
        assert_eq!(list.title(&arena, 1).unwrap(), b"beta");
    }

    #[test]
    fn enumerate_reports_exhaustion() {
        let windows = simulated_desktop(100, 1);
        let mut arena = Arena::new(64);
        let result = WindowList::enumerate(&mut arena, &windows);
        assert!(matches!(result, Err(ArenaError::CapacityExceeded { .. })));
    }
}
