//! Host listing API
//!
//! The media center owns the UI. The plugin only describes entries and
//! tells the host when a directory is complete or a media URL is resolved.
//! `JsonLinesHost` serializes those calls as one JSON object per line for a
//! host bridge to consume; `RecordingHost` keeps them in memory.

use std::io::{self, Write};

use serde::Serialize;

/// Images shown for an entry
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Art {
    pub thumb: String,
    pub icon: String,
    pub fanart: String,
}

impl Art {
    /// Use one image for thumbnail, icon and fanart.
    pub fn single(image: &str) -> Self {
        Self {
            thumb: image.to_string(),
            icon: image.to_string(),
            fanart: image.to_string(),
        }
    }
}

/// Video info block attached to an entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoInfo {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    pub mediatype: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premiered: Option<String>,
}

impl VideoInfo {
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            plot: None,
            genre: None,
            mediatype: "video",
            premiered: None,
        }
    }
}

/// One navigable entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    pub label: String,
    /// Media path, set only on resolved playback items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub art: Art,
    pub info: VideoInfo,
    pub playable: bool,
    /// Pins the entry regardless of the directory's sort method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_sort: Option<SpecialSort>,
}

impl ListItem {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            path: None,
            art: Art::default(),
            info: VideoInfo::titled(label),
            playable: false,
            special_sort: None,
        }
    }

    /// Item handed back to the host to start playback of `path`.
    pub fn resolved(path: &str) -> Self {
        Self {
            path: Some(path.to_string()),
            playable: true,
            ..Self::new("")
        }
    }
}

/// Sort orders the host may offer for a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMethod {
    /// Alphabetical by label, ignoring a leading "The"
    LabelIgnoreThe,
}

/// Fixed position of an entry within a sorted directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialSort {
    Bottom,
}

/// Calls a plugin makes into the host during one invocation
pub trait Host {
    fn set_category(&mut self, category: &str) -> io::Result<()>;
    fn set_content(&mut self, content: &str) -> io::Result<()>;
    fn add_item(&mut self, url: &str, item: &ListItem, is_folder: bool) -> io::Result<()>;
    fn add_sort_method(&mut self, method: SortMethod) -> io::Result<()>;
    fn end_of_directory(&mut self, succeeded: bool) -> io::Result<()>;
    fn set_resolved_url(&mut self, succeeded: bool, item: &ListItem) -> io::Result<()>;
}

/// A host call, as recorded or serialized
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    SetCategory { category: String },
    SetContent { content: String },
    AddItem { url: String, item: ListItem, is_folder: bool },
    AddSortMethod { method: SortMethod },
    EndOfDirectory { succeeded: bool },
    SetResolvedUrl { succeeded: bool, item: ListItem },
}

/// Writes every host call as a JSON line tagged with the invocation handle
pub struct JsonLinesHost<W: Write> {
    out: W,
    handle: i32,
}

#[derive(Serialize)]
struct Line<'a> {
    handle: i32,
    #[serde(flatten)]
    event: &'a HostEvent,
}

impl<W: Write> JsonLinesHost<W> {
    pub fn new(out: W, handle: i32) -> Self {
        Self { out, handle }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, event: HostEvent) -> io::Result<()> {
        let line = Line {
            handle: self.handle,
            event: &event,
        };
        serde_json::to_writer(&mut self.out, &line)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

impl<W: Write> Host for JsonLinesHost<W> {
    fn set_category(&mut self, category: &str) -> io::Result<()> {
        self.emit(HostEvent::SetCategory {
            category: category.to_string(),
        })
    }

    fn set_content(&mut self, content: &str) -> io::Result<()> {
        self.emit(HostEvent::SetContent {
            content: content.to_string(),
        })
    }

    fn add_item(&mut self, url: &str, item: &ListItem, is_folder: bool) -> io::Result<()> {
        self.emit(HostEvent::AddItem {
            url: url.to_string(),
            item: item.clone(),
            is_folder,
        })
    }

    fn add_sort_method(&mut self, method: SortMethod) -> io::Result<()> {
        self.emit(HostEvent::AddSortMethod { method })
    }

    fn end_of_directory(&mut self, succeeded: bool) -> io::Result<()> {
        self.emit(HostEvent::EndOfDirectory { succeeded })
    }

    fn set_resolved_url(&mut self, succeeded: bool, item: &ListItem) -> io::Result<()> {
        self.emit(HostEvent::SetResolvedUrl {
            succeeded,
            item: item.clone(),
        })
    }
}

/// Keeps host calls in memory, in call order
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub events: Vec<HostEvent>,
}

impl RecordingHost {
    /// Items added so far, with their navigation URLs
    pub fn items(&self) -> Vec<(&str, &ListItem, bool)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                HostEvent::AddItem { url, item, is_folder } => Some((url.as_str(), item, *is_folder)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, matches: impl Fn(&HostEvent) -> bool) -> usize {
        self.events.iter().filter(|e| matches(e)).count()
    }
}

impl Host for RecordingHost {
    fn set_category(&mut self, category: &str) -> io::Result<()> {
        self.events.push(HostEvent::SetCategory {
            category: category.to_string(),
        });
        Ok(())
    }

    fn set_content(&mut self, content: &str) -> io::Result<()> {
        self.events.push(HostEvent::SetContent {
            content: content.to_string(),
        });
        Ok(())
    }

    fn add_item(&mut self, url: &str, item: &ListItem, is_folder: bool) -> io::Result<()> {
        self.events.push(HostEvent::AddItem {
            url: url.to_string(),
            item: item.clone(),
            is_folder,
        });
        Ok(())
    }

    fn add_sort_method(&mut self, method: SortMethod) -> io::Result<()> {
        self.events.push(HostEvent::AddSortMethod { method });
        Ok(())
    }

    fn end_of_directory(&mut self, succeeded: bool) -> io::Result<()> {
        self.events.push(HostEvent::EndOfDirectory { succeeded });
        Ok(())
    }

    fn set_resolved_url(&mut self, succeeded: bool, item: &ListItem) -> io::Result<()> {
        self.events.push(HostEvent::SetResolvedUrl {
            succeeded,
            item: item.clone(),
        });
        Ok(())
    }
}
