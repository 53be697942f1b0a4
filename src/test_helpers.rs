//! Shared test utilities for the faviconize test suite.
//!
//! Provides fixture writers for source images and a hook recorder that
//! captures every lifecycle notification in firing order.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let hooks = RecordingHooks::new();
//! let request = GenerationRequest::new(src, out).hooks(hooks.hook_set());
//! generate_with_backend(&MockBackend::new(), &request).unwrap();
//!
//! assert_eq!(hooks.count("on_file_written"), 3);
//! assert_eq!(hooks.paths("on_skip_files"), Vec::<PathBuf>::new());
//! ```

use crate::hooks::{HookResult, HookSet};
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

// =========================================================================
// Fixture images
// =========================================================================

/// Write an opaque gradient PNG of the given dimensions.
pub fn write_test_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    });
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

/// Write a 64×64 SVG with a filled square covering the viewport.
/// Returns the SVG text.
pub fn write_test_svg(path: &Path) -> String {
    let svg = concat!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" viewBox="0 0 64 64">"##,
        r##"<rect width="64" height="64" fill="#336699"/>"##,
        "</svg>"
    )
    .to_string();
    std::fs::write(path, &svg).unwrap();
    svg
}

// =========================================================================
// Hook recording
// =========================================================================

type Event = (&'static str, Option<PathBuf>);

/// Records every hook call. Clones of the produced [`HookSet`] share the log.
#[derive(Clone, Default)]
pub struct RecordingHooks {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// A [`HookSet`] with every slot recording into this log.
    pub fn hook_set(&self) -> HookSet {
        let events = Arc::clone(&self.events);
        HookSet::new()
            .on_start(move || {
                events.lock().unwrap().push(("on_start", None));
                Ok(())
            })
            .on_skip_files(record_path(Arc::clone(&self.events), "on_skip_files"))
            .on_file_written(record_path(Arc::clone(&self.events), "on_file_written"))
            .on_html_written(record_path(Arc::clone(&self.events), "on_html_written"))
            .on_ico_copied(record_path(Arc::clone(&self.events), "on_ico_copied"))
    }

    /// All events in firing order.
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Number of calls to one hook.
    pub fn count(&self, hook: &str) -> usize {
        self.events().iter().filter(|(h, _)| *h == hook).count()
    }

    /// Number of calls across all hooks.
    pub fn total(&self) -> usize {
        self.events().len()
    }

    /// Paths passed to one hook, in firing order.
    pub fn paths(&self, hook: &str) -> Vec<PathBuf> {
        self.events()
            .into_iter()
            .filter(|(h, _)| *h == hook)
            .filter_map(|(_, p)| p)
            .collect()
    }
}

fn record_path(
    events: Arc<Mutex<Vec<Event>>>,
    name: &'static str,
) -> impl Fn(&Path) -> HookResult + Send + Sync + 'static {
    move |p| {
        events.lock().unwrap().push((name, Some(p.to_path_buf())));
        Ok(())
    }
}
