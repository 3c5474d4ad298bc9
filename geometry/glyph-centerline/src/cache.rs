//! Font sources and a per-font single-flight cache.

use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use hashbrown::HashMap;
use tracing::{debug, info, warn};

use crate::error::{FontError, FontResult};
use crate::font::FontOutlines;

/// Something that can produce decoded outlines for a font identifier.
///
/// Implementations may block (file or network I/O); the cache makes sure a
/// given identifier is loaded by at most one caller at a time.
pub trait FontSource: Send + Sync {
    /// Load the font named `font_id`.
    ///
    /// # Errors
    ///
    /// [`FontError::Unavailable`] when the source has no such font, or
    /// [`FontError::LoaderFailed`] when it exists but cannot be read.
    fn load(&self, font_id: &str) -> FontResult<FontOutlines>;
}

/// Fonts held in memory, for tests and embedded defaults.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFontSource {
    fonts: HashMap<String, FontOutlines>,
}

impl InMemoryFontSource {
    /// Empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a font under `font_id`.
    #[must_use]
    pub fn with_font(mut self, font_id: impl Into<String>, font: FontOutlines) -> Self {
        self.fonts.insert(font_id.into(), font);
        self
    }
}

impl FontSource for InMemoryFontSource {
    fn load(&self, font_id: &str) -> FontResult<FontOutlines> {
        self.fonts
            .get(font_id)
            .cloned()
            .ok_or_else(|| FontError::Unavailable {
                font_id: font_id.to_string(),
            })
    }
}

/// Loads `<dir>/<font_id>.json` files written in the [`FontOutlines`] format.
#[derive(Debug, Clone)]
pub struct JsonFontSource {
    dir: PathBuf,
}

impl JsonFontSource {
    /// Source reading from `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FontSource for JsonFontSource {
    fn load(&self, font_id: &str) -> FontResult<FontOutlines> {
        let unavailable = || FontError::Unavailable {
            font_id: font_id.to_string(),
        };
        // Identifiers name files directly inside the directory
        if font_id.is_empty() || font_id.contains(['/', '\\']) || font_id.starts_with('.') {
            return Err(unavailable());
        }

        let path = self.dir.join(format!("{font_id}.json"));
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Err(unavailable()),
            Err(err) => {
                return Err(FontError::LoaderFailed {
                    font_id: font_id.to_string(),
                    reason: err.to_string(),
                });
            }
        };
        FontOutlines::from_json(&text).map_err(|err| FontError::LoaderFailed {
            font_id: font_id.to_string(),
            reason: err.to_string(),
        })
    }
}

/// Where a font's load stands.
#[derive(Default)]
enum SlotState {
    #[default]
    Empty,
    /// A helper thread is still parsing; its result arrives here.
    Loading(mpsc::Receiver<FontResult<FontOutlines>>),
    Ready(Arc<FontOutlines>),
}

/// One font. The slot's own lock is held while loading, so callers asking
/// for the same font wait for the first load instead of repeating it. A
/// load that overruns the timeout stays in the slot and later callers keep
/// waiting on it.
#[derive(Default)]
struct Slot {
    state: Mutex<SlotState>,
}

impl Slot {
    fn is_ready(&self) -> bool {
        self.state
            .try_lock()
            .is_ok_and(|state| matches!(*state, SlotState::Ready(_)))
    }
}

/// Lazily populated cache of parsed fonts.
///
/// Each font identifier is parsed at most once concurrently: the first
/// caller loads while later callers for the same identifier wait on that
/// font's slot. Different fonts load in parallel. Failed loads are not
/// cached, so a later call tries again. Loaded fonts are never evicted.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use glyph_centerline::{FontCache, FontOutlines, InMemoryFontSource};
///
/// let source = InMemoryFontSource::new().with_font("sans", FontOutlines::new(1000.0));
/// let cache = FontCache::new(Arc::new(source));
///
/// let first = cache.get("sans").unwrap();
/// let again = cache.get("sans").unwrap();
/// assert!(Arc::ptr_eq(&first, &again));
/// assert!(cache.get("serif").is_err());
/// ```
pub struct FontCache {
    source: Arc<dyn FontSource>,
    slots: Mutex<HashMap<String, Arc<Slot>>>,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for FontCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontCache")
            .field("fonts", &self.loaded_count())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl FontCache {
    /// Cache over `source` with no load timeout.
    #[must_use]
    pub fn new(source: Arc<dyn FontSource>) -> Self {
        Self {
            source,
            slots: Mutex::new(HashMap::new()),
            timeout: None,
        }
    }

    /// Give up waiting on a load after `timeout`.
    ///
    /// The load runs on a helper thread; when it overruns, the caller gets
    /// [`FontError::Timeout`]. The load keeps running and the next call for
    /// the same font waits on it rather than starting another.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn slot(&self, font_id: &str) -> Arc<Slot> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(font_id.to_string()).or_default())
    }

    /// Outlines for `font_id`, loading them on first use.
    ///
    /// # Errors
    ///
    /// Whatever the source reports, or [`FontError::Timeout`] when a
    /// timeout is set and the load overruns it.
    pub fn get(&self, font_id: &str) -> FontResult<Arc<FontOutlines>> {
        let slot = self.slot(font_id);
        let mut state = slot.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let SlotState::Ready(cached) = &*state {
            return Ok(Arc::clone(cached));
        }

        let started = Instant::now();
        match self.load(font_id, &mut state) {
            Ok(loaded) => {
                let loaded = Arc::new(loaded);
                info!(
                    font_id,
                    glyphs = loaded.glyphs.len(),
                    elapsed = ?started.elapsed(),
                    "Loaded font outlines"
                );
                *state = SlotState::Ready(Arc::clone(&loaded));
                Ok(loaded)
            }
            Err(err) => {
                if matches!(*state, SlotState::Empty) {
                    self.forget(font_id, &slot);
                }
                Err(err)
            }
        }
    }

    /// Like [`Self::get`], falling back to `fallback_id` when `font_id`
    /// cannot be loaded.
    ///
    /// # Errors
    ///
    /// The fallback's error when both loads fail.
    pub fn get_or_fallback(
        &self,
        font_id: &str,
        fallback_id: &str,
    ) -> FontResult<Arc<FontOutlines>> {
        match self.get(font_id) {
            Ok(font) => Ok(font),
            Err(err) if font_id != fallback_id => {
                warn!(%err, fallback = fallback_id, "Font unavailable, using fallback");
                self.get(fallback_id)
            }
            Err(err) => Err(err),
        }
    }

    /// Whether `font_id` is already cached.
    #[must_use]
    pub fn contains(&self, font_id: &str) -> bool {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(font_id).is_some_and(|slot| slot.is_ready())
    }

    /// Number of fonts loaded so far.
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.values().filter(|slot| slot.is_ready()).count()
    }

    /// Drop the slot of a failed load unless another caller holds it.
    fn forget(&self, font_id: &str, slot: &Arc<Slot>) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        // One reference in the map, one here
        if slots.get(font_id).is_some_and(|held| Arc::ptr_eq(held, slot))
            && Arc::strong_count(slot) == 2
        {
            slots.remove(font_id);
        }
    }

    /// Run or resume the load for an unready slot. The slot is left
    /// `Loading` only while a timed-out load is still in flight.
    fn load(&self, font_id: &str, state: &mut SlotState) -> FontResult<FontOutlines> {
        let Some(timeout) = self.timeout else {
            return self.source.load(font_id);
        };

        let rx = if let SlotState::Loading(rx) = std::mem::take(state) {
            debug!(font_id, "Waiting on an earlier font load");
            rx
        } else {
            let (tx, rx) = mpsc::channel();
            let source = Arc::clone(&self.source);
            let id = font_id.to_string();
            thread::spawn(move || {
                // The receiver is gone when the slot was dropped
                let _ = tx.send(source.load(&id));
            });
            rx
        };

        match rx.recv_timeout(timeout) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                warn!(font_id, ?timeout, "Font load timed out");
                *state = SlotState::Loading(rx);
                Err(FontError::Timeout {
                    font_id: font_id.to_string(),
                    timeout,
                })
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                debug!(font_id, "Font loader thread exited without a result");
                Err(FontError::LoaderFailed {
                    font_id: font_id.to_string(),
                    reason: "loader thread panicked".to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts loads, tracks how many overlap, and sleeps inside each one.
    struct SlowSource {
        loads: AtomicUsize,
        active: AtomicUsize,
        peak: AtomicUsize,
        delay: Duration,
    }

    impl FontSource for SlowSource {
        fn load(&self, font_id: &str) -> FontResult<FontOutlines> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(active, Ordering::SeqCst);
            thread::sleep(self.delay);
            self.active.fetch_sub(1, Ordering::SeqCst);
            if font_id == "missing" {
                return Err(FontError::Unavailable {
                    font_id: font_id.to_string(),
                });
            }
            Ok(FontOutlines::new(1000.0))
        }
    }

    fn slow(delay_ms: u64) -> Arc<SlowSource> {
        Arc::new(SlowSource {
            loads: AtomicUsize::new(0),
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            delay: Duration::from_millis(delay_ms),
        })
    }

    fn slot_count(cache: &FontCache) -> usize {
        cache.slots.lock().unwrap().len()
    }

    #[test]
    fn concurrent_requests_load_once() {
        let source = slow(50);
        let cache = FontCache::new(source.clone());
        thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| cache.get("sans").unwrap());
            }
        });
        assert_eq!(source.loads.load(Ordering::SeqCst), 1);
        assert!(cache.contains("sans"));
        assert_eq!(cache.loaded_count(), 1);
    }

    #[test]
    fn different_fonts_load_separately() {
        let source = slow(1);
        let cache = FontCache::new(source.clone());
        cache.get("a").unwrap();
        cache.get("b").unwrap();
        cache.get("a").unwrap();
        assert_eq!(source.loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failures_are_not_cached() {
        let source = slow(1);
        let cache = FontCache::new(source.clone());
        assert!(matches!(
            cache.get("missing"),
            Err(FontError::Unavailable { .. })
        ));
        assert!(cache.get("missing").is_err());
        assert_eq!(source.loads.load(Ordering::SeqCst), 2);
        assert!(!cache.contains("missing"));
    }

    #[test]
    fn failed_fonts_leave_no_slot() {
        let cache = FontCache::new(slow(1));
        for id in ["missing", "missing", "missing"] {
            assert!(cache.get(id).is_err());
        }
        assert_eq!(slot_count(&cache), 0);

        cache.get("sans").unwrap();
        assert_eq!(slot_count(&cache), 1);

        let timed = FontCache::new(slow(1)).with_timeout(Duration::from_secs(5));
        assert!(timed.get("missing").is_err());
        assert_eq!(slot_count(&timed), 0);
    }

    #[test]
    fn slow_loads_time_out() {
        let cache = FontCache::new(slow(500)).with_timeout(Duration::from_millis(20));
        let err = cache.get("sans").unwrap_err();
        assert!(matches!(err, FontError::Timeout { .. }));
        assert_eq!(err.font_id(), "sans");
    }

    #[test]
    fn retries_after_timeout_wait_on_the_same_load() {
        let source = slow(300);
        let cache = FontCache::new(source.clone()).with_timeout(Duration::from_millis(20));
        for _ in 0..3 {
            assert!(matches!(
                cache.get("sans"),
                Err(FontError::Timeout { .. })
            ));
        }
        assert_eq!(source.peak.load(Ordering::SeqCst), 1);
        assert_eq!(source.loads.load(Ordering::SeqCst), 1);

        // The first load finishes and the next call picks it up
        thread::sleep(Duration::from_millis(400));
        cache.get("sans").unwrap();
        assert!(cache.contains("sans"));
        assert_eq!(source.loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn fallback_font() {
        let source = InMemoryFontSource::new().with_font("sans", FontOutlines::new(2048.0));
        let cache = FontCache::new(Arc::new(source));
        let font = cache.get_or_fallback("fancy", "sans").unwrap();
        assert!((font.units_per_em - 2048.0).abs() < f64::EPSILON);
        assert!(cache.get_or_fallback("fancy", "other").is_err());
    }

    #[test]
    fn json_source_reads_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("block.json"),
            r#"{"units_per_em": 1000, "glyphs": {"I": {"advance": 300}}}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("broken.json"), "not json").unwrap();

        let source = JsonFontSource::new(dir.path());
        assert_eq!(source.load("block").unwrap().glyphs.len(), 1);
        assert!(matches!(
            source.load("broken"),
            Err(FontError::LoaderFailed { .. })
        ));
        assert!(matches!(
            source.load("absent"),
            Err(FontError::Unavailable { .. })
        ));
        assert!(matches!(
            source.load("../block"),
            Err(FontError::Unavailable { .. })
        ));
    }
}
