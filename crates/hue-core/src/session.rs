//! The session facade — one struct that wires palette, generator,
//! history, pins, likes, ticker, and presentation state into the
//! next/previous/like interaction model.
//!
//! Mutation rules, mirroring how the interactions compose:
//!
//! - **next** redoes forward history when there is any; otherwise it stops
//!   auto-cycling and generates a fresh combination.
//! - **previous** always stops auto-cycling, then undoes if possible.
//! - Every state change is synchronous; callers never observe a
//!   half-updated session.

use std::time::Instant;

use hue_color::contrast::{Threshold, Tier, classify};
use hue_color::{Color, ParseColorError};

use crate::combination::{Combination, PinMask, Role};
use crate::filter::Filter;
use crate::generate::{BackgroundMode, GenerateError, Generated, Generator};
use crate::history::History;
use crate::likes::{Likes, LikesStore, StoreError};
use crate::palette::Palette;
use crate::share::{self, DecodeError};
use crate::ticker::Ticker;

/// A palette-exploration session.
///
/// Generic over the likes-store collaborator so tests can plug in an
/// in-memory store and binaries a file-backed one.
pub struct Session<S: LikesStore> {
    palette: Palette,
    history: History,
    pins: PinMask,
    likes: Likes,
    ticker: Ticker,
    background: BackgroundMode,
    filter: Filter,
    threshold: Threshold,
    generator: Generator,
    store: S,
}

impl<S: LikesStore> Session<S> {
    /// A fresh session over the default palette, seeded from the clock.
    pub fn new(store: S) -> Self {
        Self::with_generator(store, Generator::from_entropy())
    }

    /// A session with an explicit generator (fixed seeds make every
    /// subsequent draw replayable).
    pub fn with_generator(store: S, generator: Generator) -> Self {
        Self {
            palette: Palette::new(),
            history: History::new(),
            pins: PinMask::default(),
            likes: Likes::new(),
            ticker: Ticker::new(),
            background: BackgroundMode::default(),
            filter: Filter::default(),
            threshold: Threshold::default(),
            generator,
            store,
        }
    }

    // ── Current combination ───────────────────────────────────────────

    /// The combination to display: history's present with the background
    /// mode override applied.
    #[must_use]
    pub fn current(&self) -> Option<Combination> {
        self.history
            .present()
            .map(|&present| self.background.apply(present))
    }

    /// Contrast tier of the current text/background pair.
    #[must_use]
    pub fn current_tier(&self) -> Option<Tier> {
        self.current()
            .map(|c| classify(hue_color::contrast::contrast_ratio(c.color, c.bg)))
    }

    /// Encode the current combination for sharing, if one exists.
    #[must_use]
    pub fn share(&self) -> Option<String> {
        self.current().map(|c| share::encode(&c))
    }

    /// Restore a previously shared combination into history.
    ///
    /// # Errors
    ///
    /// [`DecodeError`] when the query is missing keys or carries malformed
    /// colors; the session is unchanged and the caller should fall back to
    /// [`shuffle`](Self::shuffle).
    pub fn restore(&mut self, query: &str) -> Result<(), DecodeError> {
        let combination = share::decode(query)?;
        self.history.set(combination);
        Ok(())
    }

    // ── Generation and navigation ─────────────────────────────────────

    /// Generate a new combination and make it present.
    ///
    /// When the draw reproduces the present combination exactly (small
    /// palettes do this a lot), history is left untouched so undo isn't
    /// polluted with duplicates.
    ///
    /// # Errors
    ///
    /// [`GenerateError::EmptyPalette`] if the palette is empty.
    pub fn shuffle(&mut self) -> Result<Generated, GenerateError> {
        let generated = self.generator.generate(
            &self.palette,
            self.pins,
            self.history.present(),
            self.threshold,
        )?;
        if self.history.present() != Some(&generated.combination) {
            self.history.set(generated.combination);
        }
        Ok(generated)
    }

    /// Step forward: redo if forward history exists, otherwise stop
    /// auto-cycling and generate fresh.
    ///
    /// # Errors
    ///
    /// [`GenerateError::EmptyPalette`] if generation was needed and the
    /// palette is empty.
    pub fn next(&mut self) -> Result<(), GenerateError> {
        if self.history.redo() {
            return Ok(());
        }
        self.ticker.stop();
        self.shuffle().map(|_| ())
    }

    /// Step back. Stops auto-cycling. Returns whether anything was undone.
    pub fn previous(&mut self) -> bool {
        if self.history.can_undo() {
            self.ticker.stop();
            return self.history.undo();
        }
        false
    }

    /// Whether redo/undo would currently do anything.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// See [`can_redo`](Self::can_redo).
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Replace one role of the current combination with a user-supplied
    /// color. The result is a full new combination in history.
    ///
    /// No-op when nothing has been generated yet.
    ///
    /// # Errors
    ///
    /// [`ParseColorError`] if the input isn't a valid color; the session
    /// is unchanged.
    pub fn edit_role(&mut self, role: Role, input: &str) -> Result<(), ParseColorError> {
        let color = Color::parse(input)?;
        if let Some(&present) = self.history.present() {
            self.history.set(present.with_role(role, color));
        }
        Ok(())
    }

    // ── Pinning ───────────────────────────────────────────────────────

    /// Flip the pin on a role.
    pub const fn toggle_pin(&mut self, role: Role) {
        self.pins.toggle(role);
    }

    /// The current pin mask.
    #[must_use]
    pub const fn pins(&self) -> PinMask {
        self.pins
    }

    // ── Auto-cycling ──────────────────────────────────────────────────

    /// Start or stop auto-cycling, like a play/pause button.
    pub fn toggle_auto_cycle(&mut self, now: Instant) {
        if self.ticker.is_running() {
            self.ticker.stop();
        } else {
            self.ticker.start(now);
        }
    }

    /// Whether auto-cycling is active.
    #[must_use]
    pub const fn is_auto_cycling(&self) -> bool {
        self.ticker.is_running()
    }

    /// Drive the auto-cycle: generates a combination when a tick is due.
    ///
    /// # Errors
    ///
    /// [`GenerateError::EmptyPalette`] if a tick fired against an empty
    /// palette.
    pub fn tick(&mut self, now: Instant) -> Result<Option<Generated>, GenerateError> {
        if self.ticker.poll(now) {
            self.shuffle().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Time until the next auto-cycle tick, for event-loop scheduling.
    #[must_use]
    pub fn time_until_tick(&self, now: Instant) -> Option<std::time::Duration> {
        self.ticker.time_until_tick(now)
    }

    // ── Likes ─────────────────────────────────────────────────────────

    /// Save the current combination (as displayed, background override
    /// included). Duplicates are skipped.
    ///
    /// # Errors
    ///
    /// [`StoreError`] when persisting fails; the like is kept in memory.
    pub fn like(&mut self) -> Result<(), StoreError> {
        let Some(combination) = self.current() else {
            return Ok(());
        };
        self.likes.like(combination, &mut self.store)
    }

    /// Remove a saved combination by position.
    ///
    /// # Errors
    ///
    /// [`StoreError`] when persisting fails; the removal is kept in memory.
    pub fn unlike(&mut self, index: usize) -> Result<(), StoreError> {
        self.likes.remove_at(index, &mut self.store)
    }

    /// Bring a saved combination back as the present one.
    /// Returns `false` if the index is out of bounds.
    pub fn view_like(&mut self, index: usize) -> bool {
        if let Some(&combination) = self.likes.get(index) {
            self.history.set(combination);
            true
        } else {
            false
        }
    }

    /// Load saved likes from the store.
    ///
    /// # Errors
    ///
    /// [`StoreError`] when the store cannot be read.
    pub fn load_likes(&mut self) -> Result<(), StoreError> {
        self.likes.load(&self.store)
    }

    /// The saved combinations.
    #[must_use]
    pub fn likes(&self) -> &[Combination] {
        self.likes.entries()
    }

    // ── Palette edits ─────────────────────────────────────────────────

    /// Parse and append a new palette color.
    ///
    /// # Errors
    ///
    /// [`ParseColorError`] for invalid input; the palette is unchanged.
    pub fn add_color(&mut self, input: &str) -> Result<(), ParseColorError> {
        self.palette.add(Color::parse(input)?);
        Ok(())
    }

    /// Remove a palette color by position.
    ///
    /// Refuses to remove the last color (generation needs a non-empty
    /// palette) — returns `false` in that case or when out of bounds.
    pub fn remove_color(&mut self, index: usize) -> bool {
        if self.palette.len() <= 1 {
            return false;
        }
        self.palette.remove_at(index).is_some()
    }

    /// Parse and replace the palette color at `index`.
    ///
    /// # Errors
    ///
    /// [`ParseColorError`] for invalid input; the palette is unchanged.
    /// Out-of-bounds indexes are ignored.
    pub fn replace_color(&mut self, index: usize, input: &str) -> Result<(), ParseColorError> {
        let color = Color::parse(input)?;
        self.palette.replace_at(index, color);
        Ok(())
    }

    /// Reset the palette to its default baseline and generate from it.
    ///
    /// # Errors
    ///
    /// [`GenerateError`] is impossible here in practice (the baseline is
    /// non-empty) but propagated for uniformity.
    pub fn clear_palette(&mut self) -> Result<(), GenerateError> {
        self.palette.reset_to_default();
        self.shuffle().map(|_| ())
    }

    /// Replace the palette with an imported color sequence and generate
    /// from it. Empty imports are ignored (returns `Ok` with no change).
    ///
    /// # Errors
    ///
    /// [`GenerateError::EmptyPalette`] cannot occur for applied imports.
    pub fn import_palette(&mut self, colors: Vec<Color>) -> Result<(), GenerateError> {
        if self.palette.reset_to(colors) {
            self.shuffle().map(|_| ())?;
        }
        Ok(())
    }

    /// The candidate palette.
    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    // ── Presentation state ────────────────────────────────────────────

    /// Select how the page background role is displayed.
    pub const fn set_background_mode(&mut self, mode: BackgroundMode) {
        self.background = mode;
    }

    /// The active background mode.
    #[must_use]
    pub const fn background_mode(&self) -> BackgroundMode {
        self.background
    }

    /// Select the colorblindness filter the renderer should apply.
    pub const fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// The active colorblindness filter.
    #[must_use]
    pub const fn filter(&self) -> Filter {
        self.filter
    }

    /// Set the contrast threshold for subsequent generations.
    pub const fn set_threshold(&mut self, threshold: Threshold) {
        self.threshold = threshold;
    }

    /// The active contrast threshold.
    #[must_use]
    pub const fn threshold(&self) -> Threshold {
        self.threshold
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::likes::MemoryStore;

    fn session() -> Session<MemoryStore> {
        Session::with_generator(MemoryStore::new(), Generator::new(42))
    }

    /// Step forward until `current` actually changes (small palettes can
    /// redraw the present combination, which deliberately skips history).
    fn advance(s: &mut Session<MemoryStore>) {
        let before = s.current();
        loop {
            s.next().unwrap();
            if s.current() != before {
                return;
            }
        }
    }

    #[test]
    fn starts_with_nothing_displayed() {
        let s = session();
        assert_eq!(s.current(), None);
        assert_eq!(s.share(), None);
    }

    #[test]
    fn shuffle_establishes_present() {
        let mut s = session();
        s.shuffle().unwrap();
        assert!(s.current().is_some());
        assert!(!s.can_undo());
    }

    #[test]
    fn next_then_previous_walks_history() {
        let mut s = session();
        s.shuffle().unwrap();
        let first = s.current().unwrap();

        advance(&mut s);
        let second = s.current().unwrap();

        assert!(s.previous());
        assert_eq!(s.current(), Some(first));
        assert!(s.can_redo());

        // next prefers redo over fresh generation.
        s.next().unwrap();
        assert_eq!(s.current(), Some(second));
        assert!(!s.can_redo());
    }

    #[test]
    fn previous_with_no_past_reports_noop() {
        let mut s = session();
        s.shuffle().unwrap();
        assert!(!s.previous());
    }

    #[test]
    fn shuffle_skips_duplicate_history_entries() {
        let mut s = session();
        // Single-color palette: every draw is identical.
        s.import_palette(vec![Color::rgb(10, 10, 10)]).unwrap();
        assert!(s.current().is_some());
        s.shuffle().unwrap();
        s.shuffle().unwrap();
        assert!(!s.can_undo(), "duplicate draws must not pollute history");
    }

    #[test]
    fn restore_sets_decoded_combination() {
        let mut s = session();
        s.restore("bg=%23000000&borderColor=%23757575&color=%23ffffff&parentBg=%232c7cb0")
            .unwrap();
        let current = s.current().unwrap();
        assert_eq!(current.bg, Color::BLACK);
        assert_eq!(current.color, Color::WHITE);
    }

    #[test]
    fn restore_rejects_malformed_and_leaves_state() {
        let mut s = session();
        assert!(s.restore("bg=oops").is_err());
        assert_eq!(s.current(), None);
    }

    #[test]
    fn share_round_trips_current() {
        let mut s = session();
        s.shuffle().unwrap();
        let encoded = s.share().unwrap();

        let mut other = session();
        other.restore(&encoded).unwrap();
        assert_eq!(other.current(), s.current());
    }

    #[test]
    fn edit_role_pushes_new_combination() {
        let mut s = session();
        s.shuffle().unwrap();
        let before = s.current().unwrap();

        s.edit_role(Role::Color, "#123456").unwrap();
        let after = s.current().unwrap();
        assert_eq!(after.color, Color::rgb(0x12, 0x34, 0x56));
        assert_eq!(after.bg, before.bg);

        // The edit is one undo step.
        assert!(s.previous());
        assert_eq!(s.current(), Some(before));
    }

    #[test]
    fn edit_role_rejects_invalid_color() {
        let mut s = session();
        s.shuffle().unwrap();
        let before = s.current();
        assert!(s.edit_role(Role::Bg, "chartreuse").is_err());
        assert_eq!(s.current(), before);
    }

    #[test]
    fn pinned_role_survives_shuffle() {
        let mut s = session();
        s.shuffle().unwrap();
        let pinned_bg = s.current().unwrap().bg;

        s.toggle_pin(Role::Bg);
        for _ in 0..10 {
            s.shuffle().unwrap();
            assert_eq!(s.current().unwrap().bg, pinned_bg);
        }
    }

    #[test]
    fn auto_cycle_generates_on_schedule() {
        let now = Instant::now();
        let mut s = session();
        s.shuffle().unwrap();

        s.toggle_auto_cycle(now);
        assert!(s.is_auto_cycling());

        assert_eq!(s.tick(now + Duration::from_millis(100)).unwrap(), None);
        let generated = s.tick(now + Duration::from_millis(2000)).unwrap();
        assert!(generated.is_some());
    }

    #[test]
    fn manual_previous_stops_auto_cycle() {
        let now = Instant::now();
        let mut s = session();
        s.shuffle().unwrap();
        advance(&mut s);

        s.toggle_auto_cycle(now);
        assert!(s.is_auto_cycling());
        s.previous();
        assert!(!s.is_auto_cycling());
    }

    #[test]
    fn fresh_next_stops_auto_cycle_but_redo_does_not() {
        let now = Instant::now();
        let mut s = session();
        s.shuffle().unwrap();
        advance(&mut s);
        s.previous();

        s.toggle_auto_cycle(now);
        s.next().unwrap(); // redo path
        assert!(s.is_auto_cycling());

        s.next().unwrap(); // no forward history: fresh generation
        assert!(!s.is_auto_cycling());
    }

    #[test]
    fn like_saves_displayed_combination() {
        let mut s = session();
        s.shuffle().unwrap();
        s.set_background_mode(BackgroundMode::White);
        s.like().unwrap();

        assert_eq!(s.likes().len(), 1);
        assert_eq!(s.likes()[0].parent_bg, Color::WHITE);
    }

    #[test]
    fn like_twice_deduplicates() {
        let mut s = session();
        s.shuffle().unwrap();
        s.like().unwrap();
        s.like().unwrap();
        assert_eq!(s.likes().len(), 1);
    }

    #[test]
    fn view_like_restores_saved_combination() {
        let mut s = session();
        s.shuffle().unwrap();
        s.like().unwrap();
        let liked = s.likes()[0];

        s.next().unwrap();
        assert!(s.view_like(0));
        assert_eq!(s.current(), Some(liked));
        assert!(!s.view_like(5));
    }

    #[test]
    fn store_failure_surfaces_but_keeps_like() {
        let mut store = MemoryStore::new();
        store.fail_writes = Some("offline".to_string());
        let mut s = Session::with_generator(store, Generator::new(42));
        s.shuffle().unwrap();

        assert!(s.like().is_err());
        assert_eq!(s.likes().len(), 1);
    }

    #[test]
    fn cannot_remove_last_palette_color() {
        let mut s = session();
        s.import_palette(vec![Color::BLACK]).unwrap();
        assert!(!s.remove_color(0));
        assert_eq!(s.palette().len(), 1);
    }

    #[test]
    fn removing_palette_color_leaves_history_alone() {
        let mut s = session();
        s.shuffle().unwrap();
        let before = s.current().unwrap();

        while s.palette().len() > 1 {
            assert!(s.remove_color(0));
        }
        assert_eq!(s.current(), Some(before));
    }

    #[test]
    fn clear_palette_restores_baseline_and_generates() {
        let mut s = session();
        s.import_palette(vec![Color::rgb(5, 5, 5), Color::rgb(250, 250, 250)])
            .unwrap();
        s.clear_palette().unwrap();
        assert_eq!(s.palette().len(), 4);
        assert!(s.current().is_some());
    }

    #[test]
    fn empty_import_is_ignored() {
        let mut s = session();
        s.import_palette(Vec::new()).unwrap();
        assert_eq!(s.palette().len(), 4);
        assert_eq!(s.current(), None);
    }

    #[test]
    fn threshold_and_filter_selection() {
        let mut s = session();
        s.set_threshold(Threshold::Aaa);
        assert_eq!(s.threshold(), Threshold::Aaa);
        s.set_filter(Filter::Tritanopia);
        assert_eq!(s.filter(), Filter::Tritanopia);
    }

    #[test]
    fn empty_palette_generation_is_impossible_through_session() {
        let mut s = session();
        // The guards stop the palette from ever reaching zero colors.
        for _ in 0..10 {
            s.remove_color(0);
        }
        assert_eq!(s.palette().len(), 1);
        assert!(s.shuffle().is_ok());
    }
}
