//! Accessibility state coordinator.
//!
//! Owns the content document, the settings value, and the store handle, and
//! maps every settings mutation to its document-level side effects. Side
//! effects run strictly after the settings value has been mutated and
//! persisted; subscribers are notified last.

use crate::domain::document::{Document, NodeId};
use crate::domain::settings::{AccessibilitySettings, FontSize};
use crate::infrastructure::storage::KeyValueStore;
use crate::services::bionic;

/// Style property overridden while reduced motion is active.
const MOTION_DURATION_PROP: &str = "--motion-duration";
const MOTION_DURATION_OFF: &str = "0.01ms";

/// A single changed preference field, as sent by the trigger UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingChange {
    FontSize(FontSize),
    HighContrast(bool),
    ReducedMotion(bool),
    BionicReading(bool),
    HighlightLinks(bool),
}

/// Callback invoked with the settings value after every mutation.
pub type Subscriber = Box<dyn Fn(&AccessibilitySettings)>;

pub struct AccessibilityState {
    document: Document,
    settings: AccessibilitySettings,
    store: Box<dyn KeyValueStore>,
    subscribers: Vec<Subscriber>,
}

impl AccessibilityState {
    /// Load persisted settings and apply them to `document`, so a
    /// transformed state from a prior session is rebuilt from scratch.
    pub fn new(document: Document, store: Box<dyn KeyValueStore>) -> Self {
        let settings = AccessibilitySettings::load(store.as_ref());
        let mut state = Self {
            document,
            settings,
            store,
            subscribers: Vec::new(),
        };
        state.apply_settings();
        state
    }

    pub fn settings(&self) -> &AccessibilitySettings {
        &self.settings
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Register a callback invoked after every settings mutation.
    pub fn subscribe(&mut self, subscriber: impl Fn(&AccessibilitySettings) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Update entry point for the trigger UI: mutate one field, persist,
    /// apply side effects, notify.
    pub fn update(&mut self, change: SettingChange) {
        match change {
            SettingChange::FontSize(size) => self.settings.font_size = size,
            SettingChange::HighContrast(on) => self.settings.high_contrast = on,
            SettingChange::ReducedMotion(on) => self.settings.reduced_motion = on,
            SettingChange::BionicReading(on) => self.settings.bionic_reading = on,
            SettingChange::HighlightLinks(on) => self.settings.highlight_links = on,
        }
        self.settings.save(self.store.as_mut());
        self.apply_settings();
        self.notify();
    }

    /// Reset every preference to its default and leave the tree
    /// byte-identical to its original state.
    pub fn reset_all(&mut self) {
        // Restore first so no marker survives regardless of current state.
        let root = self.document.root();
        bionic::restore(&mut self.document, root);

        self.settings = AccessibilitySettings::default();
        self.settings.save(self.store.as_mut());
        self.apply_settings();
        self.notify();
    }

    /// Deterministic mapping from the settings value to document-level side
    /// effects. Safe to call repeatedly with unchanged values.
    fn apply_settings(&mut self) {
        let root: NodeId = self.document.root();

        // Exactly one font-size class.
        for size in FontSize::all() {
            self.document.remove_class(root, size.css_class());
        }
        self.document.add_class(root, self.settings.font_size.css_class());

        self.document
            .toggle_class(root, "high-contrast", self.settings.high_contrast);
        self.document
            .toggle_class(root, "bionic-reading", self.settings.bionic_reading);
        self.document
            .toggle_class(root, "highlight-links", self.settings.highlight_links);
        self.document
            .toggle_class(root, "reduce-motion", self.settings.reduced_motion);

        if self.settings.reduced_motion {
            self.document
                .set_style_property(root, MOTION_DURATION_PROP, MOTION_DURATION_OFF);
        } else {
            self.document.remove_style_property(root, MOTION_DURATION_PROP);
        }

        if self.settings.bionic_reading {
            bionic::apply(&mut self.document, root);
        } else {
            bionic::restore(&mut self.document, root);
        }
    }

    fn notify(&self) {
        for subscriber in &self.subscribers {
            subscriber(&self.settings);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::settings::STORAGE_KEY;
    use crate::infrastructure::storage::{FileStore, MemoryStore};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn sample_document() -> Document {
        let mut doc = Document::new();
        let root = doc.root();
        let main = doc.create_element("main");
        let p = doc.create_element("p");
        let text = doc.create_text("ease of reading");
        doc.append_child(root, main);
        doc.append_child(main, p);
        doc.append_child(p, text);

        let nav = doc.create_element("nav");
        let nav_text = doc.create_text("About us");
        doc.append_child(root, nav);
        doc.append_child(nav, nav_text);
        doc
    }

    #[test]
    fn test_new_with_empty_store_applies_defaults() {
        let state = AccessibilityState::new(sample_document(), Box::new(MemoryStore::new()));
        let doc = state.document();
        let root = doc.root();

        assert_eq!(*state.settings(), AccessibilitySettings::default());
        assert!(doc.has_class(root, "font-size-medium"));
        assert!(!doc.has_class(root, "high-contrast"));
        assert_eq!(bionic::marker_count(doc, root), 0);
    }

    #[test]
    fn test_font_size_classes_are_mutually_exclusive() {
        let mut state = AccessibilityState::new(sample_document(), Box::new(MemoryStore::new()));
        state.update(SettingChange::FontSize(FontSize::Large));

        let doc = state.document();
        let root = doc.root();
        assert!(doc.has_class(root, "font-size-large"));
        assert!(!doc.has_class(root, "font-size-medium"));
        assert!(!doc.has_class(root, "font-size-small"));

        state.update(SettingChange::FontSize(FontSize::Small));
        let doc = state.document();
        assert!(doc.has_class(root, "font-size-small"));
        assert!(!doc.has_class(root, "font-size-large"));
    }

    #[test]
    fn test_bionic_toggle_engages_and_disengages_engine() {
        let mut state = AccessibilityState::new(sample_document(), Box::new(MemoryStore::new()));
        let root = state.document().root();

        state.update(SettingChange::BionicReading(true));
        assert!(state.document().has_class(root, "bionic-reading"));
        assert!(bionic::marker_count(state.document(), root) > 0);
        assert_eq!(state.document().text_content(root), "ease of readingAbout us");

        state.update(SettingChange::BionicReading(false));
        assert!(!state.document().has_class(root, "bionic-reading"));
        assert_eq!(bionic::marker_count(state.document(), root), 0);
        assert_eq!(state.document().text_content(root), "ease of readingAbout us");
    }

    #[test]
    fn test_update_with_unchanged_value_is_harmless() {
        let mut state = AccessibilityState::new(sample_document(), Box::new(MemoryStore::new()));
        state.update(SettingChange::BionicReading(true));
        let markers = bionic::marker_count(state.document(), state.document().root());

        state.update(SettingChange::BionicReading(true));
        assert_eq!(
            bionic::marker_count(state.document(), state.document().root()),
            markers
        );
    }

    #[test]
    fn test_reduced_motion_overrides_motion_duration() {
        let mut state = AccessibilityState::new(sample_document(), Box::new(MemoryStore::new()));
        let root = state.document().root();

        state.update(SettingChange::ReducedMotion(true));
        assert!(state.document().has_class(root, "reduce-motion"));
        assert_eq!(
            state.document().style_property(root, "--motion-duration"),
            Some("0.01ms")
        );

        state.update(SettingChange::ReducedMotion(false));
        assert!(!state.document().has_class(root, "reduce-motion"));
        assert_eq!(state.document().style_property(root, "--motion-duration"), None);
    }

    #[test]
    fn test_reset_all_clears_markers_and_restores_defaults() {
        let mut state = AccessibilityState::new(sample_document(), Box::new(MemoryStore::new()));
        state.update(SettingChange::BionicReading(true));
        state.update(SettingChange::HighContrast(true));
        state.update(SettingChange::FontSize(FontSize::Large));

        state.reset_all();

        let doc = state.document();
        let root = doc.root();
        assert_eq!(*state.settings(), AccessibilitySettings::default());
        assert_eq!(bionic::marker_count(doc, root), 0);
        assert!(doc.has_class(root, "font-size-medium"));
        assert!(!doc.has_class(root, "high-contrast"));
        assert_eq!(doc.text_content(root), "ease of readingAbout us");
    }

    #[test]
    fn test_subscribers_notified_on_update_and_reset() {
        let seen: Rc<RefCell<Vec<AccessibilitySettings>>> = Rc::default();
        let mut state = AccessibilityState::new(sample_document(), Box::new(MemoryStore::new()));

        let sink = Rc::clone(&seen);
        state.subscribe(move |settings| sink.borrow_mut().push(settings.clone()));

        state.update(SettingChange::HighContrast(true));
        state.reset_all();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].high_contrast);
        assert!(!seen[1].high_contrast);
    }

    #[test]
    fn test_persisted_bionic_preference_rebuilds_transform_on_startup() {
        let tmp = tempfile::tempdir().unwrap();

        let mut state = AccessibilityState::new(
            sample_document(),
            Box::new(FileStore::with_dir(tmp.path().to_path_buf())),
        );
        state.update(SettingChange::BionicReading(true));
        drop(state);

        // A fresh document starts Clean; the persisted preference re-runs
        // the transform during initialization.
        let state = AccessibilityState::new(
            sample_document(),
            Box::new(FileStore::with_dir(tmp.path().to_path_buf())),
        );
        assert!(state.settings().bionic_reading);
        assert!(bionic::marker_count(state.document(), state.document().root()) > 0);
    }

    #[test]
    fn test_update_persists_through_store() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = AccessibilityState::new(
            sample_document(),
            Box::new(FileStore::with_dir(tmp.path().to_path_buf())),
        );
        state.update(SettingChange::HighlightLinks(true));
        drop(state);

        let store = FileStore::with_dir(tmp.path().to_path_buf());
        let raw = store.get(STORAGE_KEY).unwrap();
        assert!(raw.contains("\"highlightLinks\":true"));
    }
}
