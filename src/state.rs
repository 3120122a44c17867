//! View state: the single source of truth for what the reader shows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::notify::{Notifier, Subscription};
use crate::zoom::Zoom;

/// Whether the reader shows the scanned page image or its extracted text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Image,
    Text,
}

impl ViewMode {
    /// The persisted spelling (`"image"` / `"text"`).
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Image => "image",
            ViewMode::Text => "text",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Image => ViewMode::Text,
            ViewMode::Text => ViewMode::Image,
        }
    }
}

impl FromStr for ViewMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "image" => Ok(ViewMode::Image),
            "text" => Ok(ViewMode::Text),
            other => Err(Error::UnknownView(other.to_string())),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observable fields of [`ViewState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    CurrentPage,
    View,
    Zoom,
    MenuOpen,
    TocOpen,
}

/// A value for one [`Field`]; the variant names the field it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    CurrentPage(u32),
    View(ViewMode),
    Zoom(Zoom),
    MenuOpen(bool),
    TocOpen(bool),
}

impl Value {
    pub fn field(&self) -> Field {
        match self {
            Value::CurrentPage(_) => Field::CurrentPage,
            Value::View(_) => Field::View,
            Value::Zoom(_) => Field::Zoom,
            Value::MenuOpen(_) => Field::MenuOpen,
            Value::TocOpen(_) => Field::TocOpen,
        }
    }
}

/// Current page, view mode, zoom and panel flags, with change notification.
///
/// Invariant: `1 <= current_page <= total_pages`. Every successful [`set`]
/// notifies the listeners of that field, even when the value is unchanged.
///
/// [`set`]: ViewState::set
#[derive(Debug)]
pub struct ViewState {
    current_page: u32,
    total_pages: u32,
    view: ViewMode,
    zoom: Zoom,
    menu_open: bool,
    toc_open: bool,
    notifier: Notifier<Field, Value>,
}

impl ViewState {
    /// Fresh state on page 1. A page count of zero is treated as one.
    pub fn new(total_pages: u32) -> Self {
        Self {
            current_page: 1,
            total_pages: total_pages.max(1),
            view: ViewMode::default(),
            zoom: Zoom::default(),
            menu_open: false,
            toc_open: false,
            notifier: Notifier::new(),
        }
    }

    /// Seed view mode and zoom, typically from stored preferences.
    pub fn with_preferences(mut self, view: ViewMode, zoom: Zoom) -> Self {
        self.view = view;
        self.zoom = zoom;
        self
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toc_open(&self) -> bool {
        self.toc_open
    }

    /// True when `page` is a valid target for this session.
    pub fn contains(&self, page: u32) -> bool {
        (1..=self.total_pages).contains(&page)
    }

    pub fn get(&self, field: Field) -> Value {
        match field {
            Field::CurrentPage => Value::CurrentPage(self.current_page),
            Field::View => Value::View(self.view),
            Field::Zoom => Value::Zoom(self.zoom),
            Field::MenuOpen => Value::MenuOpen(self.menu_open),
            Field::TocOpen => Value::TocOpen(self.toc_open),
        }
    }

    /// Store `value` and notify that field's listeners.
    ///
    /// A page outside `1..=total_pages` is rejected without notifying.
    pub fn set(&mut self, value: Value) -> Result<()> {
        match value {
            Value::CurrentPage(page) => {
                if !self.contains(page) {
                    return Err(Error::PageOutOfRange {
                        page,
                        total: self.total_pages,
                    });
                }
                self.current_page = page;
            }
            Value::View(view) => self.view = view,
            Value::Zoom(zoom) => self.zoom = zoom,
            Value::MenuOpen(open) => self.menu_open = open,
            Value::TocOpen(open) => self.toc_open = open,
        }

        self.notifier.notify(&value.field(), &value);
        Ok(())
    }

    pub fn subscribe(&self, field: Field, callback: impl Fn(&Value) + 'static) -> Subscription {
        self.notifier.subscribe(field, callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_defaults() {
        let state = ViewState::new(1313);
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.total_pages(), 1313);
        assert_eq!(state.view(), ViewMode::Image);
        assert_eq!(state.zoom(), Zoom::DEFAULT);
        assert!(!state.menu_open());
        assert!(!state.toc_open());
    }

    #[test]
    fn test_zero_pages_clamps_to_one() {
        let state = ViewState::new(0);
        assert_eq!(state.total_pages(), 1);
        assert!(state.contains(1));
        assert!(!state.contains(0));
    }

    #[test]
    fn test_get_reflects_set() {
        let mut state = ViewState::new(10);
        state.set(Value::CurrentPage(4)).unwrap();
        state.set(Value::View(ViewMode::Text)).unwrap();
        state.set(Value::MenuOpen(true)).unwrap();

        assert_eq!(state.get(Field::CurrentPage), Value::CurrentPage(4));
        assert_eq!(state.get(Field::View), Value::View(ViewMode::Text));
        assert_eq!(state.get(Field::MenuOpen), Value::MenuOpen(true));
        assert_eq!(state.get(Field::TocOpen), Value::TocOpen(false));
    }

    #[test]
    fn test_out_of_range_page_rejected_without_notifying() {
        let mut state = ViewState::new(10);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = Rc::clone(&seen);
        let _sub = state.subscribe(Field::CurrentPage, move |v| seen_clone.borrow_mut().push(*v));

        assert!(matches!(
            state.set(Value::CurrentPage(11)),
            Err(Error::PageOutOfRange { page: 11, total: 10 })
        ));
        assert!(state.set(Value::CurrentPage(0)).is_err());
        assert_eq!(state.current_page(), 1);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_setting_same_value_still_notifies() {
        let mut state = ViewState::new(10);
        let count = Rc::new(RefCell::new(0));
        let count_clone = Rc::clone(&count);
        let _sub = state.subscribe(Field::MenuOpen, move |_| *count_clone.borrow_mut() += 1);

        state.set(Value::MenuOpen(false)).unwrap();
        state.set(Value::MenuOpen(false)).unwrap();
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn test_view_mode_parsing() {
        assert_eq!("text".parse::<ViewMode>().unwrap(), ViewMode::Text);
        assert_eq!("image".parse::<ViewMode>().unwrap(), ViewMode::Image);
        assert!(matches!("pdf".parse::<ViewMode>(), Err(Error::UnknownView(_))));
        assert_eq!(ViewMode::Image.toggled(), ViewMode::Text);
    }
}
