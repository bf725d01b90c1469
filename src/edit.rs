//! Editing Operations - structural changes an editor applies to a document
//!
//! Edits run on an owned value. Use [`edited`] to derive a new document from
//! one that may still be shared with a compile in progress.

use crate::model::{EmailConfig, Section, Widget, WidgetType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Copy-on-write: apply `edit` to a clone of `config`.
pub fn edited(config: &EmailConfig, edit: impl FnOnce(&mut EmailConfig)) -> EmailConfig {
    let mut next = config.clone();
    edit(&mut next);
    next
}

/// Swap the item at `index` with its neighbour. Returns `false` at the edges.
fn move_within<T>(items: &mut [T], index: usize, direction: Direction) -> bool {
    let target = match direction {
        Direction::Up if index > 0 => index - 1,
        Direction::Down if index + 1 < items.len() => index + 1,
        _ => return false,
    };
    items.swap(index, target);
    true
}

impl EmailConfig {
    pub fn add_section(&mut self) -> &mut Section {
        self.sections.push(Section::new());
        let last = self.sections.len() - 1;
        &mut self.sections[last]
    }

    pub fn section_mut(&mut self, id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    pub fn remove_section(&mut self, id: &str) -> bool {
        let before = self.sections.len();
        self.sections.retain(|s| s.id != id);
        self.sections.len() != before
    }

    pub fn move_section(&mut self, id: &str, direction: Direction) -> bool {
        match self.sections.iter().position(|s| s.id == id) {
            Some(index) => move_within(&mut self.sections, index, direction),
            None => false,
        }
    }
}

impl Section {
    pub fn add_widget(&mut self, widget_type: WidgetType) -> &mut Widget {
        self.push_widget(Widget::new(widget_type))
    }

    pub fn push_widget(&mut self, widget: Widget) -> &mut Widget {
        self.widgets.push(widget);
        let last = self.widgets.len() - 1;
        &mut self.widgets[last]
    }

    pub fn widget_mut(&mut self, id: &str) -> Option<&mut Widget> {
        self.widgets.iter_mut().find(|w| w.id == id)
    }

    pub fn remove_widget(&mut self, id: &str) -> bool {
        let before = self.widgets.len();
        self.widgets.retain(|w| w.id != id);
        self.widgets.len() != before
    }

    pub fn move_widget(&mut self, id: &str, direction: Direction) -> bool {
        match self.widgets.iter().position(|w| w.id == id) {
            Some(index) => move_within(&mut self.widgets, index, direction),
            None => false,
        }
    }

    /// Insert a re-keyed copy directly after the widget `id`.
    pub fn duplicate_widget(&mut self, id: &str) -> Option<&Widget> {
        let index = self.widgets.iter().position(|w| w.id == id)?;
        let copy = self.widgets[index].with_fresh_ids();
        self.widgets.insert(index + 1, copy);
        self.widgets.get(index + 1)
    }
}
