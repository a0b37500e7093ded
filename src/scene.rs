use crate::config::RedoPolicy;
use crate::element::Element;

/// Committed elements in paint order plus the elements popped by undo.
///
/// The two stacks together hold the whole edit history: undo moves the top
/// element of `items` onto `undo_stack`, redo moves it back.
#[derive(Debug, Default)]
pub struct Scene {
    items: Vec<Element>,
    undo_stack: Vec<Element>,
    redo_policy: RedoPolicy,
}

impl Scene {
    /// Empty scene using `redo_policy` for commits after an undo.
    pub fn new(redo_policy: RedoPolicy) -> Self {
        Self {
            items: Vec::new(),
            undo_stack: Vec::new(),
            redo_policy,
        }
    }

    /// Committed elements, bottom-most first.
    pub fn items(&self) -> &[Element] {
        &self.items
    }

    /// Undone elements; the last one is the next to be redone.
    pub fn undo_stack(&self) -> &[Element] {
        &self.undo_stack
    }

    /// Number of committed elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True while there is a committed element to undo.
    pub fn can_undo(&self) -> bool {
        !self.items.is_empty()
    }

    /// True while there is an undone element to restore.
    pub fn can_redo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Append a committed element on top of the paint order.
    pub fn add_item(&mut self, element: Element) {
        log::info!(
            "Committed {} element {}",
            element.shape().kind_name(),
            element.id()
        );
        if self.redo_policy == RedoPolicy::ClearOnCommit {
            self.undo_stack.clear();
        }
        self.items.push(element);
    }

    /// Move the top element onto the undo stack. Returns it, or `None` when
    /// there was nothing to undo.
    pub fn undo(&mut self) -> Option<&Element> {
        let element = self.items.pop()?;
        log::info!("Undo {}", element.id());
        self.undo_stack.push(element);
        self.undo_stack.last()
    }

    /// Move the most recently undone element back on top.
    pub fn redo(&mut self) -> Option<&Element> {
        let element = self.undo_stack.pop()?;
        log::info!("Redo {}", element.id());
        self.items.push(element);
        self.items.last()
    }

    /// Drop every element and the whole undo history.
    pub fn clear_all(&mut self) {
        log::info!(
            "Clearing scene ({} items, {} undone)",
            self.items.len(),
            self.undo_stack.len()
        );
        self.items.clear();
        self.undo_stack.clear();
    }
}
