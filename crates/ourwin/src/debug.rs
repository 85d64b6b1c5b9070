//! Diagnostic views of a widget tree.
//!
//! ```ignore
//! use ourwin::debug::format_tree;
//!
//! tracing::debug!("\n{}", format_tree(window.tree(), window.root()));
//! // Container [WidgetId(1v1)] (0, 0) 640x480 *dirty
//! //   Button [WidgetId(2v1)] (10, 10) 36x24 *focus
//! ```

use std::fmt::Write;

use ourwin_core::WidgetId;

use crate::widget::WidgetTree;

/// Options for formatting a tree.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// Show widget handles.
    pub show_ids: bool,
    /// Show each widget's rectangle in its parent's coordinates.
    pub show_rects: bool,
    /// Deepest level to print, `None` for all.
    pub max_depth: Option<usize>,
    /// Indentation per level.
    pub indent: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            show_ids: true,
            show_rects: true,
            max_depth: None,
            indent: 2,
        }
    }
}

/// Render the subtree at `root` with default options.
pub fn format_tree(tree: &WidgetTree, root: WidgetId) -> String {
    format_tree_with(tree, root, &TreeFormatOptions::default())
}

/// Render the subtree at `root`, one widget per line.
pub fn format_tree_with(tree: &WidgetTree, root: WidgetId, options: &TreeFormatOptions) -> String {
    let mut output = String::new();
    let mut stack = vec![(root, 0usize)];
    while let Some((id, depth)) = stack.pop() {
        if options.max_depth.is_some_and(|max| depth > max) {
            continue;
        }
        let Some(widget) = tree.get(id) else {
            continue;
        };

        output.push_str(&" ".repeat(depth * options.indent));
        output.push_str(widget.name());
        if options.show_ids {
            let _ = write!(output, " [{id:?}]");
        }
        if options.show_rects {
            let rect = widget.as_widget().base().rect();
            let _ = write!(output, " ({}, {}) {}x{}", rect.x(), rect.y(), rect.width(), rect.height());
        }
        if tree.is_dirty(id) {
            output.push_str(" *dirty");
        }
        if tree.has_focus(id) {
            output.push_str(" *focus");
        }
        output.push('\n');

        stack.extend(tree.children(id).iter().rev().map(|&child| (child, depth + 1)));
    }
    output
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use ourwin_render::{MonospaceShaper, Rect};

    use super::*;
    use crate::widget::{Button, Container, Label};

    #[test]
    fn test_format_tree() {
        let mut tree = WidgetTree::new(Rc::new(MonospaceShaper::new(8, 16)));
        let root = tree.insert(Container::new(Rect::new(0, 0, 100, 50)));
        let inner = tree.add_child(root, Container::new(Rect::new(5, 5, 40, 40))).unwrap();
        tree.add_child(inner, Label::new(tree.shaper(), "hi")).unwrap();
        tree.add_child(root, Button::new(tree.shaper(), "ok")).unwrap();
        tree.redraw(root);

        let options = TreeFormatOptions {
            show_ids: false,
            ..TreeFormatOptions::default()
        };
        let text = format_tree_with(&tree, root, &options);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Container (0, 0) 100x50");
        assert_eq!(lines[1], "  Container (5, 5) 40x40");
        assert!(lines[2].starts_with("    Label"));
        assert!(lines[3].starts_with("  Button"));

        let shallow = TreeFormatOptions {
            max_depth: Some(0),
            ..options
        };
        assert_eq!(format_tree_with(&tree, root, &shallow).lines().count(), 1);
    }
}
