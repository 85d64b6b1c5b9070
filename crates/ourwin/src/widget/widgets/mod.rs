//! Built-in widget kinds.
//!
//! The widget set is closed: every widget stored in a [`WidgetTree`] is one
//! of the variants of [`WidgetKind`]. Dispatch from the kind to the
//! [`Widget`] trait is static, and [`WidgetCast`] gives typed access to a
//! stored widget through [`WidgetTree::get_as`].
//!
//! [`WidgetTree`]: crate::widget::WidgetTree
//! [`WidgetTree::get_as`]: crate::widget::WidgetTree::get_as

mod button;
mod container;
mod grid;
mod label;
mod menu;
mod splitter;
mod text_edit;

pub use button::Button;
pub use container::Container;
pub use grid::{Grid, GridConfig};
pub use label::Label;
pub use menu::{MenuBar, MenuItem, PopupMenu};
pub use splitter::{Splitter, SplitterPanes};
pub use text_edit::TextEdit;

use super::traits::Widget;

/// Typed access to a widget stored as a [`WidgetKind`].
pub trait WidgetCast: Sized {
    /// Kind name used in error messages.
    const NAME: &'static str;

    fn cast(kind: &WidgetKind) -> Option<&Self>;

    fn cast_mut(kind: &mut WidgetKind) -> Option<&mut Self>;
}

macro_rules! widget_kinds {
    ($($variant:ident),* $(,)?) => {
        /// Any widget that can live in a tree.
        #[allow(clippy::large_enum_variant)]
        pub enum WidgetKind {
            $($variant($variant),)*
        }

        impl WidgetKind {
            /// The widget behind the kind.
            pub fn as_widget(&self) -> &dyn Widget {
                match self {
                    $(WidgetKind::$variant(w) => w,)*
                }
            }

            /// The widget behind the kind, mutably.
            pub fn as_widget_mut(&mut self) -> &mut dyn Widget {
                match self {
                    $(WidgetKind::$variant(w) => w,)*
                }
            }

            /// Kind name, for logs and debug output.
            pub fn name(&self) -> &'static str {
                match self {
                    $(WidgetKind::$variant(_) => stringify!($variant),)*
                }
            }
        }

        $(
            impl From<$variant> for WidgetKind {
                fn from(widget: $variant) -> Self {
                    WidgetKind::$variant(widget)
                }
            }

            impl WidgetCast for $variant {
                const NAME: &'static str = stringify!($variant);

                fn cast(kind: &WidgetKind) -> Option<&Self> {
                    match kind {
                        WidgetKind::$variant(w) => Some(w),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }

                fn cast_mut(kind: &mut WidgetKind) -> Option<&mut Self> {
                    match kind {
                        WidgetKind::$variant(w) => Some(w),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
            }
        )*
    };
}

widget_kinds! {
    Label,
    Button,
    TextEdit,
    Container,
    Splitter,
    MenuBar,
    MenuItem,
    PopupMenu,
    Grid,
}

impl std::fmt::Debug for WidgetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(self.name())
            .field("rect", &self.as_widget().base().rect())
            .finish()
    }
}
