//! Tessera: a retained-mode UI layout engine.
//!
//! A host sends binary window records to a [`Manager`]. Each [`Window`]
//! holds a tree of elements; each element owns one or more styled boxes.
//! Every frame the tree goes through restyle, resize, relayout and draw,
//! and the result is painted through a [`Canvas`].
//!
//! # Architecture
//!
//! - Boxes ([`StyledBox`]) resolve layered per-state styles and compute
//!   their nested rects. They draw a nine-sliced pane, an icon and a label.
//! - Elements ([`Elem`]) own boxes and children. Sizers arrange children by
//!   absolute placement, flex runs or grid tracks.
//! - Clickable elements turn full presses into outbound events collected by
//!   the manager.
//!
//! Textures and fonts come from a host-provided [`Resources`]
//! implementation.

// Core primitives
pub mod geometry;
pub mod codec;

// Styling and boxes
pub mod style;
pub mod styled_box;
pub mod layout;

// Element tree
pub mod elem;
pub mod sizer;
pub mod clickable;

// Windows and host integration
pub mod window;
pub mod manager;
pub mod message;
pub mod event;
pub mod config;
pub mod error;

// Rendering seam
pub mod canvas;
pub mod resources;

// Re-export core types
pub use canvas::{Canvas, DrawList, Primitive, ScaledCanvas, TextRun};
pub use config::ManagerConfig;
pub use elem::{Elem, ElemKey, ElemKind, ElemTree, ElemType};
pub use error::{ManagerError, TreeError, WindowError};
pub use event::{Event, EventResult, Key, KeyEvent, Modifiers, MouseButton, MouseEvent, NamedKey};
pub use geometry::{Axis, Color, Disp, Pos, Rect, Size};
pub use layout::{Layout, LayoutContext, StyleTable};
pub use manager::Manager;
pub use message::{ElemEvent, OutboundEvent, WindowEvent};
pub use resources::{AtlasResources, FontId, FontSpec, Resources, TextureId};
pub use style::StyleProps;
pub use styled_box::{BoxId, BoxState, StyledBox};
pub use window::{Frame, Window, WindowType};
