//! End-to-end tests: encoded manager messages in, draw lists and host
//! events out.
//!
//! Each test builds window records with the wire writers, feeds them to a
//! [`Manager`] and inspects what a frame draws or which events input raises.

use tessera::codec::WriteExt;
use tessera::{
    AtlasResources, Color, DrawList, ElemEvent, ElemKind, ElemType, Event, Frame, Key, KeyEvent,
    Manager, ManagerConfig, ManagerError, Modifiers, MouseButton, MouseEvent, NamedKey,
    OutboundEvent, Pos, Rect, Size, WindowError, WindowEvent, WindowType,
};
use tessera_wire::{MaskWriter, Writer};

const OPEN: u8 = 0x00;
const REOPEN: u8 = 0x01;
const UPDATE: u8 = 0x02;
const CLOSE: u8 = 0x03;

const SCREEN: Size = Size::new(200.0, 100.0);

// =========================================================================
// Record builders
// =========================================================================

/// Style group indices inside a style string.
const LAYOUT: usize = 0;
const SIZING: usize = 1;
const PANE: usize = 3;

fn style(groups: &[(usize, Vec<u8>)]) -> Vec<u8> {
    let mut w = MaskWriter::new();
    for index in 0..6 {
        match groups.iter().find(|(g, _)| *g == index) {
            Some((_, record)) => w.field(|w| {
                w.write_bytes16(record);
            }),
            None => w.skip(),
        };
    }
    w.finish()
}

fn fill(argb: u32) -> (usize, Vec<u8>) {
    let mut w = MaskWriter::new();
    w.skip().field(|w| {
        w.write_color(Color::from_argb8(argb));
    });
    (PANE, w.finish())
}

fn fixed_size(size: Size, weight: f32) -> (usize, Vec<u8>) {
    let mut w = MaskWriter::new();
    w.field(|w| {
        w.write_size(size);
    })
    .skip_n(3)
    .field(|w| {
        w.write_f32(weight);
    });
    (SIZING, w.finish())
}

/// A fixed size box placed at the parent's top left corner.
fn corner_box(size: Size) -> (usize, Vec<u8>) {
    let mut w = MaskWriter::new();
    w.field(|w| {
        w.write_size(size);
    })
    .field(|w| {
        w.write_size(Size::ZERO);
    });
    (SIZING, w.finish())
}

fn gap(gap: Size) -> (usize, Vec<u8>) {
    let mut w = MaskWriter::new();
    w.skip_n(2).field(|w| {
        w.write_size(gap);
    });
    (LAYOUT, w.finish())
}

/// Box record referencing `style_index` in the default state.
fn styled(style_index: u32) -> Vec<u8> {
    let mut w = MaskWriter::new();
    w.field(|w| {
        w.write_u32(1).write_u32(style_index);
    })
    .skip();
    w.finish()
}

fn base(children: &[&str], main_box: Option<Vec<u8>>) -> Vec<u8> {
    let mut w = MaskWriter::new();
    if children.is_empty() {
        w.skip();
    } else {
        w.field(|w| {
            w.write_u32(children.len() as u32);
            for child in children {
                w.write_nstr(child);
            }
        });
    }
    match main_box {
        Some(record) => w.field(|w| {
            w.write_bytes16(&record);
        }),
        None => w.skip(),
    };
    w.finish()
}

/// Base record wrapped for a subtype, followed by the subtype's record.
fn subtype(base: Vec<u8>, own: &MaskWriter) -> Vec<u8> {
    let mut w = Writer::new();
    w.write_bytes32(&base);
    let mut bytes = w.into_bytes();
    bytes.extend_from_slice(&own.finish());
    bytes
}

fn root(children: &[&str]) -> Vec<u8> {
    subtype(base(children, None), MaskWriter::new().skip())
}

fn button(main_box: Option<Vec<u8>>, on_press: bool) -> Vec<u8> {
    subtype(base(&[], main_box), MaskWriter::new().flag(false).flag(on_press))
}

fn toggle(selected: Option<bool>, on_change: bool) -> Vec<u8> {
    subtype(
        base(&[], None),
        MaskWriter::new()
            .flag(false)
            .bool_field(selected)
            .flag(false)
            .flag(on_change),
    )
}

fn flex(children: &[&str], main_box: Option<Vec<u8>>) -> Vec<u8> {
    subtype(base(children, main_box), MaskWriter::new().skip_n(2))
}

/// One window record under construction.
#[derive(Default)]
struct WindowRecord {
    elems: Vec<(ElemType, String, Vec<u8>)>,
    root: String,
    styles: Vec<Vec<u8>>,
    window_type: Option<WindowType>,
    focus: Option<String>,
    uncloseable: bool,
    on_submit: bool,
    on_focus_change: bool,
}

impl WindowRecord {
    fn new(root_id: &str, root_children: &[&str]) -> Self {
        let mut record = Self {
            root: root_id.to_owned(),
            window_type: Some(WindowType::Gui),
            ..Self::default()
        };
        record.elem(ElemType::Root, root_id, root(root_children));
        record
    }

    fn elem(&mut self, elem_type: ElemType, id: &str, data: Vec<u8>) -> &mut Self {
        self.elems.push((elem_type, id.to_owned(), data));
        self
    }

    fn style(&mut self, style: Vec<u8>) -> u32 {
        self.styles.push(style);
        self.styles.len() as u32 - 1
    }

    fn encode(&self, opening: bool) -> Vec<u8> {
        let mut w = Writer::new();
        w.write_u32(self.elems.len() as u32);
        for (elem_type, id, data) in &self.elems {
            w.write_u8(elem_type.to_wire()).write_nstr(id).write_bytes32(data);
        }
        w.write_nstr(&self.root);
        w.write_u32(self.styles.len() as u32);
        for style in &self.styles {
            w.write_bytes16(style);
        }
        if opening {
            w.write_u8(self.window_type.unwrap_or(WindowType::Gui).to_wire());
        }

        let mut mask = MaskWriter::new();
        match &self.focus {
            Some(id) => mask.field(|w| {
                w.write_nstr(id);
            }),
            None => mask.skip(),
        };
        if opening {
            mask.flag(self.uncloseable);
        }
        mask.flag(self.on_submit).flag(self.on_focus_change);

        let mut bytes = w.into_bytes();
        bytes.extend_from_slice(&mask.finish());
        bytes
    }
}

// =========================================================================
// Harness
// =========================================================================

struct WindowTest {
    manager: Manager,
    resources: AtlasResources,
}

impl WindowTest {
    fn new() -> Self {
        Self::with_config(ManagerConfig::default())
    }

    fn with_config(config: ManagerConfig) -> Self {
        Self {
            manager: Manager::new(config),
            resources: AtlasResources::new(),
        }
    }

    fn send(&mut self, action: u8, id: u64, body: &[u8]) -> Result<(), ManagerError> {
        let mut w = Writer::new();
        w.write_u8(action).write_u64(id);
        let mut bytes = w.into_bytes();
        bytes.extend_from_slice(body);
        self.manager.receive_message(&bytes)
    }

    fn open(&mut self, id: u64, record: &WindowRecord) -> Result<(), ManagerError> {
        self.send(OPEN, id, &record.encode(true))
    }

    fn update(&mut self, id: u64, record: &WindowRecord) -> Result<(), ManagerError> {
        self.send(UPDATE, id, &record.encode(false))
    }

    fn draw(&mut self) -> DrawList {
        let frame = Frame {
            resources: &self.resources,
            screen: SCREEN,
            time_ms: 0,
        };
        let mut list = DrawList::new();
        self.manager.draw_all(&frame, &mut list);
        list
    }

    fn input(&mut self, event: impl Into<Event>) -> bool {
        self.manager.process_input(&event.into())
    }

    fn key(&mut self, key: NamedKey, modifiers: Modifiers) -> bool {
        self.input(KeyEvent::Pressed {
            key: Key::Named(key),
            modifiers,
            repeat: false,
        })
    }

    fn click(&mut self, position: Pos) {
        self.input(MouseEvent::CursorMoved { position });
        self.input(MouseEvent::ButtonPressed {
            button: MouseButton::Left,
            position,
            clicks: 1,
        });
        self.input(MouseEvent::ButtonReleased {
            button: MouseButton::Left,
            position,
        });
    }

    fn events(&mut self) -> Vec<OutboundEvent> {
        self.manager.drain_events()
    }

    fn focused_id(&self, window: u64) -> Option<String> {
        let window = self.manager.window(window)?;
        let key = window.focused_elem()?;
        window.tree().get(key).map(|e| e.id().to_owned())
    }
}

fn elem_event(window: u64, elem_type: ElemType, id: &str, event: ElemEvent) -> OutboundEvent {
    OutboundEvent::Elem {
        window,
        elem_type,
        elem_id: id.to_owned(),
        event,
    }
}

// =========================================================================
// Opening and updating
// =========================================================================

#[test]
fn test_open_and_close_window() {
    let mut t = WindowTest::new();
    t.open(1, &WindowRecord::new("root", &[])).unwrap();
    assert_eq!(t.manager.len(), 1);
    assert_eq!(t.manager.focused(), Some(1));

    t.send(CLOSE, 1, &[]).unwrap();
    assert!(t.manager.is_empty());
    // Closing on request of the host is not echoed back.
    assert!(t.events().is_empty());
}

#[test]
fn test_open_twice_is_rejected() {
    let mut t = WindowTest::new();
    let record = WindowRecord::new("root", &[]);
    t.open(1, &record).unwrap();
    assert!(matches!(t.open(1, &record), Err(ManagerError::AlreadyOpen(1))));
    assert_eq!(t.manager.len(), 1);
}

#[test]
fn test_root_must_be_a_root_element() {
    let mut t = WindowTest::new();
    let mut record = WindowRecord::new("root", &[]);
    record.elem(ElemType::Elem, "plain", base(&[], None));
    record.root = "plain".to_owned();

    let err = t.open(1, &record).unwrap_err();
    assert!(matches!(
        err,
        ManagerError::Window {
            source: WindowError::UnknownRoot(_),
            ..
        }
    ));
    assert!(t.manager.window(1).is_none());
}

#[test]
fn test_missing_root_fails() {
    let mut t = WindowTest::new();
    let mut record = WindowRecord::new("root", &[]);
    record.root = "nowhere".to_owned();
    assert!(matches!(
        t.open(1, &record),
        Err(ManagerError::Window {
            source: WindowError::MissingRoot,
            ..
        })
    ));
}

#[test]
fn test_orphaned_elements_fail_the_window() {
    let mut t = WindowTest::new();
    let mut record = WindowRecord::new("root", &["a"]);
    record
        .elem(ElemType::Elem, "a", base(&[], None))
        .elem(ElemType::Elem, "stray", base(&[], None));

    assert!(matches!(
        t.open(1, &record),
        Err(ManagerError::Window {
            source: WindowError::Orphaned(1),
            ..
        })
    ));
    assert!(t.manager.is_empty());
}

#[test]
fn test_failed_update_closes_window() {
    let mut t = WindowTest::new();
    let mut record = WindowRecord::new("root", &[]);
    t.open(1, &record).unwrap();

    record.elem(ElemType::Elem, "stray", base(&[], None));
    assert!(t.update(1, &record).is_err());
    assert!(t.manager.window(1).is_none());
}

#[test]
fn test_tree_depth_limit() {
    let config = ManagerConfig {
        max_tree_depth: 3,
        ..ManagerConfig::default()
    };
    let mut t = WindowTest::with_config(config);

    let mut record = WindowRecord::new("root", &["a"]);
    record.elem(ElemType::Elem, "a", base(&["b"], None));
    record.elem(ElemType::Elem, "b", base(&[], None));
    t.open(1, &record).unwrap();

    let mut deeper = WindowRecord::new("root", &["a"]);
    deeper.elem(ElemType::Elem, "a", base(&["b"], None));
    deeper.elem(ElemType::Elem, "b", base(&["c"], None));
    deeper.elem(ElemType::Elem, "c", base(&[], None));
    assert!(matches!(
        t.open(2, &deeper),
        Err(ManagerError::Window {
            source: WindowError::TreeTooDeep(3),
            ..
        })
    ));
}

#[test]
fn test_duplicate_and_invalid_elements_are_skipped() {
    let mut t = WindowTest::new();
    let mut record = WindowRecord::new("root", &["a"]);
    record
        .elem(ElemType::Elem, "a", base(&[], None))
        .elem(ElemType::Elem, "a", base(&["root"], None))
        .elem(ElemType::Elem, "", base(&[], None));
    t.open(1, &record).unwrap();

    let window = t.manager.window(1).unwrap();
    assert_eq!(window.ordered().len(), 2);
    assert!(window.elem("a").unwrap().children().is_empty());
}

#[test]
fn test_update_keeps_toggle_selection() {
    let mut t = WindowTest::new();
    let mut record = WindowRecord::new("root", &["t"]);
    record.elem(ElemType::Toggle, "t", toggle(Some(true), false));
    t.open(1, &record).unwrap();

    let mut update = WindowRecord::new("root", &["t"]);
    update.elem(ElemType::Toggle, "t", toggle(None, false));
    t.update(1, &update).unwrap();
    assert!(t.manager.window(1).unwrap().elem("t").unwrap().is_selected());

    let mut cleared = WindowRecord::new("root", &["t"]);
    cleared.elem(ElemType::Toggle, "t", toggle(Some(false), false));
    t.update(1, &cleared).unwrap();
    assert!(!t.manager.window(1).unwrap().elem("t").unwrap().is_selected());
}

#[test]
fn test_type_change_replaces_element() {
    let mut t = WindowTest::new();
    let mut record = WindowRecord::new("root", &["x"]);
    record.elem(ElemType::Toggle, "x", toggle(Some(true), false));
    t.open(1, &record).unwrap();

    let mut update = WindowRecord::new("root", &["x"]);
    update.elem(ElemType::Button, "x", button(None, true));
    t.update(1, &update).unwrap();

    let elem = t.manager.window(1).unwrap().elem("x").unwrap();
    assert!(matches!(elem.kind(), ElemKind::Button(_)));
    assert!(!elem.is_selected());
}

#[test]
fn test_reopen_replaces_window() {
    let mut t = WindowTest::new();
    t.open(1, &WindowRecord::new("root", &[])).unwrap();

    let mut w = Writer::new();
    w.write_u64(1);
    let mut body = w.into_bytes();
    body.extend_from_slice(&WindowRecord::new("root", &[]).encode(true));
    t.send(REOPEN, 2, &body).unwrap();

    assert!(t.manager.window(1).is_none());
    assert!(t.manager.window(2).is_some());
    assert_eq!(t.manager.focused(), Some(2));

    // A missing window to close is not an error.
    let mut w = Writer::new();
    w.write_u64(9);
    let mut body = w.into_bytes();
    body.extend_from_slice(&WindowRecord::new("root", &[]).encode(true));
    t.send(REOPEN, 3, &body).unwrap();
    assert_eq!(t.manager.len(), 2);
}

#[test]
fn test_newest_gui_window_takes_input() {
    let mut t = WindowTest::new();
    t.open(1, &WindowRecord::new("root", &[])).unwrap();
    let mut hud = WindowRecord::new("root", &[]);
    hud.window_type = Some(WindowType::Hud);
    t.open(2, &hud).unwrap();
    t.open(3, &WindowRecord::new("root", &[])).unwrap();

    assert_eq!(t.manager.focused(), Some(3));
    assert!(t.manager.window(3).unwrap().is_focused());
    assert!(!t.manager.window(1).unwrap().is_focused());

    t.send(CLOSE, 3, &[]).unwrap();
    assert_eq!(t.manager.focused(), Some(1));
    assert!(t.manager.window(1).unwrap().is_focused());
}

// =========================================================================
// Layout and drawing
// =========================================================================

#[test]
fn test_flex_row_draws_children_in_place() {
    let mut t = WindowTest::new();
    let mut record = WindowRecord::new("root", &["row"]);
    let row_style = record.style(style(&[gap(Size::new(10.0, 10.0))]));
    let a_style = record.style(style(&[fixed_size(Size::new(50.0, 20.0), 0.0), fill(0xFFFF0000)]));
    let b_style = record.style(style(&[fixed_size(Size::new(100.0, 20.0), 1.0), fill(0xFF0000FF)]));
    record
        .elem(ElemType::Flex, "row", flex(&["a", "b"], Some(styled(row_style))))
        .elem(ElemType::Elem, "a", base(&[], Some(styled(a_style))))
        .elem(ElemType::Elem, "b", base(&[], Some(styled(b_style))));
    t.open(1, &record).unwrap();

    let list = t.draw();
    let rects: Vec<_> = list.solid_rects().collect();
    assert_eq!(rects.len(), 2);

    assert_eq!(rects[0].rect.left, 0.0);
    assert_eq!(rects[0].rect.right, 50.0);
    assert_eq!(rects[0].color, Color::from_argb8(0xFFFF0000));

    assert_eq!(rects[1].rect.left, 60.0);
    assert_eq!(rects[1].rect.right, 200.0);
    assert_eq!(rects[1].color, Color::from_argb8(0xFF0000FF));
}

#[test]
fn test_gui_scale_maps_to_screen_pixels() {
    let config = ManagerConfig {
        gui_scale: 2.0,
        ..ManagerConfig::default()
    };
    let mut t = WindowTest::with_config(config);
    let mut record = WindowRecord::new("root", &["a"]);
    let a_style = record.style(style(&[fill(0xFF00FF00)]));
    record.elem(ElemType::Elem, "a", base(&[], Some(styled(a_style))));
    t.open(1, &record).unwrap();

    let list = t.draw();
    let rects: Vec<_> = list.solid_rects().collect();
    assert_eq!(rects.len(), 1);
    assert_eq!(rects[0].rect, Rect::new(0.0, 0.0, 200.0, 100.0));
    assert_eq!(t.manager.window(1).unwrap().scale(), 2.0);
}

#[test]
fn test_windows_draw_by_type() {
    let mut t = WindowTest::new();

    let mut fg = WindowRecord::new("root", &["a"]);
    let red = fg.style(style(&[fill(0xFFFF0000)]));
    fg.elem(ElemType::Elem, "a", base(&[], Some(styled(red))));
    fg.window_type = Some(WindowType::Fg);
    t.open(1, &fg).unwrap();

    let mut bg = WindowRecord::new("root", &["a"]);
    let blue = bg.style(style(&[fill(0xFF0000FF)]));
    bg.elem(ElemType::Elem, "a", base(&[], Some(styled(blue))));
    bg.window_type = Some(WindowType::Bg);
    t.open(2, &bg).unwrap();

    let list = t.draw();
    let colors: Vec<_> = list.solid_rects().map(|r| r.color).collect();
    assert_eq!(
        colors,
        vec![Color::from_argb8(0xFF0000FF), Color::from_argb8(0xFFFF0000)]
    );
}

#[test]
fn test_label_is_drawn() {
    let mut t = WindowTest::new();
    let mut record = WindowRecord::new("root", &["a"]);
    let mut label_box = MaskWriter::new();
    label_box.skip().field(|w| {
        w.write_str16("hello");
    });
    record.elem(ElemType::Elem, "a", base(&[], Some(label_box.finish())));
    t.open(1, &record).unwrap();

    let list = t.draw();
    let texts: Vec<_> = list.texts().collect();
    assert_eq!(texts.len(), 1);
    assert_eq!(texts[0].run.text, "hello");
}

// =========================================================================
// Input
// =========================================================================

#[test]
fn test_button_click_raises_press() {
    let mut t = WindowTest::new();
    let mut record = WindowRecord::new("root", &["b"]);
    record.elem(ElemType::Button, "b", button(None, true));
    t.open(1, &record).unwrap();
    t.draw();

    t.click(Pos::new(10.0, 10.0));
    assert_eq!(t.focused_id(1).as_deref(), Some("b"));
    assert_eq!(
        t.events(),
        vec![elem_event(1, ElemType::Button, "b", ElemEvent::Press)]
    );
}

#[test]
fn test_release_outside_does_not_press() {
    let mut t = WindowTest::new();
    let mut record = WindowRecord::new("root", &["b"]);
    let small = record.style(style(&[corner_box(Size::new(20.0, 20.0))]));
    record.elem(ElemType::Button, "b", button(Some(styled(small)), true));
    t.open(1, &record).unwrap();
    t.draw();

    let inside = Pos::new(5.0, 5.0);
    let outside = Pos::new(150.0, 80.0);
    t.input(MouseEvent::CursorMoved { position: inside });
    t.input(MouseEvent::ButtonPressed {
        button: MouseButton::Left,
        position: inside,
        clicks: 1,
    });
    t.input(MouseEvent::CursorMoved { position: outside });
    t.input(MouseEvent::ButtonReleased {
        button: MouseButton::Left,
        position: outside,
    });
    assert!(t.events().is_empty());
}

#[test]
fn test_toggle_click_raises_change() {
    let mut t = WindowTest::new();
    let mut record = WindowRecord::new("root", &["t"]);
    record.elem(ElemType::Toggle, "t", toggle(None, true));
    t.open(1, &record).unwrap();
    t.draw();

    t.click(Pos::new(50.0, 50.0));
    assert_eq!(
        t.events(),
        vec![elem_event(1, ElemType::Toggle, "t", ElemEvent::Change { selected: true })]
    );
    assert!(t.manager.window(1).unwrap().elem("t").unwrap().is_selected());
}

#[test]
fn test_other_keys_and_buttons_do_not_press() {
    let mut t = WindowTest::new();
    let mut record = WindowRecord::new("root", &["b"]);
    record.elem(ElemType::Button, "b", button(None, true));
    record.focus = Some("b".to_owned());
    t.open(1, &record).unwrap();
    t.draw();

    let typed = KeyEvent::Pressed {
        key: Key::Character("a".to_owned()),
        modifiers: Modifiers::NONE,
        repeat: false,
    };
    assert!(!t.input(typed));

    let position = Pos::new(10.0, 10.0);
    t.input(MouseEvent::CursorMoved { position });
    assert!(!t.input(MouseEvent::ButtonPressed {
        button: MouseButton::Right,
        position,
        clicks: 1,
    }));
    assert!(!t.input(MouseEvent::ButtonReleased {
        button: MouseButton::Right,
        position,
    }));
    assert!(t.events().is_empty());
}

#[test]
fn test_space_presses_focused_button() {
    let mut t = WindowTest::new();
    let mut record = WindowRecord::new("root", &["b"]);
    record.elem(ElemType::Button, "b", button(None, true));
    record.focus = Some("b".to_owned());
    t.open(1, &record).unwrap();
    assert_eq!(t.focused_id(1).as_deref(), Some("b"));

    t.key(NamedKey::Space, Modifiers::NONE);
    assert!(t.events().is_empty());
    t.input(KeyEvent::Released {
        key: Key::Named(NamedKey::Space),
        modifiers: Modifiers::NONE,
    });
    assert_eq!(
        t.events(),
        vec![elem_event(1, ElemType::Button, "b", ElemEvent::Press)]
    );
}

#[test]
fn test_escape_closes_window() {
    let mut t = WindowTest::new();
    t.open(1, &WindowRecord::new("root", &[])).unwrap();

    assert!(t.key(NamedKey::Escape, Modifiers::NONE));
    assert!(t.manager.window(1).is_none());
    assert_eq!(
        t.events(),
        vec![OutboundEvent::Window {
            window: 1,
            event: WindowEvent::Close,
        }]
    );
}

#[test]
fn test_uncloseable_window_ignores_escape() {
    let mut t = WindowTest::new();
    let mut record = WindowRecord::new("root", &[]);
    record.uncloseable = true;
    t.open(1, &record).unwrap();

    t.key(NamedKey::Escape, Modifiers::NONE);
    assert!(t.manager.window(1).is_some());
    assert!(t.events().is_empty());
}

#[test]
fn test_double_click_outside_closes_window() {
    let mut t = WindowTest::new();
    let mut record = WindowRecord::new("root", &["b"]);
    let small = record.style(style(&[corner_box(Size::new(20.0, 20.0))]));
    record.elem(ElemType::Button, "b", button(Some(styled(small)), false));
    t.open(1, &record).unwrap();
    t.draw();

    // The root fills the window, so every click lands on an element.
    t.input(MouseEvent::ButtonPressed {
        button: MouseButton::Left,
        position: Pos::new(150.0, 80.0),
        clicks: 2,
    });
    assert!(t.manager.window(1).is_some());

    t.input(MouseEvent::ButtonPressed {
        button: MouseButton::Left,
        position: Pos::new(-5.0, -5.0),
        clicks: 2,
    });
    assert!(t.manager.window(1).is_none());
}

#[test]
fn test_enter_submits_when_requested() {
    let mut t = WindowTest::new();
    t.open(1, &WindowRecord::new("root", &[])).unwrap();
    assert!(t.key(NamedKey::Enter, Modifiers::NONE));
    assert!(t.events().is_empty());

    let mut record = WindowRecord::new("root", &[]);
    record.on_submit = true;
    t.update(1, &record).unwrap();
    t.key(NamedKey::Enter, Modifiers::NONE);
    assert_eq!(
        t.events(),
        vec![OutboundEvent::Window {
            window: 1,
            event: WindowEvent::Submit,
        }]
    );
}

#[test]
fn test_tab_cycles_focus() {
    let mut t = WindowTest::new();
    let mut record = WindowRecord::new("root", &["b1", "b2"]);
    record
        .elem(ElemType::Button, "b1", button(None, false))
        .elem(ElemType::Button, "b2", button(None, false));
    record.on_focus_change = true;
    t.open(1, &record).unwrap();

    t.key(NamedKey::Tab, Modifiers::NONE);
    assert_eq!(t.focused_id(1).as_deref(), Some("b1"));
    t.key(NamedKey::Tab, Modifiers::NONE);
    assert_eq!(t.focused_id(1).as_deref(), Some("b2"));
    t.key(NamedKey::Tab, Modifiers::NONE);
    assert_eq!(t.focused_id(1).as_deref(), Some("b1"));
    t.key(NamedKey::Tab, Modifiers::SHIFT);
    assert_eq!(t.focused_id(1).as_deref(), Some("b2"));

    let events = t.events();
    assert_eq!(events.len(), 4);
    assert_eq!(
        events[0],
        OutboundEvent::Window {
            window: 1,
            event: WindowEvent::FocusChange {
                old: String::new(),
                new: "b1".to_owned(),
            },
        }
    );
}

#[test]
fn test_focus_from_record_is_silent() {
    let mut t = WindowTest::new();
    let mut record = WindowRecord::new("root", &["b"]);
    record.elem(ElemType::Button, "b", button(None, false));
    record.focus = Some("b".to_owned());
    record.on_focus_change = true;
    t.open(1, &record).unwrap();

    assert_eq!(t.focused_id(1).as_deref(), Some("b"));
    assert!(t.events().is_empty());

    // An empty id clears focus.
    record.focus = Some(String::new());
    t.update(1, &record).unwrap();
    assert_eq!(t.focused_id(1), None);
}
