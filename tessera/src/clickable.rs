//! Buttons, toggles and option buttons.
//!
//! All three arm on a full press of their main box. What happens on
//! activation is decided here; the window only routes the press.

use tessera_wire::{Reader, Result};

use crate::elem::{ElemKey, ElemKind, ElemTree};
use crate::message::{ElemEvent, Outbox};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Button {
    pub disabled: bool,
    pub on_press: bool,
}

impl Button {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn read(&mut self, r: &mut Reader<'_>) -> Result<()> {
        let mut mask = r.read_mask()?;
        self.disabled = mask.test_shift();
        self.on_press = mask.test_shift();
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Toggle {
    pub disabled: bool,
    /// Survives updates unless the record sets it.
    pub selected: bool,
    pub on_press: bool,
    pub on_change: bool,
}

impl Toggle {
    pub fn reset(&mut self) {
        self.disabled = false;
        self.on_press = false;
        self.on_change = false;
    }

    pub fn read(&mut self, r: &mut Reader<'_>) -> Result<()> {
        let mut mask = r.read_mask()?;
        self.disabled = mask.test_shift();
        if let Some(selected) = mask.test_shift_bool() {
            self.selected = selected;
        }
        self.on_press = mask.test_shift();
        self.on_change = mask.test_shift();
        Ok(())
    }
}

/// One choice of a mutually exclusive family.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionButton {
    pub disabled: bool,
    /// Survives updates unless the record sets it.
    pub selected: bool,
    /// Options sharing a non-empty family deselect each other.
    pub family: String,
    pub on_press: bool,
    pub on_change: bool,
}

impl OptionButton {
    pub fn reset(&mut self) {
        self.disabled = false;
        self.family.clear();
        self.on_press = false;
        self.on_change = false;
    }

    pub fn read(&mut self, r: &mut Reader<'_>) -> Result<()> {
        let mut mask = r.read_mask()?;
        self.disabled = mask.test_shift();
        if let Some(selected) = mask.test_shift_bool() {
            self.selected = selected;
        }
        if let Some(family) = r.field(&mut mask, Reader::read_nstr)? {
            self.family = family.to_owned();
        }
        self.on_press = mask.test_shift();
        self.on_change = mask.test_shift();
        Ok(())
    }
}

/// Run the activation of a clickable element after a completed press.
///
/// `order` lists the window's elements in tree order; option families are
/// resolved over it.
pub fn activate(tree: &mut ElemTree, order: &[ElemKey], key: ElemKey, outbox: &mut Outbox) {
    let Some(elem) = tree.get_mut(key) else {
        return;
    };

    match elem.kind_mut() {
        ElemKind::Button(button) => {
            if !button.disabled && button.on_press {
                outbox.elem(elem, ElemEvent::Press);
            }
        }
        ElemKind::Toggle(toggle) => {
            if toggle.disabled {
                return;
            }
            toggle.selected = !toggle.selected;
            let (selected, on_press, on_change) = (toggle.selected, toggle.on_press, toggle.on_change);
            if on_press {
                outbox.elem(elem, ElemEvent::Press);
            }
            if on_change {
                outbox.elem(elem, ElemEvent::Change { selected });
            }
        }
        ElemKind::Option(option) => {
            if option.disabled {
                return;
            }
            let family = option.family.clone();
            if option.on_press {
                outbox.elem(elem, ElemEvent::Press);
            }
            set_option(tree, key, true, outbox);

            // An empty family groups nothing.
            if family.is_empty() {
                return;
            }
            for &other in order {
                if other == key {
                    continue;
                }
                let same_family = matches!(
                    tree.get(other).map(|e| e.kind()),
                    Some(ElemKind::Option(o)) if o.family == family
                );
                if same_family {
                    set_option(tree, other, false, outbox);
                }
            }
        }
        _ => {}
    }
}

fn set_option(tree: &mut ElemTree, key: ElemKey, selected: bool, outbox: &mut Outbox) {
    let Some(elem) = tree.get_mut(key) else {
        return;
    };
    let ElemKind::Option(option) = elem.kind_mut() else {
        return;
    };
    let was_selected = option.selected;
    option.selected = selected;
    if was_selected != selected && option.on_change {
        outbox.elem(elem, ElemEvent::Change { selected });
    }
}
