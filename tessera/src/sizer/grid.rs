//! Grid layout.
//!
//! Columns and rows are solved independently by the same track algorithm.
//! Explicit sizes and weights seed the track list; children addressing
//! cells past the explicit tracks grow it. A child spanning several tracks
//! raises them until their combined width fits it. The deficit is always
//! measured against the tracks' original widths, so the result does not
//! depend on the order children are visited in.

use tessera_wire::{Reader, Result};
use tracing::warn;

use super::{SizerChild, distribute};
use crate::codec::ReadExt;
use crate::geometry::{Axis, Rect, Size};
use crate::style::LayoutProps;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    /// Explicit minimum track sizes, columns then rows.
    pub sizes: [Vec<f32>; 2],
    pub weights: [Vec<f32>; 2],
}

#[derive(Debug, Clone, Copy, Default)]
struct Track {
    left: f32,
    right: f32,
    width: f32,
    orig_width: f32,
    weight: f32,
}

fn axis_index(axis: Axis) -> usize {
    match axis {
        Axis::X => 0,
        Axis::Y => 1,
    }
}

/// Half-open track range covered by a child, clamped to `max_tracks`.
fn cell_range(pos: f32, span: f32, max_tracks: usize) -> (usize, usize) {
    let max_tracks = max_tracks.max(1);
    // `as` saturates, and maps NaN to zero.
    let start = pos.floor().max(0.0) as usize;
    let span = span.floor().max(1.0) as usize;
    let end = start.saturating_add(span);
    if end > max_tracks {
        warn!("Grid cell {start}+{span} exceeds the {max_tracks} track limit");
        let start = start.min(max_tracks - 1);
        return (start, max_tracks);
    }
    (start, end)
}

impl Grid {
    pub fn read(&mut self, r: &mut Reader<'_>) -> Result<()> {
        let mut mask = r.read_mask()?;
        for axis in Axis::ALL {
            if let Some(sizes) = r.field(&mut mask, |r| r.read_f32_list())? {
                self.sizes[axis_index(axis)] = sizes.into_iter().map(|v| v.max(0.0)).collect();
            }
        }
        for axis in Axis::ALL {
            if let Some(weights) = r.field(&mut mask, |r| r.read_f32_list())? {
                self.weights[axis_index(axis)] = weights.into_iter().map(|v| v.max(0.0)).collect();
            }
        }
        Ok(())
    }

    pub fn min_size(&self, props: &LayoutProps, children: &[SizerChild], max_tracks: usize) -> Size {
        let mut size = Size::ZERO;
        for axis in Axis::ALL {
            let tracks = self.tracks(axis, props, children, max_tracks);
            let gaps = tracks.len().saturating_sub(1) as f32 * props.gap[axis];
            size[axis] = tracks.iter().map(|t| t.width).sum::<f32>() + gaps;
        }
        size
    }

    pub fn layout(
        &self,
        props: &LayoutProps,
        children: &[SizerChild],
        rect: Rect,
        max_tracks: usize,
    ) -> Vec<Rect> {
        let cols = self.arrange(Axis::X, props, children, rect, max_tracks);
        let rows = self.arrange(Axis::Y, props, children, rect, max_tracks);

        children
            .iter()
            .map(|child| {
                let (left, right) = cell_range(child.pos.x, child.span.width, max_tracks);
                let (top, bottom) = cell_range(child.pos.y, child.span.height, max_tracks);
                match (cols.get(left), cols.get(right - 1), rows.get(top), rows.get(bottom - 1)) {
                    (Some(l), Some(r), Some(t), Some(b)) => Rect::new(l.left, t.left, r.right, b.right),
                    _ => Rect::from_pos_size(rect.top_left(), Size::ZERO),
                }
            })
            .collect()
    }

    /// Track widths after folding in every child's minimum.
    fn tracks(&self, axis: Axis, props: &LayoutProps, children: &[SizerChild], max_tracks: usize) -> Vec<Track> {
        let sizes = &self.sizes[axis_index(axis)];
        let weights = &self.weights[axis_index(axis)];
        let count = sizes.len().max(weights.len());

        let mut tracks: Vec<Track> = (0..count)
            .map(|i| {
                let width = sizes.get(i).copied().unwrap_or(0.0);
                Track {
                    width,
                    orig_width: width,
                    weight: weights.get(i).copied().unwrap_or(0.0),
                    ..Track::default()
                }
            })
            .collect();

        let gap = props.gap[axis];
        for child in children {
            let (pos, span) = match axis {
                Axis::X => (child.pos.x, child.span.width),
                Axis::Y => (child.pos.y, child.span.height),
            };
            let (start, end) = cell_range(pos, span, max_tracks);
            if end > tracks.len() {
                tracks.resize(end, Track::default());
            }

            let spanned = &mut tracks[start..end];
            let mut deficit = child.min[axis] + gap;
            let mut span_weight = 0.0;
            for track in spanned.iter() {
                deficit -= track.orig_width + gap;
                span_weight += track.weight;
            }
            if deficit <= 0.0 {
                continue;
            }

            let span = spanned.len() as f32;
            for track in spanned.iter_mut() {
                let share = if span_weight == 0.0 {
                    deficit / span
                } else {
                    deficit * track.weight / span_weight
                };
                track.width = track.width.max(track.orig_width + share);
            }
        }
        tracks
    }

    /// Solve one axis inside `rect` and assign track edges.
    fn arrange(
        &self,
        axis: Axis,
        props: &LayoutProps,
        children: &[SizerChild],
        rect: Rect,
        max_tracks: usize,
    ) -> Vec<Track> {
        let mut tracks = self.tracks(axis, props, children, max_tracks);
        if tracks.is_empty() {
            return tracks;
        }

        let gap = props.gap[axis];
        let total_width = tracks.iter().map(|t| t.width + gap).sum::<f32>() - gap;
        let total_weight: f32 = tracks.iter().map(|t| t.weight).sum();
        let extra = rect.size()[axis] - total_width;

        let mut hpos = rect.start(axis);
        let mut hgap = gap;
        if extra > 0.0 {
            if total_weight == 0.0 {
                let spread = distribute(props.spacing(axis), extra, tracks.len());
                hpos += spread.lead;
                hgap += spread.gap;
                for track in &mut tracks {
                    track.width += spread.grow;
                }
            } else {
                for track in &mut tracks {
                    track.width += extra * track.weight / total_weight;
                }
            }
        }

        for track in &mut tracks {
            track.left = hpos;
            track.right = hpos + track.width;
            hpos += track.width + hgap;
        }
        tracks
    }
}
