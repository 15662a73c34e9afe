//! Flex-wrap layout.
//!
//! Children are packed into runs along the main axis. A run ends when the
//! next child would push it strictly past the available main size, unless
//! the run is still empty: an oversized child always gets a run of its own
//! and overflows. Leftover main-axis space inside a run goes to weighted
//! children, or through the spacing policy when no child in the run has
//! weight. Leftover cross-axis space is spread over the runs the same way.

use serde::{Deserialize, Serialize};
use tessera_wire::{Reader, Result};

use super::{SizerChild, distribute};
use crate::geometry::{Axis, Pos, Rect, Size};
use crate::style::{LayoutProps, wire_enum};

wire_enum! {
    /// Direction in which children follow each other inside a run.
    pub enum FlexDir fallback Right {
        Left = 0,
        Up = 1,
        Right = 2,
        Down = 3,
    }
}

impl FlexDir {
    pub fn axis(self) -> Axis {
        match self {
            FlexDir::Up | FlexDir::Down => Axis::Y,
            FlexDir::Left | FlexDir::Right => Axis::X,
        }
    }

    fn is_reverse(self) -> bool {
        matches!(self, FlexDir::Left | FlexDir::Up)
    }
}

wire_enum! {
    /// Whether and in which direction runs are stacked.
    pub enum FlexWrap fallback None {
        None = 0,
        Forward = 1,
        Backward = 2,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flex {
    pub dir: FlexDir,
    pub wrap: FlexWrap,
}

#[derive(Debug, Clone, Copy)]
struct Run {
    start: usize,
    end: usize,
    total_width: f32,
    total_weight: f32,
    height: f32,
}

impl Flex {
    pub fn new(dir: FlexDir, wrap: FlexWrap) -> Self {
        Self { dir, wrap }
    }

    pub fn read(&mut self, r: &mut Reader<'_>) -> Result<()> {
        let mut mask = r.read_mask()?;
        if let Some(v) = r.field(&mut mask, Reader::read_u8)? {
            self.dir = FlexDir::from_wire(v);
        }
        if let Some(v) = r.field(&mut mask, Reader::read_u8)? {
            self.wrap = FlexWrap::from_wire(v);
        }
        Ok(())
    }

    /// Without wrapping the children form one run. With wrapping the
    /// narrowest layout puts each child on its own run.
    pub fn min_size(&self, props: &LayoutProps, children: &[SizerChild]) -> Size {
        if children.is_empty() {
            return Size::ZERO;
        }
        let x = self.dir.axis();
        let y = x.cross();
        let gaps = children.len() as f32 - 1.0;

        let mut size = Size::ZERO;
        let (stack, across) = if self.wrap == FlexWrap::None { (x, y) } else { (y, x) };
        size[stack] = children.iter().map(|c| c.min[stack]).sum::<f32>() + props.gap[stack] * gaps;
        size[across] = children.iter().map(|c| c.min[across]).fold(0.0, f32::max);
        size
    }

    pub fn layout(&self, props: &LayoutProps, children: &[SizerChild], rect: Rect) -> Vec<Rect> {
        let mut rects = vec![Rect::ZERO; children.len()];
        if children.is_empty() {
            return rects;
        }

        let x = self.dir.axis();
        let y = x.cross();
        let max_width = rect.size()[x];
        let max_height = rect.size()[y];

        let (mut runs, total_height) = self.partition(props, children, max_width);

        let x_reverse = self.dir.is_reverse();
        let y_reverse = self.wrap == FlexWrap::Backward;
        let x_flip = if x_reverse { -1.0 } else { 1.0 };
        let y_flip = if y_reverse { -1.0 } else { 1.0 };

        let mut vpos = if y_reverse { rect.end(y) } else { rect.start(y) };
        let mut vgap = props.gap[y];
        let cross = distribute(props.spacing(y), max_height - total_height, runs.len());
        vpos += cross.lead * y_flip;
        vgap += cross.gap;
        for run in &mut runs {
            run.height += cross.grow;
        }

        for run in &runs {
            if y_reverse {
                vpos -= run.height;
            }

            let mut hpos = if x_reverse { rect.end(x) } else { rect.start(x) };
            let mut hgap = props.gap[x];
            let extra_width = max_width - run.total_width;
            let mut grow = 0.0;
            if run.total_weight == 0.0 {
                let main = distribute(props.spacing(x), extra_width, run.end - run.start);
                hpos += main.lead * x_flip;
                hgap += main.gap;
                grow = main.grow;
            }

            for (index, child) in children.iter().enumerate().take(run.end).skip(run.start) {
                let mut width = child.min[x] + grow;
                if extra_width > 0.0 && child.weight != 0.0 {
                    width += child.weight / run.total_weight * extra_width;
                }
                if x_reverse {
                    hpos -= width;
                }

                let mut pos = Pos::ORIGIN;
                pos[x] = hpos;
                pos[y] = vpos;
                let mut size = Size::ZERO;
                size[x] = width;
                size[y] = run.height;
                rects[index] = Rect::from_pos_size(pos, size);

                if x_reverse {
                    hpos -= hgap;
                } else {
                    hpos += width + hgap;
                }
            }

            if y_reverse {
                vpos -= vgap;
            } else {
                vpos += run.height + vgap;
            }
        }

        rects
    }

    /// Split children into runs and return them with the stacked cross size.
    fn partition(&self, props: &LayoutProps, children: &[SizerChild], max_width: f32) -> (Vec<Run>, f32) {
        let x = self.dir.axis();
        let y = x.cross();
        let gap_x = props.gap[x];

        let mut runs = Vec::new();
        let mut total_height = -props.gap[y];
        let mut next = 0;
        while next < children.len() {
            let mut run = Run {
                start: next,
                end: next,
                total_width: -gap_x,
                total_weight: 0.0,
                height: 0.0,
            };
            while let Some(child) = children.get(next) {
                let new_total = run.total_width + gap_x + child.min[x];
                if self.wrap != FlexWrap::None && new_total > max_width && run.end > run.start {
                    break;
                }
                run.total_width = new_total;
                run.total_weight += child.weight;
                run.height = run.height.max(child.min[y]);
                next += 1;
                run.end = next;
            }
            total_height += props.gap[y] + run.height;
            runs.push(run);
        }
        (runs, total_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Spacing;

    fn child(width: f32, height: f32, weight: f32) -> SizerChild {
        SizerChild {
            pos: Pos::ORIGIN,
            span: Size::new(1.0, 1.0),
            weight,
            min: Size::new(width, height),
        }
    }

    fn props(gap: f32, hspacing: Spacing) -> LayoutProps {
        LayoutProps {
            gap: Size::splat(gap),
            hspacing,
            ..LayoutProps::default()
        }
    }

    fn widths(rects: &[Rect]) -> Vec<f32> {
        rects.iter().map(Rect::width).collect()
    }

    fn lefts(rects: &[Rect]) -> Vec<f32> {
        rects.iter().map(|r| r.left).collect()
    }

    #[test]
    fn test_weighted_child_takes_leftover() {
        let flex = Flex::new(FlexDir::Right, FlexWrap::None);
        let rects = flex.layout(
            &props(10.0, Spacing::After),
            &[child(50.0, 20.0, 0.0), child(100.0, 20.0, 1.0)],
            Rect::new(0.0, 0.0, 200.0, 20.0),
        );
        assert_eq!(widths(&rects), vec![50.0, 140.0]);
        assert_eq!(lefts(&rects), vec![0.0, 60.0]);
    }

    #[test]
    fn test_weights_split_proportionally() {
        let flex = Flex::default();
        let rects = flex.layout(
            &props(0.0, Spacing::After),
            &[child(0.0, 10.0, 1.0), child(0.0, 10.0, 3.0)],
            Rect::new(0.0, 0.0, 100.0, 10.0),
        );
        assert_eq!(widths(&rects), vec![25.0, 75.0]);
    }

    #[test]
    fn test_between_spacing_leaves_edges_flush() {
        let flex = Flex::default();
        let rects = flex.layout(
            &props(0.0, Spacing::Between),
            &[child(20.0, 10.0, 0.0), child(20.0, 10.0, 0.0), child(20.0, 10.0, 0.0)],
            Rect::new(0.0, 0.0, 100.0, 10.0),
        );
        assert_eq!(lefts(&rects), vec![0.0, 40.0, 80.0]);
        assert_eq!(rects[2].right, 100.0);
    }

    #[test]
    fn test_between_spacing_with_single_child_starts_at_edge() {
        let flex = Flex::default();
        let rects = flex.layout(
            &props(0.0, Spacing::Between),
            &[child(20.0, 10.0, 0.0)],
            Rect::new(5.0, 0.0, 100.0, 10.0),
        );
        assert_eq!(lefts(&rects), vec![5.0]);
    }

    #[test]
    fn test_spacing_ignored_when_run_has_weight() {
        let flex = Flex::default();
        let rects = flex.layout(
            &props(0.0, Spacing::Before),
            &[child(10.0, 10.0, 0.0), child(10.0, 10.0, 1.0)],
            Rect::new(0.0, 0.0, 50.0, 10.0),
        );
        assert_eq!(lefts(&rects), vec![0.0, 10.0]);
        assert_eq!(widths(&rects), vec![10.0, 40.0]);
    }

    #[test]
    fn test_remove_spacing_grows_every_child() {
        let flex = Flex::default();
        let rects = flex.layout(
            &props(0.0, Spacing::Remove),
            &[child(10.0, 10.0, 0.0), child(30.0, 10.0, 0.0)],
            Rect::new(0.0, 0.0, 60.0, 10.0),
        );
        assert_eq!(widths(&rects), vec![20.0, 40.0]);
    }

    #[test]
    fn test_wrap_starts_new_runs() {
        let flex = Flex::new(FlexDir::Right, FlexWrap::Forward);
        let rects = flex.layout(
            &props(0.0, Spacing::After),
            &[child(60.0, 10.0, 0.0), child(40.0, 10.0, 0.0), child(60.0, 15.0, 0.0)],
            Rect::new(0.0, 0.0, 100.0, 100.0),
        );
        // 60 + 40 fits exactly; the third child would exceed.
        assert_eq!(lefts(&rects), vec![0.0, 60.0, 0.0]);
        assert_eq!(rects.iter().map(|r| r.top).collect::<Vec<_>>(), vec![0.0, 0.0, 10.0]);
        assert_eq!(rects[2].height(), 15.0);
    }

    #[test]
    fn test_oversized_child_keeps_its_own_run() {
        let flex = Flex::new(FlexDir::Right, FlexWrap::Forward);
        let rects = flex.layout(
            &props(0.0, Spacing::After),
            &[child(300.0, 10.0, 0.0), child(300.0, 10.0, 0.0), child(20.0, 10.0, 0.0)],
            Rect::new(0.0, 0.0, 100.0, 100.0),
        );
        assert_eq!(rects.len(), 3);
        assert_eq!(widths(&rects), vec![300.0, 300.0, 20.0]);
        assert_eq!(rects.iter().map(|r| r.top).collect::<Vec<_>>(), vec![0.0, 10.0, 20.0]);
    }

    #[test]
    fn test_reverse_direction_starts_at_far_edge() {
        let flex = Flex::new(FlexDir::Left, FlexWrap::None);
        let rects = flex.layout(
            &props(0.0, Spacing::After),
            &[child(50.0, 10.0, 0.0), child(50.0, 10.0, 0.0)],
            Rect::new(0.0, 0.0, 200.0, 10.0),
        );
        assert_eq!(rects[0], Rect::new(150.0, 0.0, 200.0, 10.0));
        assert_eq!(rects[1], Rect::new(100.0, 0.0, 150.0, 10.0));
    }

    #[test]
    fn test_backward_wrap_stacks_from_bottom() {
        let flex = Flex::new(FlexDir::Right, FlexWrap::Backward);
        let rects = flex.layout(
            &props(0.0, Spacing::After),
            &[child(80.0, 10.0, 0.0), child(80.0, 20.0, 0.0)],
            Rect::new(0.0, 0.0, 100.0, 100.0),
        );
        assert_eq!(rects[0], Rect::new(0.0, 90.0, 80.0, 100.0));
        assert_eq!(rects[1], Rect::new(0.0, 70.0, 80.0, 90.0));
    }

    #[test]
    fn test_vertical_direction_uses_y_as_main_axis() {
        let flex = Flex::new(FlexDir::Down, FlexWrap::None);
        let layout = LayoutProps {
            gap: Size::new(0.0, 5.0),
            ..LayoutProps::default()
        };
        let rects = flex.layout(
            &layout,
            &[child(30.0, 10.0, 0.0), child(20.0, 10.0, 0.0)],
            Rect::new(0.0, 0.0, 40.0, 100.0),
        );
        assert_eq!(rects[0], Rect::new(0.0, 0.0, 30.0, 10.0));
        assert_eq!(rects[1], Rect::new(0.0, 15.0, 30.0, 25.0));
    }

    #[test]
    fn test_cross_axis_spacing_centers_runs() {
        let flex = Flex::default();
        let layout = LayoutProps {
            vspacing: Spacing::Outside,
            ..LayoutProps::default()
        };
        let rects = flex.layout(&layout, &[child(10.0, 10.0, 0.0)], Rect::new(0.0, 0.0, 10.0, 50.0));
        assert_eq!(rects[0].top, 20.0);
    }

    #[test]
    fn test_zero_children_is_a_no_op() {
        let flex = Flex::new(FlexDir::Up, FlexWrap::Forward);
        let layout = props(10.0, Spacing::Between);
        assert!(flex.layout(&layout, &[], Rect::new(0.0, 0.0, 100.0, 100.0)).is_empty());
        assert_eq!(flex.min_size(&layout, &[]), Size::ZERO);
    }

    #[test]
    fn test_min_size_depends_on_wrap() {
        let layout = props(10.0, Spacing::After);
        let children = [child(50.0, 20.0, 0.0), child(100.0, 30.0, 1.0)];
        assert_eq!(Flex::default().min_size(&layout, &children), Size::new(160.0, 30.0));
        assert_eq!(
            Flex::new(FlexDir::Right, FlexWrap::Forward).min_size(&layout, &children),
            Size::new(100.0, 60.0)
        );
    }

    #[test]
    fn test_unknown_wire_values_fall_back() {
        assert_eq!(FlexDir::from_wire(9), FlexDir::Right);
        assert_eq!(FlexWrap::from_wire(9), FlexWrap::None);
    }
}
