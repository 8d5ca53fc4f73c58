use markstack_primitives::{ChangeSet, LineCol, Rope};
use proptest::prelude::*;

use super::{MarkerCanvas, MarkerStack};
use crate::anchor::Marker;
use crate::gutter::{GutterIcon, MemoryGutter};
use crate::viewport::ViewportState;

fn icon() -> GutterIcon {
	GutterIcon {
		path: "icon.png".into(),
		color: "region.purplish".into(),
	}
}

fn doc(lines: usize) -> Rope {
	Rope::from("0123456789\n".repeat(lines))
}

#[test]
fn push_then_pop_returns_entries_in_reverse() {
	let text = doc(60);
	let icon = icon();
	let mut gutter = MemoryGutter::new();
	let mut stack = MarkerStack::new();

	let first = LineCol::new(10, 0).to_char(text.slice(..));
	let second = LineCol::new(50, 4).to_char(text.slice(..));
	{
		let mut canvas = MarkerCanvas::new(text.slice(..), &mut gutter, &icon);
		stack.push(first, ViewportState::vertical(100.0), &mut canvas);
		stack.push(second, ViewportState::vertical(400.0), &mut canvas);
	}
	assert_eq!(stack.len(), 2);
	assert_eq!(gutter.lines(), vec![10, 50]);

	let mut canvas = MarkerCanvas::new(text.slice(..), &mut gutter, &icon);
	assert_eq!(
		stack.pop(&mut canvas),
		Some(Marker::new(second, ViewportState::vertical(400.0)))
	);
	assert_eq!(
		stack.pop(&mut canvas),
		Some(Marker::new(first, ViewportState::vertical(100.0)))
	);
	assert_eq!(stack.pop(&mut canvas), None);
	assert!(stack.is_empty());
	assert!(gutter.is_empty());
}

#[test]
fn push_stores_non_finite_offsets_as_zero() {
	let text = doc(3);
	let icon = icon();
	let mut gutter = MemoryGutter::new();
	let mut stack = MarkerStack::new();

	let mut canvas = MarkerCanvas::new(text.slice(..), &mut gutter, &icon);
	stack.push(4, ViewportState::new(f64::INFINITY, f64::NAN), &mut canvas);
	stack.push(5, ViewportState::new(3.0, f64::NEG_INFINITY), &mut canvas);

	let viewports: Vec<ViewportState> = stack.markers().map(|m| m.viewport).collect();
	assert_eq!(viewports, vec![ViewportState::default(), ViewportState::new(3.0, 0.0)]);
}

#[test]
fn pop_on_empty_is_noop() {
	let text = doc(3);
	let icon = icon();
	let mut gutter = MemoryGutter::new();
	let mut stack = MarkerStack::new();

	let mut canvas = MarkerCanvas::new(text.slice(..), &mut gutter, &icon);
	assert_eq!(stack.pop(&mut canvas), None);
	assert_eq!(stack, MarkerStack::new());
	assert!(gutter.is_empty());
}

#[test]
fn coinciding_positions_keep_separate_slots_and_glyphs() {
	let text = doc(5);
	let icon = icon();
	let mut gutter = MemoryGutter::new();
	let mut stack = MarkerStack::new();
	{
		let mut canvas = MarkerCanvas::new(text.slice(..), &mut gutter, &icon);
		for _ in 0..3 {
			stack.push(22, ViewportState::default(), &mut canvas);
		}
	}
	assert_eq!(stack.len(), 3);
	assert_eq!(gutter.len(), 3);
	assert_eq!(gutter.lines(), vec![2, 2, 2]);

	let mut canvas = MarkerCanvas::new(text.slice(..), &mut gutter, &icon);
	stack.pop(&mut canvas);
	assert_eq!(gutter.len(), 2);
	assert_eq!(gutter.line("_marker_stack_icon_2"), None);
	assert_eq!(gutter.line("_marker_stack_icon_1"), Some(2));
}

#[test]
fn render_follows_anchors_after_edit() {
	let mut text = doc(20);
	let icon = icon();
	let mut gutter = MemoryGutter::new();
	let mut stack = MarkerStack::new();

	let pos = LineCol::new(10, 0).to_char(text.slice(..));
	stack.push(
		pos,
		ViewportState::default(),
		&mut MarkerCanvas::new(text.slice(..), &mut gutter, &icon),
	);

	let cs = ChangeSet::insert_at(text.slice(..), 0, "new\nlines\n");
	cs.apply(&mut text);
	assert!(stack.apply_changes(&cs));
	stack.render(&mut MarkerCanvas::new(text.slice(..), &mut gutter, &icon));

	assert_eq!(gutter.line("_marker_stack_icon_0"), Some(12));
	assert_eq!(stack.top().map(|m| m.position), Some(pos + 10));
}

#[test]
fn render_does_not_change_contents() {
	let text = doc(10);
	let icon = icon();
	let mut gutter = MemoryGutter::new();
	let mut stack = MarkerStack::new();
	{
		let mut canvas = MarkerCanvas::new(text.slice(..), &mut gutter, &icon);
		stack.push(5, ViewportState::vertical(1.0), &mut canvas);
		stack.push(40, ViewportState::vertical(2.0), &mut canvas);
	}
	let before = stack.clone();
	stack.render(&mut MarkerCanvas::new(text.slice(..), &mut gutter, &icon));
	assert_eq!(stack, before);
	assert_eq!(gutter.len(), 2);
}

#[test]
fn from_markers_clamps_positions() {
	let text = Rope::from("tiny");
	let stack = MarkerStack::from_markers(
		[
			Marker::new(2, ViewportState::default()),
			Marker::new(500, ViewportState::vertical(9.0)),
		],
		text.slice(..),
	);
	let markers: Vec<_> = stack.markers().collect();
	assert_eq!(markers[0].position, 2);
	assert_eq!(markers[1].position, 4);
	assert_eq!(markers[1].viewport, ViewportState::vertical(9.0));
}

#[test]
fn erase_glyphs_keeps_entries() {
	let text = doc(4);
	let icon = icon();
	let mut gutter = MemoryGutter::new();
	let mut stack = MarkerStack::new();
	stack.push(
		3,
		ViewportState::default(),
		&mut MarkerCanvas::new(text.slice(..), &mut gutter, &icon),
	);
	stack.erase_glyphs(&mut gutter);
	assert!(gutter.is_empty());
	assert_eq!(stack.len(), 1);
}

proptest! {
	#[test]
	fn prop_pops_reverse_pushes(positions in proptest::collection::vec((0usize..110, 0.0f64..5000.0), 0..40)) {
		let text = doc(10);
		let icon = icon();
		let mut gutter = MemoryGutter::new();
		let mut stack = MarkerStack::new();

		for (pos, y) in &positions {
			stack.push(*pos, ViewportState::vertical(*y), &mut MarkerCanvas::new(text.slice(..), &mut gutter, &icon));
			prop_assert_eq!(gutter.len(), stack.len());
		}

		for (pos, y) in positions.iter().rev() {
			let popped = stack.pop(&mut MarkerCanvas::new(text.slice(..), &mut gutter, &icon));
			prop_assert_eq!(popped, Some(Marker::new(*pos, ViewportState::vertical(*y))));
			prop_assert_eq!(gutter.len(), stack.len());
		}

		prop_assert_eq!(stack.pop(&mut MarkerCanvas::new(text.slice(..), &mut gutter, &icon)), None);
	}
}
