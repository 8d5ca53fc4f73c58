/// Scroll position of a view, in layout coordinates.
///
/// Captured when a marker is pushed and handed back unchanged when it is
/// popped. The host decides what the coordinates mean; the stack only stores
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportState {
	/// Horizontal scroll offset.
	pub x: f64,
	/// Vertical scroll offset.
	pub y: f64,
}

impl ViewportState {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// A viewport scrolled vertically only.
	pub const fn vertical(y: f64) -> Self {
		Self { x: 0.0, y }
	}

	/// Both offsets are finite numbers.
	pub fn is_finite(&self) -> bool {
		self.x.is_finite() && self.y.is_finite()
	}

	/// This viewport with any non-finite offset replaced by zero.
	pub fn finite_or_zero(self) -> Self {
		let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
		Self {
			x: finite(self.x),
			y: finite(self.y),
		}
	}
}

impl From<(f64, f64)> for ViewportState {
	fn from((x, y): (f64, f64)) -> Self {
		Self { x, y }
	}
}

impl From<ViewportState> for (f64, f64) {
	fn from(vp: ViewportState) -> Self {
		(vp.x, vp.y)
	}
}
