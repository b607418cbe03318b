/// Pointer tracking: device pixels to a normalized [-1, 1] vector
use std::cell::Cell;
use std::rc::Rc;

/// Most recent pointer position, normalized to [-1, 1] on both axes.
///
/// `y` points up, so the top edge of the viewport is `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerVector {
    pub x: f64,
    pub y: f64,
}

impl PointerVector {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn center() -> Self {
        Self::default()
    }
}

/// Map raw pointer coordinates to a [`PointerVector`].
///
/// Inputs are not validated: a zero viewport dimension or a non-finite
/// coordinate yields NaN or infinite components. Callers that can see such
/// input should guard before calling.
pub fn track(raw_x: f64, raw_y: f64, viewport_width: f64, viewport_height: f64) -> PointerVector {
    PointerVector {
        x: (raw_x / viewport_width) * 2.0 - 1.0,
        y: -((raw_y / viewport_height) * 2.0 - 1.0),
    }
}

/// Shared handle to the latest pointer vector.
///
/// One side writes (the pointer-move handler), the other reads once per
/// frame (the orientation tick). Everything runs on one thread, so a plain
/// `Cell` is enough; cloning the handle shares the same slot.
#[derive(Debug, Clone, Default)]
pub struct PointerCell {
    slot: Rc<Cell<PointerVector>>,
}

impl PointerCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a raw pointer position and overwrite the shared slot.
    pub fn update(&self, raw_x: f64, raw_y: f64, viewport_width: f64, viewport_height: f64) -> PointerVector {
        let pointer = track(raw_x, raw_y, viewport_width, viewport_height);
        self.slot.set(pointer);
        pointer
    }

    pub fn set(&self, pointer: PointerVector) {
        self.slot.set(pointer);
    }

    pub fn get(&self) -> PointerVector {
        self.slot.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_corners() {
        let top_left = track(0.0, 0.0, 800.0, 600.0);
        assert_eq!(top_left, PointerVector::new(-1.0, 1.0));

        let bottom_right = track(800.0, 600.0, 800.0, 600.0);
        assert_eq!(bottom_right, PointerVector::new(1.0, -1.0));

        let middle = track(400.0, 300.0, 800.0, 600.0);
        assert!(middle.x.abs() < 1e-12);
        assert!(middle.y.abs() < 1e-12);
    }

    #[test]
    fn test_right_edge_middle_row() {
        let pointer = track(1000.0, 500.0, 1000.0, 1000.0);
        assert!((pointer.x - 1.0).abs() < 1e-12);
        assert!(pointer.y.abs() < 1e-12);
    }

    #[test]
    fn test_zero_viewport_is_not_guarded() {
        let pointer = track(10.0, 0.0, 0.0, 0.0);
        assert!(pointer.x.is_infinite());
        assert!(pointer.y.is_nan());
    }

    #[test]
    fn test_cell_handles_share_state() {
        let writer = PointerCell::new();
        let reader = writer.clone();
        assert_eq!(reader.get(), PointerVector::center());

        writer.update(0.0, 0.0, 100.0, 100.0);
        assert_eq!(reader.get(), PointerVector::new(-1.0, 1.0));

        writer.update(100.0, 100.0, 100.0, 100.0);
        assert_eq!(reader.get(), PointerVector::new(1.0, -1.0));
    }

    proptest! {
        #[test]
        fn prop_in_viewport_maps_to_unit_square(
            w in 1.0f64..10_000.0,
            h in 1.0f64..10_000.0,
            fx in 0.0f64..=1.0,
            fy in 0.0f64..=1.0,
        ) {
            let pointer = track(fx * w, fy * h, w, h);
            prop_assert!((-1.0..=1.0).contains(&pointer.x));
            prop_assert!((-1.0..=1.0).contains(&pointer.y));
        }

        #[test]
        fn prop_track_is_pure(
            w in 1.0f64..4096.0,
            h in 1.0f64..4096.0,
            x in 0.0f64..4096.0,
            y in 0.0f64..4096.0,
            ox in 0.0f64..4096.0,
            oy in 0.0f64..4096.0,
        ) {
            let first = track(x, y, w, h);
            let cell = PointerCell::new();
            cell.update(ox, oy, w, h);
            let second = cell.update(x, y, w, h);
            prop_assert_eq!(first, second);
        }
    }
}
