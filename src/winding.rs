//! Orientation of polygons.
//!
//! The mesh builder never looks at coordinates directly. Whenever it needs to
//! know the orientation of something (a polygon, or three vertices around a
//! center vertex), it asks a [`WindingProvider`] with a list of *input vertex
//! indices*. Usually this provider is derived from 2D coordinates (see
//! [`Coord2Source::winding`][crate::source::Coord2Source::winding]) but any
//! closure `Fn(&[usize]) -> Winding` works, too.

use cgmath::Point2;
use derive_more::Display;
use num_traits::Float;


/// The rotational direction of a closed polygon.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub enum Winding {
    #[display(fmt = "clockwise")]
    Clockwise,
    #[display(fmt = "counterclockwise")]
    CounterClockwise,

    /// The polygon is degenerate (e.g. all points are collinear).
    #[display(fmt = "undetermined")]
    Undetermined,
}

impl Winding {
    /// Returns the opposite winding. `Undetermined` stays `Undetermined`.
    pub fn reverse(self) -> Self {
        match self {
            Winding::Clockwise => Winding::CounterClockwise,
            Winding::CounterClockwise => Winding::Clockwise,
            Winding::Undetermined => Winding::Undetermined,
        }
    }

    /// Calculates the winding of the given polygon via its signed area
    /// (shoelace formula).
    ///
    /// The y axis is assumed to point up: `(0, 0), (1, 0), (0, 1)` is counter
    /// clockwise. Panics if fewer than three points are given.
    pub fn of_polygon<S, I>(points: I) -> Self
    where
        S: Float,
        I: IntoIterator<Item = Point2<S>>,
        I::IntoIter: Clone,
    {
        let points = points.into_iter();
        let mut next_points = points.clone().cycle().skip(1);

        let mut count = 0;
        let mut signed_area = S::zero();
        for p0 in points {
            // `cycle` never runs out if there is at least one point.
            let p1 = match next_points.next() {
                Some(p) => p,
                None => break,
            };
            signed_area = signed_area + (p0.y * p1.x - p0.x * p1.y);
            count += 1;
        }

        if count < 3 {
            panic!("insufficient number of points to determine a winding: {}", count);
        }

        if signed_area > S::zero() {
            Winding::Clockwise
        } else if signed_area < S::zero() {
            Winding::CounterClockwise
        } else {
            Winding::Undetermined
        }
    }
}

/// Determines the winding of polygons given by input vertex indices.
pub trait WindingProvider {
    /// Returns the winding of the polygon formed by the given vertices (in
    /// that order).
    fn winding(&self, vertex_indices: &[usize]) -> Winding;

    /// Returns a provider that reports the reverse of what `self` reports.
    fn reversed(self) -> Reversed<Self>
    where
        Self: Sized,
    {
        Reversed(self)
    }
}

impl<F> WindingProvider for F
where
    F: Fn(&[usize]) -> Winding,
{
    fn winding(&self, vertex_indices: &[usize]) -> Winding {
        self(vertex_indices)
    }
}

/// A winding provider reporting the reverse winding of the wrapped one.
///
/// Useful for coordinate systems in which the y axis points down.
#[derive(Clone, Copy, Debug)]
pub struct Reversed<W>(pub W);

impl<W: WindingProvider> WindingProvider for Reversed<W> {
    fn winding(&self, vertex_indices: &[usize]) -> Winding {
        self.0.winding(vertex_indices).reverse()
    }
}
