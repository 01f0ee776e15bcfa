#![allow(missing_docs)]

//! Property-based tests for the geometric primitives.

use meshlight::prelude::*;
use proptest::prelude::*;

/// Twice the signed area of a triangle; zero means collinear.
fn doubled_area(a: &Point, b: &Point, c: &Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn coordinate() -> impl Strategy<Value = f64> {
    -100.0..100.0f64
}

proptest! {
    /// The circumcenter is equidistant from all three points, and that
    /// distance is the returned radius.
    #[test]
    fn circumcenter_is_equidistant(
        ax in coordinate(), ay in coordinate(),
        bx in coordinate(), by in coordinate(),
        cx in coordinate(), cy in coordinate(),
    ) {
        let a = Point::new(ax, ay);
        let b = Point::new(bx, by);
        let c = Point::new(cx, cy);
        // Thin triangles blow up the conditioning of the closed form; keep
        // a real area so the tolerance below is meaningful.
        prop_assume!(doubled_area(&a, &b, &c).abs() > 1.0);

        let circle = circumcircle(&a, &b, &c).unwrap();
        for p in [a, b, c] {
            let distance = circle.center.distance_to(&p);
            prop_assert!(
                (distance - circle.radius).abs() <= 1e-6 * circle.radius.max(1.0),
                "distance {distance} != radius {} for {p:?}",
                circle.radius
            );
        }
    }

    /// Vertex order does not change the circumcircle (up to tolerance).
    #[test]
    fn circumcircle_is_order_independent(
        ax in coordinate(), ay in coordinate(),
        bx in coordinate(), by in coordinate(),
        cx in coordinate(), cy in coordinate(),
    ) {
        let a = Point::new(ax, ay);
        let b = Point::new(bx, by);
        let c = Point::new(cx, cy);
        prop_assume!(doubled_area(&a, &b, &c).abs() > 1.0);

        let first = circumcircle(&a, &b, &c).unwrap();
        let second = circumcircle(&c, &a, &b).unwrap();
        let slack = 1e-6 * first.radius.max(1.0);
        prop_assert!(first.center.distance_to(&second.center) <= slack);
        prop_assert!((first.radius - second.radius).abs() <= slack);
    }

    /// Containment is a pure function of its inputs.
    #[test]
    fn containment_is_idempotent(
        ax in coordinate(), ay in coordinate(),
        bx in coordinate(), by in coordinate(),
        cx in coordinate(), cy in coordinate(),
        px in coordinate(), py in coordinate(),
    ) {
        let a = Point::new(ax, ay);
        let b = Point::new(bx, by);
        let c = Point::new(cx, cy);
        let p = Point::new(px, py);
        prop_assume!(doubled_area(&a, &b, &c).abs() > 1e-9);

        let first = triangle_contains(&a, &b, &c, &p);
        for _ in 0..8 {
            prop_assert_eq!(triangle_contains(&a, &b, &c, &p), first);
        }
    }

    /// A convex combination strictly inside the triangle is contained.
    #[test]
    fn strict_interior_points_are_contained(
        ax in coordinate(), ay in coordinate(),
        bx in coordinate(), by in coordinate(),
        cx in coordinate(), cy in coordinate(),
        wa in 0.05..0.9f64, wb in 0.05..0.9f64,
    ) {
        let a = Point::new(ax, ay);
        let b = Point::new(bx, by);
        let c = Point::new(cx, cy);
        prop_assume!(doubled_area(&a, &b, &c).abs() > 1.0);
        prop_assume!(wa + wb < 0.95);

        let wc = 1.0 - wa - wb;
        let p = Point::new(
            wa * a.x + wb * b.x + wc * c.x,
            wa * a.y + wb * b.y + wc * c.y,
        );
        prop_assert!(triangle_contains(&a, &b, &c, &p));
    }

    /// A vertex inserted strictly inside the seed triangle always yields
    /// the three-triangle fan.
    #[test]
    fn interior_insertion_yields_a_fan(
        wa in 0.1..0.8f64, wb in 0.1..0.8f64,
    ) {
        prop_assume!(wa + wb < 0.9);
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        let c = Point::new(5.0, 10.0);
        let wc = 1.0 - wa - wb;
        let interior = Point::new(
            wa * a.x + wb * b.x + wc * c.x,
            wa * a.y + wb * b.y + wc * c.y,
        );

        let tri = Triangulation::build(vec![a, b, c, interior]).unwrap();
        prop_assert_eq!(tri.number_of_triangles(), 3);
        for (_, triangle) in tri.triangles() {
            prop_assert!(triangle.has_vertex(3));
        }
    }
}
