//! Pairwise bounding-box resolution between two entity groups.

use crate::entities::{EntityGroup, EntityRef};
use crate::physics::Aabb;

/// Calls `on_hit` for every overlapping pair of live members of `a` and `b`.
///
/// Both groups are snapshotted before any callback runs, so pairs are
/// evaluated against start-of-pass positions. A pair is skipped when either
/// side was destroyed by an earlier callback in the same pass, which makes a
/// second laser hitting an already-dead enemy a no-op. Returns the number of
/// callbacks made.
pub fn resolve<A, B, F>(a: &mut EntityGroup<A>, b: &mut EntityGroup<B>, mut on_hit: F) -> usize
where
    F: FnMut(&mut EntityGroup<A>, EntityRef<A>, &mut EntityGroup<B>, EntityRef<B>),
{
    let snapshot_a: Vec<(EntityRef<A>, Aabb)> = a.iter().map(|(r, e)| (r, e.bounds())).collect();
    let snapshot_b: Vec<(EntityRef<B>, Aabb)> = b.iter().map(|(r, e)| (r, e.bounds())).collect();

    let mut hits = 0;
    for (ref_a, box_a) in &snapshot_a {
        for (ref_b, box_b) in &snapshot_b {
            if !box_a.intersects(box_b) {
                continue;
            }
            if !a.is_alive(*ref_a) || !b.is_alive(*ref_b) {
                continue;
            }
            on_hit(a, *ref_a, b, *ref_b);
            hits += 1;
        }
    }
    hits
}

/// The usual hit response: both sides are destroyed.
pub fn destroy_both<A, B>(
    a: &mut EntityGroup<A>,
    ref_a: EntityRef<A>,
    b: &mut EntityGroup<B>,
    ref_b: EntityRef<B>,
) {
    a.destroy(ref_a);
    b.destroy(ref_b);
}
