use crate::angle::{angular_distance, normalize_angle};
use crate::aspects::types::{Aspect, AspectMotion, AspectPair, AspectTable, EXACT_THRESHOLD};
use crate::ephemeris::BodyPosition;

/// Days to project positions forward when sampling aspect motion.
pub const MOTION_STEP_DAYS: f64 = 0.1;

/// Best aspect formed by two longitudes, if any.
///
/// Every table entry whose angle lies within its orb of the separation is a
/// candidate; the smallest deviation wins, and on equal deviation the entry
/// listed first. The result carries no motion.
pub fn find_aspect(lon_a: f64, lon_b: f64, table: &AspectTable) -> Option<Aspect> {
    let separation = angular_distance(lon_a, lon_b);

    let mut best: Option<Aspect> = None;
    for def in table.iter() {
        let deviation = (separation - def.angle()).abs();
        if deviation > def.orb() {
            continue;
        }
        if best.is_some_and(|b| b.deviation <= deviation) {
            continue;
        }
        best = Some(Aspect {
            kind: def.kind(),
            angle: def.angle(),
            orb: def.orb(),
            separation,
            deviation,
            strength: ((def.orb() - deviation) / def.orb()).max(0.0),
            exact: deviation < EXACT_THRESHOLD,
            motion: None,
        });
    }
    best
}

/// Aspect between two positioned bodies, with motion when both have speeds.
pub fn match_aspect(a: &BodyPosition, b: &BodyPosition, table: &AspectTable) -> Option<Aspect> {
    let mut aspect = find_aspect(a.lon, b.lon, table)?;
    if let (Some(speed_a), Some(speed_b)) = (a.speed_lon, b.speed_lon) {
        aspect.motion = Some(classify_motion(
            a.lon,
            b.lon,
            normalize_angle(a.lon + speed_a * MOTION_STEP_DAYS),
            normalize_angle(b.lon + speed_b * MOTION_STEP_DAYS),
            aspect.angle,
        ));
    }
    Some(aspect)
}

/// Applying when the later pair of samples is closer to `angle` than the
/// earlier pair, separating otherwise (including no change).
pub fn classify_motion(now_a: f64, now_b: f64, next_a: f64, next_b: f64, angle: f64) -> AspectMotion {
    let now = (angular_distance(now_a, now_b) - angle).abs();
    let next = (angular_distance(next_a, next_b) - angle).abs();
    if next < now {
        AspectMotion::Applying
    } else {
        AspectMotion::Separating
    }
}

/// Aspects among every unordered pair of `positions`.
///
/// Sorted by ascending deviation; pairs with equal deviation keep the
/// enumeration order (i < j, i outer).
pub fn all_aspects(positions: &[BodyPosition], table: &AspectTable) -> Vec<AspectPair> {
    let mut pairs = Vec::new();
    for (i, a) in positions.iter().enumerate() {
        for b in &positions[i + 1..] {
            if let Some(aspect) = match_aspect(a, b, table) {
                pairs.push(AspectPair {
                    from: a.body,
                    to: b.body,
                    aspect,
                });
            }
        }
    }
    sort_by_deviation(&mut pairs);
    pairs
}

/// Aspects from every body in `from` to every body in `to`.
///
/// The same body on both sides is still compared (a transiting Sun to the
/// natal Sun). Ordering follows `all_aspects`.
pub fn cross_aspects(
    from: &[BodyPosition],
    to: &[BodyPosition],
    table: &AspectTable,
) -> Vec<AspectPair> {
    let mut pairs = Vec::new();
    for a in from {
        for b in to {
            if let Some(aspect) = match_aspect(a, b, table) {
                pairs.push(AspectPair {
                    from: a.body,
                    to: b.body,
                    aspect,
                });
            }
        }
    }
    sort_by_deviation(&mut pairs);
    pairs
}

fn sort_by_deviation(pairs: &mut [AspectPair]) {
    // sort_by is stable
    pairs.sort_by(|x, y| x.aspect.deviation.total_cmp(&y.aspect.deviation));
}

/// Aspect calculator bound to one table.
#[derive(Debug, Clone, Default)]
pub struct AspectCalculator {
    table: AspectTable,
}

impl AspectCalculator {
    pub fn new(table: AspectTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &AspectTable {
        &self.table
    }

    pub fn calculate_aspect(&self, lon_a: f64, lon_b: f64) -> Option<Aspect> {
        find_aspect(lon_a, lon_b, &self.table)
    }

    pub fn compute_aspects(&self, positions: &[BodyPosition]) -> Vec<AspectPair> {
        all_aspects(positions, &self.table)
    }

    pub fn compute_cross_aspects(&self, from: &[BodyPosition], to: &[BodyPosition]) -> Vec<AspectPair> {
        cross_aspects(from, to, &self.table)
    }
}
