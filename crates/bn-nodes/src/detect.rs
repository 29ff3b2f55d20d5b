//! Sphere-overlap target detection.

use bn_behavior::{Behavior, PhaseSet, TickContext};
use bn_cell::CellId;
use bn_core::{EntityId, LayerMask};

/// Which candidate wins when several match.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum TargetPick {
    /// The last match in query-result order.
    #[default]
    Last,
    /// The match closest to the owner.  Ties keep the earlier candidate.
    Nearest,
}

/// Every tick: clear `outputs`, query the host for entities within `range`
/// of `owner` on `mask`, keep candidates whose tag is in `tags` and write the
/// winner's handle into every output cell.
///
/// With no match every output holds `EntityId::INVALID` for the tick.
pub struct DetectTargets {
    pub owner:   EntityId,
    pub range:   f32,
    pub tags:    Vec<String>,
    pub mask:    LayerMask,
    pub outputs: Vec<CellId<EntityId>>,
    pub pick:    TargetPick,
}

impl DetectTargets {
    pub fn new(owner: EntityId, range: f32, outputs: Vec<CellId<EntityId>>) -> Self {
        Self {
            owner,
            range,
            tags: Vec::new(),
            mask: LayerMask::ALL,
            outputs,
            pick: TargetPick::Last,
        }
    }

    pub fn with_tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_mask(mut self, mask: LayerMask) -> Self {
        self.mask = mask;
        self
    }

    pub fn with_pick(mut self, pick: TargetPick) -> Self {
        self.pick = pick;
        self
    }

    fn matches(&self, tag: Option<&str>) -> bool {
        tag.is_some_and(|t| self.tags.iter().any(|allowed| allowed == t))
    }
}

impl Behavior for DetectTargets {
    fn name(&self) -> &str {
        "detect_targets"
    }

    fn phases(&self) -> PhaseSet {
        PhaseSet::TICK
    }

    fn on_tick(&mut self, ctx: &mut TickContext<'_>) {
        ctx.cells.clear_all(&self.outputs);

        let Some(center) = ctx.host.position(self.owner) else {
            return;
        };
        let hits = ctx.host.overlap_sphere(center, self.range, self.mask);
        let candidates = hits
            .into_iter()
            .filter(|&e| e != self.owner && self.matches(ctx.host.tag(e)));

        let winner = match self.pick {
            TargetPick::Last => candidates.last(),
            TargetPick::Nearest => {
                let mut best: Option<(f32, EntityId)> = None;
                for e in candidates {
                    let Some(p) = ctx.host.position(e) else { continue };
                    let d2 = p.distance_squared(center);
                    if best.is_none_or(|(bd, _)| d2 < bd) {
                        best = Some((d2, e));
                    }
                }
                best.map(|(_, e)| e)
            }
        };

        if let Some(target) = winner {
            ctx.cells.write_all(&self.outputs, &target);
        }
    }
}
