//! Accessory fragments.
//!
//! Every accessory sits at its own fixed position. Selecting several never
//! moves any of them, and the output depends only on set membership.

use super::{DrawFn, Element, LayerKind, LayerRule, Paint, RenderContext};
use crate::config::{Accessory, AccessorySet};

const RULES: &[(Accessory, DrawFn)] = &[
    (Accessory::Glasses, draw_glasses),
    (Accessory::Hat, draw_hat),
    (Accessory::Earrings, draw_earrings),
    (Accessory::Necklace, draw_necklace),
    (Accessory::Watch, draw_watch),
];

const GOLD: &str = "#ffcc00";

/// Draws every selected accessory, in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessoryRule {
    pub accessories: AccessorySet,
}

impl AccessoryRule {
    pub fn new(accessories: AccessorySet) -> Self {
        Self { accessories }
    }
}

impl LayerRule for AccessoryRule {
    fn kind(&self) -> LayerKind {
        LayerKind::Accessory
    }

    fn draw(&self, ctx: &mut RenderContext<'_>) {
        // Iterate the table rather than the set so draw order is fixed.
        for (accessory, draw) in RULES {
            if self.accessories.contains(accessory) {
                draw(ctx);
            }
        }

        for unknown in self.accessories.iter().filter(|a| a.is_unknown()) {
            tracing::debug!(accessory = unknown.as_str(), "skipping unknown accessory");
        }
    }
}

fn draw_glasses(ctx: &mut RenderContext<'_>) {
    for cx in [40.0, 60.0] {
        ctx.push(
            LayerKind::Accessory,
            "glasses",
            Element::circle(cx, 35.0, 5.0),
            Paint::outline("#000000", 1.0),
        );
    }
    ctx.push(
        LayerKind::Accessory,
        "glasses",
        Element::line(45.0, 35.0, 55.0, 35.0),
        Paint::stroke("#000000", 1.0),
    );
}

fn draw_hat(ctx: &mut RenderContext<'_>) {
    ctx.push(
        LayerKind::Accessory,
        "hat",
        Element::path("M30 20 L70 20 L50 5 Z"),
        Paint::fill("#444444"),
    );
}

fn draw_earrings(ctx: &mut RenderContext<'_>) {
    for cx in [20.0, 80.0] {
        ctx.push(LayerKind::Accessory, "earrings", Element::circle(cx, 40.0, 3.0), Paint::fill(GOLD));
    }
}

fn draw_necklace(ctx: &mut RenderContext<'_>) {
    ctx.push(
        LayerKind::Accessory,
        "necklace",
        Element::path("M35 60 Q50 65 65 60"),
        Paint::outline(GOLD, 1.5),
    );
}

fn draw_watch(ctx: &mut RenderContext<'_>) {
    let strap = Element::Rect {
        x: 20.0,
        y: 55.0,
        width: 5.0,
        height: 8.0,
        rx: None,
    };
    ctx.push(LayerKind::Accessory, "watch", strap, Paint::fill("#333333"));
}
