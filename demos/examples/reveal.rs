// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cards revealing as the page scrolls, and a border that fills while a
//! card is engaged.
//!
//! Run:
//! - `cargo run -p cadence_demos --example reveal`

use cadence_animate::{
    AnimatedElement, AnimationEdge, EngageTriggers, EngagedByTriggers, EngagedConfig,
    EngagementEdge, ProgressMode, ReversibleProgress,
};
use cadence_demos::FRAME;
use cadence_timer::Millis;
use kurbo::Rect;

const VIEWPORT: Rect = Rect::new(0.0, 0.0, 1280.0, 800.0);
const CARD_HEIGHT: f64 = 240.0;

fn card_at(index: usize, scroll: f64) -> Rect {
    #[allow(clippy::cast_precision_loss, reason = "a handful of cards")]
    let top = 900.0 + index as f64 * 320.0 - scroll;
    Rect::new(100.0, top, 1180.0, top + CARD_HEIGHT)
}

fn main() {
    cadence_demos::init_tracing();

    let mut cards: Vec<AnimatedElement> = (0..3).map(|_| AnimatedElement::default()).collect();
    let mut border: EngagedByTriggers<usize> = EngagedByTriggers::new(EngagedConfig {
        triggers: EngageTriggers::VISIBLE,
        ..Default::default()
    });
    let mut fill = ReversibleProgress::new(1_200, ProgressMode::BackAndForth);
    tracing::info!(cards = cards.len(), "page loaded");

    let mut now: Millis = 0;
    let mut scroll = 0.0;
    while now <= 8_000 {
        // Scroll down for four seconds, then back up.
        scroll = if now < 4_000 { scroll + 6.0 } else { (scroll - 6.0_f64).max(0.0) };

        for (index, card) in cards.iter_mut().enumerate() {
            match card.update(Some(card_at(index, scroll)), VIEWPORT) {
                Some(AnimationEdge::Started) => {
                    println!("{now:>6} ms  card {index} in:  {}", card.props().style_attribute());
                }
                Some(AnimationEdge::Reversed) => println!("{now:>6} ms  card {index} out"),
                None => {}
            }
        }

        match border.update_visibility(Some(card_at(0, scroll)), VIEWPORT) {
            Some(EngagementEdge::Engaged) => {
                println!("{now:>6} ms  border engaged");
                fill.set_engaged(true);
            }
            Some(EngagementEdge::Disengaged) => {
                println!("{now:>6} ms  border disengaged at {:.0}%", fill.percent());
                fill.set_engaged(false);
            }
            None => {}
        }
        fill.frame(now);

        now += FRAME;
    }
    println!("border fill ended at {:.0}%", fill.percent());
}
