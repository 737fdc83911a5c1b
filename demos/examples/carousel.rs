// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A four-slide carousel that pauses while hovered and resumes after a
//! quiet period.
//!
//! Run:
//! - `cargo run -p cadence_demos --example carousel`

use cadence_autoplay::{AutoplayConfig, AutoplayEvent, EngagementAutoplay};
use cadence_engagement::Delay;
use cadence_timer::Millis;
use kurbo::{Point, Rect};

const SLIDES: usize = 4;
const STAGE: Rect = Rect::new(0.0, 100.0, 800.0, 500.0);

fn main() {
    cadence_demos::init_tracing();

    let config = AutoplayConfig {
        pause_on_engage: true,
        resume_delay: 2_000,
        ..Default::default()
    };
    let mut carousel: EngagementAutoplay<&str, usize> =
        EngagementAutoplay::new(config, SLIDES, Delay::from(1_500));

    carousel.regions_mut().insert_container("hero", STAGE);
    for slide in 0..SLIDES {
        carousel
            .regions_mut()
            .insert_item(slide, "hero", STAGE, slide == 0);
    }
    carousel.start(0);
    tracing::info!(slides = SLIDES, "carousel started");

    let mut now: Millis = 0;
    while now <= 14_000 {
        match now {
            3_800 => {
                let current = carousel.current_index();
                println!("{now:>6} ms  pointer enters slide {current}");
                carousel.on_item_enter(now, &current);
            }
            6_000 => {
                println!("{now:>6} ms  pointer leaves the carousel");
                carousel.on_item_leave(now, None);
            }
            7_000 => {
                let current = carousel.current_index();
                println!("{now:>6} ms  click on slide {current}");
                carousel.on_click(now, Point::new(400.0, 300.0), true);
            }
            9_500 => {
                println!("{now:>6} ms  click outside");
                carousel.on_click(now, Point::new(400.0, 900.0), true);
            }
            _ => {}
        }

        for event in carousel.tick(now) {
            match event {
                AutoplayEvent::Advanced { index } => {
                    carousel.regions_mut().set_active_only(&index);
                    println!("{now:>6} ms  advanced to slide {index}");
                }
                AutoplayEvent::Resumed => println!("{now:>6} ms  resumed"),
            }
        }
        now += 100;
    }

    println!(
        "done on slide {} (paused: {})",
        carousel.current_index(),
        carousel.is_paused()
    );
}
