// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An auto-scrolling testimonial inside a carousel slide.
//!
//! The inner viewport scrolls on its own; a wheel gesture over it pauses
//! the scroll and, through the published user phases, holds the carousel
//! too. Both resume once the user stops.
//!
//! Run:
//! - `cargo run -p cadence_demos --example viewport`

use cadence_autoplay::{AutoplayConfig, AutoplayEvent, EngagementAutoplay};
use cadence_autoscroll::{
    AutoScrollConfig, EngagementAutoScroll, EngagementAutoScrollConfig, FrameStep,
    SimulatedViewport,
};
use cadence_demos::FRAME;
use cadence_engagement::Delay;
use cadence_event_state::scroll::WheelInput;
use cadence_timer::Millis;
use kurbo::Rect;

const SCREEN: Rect = Rect::new(0.0, 0.0, 1280.0, 800.0);
const SLIDE: Rect = Rect::new(0.0, 200.0, 600.0, 600.0);

fn main() {
    cadence_demos::init_tracing();

    let mut carousel: EngagementAutoplay<u8, u8> = EngagementAutoplay::new(
        AutoplayConfig {
            pause_on_engage: true,
            resume_delay: 1_500,
            ..Default::default()
        },
        3,
        Delay::from(4_000),
    );
    carousel.regions_mut().insert_container(0, SLIDE);
    carousel.regions_mut().insert_item(0, 0, SLIDE, true);
    carousel.start(0);

    let mut host = SimulatedViewport::new(1_200.0, 400.0);
    let mut viewport = EngagementAutoScroll::new(EngagementAutoScrollConfig {
        scroll: AutoScrollConfig {
            speed: 60.0,
            start_delay: 500,
            ..Default::default()
        },
        ..Default::default()
    });
    viewport.set_active(0, true, &mut host);
    viewport.update_visibility(0, Some(SLIDE), SCREEN, &mut host);
    tracing::info!(in_view = viewport.in_view(), "viewport attached");

    let mut now: Millis = 0;
    let mut last_report = 0;
    while now <= 9_000 {
        if (2_000..2_200).contains(&now) {
            viewport.on_wheel(now, WheelInput::vertical(-30.0), &mut host);
        }

        viewport.tick(now, &mut host);
        if let FrameStep::Halted = viewport.frame(now, &mut host) {
            println!("{now:>6} ms  reached the end of the testimonial");
        }
        for phase in viewport.signals().drain().collect::<Vec<_>>() {
            println!("{now:>6} ms  viewport reports {phase:?}");
            carousel.on_viewport_signal(now, phase, Some(&0));
        }

        for event in carousel.tick(now) {
            match event {
                AutoplayEvent::Advanced { index } => {
                    println!("{now:>6} ms  carousel advanced to {index}");
                }
                AutoplayEvent::Resumed => println!("{now:>6} ms  carousel resumed"),
            }
        }

        if now - last_report >= 1_000 {
            last_report = now;
            println!(
                "{now:>6} ms  scroll_top {:>6.1}  viewport paused: {:<5}  carousel paused: {}",
                host.scroll_top,
                viewport.is_paused(),
                carousel.is_paused()
            );
        }
        now += FRAME;
    }
}
