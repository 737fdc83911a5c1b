// Copyright 2025 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared setup for the simulations under `examples/`.
//!
//! Run one with `cargo run -p cadence_demos --example carousel`, and set
//! `RUST_LOG=debug` to see the state machines' own logging.

use cadence_timer::Millis;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Simulated display frame interval.
pub const FRAME: Millis = 16;

/// Install a formatting subscriber filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}
