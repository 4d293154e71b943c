// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Headless simulation run
//!
//! Steps a medium-sized population for a few hundred frames with no window,
//! scripting a cursor drag partway through, and reports frame timing and
//! pool activity. It showcases:
//!
//! - Deterministic seeding of the initial population
//! - Driving the cursor pseudo-particle programmatically
//! - Rendering through a sink with no graphics backend
//!
//! # Running
//!
//! ```bash
//! cargo run --example headless --release
//! ```

use std::time::Instant;

use particle_life::{Cursor, NullSink, SimConfig, Simulation};
use rand::rngs::StdRng;
use rand::SeedableRng;

const FRAMES: u64 = 300;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("Particle Life - Headless Run");
    println!("============================\n");

    let config = SimConfig::default().with_population(900).with_workers(4);
    let mut rng = StdRng::seed_from_u64(2025);
    let mut sim = Simulation::with_rng(config, &mut rng).expect("default config is valid");

    println!(
        "Spawned {} particles on a {}x{} viewport, {} workers",
        sim.particles().len(),
        config.width,
        config.height,
        config.workers
    );

    let mut sink = NullSink;
    let started = Instant::now();

    for frame in 0..FRAMES {
        // Drag an attracting cursor across the middle of the run
        match frame {
            100 => {
                println!("frame {frame}: cursor down (attract) at center");
                sim.set_cursor(Cursor::attract(450.0, 450.0));
            }
            200 => {
                println!("frame {frame}: cursor up");
                sim.set_cursor(Cursor::inactive());
            }
            _ => {}
        }

        sim.step();
        sim.render_with(&mut sink);

        if frame % 100 == 99 {
            let elapsed = started.elapsed().as_secs_f64();
            println!(
                "frame {}: {:.1} frames/sec so far",
                frame + 1,
                (frame + 1) as f64 / elapsed
            );
        }
    }

    let elapsed = started.elapsed();
    let stats = sim.pool_stats();

    println!("\nFinished {} frames in {:.2?}", sim.frame(), elapsed);
    println!(
        "  {:.1} frames/sec, {:.2} ms/frame",
        FRAMES as f64 / elapsed.as_secs_f64(),
        elapsed.as_secs_f64() * 1000.0 / FRAMES as f64
    );
    println!(
        "Pool: {} tasks submitted, {} completed, {} panicked across {} workers",
        stats.submitted, stats.completed, stats.panicked, stats.workers
    );
}
