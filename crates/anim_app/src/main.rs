//! # anim_app: Scene driver
//!
//! Builds and plays the mathanim scene catalogue.
//!
//! ## Startup Sequence
//!
//! 1. Read [`SceneConfig`] from the environment (`MATHANIM_STATEMENT_DIR`,
//!    `MATHANIM_LANG`).
//! 2. Select scenes: every scene, or only those named on the command line.
//! 3. Construct each scene, optionally print its JSON plan
//!    (`MATHANIM_PLAN=1`), and play it through the tracing renderer.

mod scenes;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use anim_scene::{SceneConfig, ScenePlan, SceneRunner, TraceRenderer};

/// Set to `1` to print each scene's plan as JSON on stdout.
const PLAN_ENV: &str = "MATHANIM_PLAN";

fn main() -> Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("anim_app=info".parse()?)
                .add_directive("anim_scene=info".parse()?),
        )
        .init();

    let config = SceneConfig::from_env();
    let print_plan = std::env::var(PLAN_ENV).is_ok_and(|v| v == "1");
    info!(
        statements = %config.statements_dir.display(),
        language = %config.language,
        "mathanim starting"
    );

    let names: Vec<String> = std::env::args().skip(1).collect();
    let selected = scenes::select(&names)?;

    let mut runner = SceneRunner::new(TraceRenderer, config.clone());
    for scene in &selected {
        let mut plan = ScenePlan::build(scene.as_ref(), &config)
            .with_context(|| format!("failed to construct scene {}", scene.name()))?;
        if print_plan {
            println!("{}", plan.to_json()?);
        }
        let summary = runner
            .play(&mut plan)
            .with_context(|| format!("failed to play scene {}", scene.name()))?;
        info!(
            scene = scene.name(),
            steps = summary.steps,
            duration = summary.duration,
            "scene rendered"
        );
    }

    info!(scenes = selected.len(), "mathanim finished");
    Ok(())
}
