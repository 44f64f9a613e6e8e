//! The scene catalogue.

mod greeting;
mod leibniz;
mod matrix;
mod progression;
mod pythagoras;

use anyhow::{Result, bail};

use anim_scene::Scene;

pub use greeting::HiScene;
pub use leibniz::FastCalculationsScene;
pub use matrix::{
    CenteredGeometryScene, CenteredGeometryWithTextScene, LinearEquationScene,
    MatrixDeterminantGeometryScene, MatrixExampleScene, MatrixMultiplicationGeometryScene,
    NumericalGeometricScene, OpeningScene,
};
pub use progression::ArithmeticProgressionScene;
pub use pythagoras::{PythagoreanTheoremProofScene, PythagoreanTheoremScene};

/// Every scene, in presentation order.
pub fn catalogue() -> Vec<Box<dyn Scene>> {
    vec![
        Box::new(HiScene),
        Box::new(OpeningScene),
        Box::new(CenteredGeometryScene),
        Box::new(CenteredGeometryWithTextScene),
        Box::new(NumericalGeometricScene),
        Box::new(LinearEquationScene),
        Box::new(ArithmeticProgressionScene),
        Box::new(MatrixMultiplicationGeometryScene),
        Box::new(MatrixDeterminantGeometryScene),
        Box::new(FastCalculationsScene),
        Box::new(MatrixExampleScene),
        Box::new(PythagoreanTheoremScene),
        Box::new(PythagoreanTheoremProofScene),
    ]
}

/// The scenes named in `names`, in the order given. No names selects the
/// whole catalogue.
pub fn select(names: &[String]) -> Result<Vec<Box<dyn Scene>>> {
    if names.is_empty() {
        return Ok(catalogue());
    }
    let mut available = catalogue();
    let mut selected = Vec::with_capacity(names.len());
    for name in names {
        match available.iter().position(|scene| scene.name() == name) {
            Some(index) => selected.push(available.remove(index)),
            None => bail!("unknown scene: {name}"),
        }
    }
    Ok(selected)
}

#[cfg(test)]
pub(crate) fn test_config() -> anim_scene::SceneConfig {
    anim_scene::SceneConfig::default()
        .with_statements_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/../../statements"))
}

#[cfg(test)]
mod tests {
    use anim_scene::{RecordingRenderer, SceneRunner};

    use super::*;

    #[test]
    fn test_catalogue_names_unique() {
        let scenes = catalogue();
        let mut names: Vec<&str> = scenes.iter().map(|s| s.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), scenes.len());
    }

    #[test]
    fn test_select_keeps_order() {
        let names = vec!["HiScene".to_string(), "OpeningScene".to_string()];
        let selected = select(&names).unwrap();
        let got: Vec<&str> = selected.iter().map(|s| s.name()).collect();
        assert_eq!(got, ["HiScene", "OpeningScene"]);
    }

    #[test]
    fn test_select_unknown() {
        let err = select(&["Nope".to_string()]).err().unwrap();
        assert_eq!(err.to_string(), "unknown scene: Nope");
    }

    #[test]
    fn test_every_scene_plays() {
        let mut runner = SceneRunner::new(RecordingRenderer::new(), test_config());
        for scene in catalogue() {
            let summary = runner.run(scene.as_ref()).unwrap();
            assert!(summary.steps > 0, "{} has no steps", scene.name());
        }
    }
}
