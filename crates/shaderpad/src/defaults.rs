//! `shaderpad defaults`: prints the built-in shader stages so users can seed
//! an editable fragment file.

use crate::cli::DefaultsStage;

pub fn run(stage: DefaultsStage) {
    match stage {
        DefaultsStage::Vertex => print!("{}", sources::BUILTIN_VERTEX),
        DefaultsStage::Fragment => print!("{}", sources::BUILTIN_FRAGMENT),
    }
}
