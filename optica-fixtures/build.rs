//! Renders accessors for the fixture model into `OUT_DIR/accessors.rs`.

#[allow(dead_code)]
#[path = "src/model.rs"]
mod model;

use std::env;
use std::fs;
use std::path::PathBuf;

use optica::plan::{Generator, GeneratorOptions};
use optica::render::render;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/model.rs");

    let options = GeneratorOptions {
        scalar_defaults: [("Priority".to_string(), "Priority::Low".to_string())]
            .into_iter()
            .collect(),
        ..GeneratorOptions::default()
    };
    let plan = Generator::new(options).generate_for::<model::Entity>()?;
    let tokens = render(&plan)?;

    let out = PathBuf::from(env::var("OUT_DIR")?).join("accessors.rs");
    fs::write(out, tokens.to_string())?;
    Ok(())
}
