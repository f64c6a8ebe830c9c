//! Build script for collection-etch
//!
//! The stylesheet and script shipped with every generated page are
//! embedded with `include_str!`, so the crate must rebuild when they change.

fn main() {
    // Rebuild if embedded assets change
    println!("cargo:rerun-if-changed=src/assets/");
    println!("cargo:rerun-if-changed=build.rs");
}
