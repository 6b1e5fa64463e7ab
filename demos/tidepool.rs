//! Deep-sea variant of the backdrop: dark wash, cyan links, pale glyphs.
//!
//! Run with: `cargo run --example tidepool`

use driftfield::prelude::*;

fn main() -> Result<(), RunError> {
    env_logger::init();

    Backdrop::new()
        .with_title("tidepool")
        .with_visuals(|v| {
            v.wash(Vec3::new(0.01, 0.03, 0.06), 0.16)
                .link(Vec3::new(0.1, 0.75, 0.8), 0.12)
                .glyph(Vec3::new(0.55, 0.95, 0.85));
        })
        .run()
}
