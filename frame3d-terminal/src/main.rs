//! frame3d terminal demo - rotating textured cube
//!
//! Controls:
//!   - WASD / Arrow Keys: Rotate the cube about its own axes
//!   - E/C: Roll
//!   - Z/X: Move the cube along the view axis
//!   - P: Toggle perspective/orthographic projection
//!   - R: Reset the cube
//!   - Q/ESC: Quit

use clap::Parser;
use std::io;
use frame3d_core::Mesh;
use frame3d_terminal::{TerminalApp, ViewerConfig};

fn main() -> io::Result<()> {
    env_logger::init();
    let config = ViewerConfig::parse();
    log::info!("starting viewer with {:?}", config);

    let cube = Mesh::cube(config.size);
    for (index, triangle) in cube.triangles.iter().enumerate() {
        if let Err(err) = triangle.tangent_basis() {
            log::warn!("triangle {} has no tangent basis: {}", index, err);
        }
    }

    println!("frame3d terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(cube, config)?;
    app.run()?;

    println!("Thank you for using the frame3d terminal renderer!");
    Ok(())
}
