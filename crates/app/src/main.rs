//! Entry point for the mesh viewer.
//! Loads one OBJ, recenters it, replays a key script and reports the result.

mod config;

use anyhow::{Context, Result};
use corelib::Session;

use crate::config::ViewerConfig;

fn print_matrix(label: &str, rows: [[f32; 4]; 4]) {
    println!("{label}:");
    for row in rows {
        println!(
            "  [{:>10.4} {:>10.4} {:>10.4} {:>10.4}]",
            row[0], row[1], row[2], row[3]
        );
    }
}

fn report(session: &Session) {
    let mesh = session.mesh();
    println!(
        "vertices: {} ({:?}, {} bytes/vertex, {} bytes)",
        mesh.vertex_count(),
        mesh.layout(),
        mesh.stride_bytes(),
        mesh.draw_bytes().len()
    );
    println!("bounds:   {} .. {}", mesh.bounds.min, mesh.bounds.max);
    println!("center:   {}", mesh.center);
    println!("pivot:    {}", session.transform().pivot());
    println!(
        "display:  operation={:?} wireframe={} textured={}",
        session.operation(),
        session.wireframe(),
        session.textured()
    );
    print_matrix("model", session.transform().model_rows());
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = ViewerConfig::from_args(&args)?;
    log::info!(
        "Starting mesh-viewer. obj={}, window_size={}x{}, fov={}, keys={}",
        config.obj_path.display(),
        config.width,
        config.height,
        config.fov_y_deg,
        config.keys.len()
    );

    let mesh = asset::load_obj_from_path(&config.obj_path)
        .with_context(|| format!("Failed to load mesh {}", config.obj_path.display()))?;
    log::info!(
        "Loaded {} positions, {} faces (normals: {})",
        mesh.positions.len(),
        mesh.faces.len(),
        mesh.has_normals
    );
    if mesh.is_empty() {
        log::warn!("Mesh has no faces; nothing would be drawn.");
    }

    let mut session = Session::with_fov(mesh, config.fov_y_deg.to_radians(), config.aspect());
    for key in &config.keys {
        if session.handle_key(*key) {
            log::debug!("{:?} -> redisplay", key);
        }
    }

    report(&session);
    log::info!("Camera distance {:.3}. Bye!", session.camera().distance());
    Ok(())
}
