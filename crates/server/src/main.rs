mod config;
mod response;
mod routes;
mod static_files;

use std::process;

use clap::Parser;

use facegate_core::detection::infrastructure::landmark_eye_detector::LandmarkEyeDetector;
use facegate_core::detection::infrastructure::onnx_yolo_detector::OnnxYoloDetector;
use facegate_core::pipeline::face_analyzer::FaceAnalyzer;
use facegate_core::pipeline::face_service::FaceService;
use facegate_core::recognition::infrastructure::arcface_encoder::ArcFaceEncoder;
use facegate_core::recognition::infrastructure::directory_gallery::DirectoryGallery;
use facegate_core::shared::constants::{
    EMBEDDING_MODEL_NAME, EMBEDDING_MODEL_URL, YOLO_MODEL_NAME, YOLO_MODEL_URL,
};
use facegate_core::shared::frame::Frame;
use facegate_core::shared::model_resolver;
use facegate_core::sketch::infrastructure::directory_sketch_store::DirectorySketchStore;
use facegate_core::sketch::infrastructure::edge_sketch_renderer::EdgeSketchRenderer;

use crate::config::{ServerArgs, ServerConfig};
use crate::routes::AppState;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{e}");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerArgs::parse().into_config()?;
    config.validate()?;

    // Model download uses a blocking client, so the service is built before
    // the async runtime starts.
    let service = build_service(&config)?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(serve(config, service))
}

fn build_service(config: &ServerConfig) -> Result<FaceService, Box<dyn std::error::Error>> {
    let bundled = config.model_dir.as_deref();
    let yolo_path = model_resolver::resolve(
        YOLO_MODEL_NAME,
        YOLO_MODEL_URL,
        bundled,
        Some(download_progress("face detection")),
    )?;
    let arcface_path = model_resolver::resolve(
        EMBEDDING_MODEL_NAME,
        EMBEDDING_MODEL_URL,
        bundled,
        Some(download_progress("face embedding")),
    )?;

    let detector = OnnxYoloDetector::new(&yolo_path, config.confidence)?;
    let encoder = ArcFaceEncoder::new(&arcface_path)?;
    let mut analyzer = FaceAnalyzer::new(Box::new(detector), Box::new(encoder));

    let gallery = DirectoryGallery::open(&config.known_faces_dir, &mut |frame: &Frame| {
        analyzer.encode_first(frame)
    })?;
    let sketch_store = DirectorySketchStore::new(config.sketch_dir())?;

    Ok(FaceService::new(
        analyzer,
        Box::new(gallery),
        Box::new(LandmarkEyeDetector::default()),
        Box::new(EdgeSketchRenderer::default()),
        Box::new(sketch_store),
    )
    .with_match_threshold(config.match_threshold))
}

async fn serve(config: ServerConfig, service: FaceService) -> Result<(), Box<dyn std::error::Error>> {
    log::info!("{} known faces", service.known_face_count());
    let state = AppState::new(service, config.static_dir.clone());
    let app = routes::router(state, config.max_body_bytes);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("Listening on http://{addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Cannot listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}

fn download_progress(label: &'static str) -> model_resolver::ProgressFn {
    Box::new(move |downloaded, total| {
        if total > 0 {
            let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
            eprint!("\rDownloading {label} model... {pct}%");
            if downloaded >= total {
                eprintln!();
            }
        } else {
            eprint!("\rDownloading {label} model... {downloaded} bytes");
        }
    })
}
