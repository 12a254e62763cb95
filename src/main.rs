use eframe::CreationContext;
use leafhealth::app::LeafHealthApp;
use leafhealth::config::ClientConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stdout)
        .compact()
        .init();

    let config = ClientConfig::from_env();
    info!("Starting LeafHealth, prediction endpoint: {}", config.endpoint);

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([560.0, 640.0])
            .with_min_inner_size([420.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        "LeafHealth",
        options,
        Box::new(move |cc: &CreationContext| Box::new(LeafHealthApp::new(cc, config))),
    )
}
