use std::env;
use std::io::{self, Stdout};
use std::process::ExitCode;

use analysis::{
    AnalysisRequestController, ControllerConfig, HttpAnalysisClient, OutcomeKind, TriggerOutcome,
    UiHandles,
};
use clap::Parser;
use geoview::{MapConfig, MapWidget, MercatorViewport, ViewportSelector};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod terminal;
mod viewport;

use terminal::{SpinnerIndicator, TerminalResults, TerminalTrigger};
use viewport::{CliViewport, parse_bbox};

#[derive(Parser, Debug)]
#[command(author, version, about = "Describe a map region with the analysis service")]
struct Args {
    /// Bounding box: west,south,east,north (overrides the map view)
    #[arg(long, allow_hyphen_values = true)]
    bbox: Option<String>,

    /// Map view center latitude
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Map view center longitude
    #[arg(long, allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Map view zoom level
    #[arg(long)]
    zoom: Option<f64>,

    /// Map view width in pixels
    #[arg(long, default_value_t = 1024)]
    width: u32,

    /// Map view height in pixels
    #[arg(long, default_value_t = 768)]
    height: u32,

    /// Service origin (default: $DESCRIBE_ENDPOINT or http://127.0.0.1:8000)
    #[arg(long)]
    endpoint: Option<String>,

    /// Print the tile URLs covering the map view before describing it
    #[arg(long, conflicts_with = "bbox")]
    show_tiles: bool,
}

type CliController = AnalysisRequestController<
    CliViewport,
    HttpAnalysisClient,
    TerminalTrigger,
    TerminalResults<Stdout>,
    SpinnerIndicator,
>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let endpoint = args.endpoint.clone().unwrap_or_else(|| {
        env::var("DESCRIBE_ENDPOINT").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string())
    });

    let map = MapConfig::default();
    let viewport = viewport_from_args(&args, &map)?;
    if args.show_tiles {
        if let CliViewport::Mercator(view) = &viewport {
            for tile in view.visible_tiles() {
                println!("{}", map.tile_layer.tile_url(tile));
            }
        }
    }

    let bbox = viewport.viewport_bounds()?;
    info!(
        north = bbox.north(),
        south = bbox.south(),
        east = bbox.east(),
        west = bbox.west(),
        endpoint = %endpoint,
        "describing region"
    );

    let controller: CliController = AnalysisRequestController::new(
        ViewportSelector::new(viewport),
        HttpAnalysisClient::new(endpoint),
        UiHandles {
            trigger: TerminalTrigger::default(),
            results: TerminalResults::new(io::stdout()),
            busy: SpinnerIndicator::new("Analyzing region..."),
        },
        ControllerConfig::default(),
    );

    let outcome = controller.trigger().await;
    Ok(ExitCode::from(exit_status(outcome)))
}

fn viewport_from_args(
    args: &Args,
    map: &MapConfig,
) -> Result<CliViewport, viewport::ViewportArgError> {
    if let Some(raw) = &args.bbox {
        return Ok(CliViewport::Fixed(parse_bbox(raw)?));
    }
    let view = MercatorViewport::new(
        args.lat.unwrap_or(map.center[0]),
        args.lon.unwrap_or(map.center[1]),
        args.zoom.unwrap_or(map.zoom),
        args.width,
        args.height,
    )?;
    Ok(CliViewport::Mercator(view))
}

fn exit_status(outcome: TriggerOutcome) -> u8 {
    match outcome {
        TriggerOutcome::Completed(OutcomeKind::Description) => 0,
        TriggerOutcome::Ignored => 1,
        TriggerOutcome::Completed(OutcomeKind::ApplicationError) => 2,
        TriggerOutcome::Completed(OutcomeKind::TransportError) => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis::{AnalysisResult, AnalysisService, TransportError, TriggerControl};
    use clap::CommandFactory;
    use geoview::BoundingBox;
    use pretty_assertions::assert_eq;

    #[test]
    fn args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn bbox_wins_over_map_view() {
        let args = Args::parse_from([
            "describe",
            "--bbox",
            "-0.12,51.49,-0.06,51.52",
            "--zoom",
            "3",
        ]);
        let viewport = viewport_from_args(&args, &MapConfig::default()).unwrap();
        assert!(matches!(viewport, CliViewport::Fixed(_)));
        assert_eq!(viewport.viewport_bounds().unwrap().west(), -0.12);
    }

    #[test]
    fn show_tiles_needs_a_map_view() {
        let err = Args::try_parse_from([
            "describe",
            "--bbox",
            "-0.12,51.49,-0.06,51.52",
            "--show-tiles",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);

        let args = Args::try_parse_from(["describe", "--zoom", "14", "--show-tiles"]).unwrap();
        assert!(args.show_tiles);
    }

    #[test]
    fn map_view_defaults_to_configured_center() {
        let args = Args::parse_from(["describe", "--lon", "-73.98"]);
        let CliViewport::Mercator(view) = viewport_from_args(&args, &MapConfig::default()).unwrap()
        else {
            panic!("expected a map view");
        };
        assert_eq!(view.center(), (51.505, -73.98));
        assert_eq!(view.zoom(), 13.0);
        assert_eq!(view.size_px(), (1024, 768));
    }

    #[test]
    fn exit_status_only_succeeds_on_description() {
        assert_eq!(exit_status(TriggerOutcome::Completed(OutcomeKind::Description)), 0);
        assert_eq!(exit_status(TriggerOutcome::Ignored), 1);
        assert_eq!(exit_status(TriggerOutcome::Completed(OutcomeKind::ApplicationError)), 2);
        assert_eq!(exit_status(TriggerOutcome::Completed(OutcomeKind::TransportError)), 3);
    }

    struct Refused;

    impl AnalysisService for Refused {
        async fn describe(&self, _bbox: &BoundingBox) -> Result<AnalysisResult, TransportError> {
            Err(TransportError::Request("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn terminal_run_restores_controls_after_failure() {
        let bbox = BoundingBox::new(1.0, 0.0, 1.0, 0.0).unwrap();
        let controller = AnalysisRequestController::new(
            ViewportSelector::new(CliViewport::Fixed(bbox)),
            Refused,
            UiHandles {
                trigger: TerminalTrigger::default(),
                results: TerminalResults::new(Vec::new()),
                busy: SpinnerIndicator::new("Analyzing region..."),
            },
            ControllerConfig::default(),
        );

        let outcome = controller.trigger().await;
        assert_eq!(outcome, TriggerOutcome::Completed(OutcomeKind::TransportError));
        assert!(controller.ui().trigger.is_enabled());
        assert!(!controller.ui().busy.is_visible());
    }
}
