// What you SEE:
// • The image, stretched into the window with its aspect kept.
// • Mask outlines (dashed boxes + colored runs) for every mask under the area threshold.
// • click mode: LMB adds a green point, RMB a red one.
// • box mode: move to place the anchor, drag with LMB, release to commit the box.
// • everything mode: masks only, no annotation.
// • Hold the suppress key (Shift by default) to hide masks. [ / ] change the
//   area threshold. C clears points. ESC quits.

use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use tracing::info;

use mask_overlay::config::ViewerConfig;
use mask_overlay::coords::{display_scale, Viewport};
use mask_overlay::error::Error;
use mask_overlay::interaction::BoxSelection;
use mask_overlay::logging;
use mask_overlay::render::Overlay;
use mask_overlay::session::{AnnotationHost, Session};
use mask_overlay::source::{load_image, load_masks};
use mask_overlay::types::{FrameBuffer, ImageContext, Mask, Mode, Point};
use mask_overlay::window::{InputTracker, Viewer};

#[derive(Parser, Debug)]
#[command(name = "mask-overlay", about = "Annotate an image with points or a box over precomputed masks")]
struct Args {
    /// Image to annotate.
    image: PathBuf,

    /// JSON array of masks ({bbox, segmentation, area}).
    #[arg(long)]
    masks: Option<PathBuf>,

    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Hide masks covering more than this fraction of the image.
    #[arg(long)]
    threshold: Option<f32>,

    /// Viewer config (JSON).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Debug logging (RUST_LOG is honoured).
    #[arg(long)]
    debug: bool,
}

/// Keeps what the session hands back: the current points and the box flag.
#[derive(Default)]
struct Annotations {
    points: Vec<Point>,
    box_ready: bool,
}

impl AnnotationHost for Annotations {
    fn set_points(&mut self, points: Vec<Point>) {
        self.points = points;
    }

    fn set_box_ready(&mut self, ready: bool) {
        self.box_ready = ready;
        if ready {
            if let Some(b) = BoxSelection::from_points(&self.points) {
                info!(w = b.width(), h = b.height(), "box committed; ready for mask generation");
            }
        }
    }
}

fn main() -> Result<(), Error> {
    let args = Args::parse();

    /* --- Config: file first, flags on top --- */
    let mut config = match &args.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(t) = args.threshold {
        config.mask_area_threshold = t;
    }
    config.debug_log |= args.debug;
    let config = config.validated()?;
    logging::init(config.debug_log);

    /* --- Inputs from collaborators --- */
    let image = ImageContext::new(load_image(&args.image)?);
    let masks: Rc<[Mask]> = match &args.masks {
        Some(path) => load_masks(path)?.into(),
        None => Vec::<Mask>::new().into(),
    };
    info!(masks = masks.len(), mode = ?config.mode, "session start");

    /* --- Window sized to fit the image, never upscaled at start --- */
    let image_size = (image.width as f32, image.height as f32);
    let [max_w, max_h] = config.max_window;
    let start = display_scale((max_w as f32, max_h as f32), image_size).min(1.0);
    let win_w = ((image_size.0 * start).round() as usize).max(1);
    let win_h = ((image_size.1 * start).round() as usize).max(1);
    let mut viewer = Viewer::new(&config.window_title, win_w, win_h, config.suppress_key)?;

    /* --- Canvas at native image resolution --- */
    let mut canvas = FrameBuffer::new(image.width, image.height);
    let mut overlay = Overlay::new();
    let mut tracker = InputTracker::default();
    let mut session = Session::new(Annotations::default(), config.mode).with_show_overlay(config.show_overlay);
    let mut threshold = config.mask_area_threshold;

    /* ------------------------------ Main loop ------------------------------ */
    while viewer.is_open() && !viewer.esc_pressed() {
        // Fresh viewport every frame so a resize never leaves a stale scale.
        session.set_viewport(Viewport::fit(viewer.container_size(), image_size));

        if viewer.clear_pressed_once() {
            session.clear_points();
        }
        if let Some(delta) = viewer.threshold_nudge() {
            threshold = (threshold + delta).clamp(0.0, 1.0);
            info!(threshold, "mask area threshold");
        }

        for event in tracker.events(viewer.raw_input()) {
            session.handle(&event);
        }

        let scene = session.scene(&image, &masks, threshold);
        overlay.render(Some(&mut canvas), &scene);
        viewer.present(&canvas)?;
    }

    let host = session.host();
    info!(points = host.points.len(), box_ready = host.box_ready, "session end");
    Ok(())
}
