// What you SEE:
// • A black canvas with a logo overlay and a script-font banner on top.
// • Move the mouse: a blue hover square follows the cursor.
// • Drag Left Mouse: a green cursor disc plus a rubber-band line preview;
//   releasing commits the white line into the canvas.
// • R/G/B select a channel; Up/Down adjust it and flat-fill the canvas.
// • A readout of the channel values sits at the bottom left. ESC quits.

mod controller;
mod draw;
mod error;
mod font;
mod input;
mod overlay;
mod render;
mod types;

use std::collections::VecDeque;
use std::path::PathBuf;

use clap::Parser;
use log::info;

use controller::Controller;
use draw::Drawer;
use error::Error;
use input::Event;
use overlay::Overlay;

/// Overlay anchors from the canvas top-left, and the banner styling.
const LOGO_POS: (usize, usize) = (10, 10);
const BANNER_POS: (usize, usize) = (120, 10);
const BANNER_SIZE: f32 = 30.0;
const BANNER_COLOR: [u8; 3] = [255, 0, 0];

#[derive(Parser, Debug)]
#[command(name = "sketchpad")]
#[command(version, about = "Interactive overlay canvas with stroke drawing and channel fill")]
struct Cli {
    /// Canvas width in pixels
    #[arg(long, default_value_t = 800)]
    width: usize,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 600)]
    height: usize,

    /// Logo image composited near the top-left corner
    #[arg(long, value_name = "FILE", default_value = "data/logo.png")]
    logo: PathBuf,

    /// Script font for the banner text
    #[arg(long, value_name = "FILE", default_value = "data/NanumPenScript-Regular.ttf")]
    font: PathBuf,

    /// Banner text composited next to the logo
    #[arg(long, default_value = "Happy sketching!")]
    text: String,
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let cli = Cli::parse();

    info!("controls: drag LMB to draw, R/G/B select a channel, Up/Down fill, ESC quits");

    // Assets load once; a failure degrades to the placeholder or the
    // built-in font inside the constructors, never past this point.
    let overlays = vec![
        Overlay::from_image(LOGO_POS.0, LOGO_POS.1, &cli.logo),
        Overlay::text(
            BANNER_POS.0,
            BANNER_POS.1,
            &cli.text,
            BANNER_SIZE,
            BANNER_COLOR,
            &cli.font,
        ),
    ];

    let mut controller = Controller::new(cli.width, cli.height);
    let mut drawer = Drawer::new("Sketchpad", cli.width, cli.height)?;

    let mut packed: Vec<u32> = Vec::new();
    let mut pending: VecDeque<Event> = VecDeque::new();

    // Initial frame, before any event arrives.
    let mut frame = controller.scene();
    render::compose(&mut frame, &overlays, &controller.status());
    frame.pack_into(&mut packed);

    while drawer.is_open() {
        // Present blocks to the frame-rate cap and polls fresh input.
        drawer.present(&packed, cli.width, cli.height)?;
        drawer.drain_events(&mut pending);

        // At most one event per iteration, in strict arrival order, so the
        // presented frame always reflects the last processed event.
        match pending.pop_front() {
            Some(Event::Quit) => break,
            Some(Event::Pointer(ev)) => controller.on_pointer(ev),
            Some(Event::Key(ev)) => controller.on_key(ev),
            None => continue,
        }

        frame = controller.scene();
        render::compose(&mut frame, &overlays, &controller.status());
        frame.pack_into(&mut packed);
    }

    info!("closing");
    Ok(())
}
