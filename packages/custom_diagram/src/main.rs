
#[macro_use]
extern crate tracing;

use custom_diagram::{
    logging::init_logging,
    catalog::Catalog,
    config::{Config, CONFIG_FILE_NAME},
    nei::{HostStack, NeiHandler},
    registry::{Registry, default_entries},
};
use diagram::{
    context::Modifiers,
    effect::HostEffects,
    geom::{point, dimension},
    grid::GRID,
    group::PageRenderer,
    gui_manager::{GuiFrame, SIDE_MARGIN, TOP_MARGIN},
};
use draw::recording::{MonospaceMetrics, RecordingCanvas};
use std::{
    sync::Arc,
    env::args,
};


const CLI_INTRO: &'static str = r#"Custom diagram engine demo.

Renders fluid container diagrams into a recording canvas."#;

const CLI_HELP: &'static str = r#"
Examples:

    [this command]
    Run against the built-in sample catalog.

    [this command] --catalog=catalog.json --fluid=lava
    Run against a catalog file, looking up a different fluid.

    [this command] --write-config
    Write the config file, with every group's visibility filled in.

Env var examples:
    RUST_LOG=diagram=trace
    Changes logging levels"#;


fn main() {
    println!("{}", CLI_INTRO);
    if let Err(e) = init_logging() {
        eprintln!("unable to initialize logging: {:#}", e);
    }

    let args = args().collect::<Vec<_>>();
    if args.get(1).map(String::as_str) == Some("--help") {
        println!("{}", CLI_HELP);
    } else {
        run(&args);
    }
}

fn arg_value<'a>(args: &'a [String], prefix: &str) -> Option<&'a str> {
    args.iter()
        .filter_map(|arg| arg.strip_prefix(prefix))
        .next()
}

fn run(args: &[String]) {
    let mut config = Config::read(CONFIG_FILE_NAME);
    let catalog = match arg_value(args, "--catalog=") {
        Some(path) => match Catalog::read(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                error!(%e, "unable to load catalog");
                return;
            }
        },
        None => Catalog::sample(),
    };
    let fluid = arg_value(args, "--fluid=").unwrap_or("water");

    let registry = Registry::initialize(
        default_entries(),
        &config,
        Arc::new(catalog),
        Arc::new(MonospaceMetrics::default()),
    );
    if args.iter().any(|arg| arg == "--write-config") {
        config.add_default_visibilities(registry.info_list());
        match config.write(CONFIG_FILE_NAME) {
            Ok(()) => info!("wrote {}", CONFIG_FILE_NAME),
            Err(e) => error!(%e, "unable to write config"),
        }
    }

    for group in registry.generate_diagram_groups(&config) {
        let visibility = config.visibility(group.info());
        let handler = NeiHandler::new(group, visibility);
        let stack = HostStack::Fluid { id: fluid.to_owned(), amount: 1000, nbt: None };
        let loaded = handler.get_usage_handler("fluid", &[stack], Modifiers::default());
        info!(handler = %handler.handler_id(), pages = loaded.num_pages(), "looked up {}", fluid);
        render(loaded);
    }
}

// draw each page, then click whatever is at the top of the second column
fn render(mut handler: NeiHandler) {
    let mut canvas = RecordingCanvas::new();
    let gui_origin = point(125, 37);
    let page_offset = point(SIDE_MARGIN, TOP_MARGIN);
    for page in 0..handler.num_pages() {
        let frame = GuiFrame {
            mouse: gui_origin + page_offset + GRID.grid(1, 0),
            gui_origin,
            gui_size: dimension(176, 166),
            page_offset,
            modifiers: Modifiers::default(),
        };
        handler.on_update(frame.modifiers);
        handler.draw_background(page, &mut canvas, &frame);
        handler.draw_foreground(page, &mut canvas, &frame);
        handler.draw_tooltip(page, &mut canvas, &frame);
        info!(%page, commands = canvas.commands().len(), texts = ?canvas.texts(), "rendered page");
        canvas.clear();

        let mut effects = HostEffects::new();
        if handler.mouse_clicked(0, page, &frame, &mut effects) {
            for effect in effects.drain() {
                info!(?effect, "host effect");
            }
        }
    }
}
